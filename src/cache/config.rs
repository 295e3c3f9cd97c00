//! Cache TTL presets per data type
//!
//! TTLs tuned for how quickly each kind of upstream data changes:
//! - Prices: short (move every block)
//! - Metadata / protocol data: medium (changes rarely)
//! - Confirmed transactions: long (immutable once finalized)

pub struct CacheTtl;

impl CacheTtl {
    /// Spot token price
    pub const TOKEN_PRICE: u64 = 60;

    /// Name, symbol, decimals, security flags
    pub const TOKEN_METADATA: u64 = 600;

    /// Wallet portfolio and profile
    pub const WALLET_PROFILE: u64 = 300;

    /// Parsed transactions
    pub const TRANSACTION: u64 = 3600;

    /// DeFi protocol TVL and yields
    pub const DEFI_PROTOCOL: u64 = 600;

    /// Jupiter aggregated price
    pub const JUPITER_PRICE: u64 = 60;

    /// Top holder lists
    pub const HOLDER_DATA: u64 = 300;
}
