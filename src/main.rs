use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use solenrich::{
    cache::Cache,
    config::{self, Config, ParallelSettings},
    logger::{self, LogLevel, LogTag},
    parallel::{parallel_fetch, parallel_fetch_configured, ParallelTask},
};
use std::path::PathBuf;
use std::time::Duration;

/// Operator tool for the SolEnrich cache and fan-out primitives.
///
/// Configuration comes from `data/config.toml` (or `--config`) plus the
/// environment and a `.env` file. Note that the in-memory backend only lives
/// for the duration of one invocation.
#[derive(Parser, Debug)]
#[command(name = "solenrich", about = "Inspect the SolEnrich cache and fan-out")]
struct Args {
    /// Alternate TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show which cache backend the current configuration selects
    Backend,

    /// Read, write or delete a cache entry
    #[command(subcommand)]
    Cache(CacheCommand),

    /// Run a synthetic fan-out batch to check timeout and fallback behaviour
    Fanout {
        /// Per-task timeout (defaults to parallel.default_timeout_ms)
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Task as `name=delay_ms[:fail][:fallback=VALUE]`, repeatable
        #[arg(long = "task", required = true, value_parser = parse_task_spec)]
        tasks: Vec<TaskSpec>,
    },
}

#[derive(Subcommand, Debug)]
enum CacheCommand {
    /// Print the JSON value stored under KEY
    Get { key: String },

    /// Store a JSON value under KEY
    Set {
        key: String,
        /// JSON document, e.g. '{"price":1.2}'
        value: String,
        #[arg(long, default_value_t = 60)]
        ttl: u64,
    },

    /// Delete KEY
    Del { key: String },
}

#[derive(Debug, Clone, PartialEq)]
struct TaskSpec {
    name: String,
    delay_ms: u64,
    fail: bool,
    fallback: Option<String>,
}

fn parse_task_spec(raw: &str) -> Result<TaskSpec, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=delay_ms, got '{}'", raw))?;
    if name.is_empty() {
        return Err("task name must not be empty".to_string());
    }

    let mut parts = rest.split(':');
    let delay_ms = parts
        .next()
        .unwrap_or_default()
        .parse::<u64>()
        .map_err(|e| format!("invalid delay in '{}': {}", raw, e))?;

    let mut spec = TaskSpec {
        name: name.to_string(),
        delay_ms,
        fail: false,
        fallback: None,
    };

    for part in parts {
        match part.split_once('=') {
            None if part == "fail" => spec.fail = true,
            Some(("fallback", value)) => spec.fallback = Some(value.to_string()),
            _ => return Err(format!("unknown task option '{}'", part)),
        }
    }

    Ok(spec)
}

fn load(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => {
            let _ = dotenv::dotenv();
            let mut config = config::load_config_from_path(path)?;
            config::apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
            config
        }
        None => config::load_config()?,
    };

    let level = config.logging.level.parse::<LogLevel>().unwrap_or_else(|e| {
        eprintln!("{}, defaulting to info", e);
        LogLevel::Info
    });
    logger::init(level);

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load(&args).context("failed to load configuration")?;

    let result = match args.command {
        Command::Backend => {
            let cache = Cache::new(&config.cache);
            println!("{}", cache.backend_kind());
            Ok(())
        }
        Command::Cache(command) => run_cache(Cache::new(&config.cache), command).await,
        Command::Fanout { timeout_ms, tasks } => {
            run_fanout(tasks, timeout_ms, &config.parallel).await
        }
    };

    if let Err(e) = &result {
        logger::error(LogTag::System, &format!("{:#}", e));
    }
    result
}

async fn run_cache(cache: Cache, command: CacheCommand) -> Result<()> {
    match command {
        CacheCommand::Get { key } => match cache.get::<serde_json::Value>(&key).await {
            Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            None => {
                logger::info(LogTag::Cache, &format!("{}: miss", key));
                std::process::exit(1);
            }
        },
        CacheCommand::Set { key, value, ttl } => {
            let value: serde_json::Value =
                serde_json::from_str(&value).map_err(|e| anyhow!("value is not JSON: {}", e))?;
            cache.set(&key, &value, ttl).await;
            logger::log(
                LogTag::Cache,
                "SET",
                &format!("{} (ttl {}s, backend {})", key, ttl, cache.backend_kind()),
            );
        }
        CacheCommand::Del { key } => {
            cache.delete(&key).await;
            logger::log(LogTag::Cache, "DEL", &key);
        }
    }

    let stats = cache.stats();
    if stats.errors > 0 {
        logger::warning(
            LogTag::Cache,
            &format!("{} backend error(s) were absorbed", stats.errors),
        );
    }
    Ok(())
}

async fn run_fanout(
    specs: Vec<TaskSpec>,
    timeout_ms: Option<u64>,
    settings: &ParallelSettings,
) -> Result<()> {
    logger::log(
        LogTag::Parallel,
        "FANOUT",
        &format!(
            "{} task(s), timeout {}ms",
            specs.len(),
            timeout_ms.unwrap_or(settings.default_timeout_ms)
        ),
    );

    let tasks: Vec<ParallelTask<String>> = specs
        .into_iter()
        .map(|spec| {
            let TaskSpec {
                name,
                delay_ms,
                fail,
                fallback,
            } = spec;
            let task = ParallelTask::new(name, async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                if fail {
                    Err(anyhow!("simulated failure after {}ms", delay_ms))
                } else {
                    Ok(format!("done in {}ms", delay_ms))
                }
            });
            match fallback {
                Some(value) => task.with_fallback(value),
                None => task,
            }
        })
        .collect();

    let outcomes = match timeout_ms {
        Some(ms) => parallel_fetch(tasks, Duration::from_millis(ms)).await,
        None => parallel_fetch_configured(tasks, settings).await,
    };
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_task() {
        assert_eq!(
            parse_task_spec("birdeye=120"),
            Ok(TaskSpec {
                name: "birdeye".to_string(),
                delay_ms: 120,
                fail: false,
                fallback: None,
            })
        );
    }

    #[test]
    fn test_parse_failing_task_with_fallback() {
        let spec = parse_task_spec("helius=5000:fail:fallback=stale").unwrap();
        assert!(spec.fail);
        assert_eq!(spec.fallback.as_deref(), Some("stale"));
        assert_eq!(spec.delay_ms, 5000);
    }

    #[test]
    fn test_parse_rejects_bad_specs() {
        assert!(parse_task_spec("nodelay").is_err());
        assert!(parse_task_spec("=10").is_err());
        assert!(parse_task_spec("x=soon").is_err());
        assert!(parse_task_spec("x=10:explode").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_tasks() {
        let args = Args::try_parse_from([
            "solenrich",
            "fanout",
            "--timeout-ms",
            "100",
            "--task",
            "fast=10",
            "--task",
            "slow=5000:fail:fallback=X",
        ])
        .unwrap();

        match args.command {
            Command::Fanout { timeout_ms, tasks } => {
                assert_eq!(timeout_ms, Some(100));
                assert_eq!(tasks.len(), 2);
                assert_eq!(tasks[1].fallback.as_deref(), Some("X"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
