//! Log formatting and output with ANSI colors
//!
//! Handles:
//! - Colorized console output with tag and level formatting
//! - Output on stderr, leaving stdout to command results
//! - Broken pipe handling for piped commands

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{self, stderr, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 9;
const LOG_TYPE_WIDTH: usize = 16;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: LogLevel, log_type: &str, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();

    let line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        format_tag(tag),
        format_log_type(level, log_type),
        format_message(level, message)
    );
    let _ = write_line(&mut stderr().lock(), &line);
}

/// Format a tag with appropriate color
fn format_tag(tag: LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Config => padded.bright_white().bold(),
        LogTag::Cache => padded.bright_cyan().bold(),
        LogTag::Parallel => padded.bright_magenta().bold(),
    }
}

/// Format the log type column, colored by severity
fn format_log_type(level: LogLevel, log_type: &str) -> ColoredString {
    let padded = format!("{:<width$}", log_type, width = LOG_TYPE_WIDTH);
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.bright_yellow().bold(),
        LogLevel::Info => padded.bright_green(),
        LogLevel::Debug => padded.dimmed(),
    }
}

fn format_message(level: LogLevel, message: &str) -> ColoredString {
    match level {
        LogLevel::Error => message.red(),
        LogLevel::Warning => message.yellow(),
        LogLevel::Info => message.normal(),
        LogLevel::Debug => message.dimmed(),
    }
}

/// Write one line and flush, treating a closed pipe (e.g. `| head`) as success
fn write_line<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    match writeln!(out, "{}", line).and_then(|_| out.flush()) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
