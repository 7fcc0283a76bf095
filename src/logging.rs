use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Debug topics understood by `--debug-filter`.
pub const TOPICS: [&str; 5] = ["engine", "policy", "path", "clock", "input"];

// Custom logger structure
#[derive(Debug)]
struct DuelLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl DuelLogger {
    fn format_record(record: &Record) -> String {
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        // Side tags emitted by the topic macros get their own color
        let message = record.args().to_string();
        let (context, body) = split_side_tag(&message);
        let context = match context {
            Some("User") => format!("\x1B[34m[USER ]{reset} "),
            Some("Enemy") => format!("\x1B[31m[ENEMY]{reset} "),
            Some(other) => format!("[{other}] "),
            None => String::new(),
        };

        format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {body}",
            level = record.level(),
            target = record.target(),
        )
    }
}

/// Splits a leading `[Tag] ` prefix off a log message.
fn split_side_tag(message: &str) -> (Option<&str>, &str) {
    if let Some(rest) = message.strip_prefix('[') {
        if let Some(end) = rest.find("] ") {
            return (Some(&rest[..end]), &rest[end + 2..]);
        }
    }
    (None, message)
}

impl log::Log for DuelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug filters only narrow the chatty levels
        if let Some(filters) = &self.debug_filters {
            if metadata.level() >= log::Level::Debug {
                return filters.iter().any(|f| metadata.target().starts_with(f.as_str()));
            }
        }
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stdout = io::stdout().lock();
            let _ = writeln!(stdout, "{}", Self::format_record(record));
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<DuelLogger> = OnceLock::new();

/// Parses a `--log-level` value, defaulting to `Info` on anything unknown.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(filter_str: &str) -> HashSet<String> {
    filter_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Initialize the logger with optional debug filters
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| DuelLogger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_filters),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);

    for topic in logger.debug_filters.iter().flatten() {
        if !TOPICS.contains(&topic.as_str()) {
            log::warn!("Unknown debug topic '{}' (known: {})", topic, TOPICS.join(", "));
        }
    }
    Ok(())
}

// Helper macros for specific debug topics. A leading `side =>` tags the line.
#[macro_export]
macro_rules! debug_engine {
    ($side:expr => $($arg:tt)*) => {
        log::debug!(target: "engine", "[{}] {}", $side, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "engine", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_policy {
    ($side:expr => $($arg:tt)*) => {
        log::debug!(target: "policy", "[{}] {}", $side, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "policy", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_path {
    ($($arg:tt)*) => {
        log::trace!(target: "path", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_clock {
    ($($arg:tt)*) => {
        log::debug!(target: "clock", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_input {
    ($side:expr => $($arg:tt)*) => {
        log::debug!(target: "input", "[{}] {}", $side, format_args!($($arg)*))
    };
    ($($arg:tt)*) => {
        log::debug!(target: "input", "{}", format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};

    fn metadata(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn test_split_side_tag() {
        assert_eq!(split_side_tag("[User] moved"), (Some("User"), "moved"));
        assert_eq!(split_side_tag("no tag here"), (None, "no tag here"));
        assert_eq!(split_side_tag("[unterminated"), (None, "[unterminated"));
    }

    #[test]
    fn test_debug_filter_only_narrows_debug() {
        let logger = DuelLogger {
            level: LevelFilter::Trace,
            debug_filters: Some(parse_filters("policy, path")),
        };
        assert!(logger.enabled(&metadata(Level::Debug, "policy")));
        assert!(logger.enabled(&metadata(Level::Trace, "path")));
        assert!(!logger.enabled(&metadata(Level::Debug, "engine")));
        // Info and above always pass the topic filter
        assert!(logger.enabled(&metadata(Level::Info, "engine")));
    }

    #[test]
    fn test_level_threshold() {
        let logger = DuelLogger {
            level: LevelFilter::Warn,
            debug_filters: None,
        };
        assert!(logger.enabled(&metadata(Level::Error, "engine")));
        assert!(!logger.enabled(&metadata(Level::Info, "engine")));
    }
}
