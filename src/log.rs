//! logfmt lines on stderr, so stdout only ever carries command output.
//!
//! ```ignore
//! log_info!("check-config", rules = 312, groups = 240);
//! // time=12:34:56.789 level=info tag=check-config rules=312 groups=240
//! ```

use colored::Colorize;
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn label(self) -> String {
        match self {
            Level::Debug => "debug".dimmed().to_string(),
            Level::Info => "info".cyan().to_string(),
            Level::Warn => "warn".yellow().to_string(),
            Level::Error => "error".red().to_string(),
        }
    }
}

/// Wall-clock time of day in UTC, `HH:MM:SS.mmm`.
pub fn format_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs() % 86400;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        now.subsec_millis()
    )
}

/// Quote values that would otherwise break a logfmt line apart.
pub fn format_value(value: &str) -> String {
    if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '=' || c == '"') {
        format!("{:?}", value)
    } else {
        value.to_string()
    }
}

pub fn format_logfmt(level: Level, tag: &str, fields: &[(&str, String)]) -> String {
    let header = [
        ("time", format_timestamp()),
        ("level", level.label()),
        ("tag", tag.to_string()),
    ];
    header
        .iter()
        .map(|(key, value)| format!("{}={}", key.dimmed(), value))
        .chain(
            fields
                .iter()
                .map(|(key, value)| format!("{}={}", key.dimmed(), format_value(value))),
        )
        .collect::<Vec<_>>()
        .join(" ")
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:ident, $tag:expr, $($key:ident = $value:expr),*) => {
        eprintln!(
            "{}",
            $crate::log::format_logfmt(
                $crate::log::Level::$level,
                $tag,
                &[$((stringify!($key), format!("{}", $value))),*]
            )
        )
    };
}

#[macro_export]
macro_rules! log_debug {
    ($tag:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::log_at!(Debug, $tag, $($key = $value),*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($tag:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::log_at!(Info, $tag, $($key = $value),*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($tag:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::log_at!(Warn, $tag, $($key = $value),*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($tag:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::log_at!(Error, $tag, $($key = $value),*)
    };
}
