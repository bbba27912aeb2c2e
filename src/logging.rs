//! Diagnostics bootstrap for embedding applications.
//!
//! Emitted records are annotated with the caller's file and line, taken
//! from the tracing callsite rather than runtime stack inspection.

use tracing::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// Installs a compact subscriber at `level` with caller file/line on each
/// record. `Silent` installs nothing. If a subscriber is already set, the
/// first one stays in place.
pub fn init(level: LogLevel) {
    let Some(level) = level.to_tracing_level() else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .with_file(true)
        .with_line_number(true)
        .compact()
        .try_init();
}
