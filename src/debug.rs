//! Logging for the spin CLI.
//!
//! Routes the `log` facade used throughout the workspace to stderr, keeping
//! stdout for user-facing status messages.
//!
//! The level comes from `--log-level` when given, otherwise from the
//! DEBUG_LEVEL environment variable:
//! - 0 or unset: No logging
//! - 1: Errors only
//! - 2: Info level (config paths, writes)
//! - 3: Debug level (load/expand/write details)
//! - 4: Trace level

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Map DEBUG_LEVEL's numeric scale onto a level filter.
pub fn level_from_debug_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::trim).and_then(|v| v.parse::<u8>().ok()) {
        Some(1) => LevelFilter::Error,
        Some(2) => LevelFilter::Info,
        Some(3) => LevelFilter::Debug,
        Some(4) => LevelFilter::Trace,
        _ => LevelFilter::Off,
    }
}

struct StderrLogger {
    level: LevelFilter,
    out: Mutex<std::io::Stderr>,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        let mut out = self.out.lock();
        let _ = out.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.out.lock().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

fn get_timestamp() -> String {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(now) => format!("{}.{:06}", now.as_secs(), now.subsec_micros()),
        Err(_) => "0.000000".to_string(),
    }
}

/// Install the stderr logger.
///
/// `override_level` (from `--log-level`) wins over DEBUG_LEVEL. Calling this
/// more than once keeps the first logger.
pub fn init_logging(override_level: Option<LevelFilter>) {
    let level = override_level.unwrap_or_else(|| {
        level_from_debug_env(std::env::var("DEBUG_LEVEL").ok().as_deref())
    });

    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        out: Mutex::new(std::io::stderr()),
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
