//! Console logging backend
//!
//! Minimal backend for the `log` facade: one "timestamp LEVEL: message"
//! line per record on stderr. The level comes from the STARTHERE_LOG
//! environment variable (error, warn, info, debug, trace, off), defaulting
//! to info.

use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        eprintln!("{} {}: {}", timestamp, record.level(), record.args());
    }

    fn flush(&self) {}
}

/// Install the console logger. Safe to call more than once; only the first
/// call takes effect.
pub fn init() {
    let level = std::env::var("STARTHERE_LOG")
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
