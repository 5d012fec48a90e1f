//! Bridge from the `log` facade to the browser console.
//!
//! The core crate logs through `log::debug!` and friends; this module routes
//! those records to `console.error`, `console.warn`, `console.info`,
//! `console.log` and `console.debug` by level.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;

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

        let message = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug => web_sys::console::log_1(&message),
            Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

/// `[LEVEL target] message`
pub(crate) fn format_record(record: &Record) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

/// Install the console logger. Later calls only change the level.
pub(crate) fn install(level: LevelFilter) {
    // set_logger fails once a logger is installed; the level still applies
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Change the console log level.
///
/// Accepts `off`, `error`, `warn`, `info`, `debug` or `trace` (any case).
///
/// # Example
///
/// ```typescript
/// set_log_level('debug'); // show drag and pinch lifecycle messages
/// ```
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = parse_level(level)
        .ok_or_else(|| crate::to_js_error(format!("Unknown log level: {}", level)))?;
    install(filter);
    Ok(())
}

pub(crate) fn parse_level(level: &str) -> Option<LevelFilter> {
    level.parse().ok()
}
