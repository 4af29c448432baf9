//! Process-wide logger state and drop-in logging entry points.
//!
//! Construction is serialized behind a write lock: concurrent first calls
//! observe either "not yet built" or "fully built", and exactly one lazy
//! construction wins.

use crate::config::{InitPolicy, LoggerConfig};
use crate::error::Result;
use crate::field::Field;
use crate::level::Level;
use crate::logger::Logger;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

static GLOBAL: Lazy<RwLock<Option<Logger>>> = Lazy::new(|| RwLock::new(None));

/// Lazy construction attempts in this process; lets tests assert exactly-once
/// initialization.
static LAZY_BUILDS: AtomicU64 = AtomicU64::new(0);

/// Validate `config` and install the resulting logger as the process-wide
/// instance.
///
/// A later call replaces the installed instance, including one produced by
/// lazy initialization.
pub fn init(config: LoggerConfig) -> Result<()> {
    let logger = Logger::build(config, InitPolicy::ExplicitRequired)?;
    *GLOBAL.write() = Some(logger);
    Ok(())
}

/// Like [`init`], but panics with a descriptive message on failure.
pub fn must_init(config: LoggerConfig) {
    if let Err(e) = init(config) {
        panic!("failed to initialize logger: {e}");
    }
}

/// Construct the process-wide logger from environment defaults if no instance
/// is installed yet. No-op otherwise.
///
/// This path never fails: if construction errors, a console-only development
/// logger is installed instead, so logging calls never observe an
/// unconstructed instance.
pub fn ensure_initialized() {
    let _ = global();
}

fn global() -> Logger {
    if let Some(logger) = GLOBAL.read().as_ref() {
        return logger.clone();
    }

    let mut slot = GLOBAL.write();
    // Another thread may have won the construction race
    if let Some(logger) = slot.as_ref() {
        return logger.clone();
    }

    LAZY_BUILDS.fetch_add(1, Ordering::Relaxed);
    let config = LoggerConfig::from_env();
    let logger = Logger::build(config.clone(), InitPolicy::LazyWithDefaults)
        .unwrap_or_else(|_| Logger::console_fallback(config));
    *slot = Some(logger.clone());
    logger
}

/// Log at info level. Drop-in for the standard print family.
#[track_caller]
pub fn print(msg: &str) {
    global().log(Level::Info, msg, &[]);
}

/// Log at info level. Drop-in for the standard print family.
#[track_caller]
pub fn println(msg: &str) {
    global().log(Level::Info, msg, &[]);
}

#[track_caller]
pub fn debug(msg: &str) {
    global().log(Level::Debug, msg, &[]);
}

#[track_caller]
pub fn info(msg: &str) {
    global().log(Level::Info, msg, &[]);
}

#[track_caller]
pub fn warn(msg: &str) {
    global().log(Level::Warn, msg, &[]);
}

#[track_caller]
pub fn error(msg: &str) {
    global().log(Level::Error, msg, &[]);
}

/// Emit a fatal record, flush, and terminate the process with status 1.
#[track_caller]
pub fn fatal(msg: &str) -> ! {
    let logger = global();
    logger.log(Level::Fatal, msg, &[]);
    logger.flush();
    std::process::exit(1);
}

/// Emit a panic-level record, flush, and panic with the message.
///
/// Unlike [`fatal`], the raised panic can be caught by the caller.
#[track_caller]
pub fn panic_log(msg: &str) -> ! {
    let logger = global();
    logger.log(Level::Panic, msg, &[]);
    logger.flush();
    panic!("{}", msg);
}

#[track_caller]
pub fn debug_kv(msg: &str, fields: &[Field]) {
    global().log(Level::Debug, msg, fields);
}

#[track_caller]
pub fn info_kv(msg: &str, fields: &[Field]) {
    global().log(Level::Info, msg, fields);
}

#[track_caller]
pub fn warn_kv(msg: &str, fields: &[Field]) {
    global().log(Level::Warn, msg, fields);
}

#[track_caller]
pub fn error_kv(msg: &str, fields: &[Field]) {
    global().log(Level::Error, msg, fields);
}

/// Derive a handle from the process-wide instance that carries `fields` on
/// every record it emits. The process-wide instance is unaffected.
pub fn with_fields(fields: &[Field]) -> Logger {
    global().with_fields(fields)
}

/// Flush buffered records on the process-wide instance. No-op when no
/// instance is installed. Call before process exit in shutdown paths.
pub fn sync() {
    if let Some(logger) = GLOBAL.read().as_ref() {
        logger.flush();
    }
}

/// Log a formatted message at debug level.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => { $crate::debug(&::std::format!($($arg)*)) };
}

/// Log a formatted message at info level.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => { $crate::info(&::std::format!($($arg)*)) };
}

/// Log a formatted message at warn level.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => { $crate::warn(&::std::format!($($arg)*)) };
}

/// Log a formatted message at error level.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => { $crate::error(&::std::format!($($arg)*)) };
}

/// Log a formatted fatal record, then terminate the process.
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => { $crate::fatal(&::std::format!($($arg)*)) };
}

/// Log a formatted panic-level record, then panic with the message.
#[macro_export]
macro_rules! panic_log {
    ($($arg:tt)*) => { $crate::panic_log(&::std::format!($($arg)*)) };
}

#[cfg(test)]
pub(crate) fn reset_for_tests() {
    *GLOBAL.write() = None;
}
