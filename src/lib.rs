//! Structured JSON logging facade for services.
//!
//! Resolves configuration from explicit fields plus environment fallbacks
//! (`SERVICE_NAME`, `APP_ENV`, `APP_VERSION`), constructs one process-wide
//! logger exactly once, and exposes drop-in leveled and structured logging
//! entry points. Every record is one JSON object per line carrying the
//! baseline fields `service`, `env`, `version`, `trace_id`, and `host`.
//!
//! ```no_run
//! use svclog::{fields, LoggerConfig};
//!
//! svclog::must_init(LoggerConfig {
//!     service_name: "core".to_string(),
//!     log_file_path: "/app/logs/core.log".to_string(),
//!     ..LoggerConfig::default()
//! });
//!
//! svclog::info!("listening on {}", 8080);
//! svclog::info_kv("order filled", &fields!["order_id" => 42_i64]);
//!
//! let request_log = svclog::with_fields(&fields!["request_id" => "r-1"]);
//! request_log.info("handled");
//!
//! svclog::sync();
//! ```
//!
//! Calling any logging entry point before `init` is also fine: the first
//! call constructs a logger from environment defaults, falling back to a
//! console-only development logger if that fails.

pub mod config;
pub mod error;
pub mod facade;
pub mod field;
pub mod level;
pub mod logger;
pub mod sink;

pub use config::{InitPolicy, LoggerConfig};
pub use error::{ConfigError, Result};
pub use facade::{
    debug, debug_kv, ensure_initialized, error, error_kv, fatal, info, info_kv, init, must_init,
    panic_log, print, println, sync, warn, warn_kv, with_fields,
};
pub use field::{Field, FieldValue};
pub use level::Level;
pub use logger::Logger;
pub use sink::Sink;
