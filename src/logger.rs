//! Logger handle and record encoding.
//!
//! A [`Logger`] owns its resolved identity, minimum severity, and sink list.
//! Emitted records are single JSON objects, one per line:
//! `timestamp`, `level`, `caller`, `message`, the five baseline fields
//! (`service`, `env`, `version`, `trace_id`, `host`), then any bound and
//! per-call fields.

use crate::config::{InitPolicy, LoggerConfig};
use crate::error::Result;
use crate::field::Field;
use crate::level::Level;
use crate::sink::Sink;
use chrono::{SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value};
use std::panic::Location;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone)]
struct Inner {
    min_level: Level,
    development: bool,
    /// Fields attached to every record, in emit order.
    baseline: Map<String, Value>,
    /// Extra fields added by `with_fields` derivation.
    bound: Vec<(String, Value)>,
    sinks: Vec<Sink>,
}

/// Shareable handle over one constructed logger.
///
/// Clones and `with_fields` derivations share the underlying sinks, so a
/// flush on any handle drains them all. All emit paths are internally
/// synchronized; handles can be used from many threads without locking.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Build a standalone logger from `config`.
    ///
    /// `service_name` and `log_file_path` are required; `environment` and
    /// `version` fall back to `APP_ENV` / `APP_VERSION`, then to `"dev"` /
    /// `"1.0.0"`.
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::build(config, InitPolicy::ExplicitRequired)
    }

    pub(crate) fn build(config: LoggerConfig, policy: InitPolicy) -> Result<Self> {
        config.validate(policy)?;
        let config = config.resolved();

        let mut sinks = Vec::new();
        if config.console_enabled {
            sinks.push(Sink::stdout());
        }
        // File sink goes last
        sinks.push(Sink::file(&config.log_file_path)?);

        Ok(Self::from_parts(&config, config.is_development(), sinks))
    }

    /// Console-only development logger installed when lazy construction
    /// fails. Keeps the resolved baseline fields so records stay attributable.
    pub(crate) fn console_fallback(config: LoggerConfig) -> Self {
        let config = config.resolved();
        Self::from_parts(&config, true, vec![Sink::stdout()])
    }

    fn from_parts(config: &LoggerConfig, development: bool, sinks: Vec<Sink>) -> Self {
        let min_level = if development { Level::Debug } else { Level::Info };

        let mut baseline = Map::new();
        baseline.insert("service".to_string(), config.service_name.clone().into());
        baseline.insert("env".to_string(), config.environment.clone().into());
        baseline.insert("version".to_string(), config.version.clone().into());
        baseline.insert("trace_id".to_string(), generate_trace_id().into());
        baseline.insert("host".to_string(), resolve_hostname().into());

        Self {
            inner: Arc::new(Inner {
                min_level,
                development,
                baseline,
                bound: Vec::new(),
                sinks,
            }),
        }
    }

    /// Derive a handle whose records carry `fields` in addition to the
    /// baseline fields. The original handle is unaffected.
    pub fn with_fields(&self, fields: &[Field]) -> Logger {
        let mut inner = (*self.inner).clone();
        inner
            .bound
            .extend(fields.iter().map(|f| (f.key.clone(), f.value.to_json())));
        Logger {
            inner: Arc::new(inner),
        }
    }

    #[track_caller]
    pub fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg, &[]);
    }

    #[track_caller]
    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg, &[]);
    }

    #[track_caller]
    pub fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg, &[]);
    }

    #[track_caller]
    pub fn error(&self, msg: &str) {
        self.log(Level::Error, msg, &[]);
    }

    #[track_caller]
    pub fn debug_kv(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Debug, msg, fields);
    }

    #[track_caller]
    pub fn info_kv(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Info, msg, fields);
    }

    #[track_caller]
    pub fn warn_kv(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Warn, msg, fields);
    }

    #[track_caller]
    pub fn error_kv(&self, msg: &str, fields: &[Field]) {
        self.log(Level::Error, msg, fields);
    }

    /// Emit one record at `level`.
    ///
    /// The recorded `caller` is the location of the outermost `#[track_caller]`
    /// frame, so facade wrappers report their caller's file and line.
    #[track_caller]
    pub fn log(&self, level: Level, msg: &str, fields: &[Field]) {
        if level < self.inner.min_level {
            return;
        }
        self.emit(level, msg, fields, Location::caller());
    }

    fn emit(&self, level: Level, msg: &str, fields: &[Field], caller: &Location<'_>) {
        let mut record = Map::new();
        record.insert(
            "timestamp".to_string(),
            Utc::now()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
                .into(),
        );
        record.insert("level".to_string(), level.as_str().into());
        record.insert(
            "caller".to_string(),
            format!("{}:{}", caller.file(), caller.line()).into(),
        );
        record.insert("message".to_string(), msg.into());
        for (key, value) in &self.inner.baseline {
            record.insert(key.clone(), value.clone());
        }
        for (key, value) in &self.inner.bound {
            record.insert(key.clone(), value.clone());
        }
        for field in fields {
            record.insert(field.key.clone(), field.value.to_json());
        }

        if let Ok(line) = serde_json::to_vec(&Value::Object(record)) {
            for sink in &self.inner.sinks {
                sink.write_line(&line);
            }
        }
    }

    /// Flush buffered records on every sink. May block on file I/O.
    pub fn flush(&self) {
        for sink in &self.inner.sinks {
            sink.flush();
        }
    }

    pub fn min_level(&self) -> Level {
        self.inner.min_level
    }

    pub fn is_development(&self) -> bool {
        self.inner.development
    }

    #[cfg(test)]
    pub(crate) fn sink_count(&self) -> usize {
        self.inner.sinks.len()
    }
}

/// Session token of the form `trace_{unix_seconds}_{0..=9999}`, fixed for the
/// logger's lifetime. Identifies a process run, not a request.
fn generate_trace_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let mut rng = StdRng::seed_from_u64(now.as_nanos() as u64);
    let suffix: u32 = rng.gen_range(0..10_000);
    format!("trace_{}_{}", now.as_secs(), suffix)
}

/// Uname nodename, then the `HOSTNAME` variable, then `"unknown"`.
fn resolve_hostname() -> String {
    let uname = rustix::system::uname();
    let node = uname.nodename().to_string_lossy();
    if !node.is_empty() {
        return node.into_owned();
    }
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
