//! End-to-end tests for the process-wide logging facade.

use parking_lot::Mutex;
use serde_json::Value;
use std::path::Path;
use svclog::{fields, Logger, LoggerConfig};
use tempfile::TempDir;

// All facade tests share one process-wide logger instance
static FACADE_LOCK: Mutex<()> = Mutex::new(());

fn read_records(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap_or_default()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn empty_environment_and_version_resolve_to_defaults() {
    let _guard = FACADE_LOCK.lock();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("core.log");

    svclog::init(LoggerConfig {
        service_name: "core".to_string(),
        log_file_path: path.to_str().unwrap().to_string(),
        environment: String::new(),
        version: String::new(),
        console_enabled: true,
    })
    .unwrap();

    let caller_line = line!() + 1;
    svclog::info("ready");
    svclog::sync();

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record["message"], "ready");
    assert_eq!(record["service"], "core");
    // APP_ENV / APP_VERSION are unset in the test environment
    assert_eq!(record["env"], "dev");
    assert_eq!(record["version"], "1.0.0");
    assert!(record["trace_id"].as_str().unwrap().starts_with("trace_"));
    assert!(record["host"].is_string());
    // The reported caller is this file and line, not a frame inside the crate
    assert_eq!(record["caller"], format!("{}:{}", file!(), caller_line));
}

#[test]
fn dev_default_keeps_debug_records() {
    let _guard = FACADE_LOCK.lock();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("core.log");

    svclog::init(LoggerConfig {
        service_name: "core".to_string(),
        log_file_path: path.to_str().unwrap().to_string(),
        console_enabled: false,
        ..LoggerConfig::default()
    })
    .unwrap();

    svclog::debug!("cache warm in {}ms", 3);
    svclog::sync();

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "debug");
    assert_eq!(records[0]["message"], "cache warm in 3ms");
}

#[test]
fn prod_environment_filters_debug_records() {
    let _guard = FACADE_LOCK.lock();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("core.log");

    svclog::init(LoggerConfig {
        service_name: "core".to_string(),
        log_file_path: path.to_str().unwrap().to_string(),
        environment: "production".to_string(),
        console_enabled: false,
        ..LoggerConfig::default()
    })
    .unwrap();

    svclog::debug("dropped");
    svclog::warn("kept");
    svclog::sync();

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "warn");
}

#[test]
fn structured_fields_land_next_to_baseline() {
    let _guard = FACADE_LOCK.lock();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("core.log");

    svclog::init(LoggerConfig {
        service_name: "core".to_string(),
        log_file_path: path.to_str().unwrap().to_string(),
        console_enabled: false,
        ..LoggerConfig::default()
    })
    .unwrap();

    svclog::error_kv(
        "order rejected",
        &fields!["order_id" => 42_i64, "retryable" => false, "venue" => "hyper"],
    );
    svclog::sync();

    let records = read_records(&path);
    let record = &records[0];
    assert_eq!(record["level"], "error");
    assert_eq!(record["order_id"], 42);
    assert_eq!(record["retryable"], false);
    assert_eq!(record["venue"], "hyper");
    assert_eq!(record["service"], "core");
}

#[test]
fn explicit_handle_does_not_involve_global_state() {
    // No lock: Logger::new never touches the process-wide instance
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("standalone.log");

    let logger = Logger::new(LoggerConfig {
        service_name: "standalone".to_string(),
        log_file_path: path.to_str().unwrap().to_string(),
        environment: "prod".to_string(),
        console_enabled: false,
        ..LoggerConfig::default()
    })
    .unwrap();

    let scoped = logger.with_fields(&fields!["worker" => 3_i64]);
    scoped.info("spawned");
    logger.flush();

    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["service"], "standalone");
    assert_eq!(records[0]["worker"], 3);
}

const FATAL_LOG_PATH_VAR: &str = "SVCLOG_FATAL_LOG_PATH";

// Runs only in the child process spawned by fatal_flushes_record_then_exits;
// without the path variable it is a no-op.
#[test]
fn fatal_child() {
    let path = match std::env::var(FATAL_LOG_PATH_VAR) {
        Ok(path) => path,
        Err(_) => return,
    };

    svclog::init(LoggerConfig {
        service_name: "core".to_string(),
        log_file_path: path,
        environment: "prod".to_string(),
        console_enabled: true,
        ..LoggerConfig::default()
    })
    .unwrap();

    svclog::fatal("giving up");
}

#[test]
fn fatal_flushes_record_then_exits() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fatal.log");

    let output = std::process::Command::new(std::env::current_exe().unwrap())
        .args(["fatal_child", "--exact"])
        .env(FATAL_LOG_PATH_VAR, path.to_str().unwrap())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));

    // The record reached the file before the process died
    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["level"], "fatal");
    assert_eq!(records[0]["message"], "giving up");
    assert_eq!(records[0]["service"], "core");

    // console_enabled put the same record on the child's stdout
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find_map(|l| l.find('{').map(|i| &l[i..]))
        .expect("fatal record on child stdout");
    let record: Value = serde_json::from_str(line).unwrap();
    assert_eq!(record["level"], "fatal");
    assert_eq!(record["message"], "giving up");
}

#[test]
fn init_validation_failures_surface_to_caller() {
    let _guard = FACADE_LOCK.lock();

    let err = svclog::init(LoggerConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "service_name is required");

    let err = svclog::init(LoggerConfig {
        service_name: "core".to_string(),
        ..LoggerConfig::default()
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "log_file_path is required");
}
