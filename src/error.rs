//! Error types for svclog.

use thiserror::Error;

/// Configuration and construction errors.
///
/// Only explicit initialization surfaces these; the lazy path downgrades any
/// construction failure to a console-only fallback logger.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("service_name is required")]
    MissingServiceName,

    #[error("log_file_path is required")]
    MissingLogFile,

    #[error("failed to create log directory {path}: {source}")]
    DirectoryCreateFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build logger: {0}")]
    BuildFailed(#[source] std::io::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
