//! Log severity levels.

use std::fmt;

/// Record severity, ordered from least to most severe.
///
/// `Panic` and `Fatal` exist as record levels so that the terminating entry
/// points can emit one last record before unwinding or exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Panic,
    Fatal,
}

impl Level {
    /// Stable lowercase form used in the `level` record field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Panic => "panic",
            Level::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Panic);
        assert!(Level::Panic < Level::Fatal);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Level::Debug.as_str(), "debug");
        assert_eq!(Level::Fatal.as_str(), "fatal");
        assert_eq!(Level::Warn.to_string(), "warn");
    }
}
