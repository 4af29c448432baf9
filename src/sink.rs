//! Output sinks for encoded record lines.

use crate::error::{ConfigError, Result};
use parking_lot::Mutex;
use std::fs::{DirBuilder, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

/// One log output destination.
///
/// Sinks are cheap to clone and shared between the root logger and any
/// derived `with_fields` handles, so flushing any handle drains them all.
#[derive(Clone)]
pub struct Sink {
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Sink {
    /// Standard-output sink.
    pub fn stdout() -> Self {
        Self::from_writer(Box::new(io::stdout()))
    }

    /// File sink in append mode, creating missing parent directories with
    /// mode 0755.
    pub fn file(path: &str) -> Result<Self> {
        ensure_parent_dir(path)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(ConfigError::BuildFailed)?;
        Ok(Self::from_writer(Box::new(BufWriter::new(file))))
    }

    /// Wrap an arbitrary writer.
    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Append one encoded record line.
    ///
    /// Write errors are swallowed: logging never fails the caller's own
    /// operation.
    pub(crate) fn write_line(&self, line: &[u8]) {
        let mut writer = self.writer.lock();
        let _ = writer.write_all(line);
        let _ = writer.write_all(b"\n");
    }

    pub(crate) fn flush(&self) {
        let _ = self.writer.lock().flush();
    }
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    let parent = match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(parent)
        .map_err(|source| ConfigError::DirectoryCreateFailed {
            path: parent.display().to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a/b/out.log");
        let path = path.to_str().unwrap();

        let sink = Sink::file(path).unwrap();
        sink.write_line(b"{\"message\":\"hi\"}");
        sink.flush();

        assert!(temp_dir.path().join("a/b").is_dir());
        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<_> = BufReader::new(file)
            .lines()
            .filter_map(|l| l.ok())
            .collect();
        assert_eq!(lines, vec!["{\"message\":\"hi\"}".to_string()]);
    }

    #[test]
    fn test_file_sink_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.log");
        let path = path.to_str().unwrap();

        let first = Sink::file(path).unwrap();
        first.write_line(b"one");
        first.flush();

        // Reopening must not truncate earlier lines
        let second = Sink::file(path).unwrap();
        second.write_line(b"two");
        second.flush();

        let file = std::fs::File::open(path).unwrap();
        let lines: Vec<_> = BufReader::new(file)
            .lines()
            .filter_map(|l| l.ok())
            .collect();
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_clones_share_the_writer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.log");
        let path = path.to_str().unwrap();

        let sink = Sink::file(path).unwrap();
        let clone = sink.clone();
        sink.write_line(b"from original");
        // Flushing the clone must drain the original's buffered line
        clone.flush();

        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, "from original\n");
    }
}
