//! Output destinations for generated files.

use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Destination for generated directories and files.
///
/// `create_dir` must report an existing directory as
/// [`io::ErrorKind::AlreadyExists`]; the generator treats that as success.
/// `write_file` replaces any existing file.
pub trait OutputSink {
    /// Creates a single directory.
    ///
    /// # Errors
    /// Returns the underlying IO error.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Writes `contents` to `path`, replacing any existing file.
    ///
    /// # Errors
    /// Returns the underlying IO error.
    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// Writes to the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSink;

impl OutputSink for FsSink {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// Collects output in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    dirs: Mutex<BTreeSet<PathBuf>>,
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the contents written to `path`.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    /// Returns all written file paths, sorted.
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.lock().keys().cloned().collect()
    }

    /// Returns all created directories, sorted.
    #[must_use]
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.lock().iter().cloned().collect()
    }
}

impl OutputSink for MemorySink {
    fn create_dir(&self, path: &Path) -> io::Result<()> {
        if self.dirs.lock().insert(path.to_path_buf()) {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ))
        }
    }

    fn write_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.files
            .lock()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
