//! Scratch directory for the filesystem-touching campaigns.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{HarnessError, Result};

/// Directory name used under the system temp dir by default.
pub const DEFAULT_SANDBOX_NAME: &str = "minefuzz_tmp";

/// File written into every sandbox the harness creates. A non-empty
/// directory without it is never wiped.
pub const SANDBOX_MARKER: &str = ".minefuzz-sandbox";

/// Owns a single scratch directory for the duration of a run.
///
/// The marker file is bookkeeping: [`Sandbox::clear`] keeps it and
/// [`Sandbox::is_empty`] ignores it.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Create a handle for `root`. Nothing touches the filesystem yet.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default location under the system temp directory.
    pub fn default_root() -> PathBuf {
        std::env::temp_dir().join(DEFAULT_SANDBOX_NAME)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an entry inside the sandbox.
    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.join(name)
    }

    /// Remove any previous sandbox and create a fresh, empty one.
    ///
    /// Fails with [`HarnessError::ForeignSandbox`] if the root already holds
    /// entries but no marker, leaving that directory untouched.
    pub fn reset(&self) -> Result<()> {
        if self.root.exists() && !self.is_owned()? {
            return Err(HarnessError::ForeignSandbox(self.root.clone()));
        }

        match fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(self.error(source)),
        }

        self.create()
    }

    /// Whether an existing root is safe to wipe: it carries the marker or
    /// has no entries at all.
    fn is_owned(&self) -> Result<bool> {
        if self.path(SANDBOX_MARKER).is_file() {
            return Ok(true);
        }
        let mut entries = fs::read_dir(&self.root).map_err(|e| self.error(e))?;
        Ok(entries.next().is_none())
    }

    fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| self.error(e))?;
        fs::write(self.path(SANDBOX_MARKER), "").map_err(|e| self.error(e))
    }

    /// Empty the sandbox, keeping the directory itself.
    pub fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.create(),
            Err(source) => return Err(self.error(source)),
        };

        for entry in entries {
            let entry = entry.map_err(|e| self.error(e))?;
            if entry.file_name() == SANDBOX_MARKER {
                continue;
            }
            let path = entry.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };

            match removed {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(HarnessError::Sandbox { path, source });
                }
            }
        }

        Ok(())
    }

    /// Whether the sandbox exists and holds no entries besides the marker.
    pub fn is_empty(&self) -> bool {
        fs::read_dir(&self.root)
            .map(|mut entries| {
                entries.all(|e| e.is_ok_and(|e| e.file_name() == SANDBOX_MARKER))
            })
            .unwrap_or(false)
    }

    /// Best-effort removal. Returns `true` if the directory is gone.
    pub fn teardown(&self) -> bool {
        let _ = fs::remove_dir_all(&self.root);
        !self.root.exists()
    }

    fn error(&self, source: std::io::Error) -> HarnessError {
        HarnessError::Sandbox {
            path: self.root.clone(),
            source,
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(Self::default_root())
    }
}
