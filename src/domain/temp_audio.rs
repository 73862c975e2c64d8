use std::io;
use std::path::Path;

use tempfile::TempPath;

/// Exclusively owned audio file on local disk.
///
/// The file is deleted exactly once: either by [`TempAudioResource::release`]
/// or, on any other exit path (early return, error, unwinding), when the
/// handle is dropped.
#[derive(Debug)]
pub struct TempAudioResource {
    path: Option<TempPath>,
}

impl TempAudioResource {
    pub fn new(path: TempPath) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Deletes the backing file and reports whether deletion succeeded.
    pub fn release(mut self) -> io::Result<()> {
        match self.path.take() {
            Some(path) => path.close(),
            None => Ok(()),
        }
    }
}

impl Drop for TempAudioResource {
    fn drop(&mut self) {
        if let Some(path) = self.path.take() {
            let shown = path.display().to_string();
            if let Err(e) = path.close() {
                tracing::warn!(path = %shown, error = %e, "Failed to delete temporary audio file");
            }
        }
    }
}
