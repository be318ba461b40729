//! File-loading collaborator.
//!
//! Reads a whole file as text and picks out CSV/ZIP inputs by extension.
//! Nothing here knows about the visualization.

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

use std::path::{Path, PathBuf};

use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("file reading error occurred for {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read the whole file at `path` as UTF-8 text.
///
/// # Errors
///
/// Returns [`FileError::Read`] with the underlying I/O error, including
/// invalid UTF-8 content.
pub async fn read_as_text(path: &Path) -> Result<String, FileError> {
    tokio::fs::read_to_string(path).await.map_err(|source| {
        error!(path = %path.display(), error = %source, "file read failed");
        FileError::Read { path: path.to_path_buf(), source }
    })
}

/// Lower-cased text after the last `.` in `name`, if any.
#[must_use]
pub fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

#[must_use]
pub fn is_csv(name: &str) -> bool {
    extension_of(name).as_deref() == Some("csv")
}

/// CSV or ZIP, case-insensitive.
#[must_use]
pub fn is_relevant(name: &str) -> bool {
    matches!(extension_of(name).as_deref(), Some("csv" | "zip"))
}

/// Display name for a path: the file name, or the whole path if it has none.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
