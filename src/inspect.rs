//! `pathwalk inspect`: pick CSV/ZIP inputs and show the first CSV.

#[cfg(test)]
#[path = "inspect_test.rs"]
mod inspect_test;

use std::path::PathBuf;

use tracing::info;

use crate::files::{FileError, display_name, is_csv, is_relevant, read_as_text};

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("no files selected")]
    NoFilesSelected,
    #[error("no CSV or ZIP files found in the selection")]
    NoRelevantFiles,
    #[error("error reading CSV file: {name}. {source}")]
    ReadCsv {
        name: String,
        #[source]
        source: FileError,
    },
}

/// What `inspect` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    /// Names of CSV and ZIP files, in selection order.
    pub relevant: Vec<String>,
    /// Name and content of the first CSV file, if any.
    pub first_csv: Option<(String, String)>,
}

/// Filter `files` and read the first CSV among them.
///
/// # Errors
///
/// Returns `NoFilesSelected` for an empty selection, `NoRelevantFiles` when
/// nothing has a `.csv` or `.zip` extension, and `ReadCsv` when the first
/// CSV cannot be read.
pub async fn inspect(files: &[PathBuf]) -> Result<InspectReport, InspectError> {
    if files.is_empty() {
        return Err(InspectError::NoFilesSelected);
    }

    let mut relevant = Vec::new();
    let mut first_csv: Option<&PathBuf> = None;
    for path in files {
        let name = display_name(path);
        if is_relevant(&name) {
            if first_csv.is_none() && is_csv(&name) {
                first_csv = Some(path);
            }
            relevant.push(name);
        }
    }
    if relevant.is_empty() {
        return Err(InspectError::NoRelevantFiles);
    }
    info!(count = relevant.len(), "relevant files selected");

    let first_csv = match first_csv {
        Some(path) => {
            let name = display_name(path);
            let content = read_as_text(path)
                .await
                .map_err(|source| InspectError::ReadCsv { name: name.clone(), source })?;
            Some((name, content))
        }
        None => None,
    };

    Ok(InspectReport { relevant, first_csv })
}

/// Human-readable rendering of a report.
#[must_use]
pub fn render(report: &InspectReport) -> String {
    let mut out = String::from("Found CSV/ZIP files:\n");
    for name in &report.relevant {
        out.push_str("  ");
        out.push_str(name);
        out.push('\n');
    }
    if let Some((name, content)) = &report.first_csv {
        out.push_str(&format!("\nContent of the first CSV file ({name}):\n"));
        out.push_str(content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
