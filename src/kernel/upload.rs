//! Bulk folder upload: rebuilds a nested folder structure from a flat list of
//! relative file paths.
//!
//! [`plan_upload`] is pure. [`FolderUploader`] runs a plan against an
//! [`AssetApi`](crate::kernel::services::ports::AssetApi): every folder is
//! created strictly in order (children need their parent's freshly issued id),
//! then the files follow. The first failure stops the run; whatever was already
//! created stays in place.

use std::fmt;

use crate::kernel::services::ports::AssetError;

mod executor;
mod plan;

pub use executor::{CreatedFolder, FolderUploader, UploadReport};
pub use plan::{plan_upload, FileStep, FolderStep, UploadPlan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Slash-separated path relative to the picked folder, e.g. `docs/img/logo.png`.
    pub relative_path: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(relative_path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug)]
pub enum UploadError {
    InvalidPath(String),
    CreateFolder { path: String, source: AssetError },
    CreateFile { path: String, source: AssetError },
    Task(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::InvalidPath(p) => write!(f, "invalid upload path: {:?}", p),
            UploadError::CreateFolder { path, source } => {
                write!(f, "failed to create folder {}: {}", path, source)
            }
            UploadError::CreateFile { path, source } => {
                write!(f, "failed to create file {}: {}", path, source)
            }
            UploadError::Task(e) => write!(f, "upload task failed: {}", e),
        }
    }
}

impl std::error::Error for UploadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UploadError::CreateFolder { source, .. } | UploadError::CreateFile { source, .. } => {
                Some(source)
            }
            UploadError::InvalidPath(_) | UploadError::Task(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/upload.rs"]
mod tests;
