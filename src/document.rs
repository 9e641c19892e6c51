use crate::record::FileInfo;
use lopdf::Document;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("not a PDF file: {0}")]
    InvalidFormat(PathBuf),
    #[error("corrupted or unreadable PDF {path}: {detail}")]
    Corrupted { path: PathBuf, detail: String },
}

/// A validated document: path plus cached page count and byte size.
/// Validation runs exactly once, at construction; extraction calls never
/// re-validate.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    path: PathBuf,
    page_count: u32,
    file_bytes: u64,
}

impl DocumentHandle {
    /// Checks that `path` is an existing `.pdf` file whose structure
    /// parses, with one read-only open. The page count observed here is
    /// cached for range normalization and `file_info`.
    pub fn validate(path: &Path) -> Result<Self, OpenError> {
        let meta = std::fs::metadata(path)
            .map_err(|_| OpenError::NotFound(path.to_path_buf()))?;
        if !meta.is_file() {
            return Err(OpenError::NotFound(path.to_path_buf()));
        }

        let is_pdf = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(OpenError::InvalidFormat(path.to_path_buf()));
        }

        let doc = Document::load(path).map_err(|e| OpenError::Corrupted {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;

        let page_count = doc.get_pages().len() as u32;
        if page_count == 0 {
            return Err(OpenError::Corrupted {
                path: path.to_path_buf(),
                detail: "document has zero pages".into(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            page_count,
            file_bytes: meta.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn file_bytes(&self) -> u64 {
        self.file_bytes
    }

    pub fn file_info(&self) -> FileInfo {
        let file_name = self
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        FileInfo {
            path: self.path.display().to_string(),
            file_name,
            file_size_mb: self.file_bytes as f64 / (1024.0 * 1024.0),
            num_pages: self.page_count,
        }
    }
}
