pub mod layout;
pub mod stream;
pub mod structured;

use crate::{config, page_range::PageRange, record::PageRecord, text::PageCleaner};
use anyhow::Result;
use std::path::Path;
use thiserror::Error;

pub use layout::LayoutBackend;
pub use stream::StreamBackend;
pub use structured::StructuredBackend;

/// A backend's whole-document open failure. Per-page failures never
/// surface here; backends catch and skip them internally.
#[derive(Debug, Error)]
#[error("{backend} could not open document: {detail}")]
pub struct BackendError {
    pub backend: &'static str,
    pub detail: String,
}

impl BackendError {
    pub fn new(backend: &'static str, detail: impl std::fmt::Display) -> Self {
        Self {
            backend,
            detail: detail.to_string(),
        }
    }
}

/// One concrete text-extraction strategy. Implementations open the file
/// themselves, clamp the requested range against the page count they
/// observe, skip pages that fail or clean down to nothing, and tag every
/// record with their own `id()`.
pub trait PageBackend: Send + Sync {
    fn id(&self) -> &'static str;
    fn extract(&self, path: &Path, range: PageRange) -> Result<Vec<PageRecord>, BackendError>;
}

/// The fixed preference order: layout-aware, then fast-structural, then
/// the tolerant content-stream walk.
pub fn default_backends(cfg: &config::Text) -> Result<Vec<Box<dyn PageBackend>>> {
    let cleaner = PageCleaner::from_config(cfg)?;
    Ok(vec![
        Box::new(LayoutBackend::new(cleaner.clone())),
        Box::new(StructuredBackend::new(cleaner.clone())),
        Box::new(StreamBackend::new(cleaner)),
    ])
}
