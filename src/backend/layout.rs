use super::{BackendError, PageBackend};
use crate::{page_range::PageRange, record::PageRecord, text::PageCleaner};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use tracing::debug;

pub const METHOD: &str = "pdf-extract";

/// Layout-aware extraction via `pdf-extract`, which rebuilds reading
/// order from glyph positions. The crate can panic on exotic font
/// programs, so the call is fenced with `catch_unwind` and a panic is
/// reported as an open failure.
pub struct LayoutBackend {
    cleaner: PageCleaner,
}

impl LayoutBackend {
    pub fn new(cleaner: PageCleaner) -> Self {
        Self { cleaner }
    }
}

impl PageBackend for LayoutBackend {
    fn id(&self) -> &'static str {
        METHOD
    }

    fn extract(&self, path: &Path, range: PageRange) -> Result<Vec<PageRecord>, BackendError> {
        let pages = catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_by_pages(path)))
            .map_err(|_| BackendError::new(METHOD, "panic during extraction"))?
            .map_err(|e| BackendError::new(METHOD, e))?;

        let Some(range) = range.normalize(pages.len() as u32) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for page_no in range.pages() {
            let raw = &pages[(page_no - 1) as usize];
            match self.cleaner.clean(raw) {
                Some(text) => records.extend(PageRecord::from_cleaned(page_no, text, METHOD)),
                None => debug!(backend = METHOD, page = page_no, "page yielded no text"),
            }
        }
        Ok(records)
    }
}
