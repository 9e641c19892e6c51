use super::{BackendError, PageBackend};
use crate::{page_range::PageRange, record::PageRecord, text::PageCleaner};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

pub const METHOD: &str = "lopdf";

/// Fast structural extraction: `lopdf` parses the object table once and
/// `extract_text` decodes one page at a time, so a single bad page is
/// skipped without touching the rest of the range.
pub struct StructuredBackend {
    cleaner: PageCleaner,
}

impl StructuredBackend {
    pub fn new(cleaner: PageCleaner) -> Self {
        Self { cleaner }
    }
}

impl PageBackend for StructuredBackend {
    fn id(&self) -> &'static str {
        METHOD
    }

    fn extract(&self, path: &Path, range: PageRange) -> Result<Vec<PageRecord>, BackendError> {
        let doc = Document::load(path).map_err(|e| BackendError::new(METHOD, e))?;

        let Some(range) = range.normalize(doc.get_pages().len() as u32) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for page_no in range.pages() {
            match doc.extract_text(&[page_no]) {
                Ok(raw) => match self.cleaner.clean(&raw) {
                    Some(text) => records.extend(PageRecord::from_cleaned(page_no, text, METHOD)),
                    None => debug!(backend = METHOD, page = page_no, "page yielded no text"),
                },
                Err(err) => {
                    debug!(backend = METHOD, page = page_no, %err, "skipping unreadable page");
                }
            }
        }
        Ok(records)
    }
}
