use serde::{Deserialize, Serialize};

/// One successfully extracted page. `text` is trimmed and non-empty;
/// `char_count` always equals the number of chars in `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub page_number: u32,
    pub text: String,
    pub char_count: usize,
    pub method: String,
}

impl PageRecord {
    /// Build a record from already-cleaned page text. Returns `None` for
    /// text that cleaned down to nothing, so whitespace-only pages never
    /// become empty records.
    pub fn from_cleaned(page_number: u32, text: String, method: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        debug_assert_eq!(text.trim(), text);
        Some(Self {
            page_number,
            char_count: text.chars().count(),
            text,
            method: method.to_string(),
        })
    }
}

/// The output of one backend over one page range: records in ascending
/// page order, all tagged with the same method.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub records: Vec<PageRecord>,
}

impl ExtractionResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(records: Vec<PageRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The backend that produced this result, if any records exist.
    pub fn method(&self) -> Option<&str> {
        self.records.first().map(|r| r.method.as_str())
    }
}

/// Read-only summary of a validated document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: String,
    pub file_name: String,
    pub file_size_mb: f64,
    pub num_pages: u32,
}
