use crate::page_range::PageRange;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    pub path: String,
    pub file_bytes: u64,
    pub sha256: String,
    pub page_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub input: InputInfo,
    pub requested: PageRange,
    pub method: Option<String>,
    pub record_count: usize,
    pub started: String,
    pub finished: String,
}
