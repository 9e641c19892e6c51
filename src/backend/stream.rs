use super::{BackendError, PageBackend};
use crate::{page_range::PageRange, record::PageRecord, text::PageCleaner};
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use std::path::Path;
use tracing::debug;

pub const METHOD: &str = "stream";

/// Stream-robust extraction: decode each page's content stream and walk
/// the text-showing operators directly. Survives documents whose font
/// and encoding tables are too damaged for the structured decoders, at
/// the cost of cruder text.
pub struct StreamBackend {
    cleaner: PageCleaner,
}

impl StreamBackend {
    pub fn new(cleaner: PageCleaner) -> Self {
        Self { cleaner }
    }
}

impl PageBackend for StreamBackend {
    fn id(&self) -> &'static str {
        METHOD
    }

    fn extract(&self, path: &Path, range: PageRange) -> Result<Vec<PageRecord>, BackendError> {
        let doc = Document::load(path).map_err(|e| BackendError::new(METHOD, e))?;

        let pages = doc.get_pages();
        let Some(range) = range.normalize(pages.len() as u32) else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (&page_no, &page_id) in pages.range(range.start_page..=range.end_page) {
            match page_text(&doc, page_id) {
                Ok(raw) => match self.cleaner.clean(&raw) {
                    Some(text) => records.extend(PageRecord::from_cleaned(page_no, text, METHOD)),
                    None => debug!(backend = METHOD, page = page_no, "page yielded no text"),
                },
                Err(err) => {
                    debug!(backend = METHOD, page = page_no, %err, "skipping undecodable page");
                }
            }
        }
        Ok(records)
    }
}

fn page_text(doc: &Document, page_id: ObjectId) -> Result<String, lopdf::Error> {
    let data = doc.get_page_content(page_id)?;
    let content = Content::decode(&data)?;

    let mut out = String::new();
    for op in &content.operations {
        match op.operator.as_str() {
            "Tj" | "'" | "\"" => {
                for operand in &op.operands {
                    if let Object::String(bytes, _) = operand {
                        out.push_str(&decode_text_bytes(bytes));
                    }
                }
            }
            "TJ" => {
                for operand in &op.operands {
                    if let Object::Array(items) = operand {
                        for item in items {
                            if let Object::String(bytes, _) = item {
                                out.push_str(&decode_text_bytes(bytes));
                            }
                        }
                    }
                }
            }
            "Td" | "TD" | "T*" | "ET" => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    Ok(out)
}

/// Literal strings in unencrypted streams are near enough to Latin-1;
/// UTF-16BE strings carry a BOM. Bytes that map to control characters
/// are dropped rather than guessed at.
fn decode_text_bytes(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units)
            .chars()
            .filter(|c| !c.is_control() || *c == '\n')
            .collect();
    }
    bytes
        .iter()
        .map(|&b| b as char)
        .filter(|c| !c.is_control())
        .collect()
}
