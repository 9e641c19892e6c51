mod common;

use pagelift::backend::{BackendError, PageBackend};
use pagelift::{Config, DocumentHandle, PageRange, PageRecord, PdfReader};
use std::path::Path;

struct Fixed {
    id: &'static str,
    pages: &'static [u32],
}

impl PageBackend for Fixed {
    fn id(&self) -> &'static str {
        self.id
    }

    fn extract(&self, _path: &Path, _range: PageRange) -> Result<Vec<PageRecord>, BackendError> {
        Ok(self
            .pages
            .iter()
            .map(|&p| PageRecord::from_cleaned(p, format!("page {p}"), self.id).unwrap())
            .collect())
    }
}

struct Failing {
    id: &'static str,
}

impl PageBackend for Failing {
    fn id(&self) -> &'static str {
        self.id
    }

    fn extract(&self, _path: &Path, _range: PageRange) -> Result<Vec<PageRecord>, BackendError> {
        Err(BackendError::new(self.id, "could not open"))
    }
}

fn reader_with(backends: Vec<Box<dyn PageBackend>>) -> PdfReader {
    let dir = tempfile::tempdir().unwrap();
    let path = common::pdf_with_pages(dir.path(), "doc.pdf", &["one", "two", "three"]);
    let handle = DocumentHandle::validate(&path).unwrap();
    PdfReader::with_backends(handle, Config::default(), backends)
}

#[test]
fn highest_record_count_wins() {
    let reader = reader_with(vec![
        Box::new(Fixed {
            id: "a",
            pages: &[1, 3],
        }),
        Box::new(Fixed {
            id: "b",
            pages: &[1, 2, 3],
        }),
        Box::new(Fixed {
            id: "c",
            pages: &[2],
        }),
    ]);

    let result = reader.extract_best(PageRange::full());
    assert_eq!(result.len(), 3);
    assert_eq!(result.method(), Some("b"));
}

#[test]
fn tie_keeps_earliest_backend() {
    let reader = reader_with(vec![
        Box::new(Fixed {
            id: "a",
            pages: &[1, 2],
        }),
        Box::new(Fixed {
            id: "b",
            pages: &[2, 3],
        }),
        Box::new(Fixed { id: "c", pages: &[] }),
    ]);

    let result = reader.extract_best(PageRange::full());
    assert_eq!(result.len(), 2);
    assert_eq!(result.method(), Some("a"));
}

#[test]
fn failing_backend_does_not_stop_the_others() {
    let reader = reader_with(vec![
        Box::new(Failing { id: "a" }),
        Box::new(Fixed {
            id: "b",
            pages: &[1, 2],
        }),
    ]);

    let result = reader.extract_best(PageRange::full());
    assert_eq!(result.len(), 2);
    assert_eq!(result.method(), Some("b"));

    let candidates = reader.compare(PageRange::full());
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].records, 0);
    assert!(candidates[0].error.is_some());
    assert_eq!(candidates[1].records, 2);
    assert!(candidates[1].error.is_none());
}

#[test]
fn all_empty_yields_empty_result_not_error() {
    let reader = reader_with(vec![
        Box::new(Failing { id: "a" }),
        Box::new(Fixed { id: "b", pages: &[] }),
        Box::new(Failing { id: "c" }),
    ]);

    let result = reader.extract_best(PageRange::full());
    assert!(result.is_empty());
    assert_eq!(result.method(), None);
}
