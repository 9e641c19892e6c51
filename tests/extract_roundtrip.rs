mod common;

use pagelift::{Config, PageRange, PdfReader};

fn open_reader(dir: &std::path::Path, pages: &[&str]) -> PdfReader {
    let path = common::pdf_with_pages(dir, "doc.pdf", pages);
    PdfReader::open(&path, Config::default()).unwrap()
}

#[test]
fn full_range_extracts_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["Alpha one", "Bravo two", "Charlie three"]);

    let result = reader.extract_best(PageRange::full());
    assert_eq!(result.len(), 3);

    let pages: Vec<u32> = result.records.iter().map(|r| r.page_number).collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[test]
fn records_hold_their_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["  padded text  ", "Bravo two", "Charlie three"]);

    let result = reader.extract_best(PageRange::full());
    assert!(!result.is_empty());

    let method = result.method().unwrap().to_string();
    for rec in &result.records {
        assert_eq!(rec.char_count, rec.text.chars().count());
        assert_eq!(rec.text.trim(), rec.text);
        assert!(!rec.text.is_empty());
        assert_eq!(rec.method, method);
    }
}

#[test]
fn whitespace_only_pages_produce_no_records() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["Alpha one", "   ", "Charlie three"]);

    let result = reader.extract_best(PageRange::full());
    let pages: Vec<u32> = result.records.iter().map(|r| r.page_number).collect();
    assert_eq!(pages, vec![1, 3]);
}

#[test]
fn sub_range_extracts_only_requested_pages() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["Alpha one", "Bravo two", "Charlie three"]);

    let result = reader.extract_best(PageRange::new(2, Some(3)));
    let pages: Vec<u32> = result.records.iter().map(|r| r.page_number).collect();
    assert_eq!(pages, vec![2, 3]);
}

#[test]
fn nonsense_range_degrades_to_full_document() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["Alpha one", "Bravo two", "Charlie three"]);

    let result = reader.extract_best(PageRange::new(0, Some(99)));
    assert_eq!(result.len(), 3);
}

#[test]
fn single_page_returns_at_most_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["Alpha one", "Bravo two", "Charlie three"]);

    let result = reader.extract_single_page(2);
    assert_eq!(result.len(), 1);
    assert_eq!(result.records[0].page_number, 2);
    assert!(result.records[0].text.contains("Bravo"));
}

#[test]
fn single_blank_page_returns_zero_records() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["Alpha one", "   ", "Charlie three"]);

    let result = reader.extract_single_page(2);
    assert!(result.is_empty());
}

#[test]
fn max_pages_caps_the_processed_span() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::pdf_with_pages(dir.path(), "doc.pdf", &["Alpha", "Bravo", "Charlie"]);

    let mut cfg = Config::default();
    cfg.extraction.max_pages = 2;
    let reader = PdfReader::open(&path, cfg).unwrap();

    let result = reader.extract_best(PageRange::full());
    let pages: Vec<u32> = result.records.iter().map(|r| r.page_number).collect();
    assert_eq!(pages, vec![1, 2]);
}

#[test]
fn candidates_cover_every_backend_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let reader = open_reader(dir.path(), &["Alpha one", "Bravo two"]);

    let candidates = reader.compare(PageRange::full());
    let backends: Vec<&str> = candidates.iter().map(|c| c.backend.as_str()).collect();
    assert_eq!(backends, vec!["pdf-extract", "lopdf", "stream"]);
    assert!(candidates.iter().any(|c| c.records > 0));
}
