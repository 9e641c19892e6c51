use serde::{Deserialize, Serialize};

/// A requested page range, 1-based inclusive. `end_page = None` means
/// "through the last page".
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRange {
    pub start_page: u32,
    pub end_page: Option<u32>,
}

/// A range already clamped against a document's page count.
/// Satisfies `1 <= start_page <= end_page <= total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRange {
    pub start_page: u32,
    pub end_page: u32,
}

impl PageRange {
    pub fn new(start_page: u32, end_page: Option<u32>) -> Self {
        Self {
            start_page,
            end_page,
        }
    }

    pub fn single(page: u32) -> Self {
        Self {
            start_page: page,
            end_page: Some(page),
        }
    }

    pub fn full() -> Self {
        Self {
            start_page: 1,
            end_page: None,
        }
    }

    /// Clamp against the actual page count. Out-of-range and inverted
    /// input is silently repaired into the nearest valid range rather
    /// than rejected; callers are often driven by user-supplied page
    /// numbers. Returns `None` only for a zero-page document.
    pub fn normalize(&self, total_pages: u32) -> Option<NormalizedRange> {
        if total_pages == 0 {
            return None;
        }
        let start = self.start_page.clamp(1, total_pages);
        let end = self.end_page.unwrap_or(total_pages).clamp(start, total_pages);
        Some(NormalizedRange {
            start_page: start,
            end_page: end,
        })
    }

    /// Apply the advisory `max_pages` cap; 0 means uncapped.
    pub fn cap(&self, max_pages: u32) -> PageRange {
        if max_pages == 0 {
            return *self;
        }
        let start = self.start_page.max(1);
        let cap_end = start.saturating_add(max_pages - 1);
        let end = match self.end_page {
            Some(e) => e.min(cap_end),
            None => cap_end,
        };
        PageRange {
            start_page: self.start_page,
            end_page: Some(end),
        }
    }
}

impl NormalizedRange {
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.start_page..=self.end_page
    }

    pub fn page_count(&self) -> u32 {
        self.end_page - self.start_page + 1
    }
}
