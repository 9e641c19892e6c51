use crate::{
    backend::{self, BackendError, PageBackend},
    config::Config,
    document::DocumentHandle,
    page_range::PageRange,
    record::{ExtractionResult, FileInfo, PageRecord},
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-backend outcome of one trial loop, for diagnostics and the
/// `compare` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub backend: String,
    pub records: usize,
    pub elapsed_ms: u64,
    #[serde(default)]
    pub error: Option<String>,
}

struct Candidate {
    backend: &'static str,
    outcome: Result<Vec<PageRecord>, BackendError>,
    elapsed_ms: u64,
}

/// Multi-backend PDF reader. Validation runs once at construction; each
/// extraction call tries every backend in fixed preference order and
/// keeps the result with the most records.
pub struct PdfReader {
    cfg: Config,
    handle: DocumentHandle,
    backends: Vec<Box<dyn PageBackend>>,
}

impl PdfReader {
    pub fn open(path: &Path, cfg: Config) -> Result<Self> {
        let backends = backend::default_backends(&cfg.text)?;
        let handle = DocumentHandle::validate(path)?;
        Ok(Self {
            cfg,
            handle,
            backends,
        })
    }

    /// Construct over an explicit backend set, in trial order. This is
    /// the seam for plugging in additional backends.
    pub fn with_backends(
        handle: DocumentHandle,
        cfg: Config,
        backends: Vec<Box<dyn PageBackend>>,
    ) -> Self {
        Self {
            cfg,
            handle,
            backends,
        }
    }

    /// Run every backend over `range` and return the candidate with the
    /// most records. Ties keep the earliest backend in trial order. A
    /// failing backend contributes an empty candidate; if nothing
    /// extracts any text the result is empty, not an error.
    pub fn extract_best(&self, range: PageRange) -> ExtractionResult {
        let capped = range.cap(self.cfg.extraction.max_pages);

        let mut best = ExtractionResult::empty();
        let mut best_backend: Option<&'static str> = None;
        for c in self.run_backends(capped) {
            if let Ok(records) = c.outcome {
                if records.len() > best.len() {
                    best_backend = Some(c.backend);
                    best = ExtractionResult::new(records);
                }
            }
        }

        match best_backend {
            Some(backend) => info!(backend, records = best.len(), "selected best extraction"),
            None => info!("no backend extracted any text"),
        }
        best
    }

    pub fn extract_single_page(&self, page: u32) -> ExtractionResult {
        self.extract_best(PageRange::single(page))
    }

    /// Every backend's record count, timing, and error text over `range`,
    /// in trial order, without selecting a winner.
    pub fn compare(&self, range: PageRange) -> Vec<CandidateSummary> {
        let capped = range.cap(self.cfg.extraction.max_pages);
        self.run_backends(capped)
            .into_iter()
            .map(|c| match c.outcome {
                Ok(records) => CandidateSummary {
                    backend: c.backend.to_string(),
                    records: records.len(),
                    elapsed_ms: c.elapsed_ms,
                    error: None,
                },
                Err(err) => CandidateSummary {
                    backend: c.backend.to_string(),
                    records: 0,
                    elapsed_ms: c.elapsed_ms,
                    error: Some(err.to_string()),
                },
            })
            .collect()
    }

    pub fn file_info(&self) -> FileInfo {
        self.handle.file_info()
    }

    pub fn page_count(&self) -> u32 {
        self.handle.page_count()
    }

    pub fn handle(&self) -> &DocumentHandle {
        &self.handle
    }

    fn run_backends(&self, range: PageRange) -> Vec<Candidate> {
        let timeout = self.cfg.extraction.timeout_seconds;
        let mut out = Vec::with_capacity(self.backends.len());

        for b in &self.backends {
            let started = Instant::now();
            let outcome = b.extract(self.handle.path(), range);
            let elapsed = started.elapsed();

            if timeout > 0 && elapsed.as_secs() > timeout {
                warn!(
                    backend = b.id(),
                    elapsed_s = elapsed.as_secs(),
                    timeout_s = timeout,
                    "backend exceeded the configured time ceiling"
                );
            }

            match &outcome {
                Ok(records) => debug!(
                    backend = b.id(),
                    records = records.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "backend finished"
                ),
                Err(err) => warn!(backend = b.id(), "backend failed: {err}"),
            }

            out.push(Candidate {
                backend: b.id(),
                outcome,
                elapsed_ms: elapsed.as_millis() as u64,
            });
        }
        out
    }
}
