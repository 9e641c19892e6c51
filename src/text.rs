use crate::config;
use anyhow::Result;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Shared per-page text cleanup applied by every backend before a record
/// is emitted. Pages that clean down to nothing produce no record.
#[derive(Debug, Clone)]
pub struct PageCleaner {
    normalize_unicode: bool,
    strip: Vec<Regex>,
}

impl PageCleaner {
    pub fn from_config(cfg: &config::Text) -> Result<Self> {
        let strip = cfg
            .strip_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            normalize_unicode: cfg.normalize_unicode,
            strip,
        })
    }

    pub fn clean(&self, raw: &str) -> Option<String> {
        let mut s = raw.replace("\r\n", "\n").replace('\r', "\n");

        if self.normalize_unicode {
            s = s.nfkc().collect::<String>();
        }

        s = sanitize_control_chars(&s);

        let mut lines: Vec<&str> = s.lines().map(|l| l.trim_end()).collect();
        if !self.strip.is_empty() {
            lines.retain(|l| !self.strip.iter().any(|r| r.is_match(l.trim())));
        }

        let cleaned = lines.join("\n");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    }
}

impl Default for PageCleaner {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            strip: vec![],
        }
    }
}

fn sanitize_control_chars(s: &str) -> String {
    s.chars()
        .filter(|&ch| {
            // Preserve structural whitespace so multi-line pages survive.
            if ch == '\n' || ch == '\t' {
                return true;
            }
            !ch.is_control()
        })
        .collect()
}
