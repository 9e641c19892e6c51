use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: Extraction,
    #[serde(default)]
    pub text: Text,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: Default::default(),
            text: Default::default(),
            output: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Extraction {
    /// Advisory cap on pages processed per call; 0 means uncapped.
    pub max_pages: u32,
    /// Advisory ceiling for a single backend call, in seconds.
    pub timeout_seconds: u64,
    pub verbose: bool,
}
impl Default for Extraction {
    fn default() -> Self {
        Self {
            max_pages: 0,
            timeout_seconds: 600,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    pub normalize_unicode: bool,
    /// Lines matching any of these patterns are dropped from page text.
    pub strip_patterns: Vec<String>,
}
impl Default for Text {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            strip_patterns: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub out_dir: String,
    pub records_filename: String,
    pub report_filename: String,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            out_dir: "out".into(),
            records_filename: "records.json".into(),
            report_filename: "report.json".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: false,
            file_path: "".into(),
        }
    }
}
