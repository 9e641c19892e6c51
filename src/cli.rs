use crate::{
    config::Config,
    page_range::PageRange,
    reader::PdfReader,
    report::{ExtractionReport, InputInfo},
    util::{ensure_dir, now_rfc3339, sha256_file},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "pagelift")]
#[command(about = "Multi-backend PDF page text extraction with best-result selection")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./pagelift.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print file name, size, and page count for a validated PDF.
    Info {
        #[arg(long)]
        input: PathBuf,
    },
    /// Run every backend over the range and print per-backend counts.
    Compare {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 1)]
        start: u32,
        #[arg(long)]
        end: Option<u32>,
    },
    /// Extract the best result over the range and write records + report.
    Extract {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 1)]
        start: u32,
        #[arg(long)]
        end: Option<u32>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Extract the best result for a single page and print its records.
    Page {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        page: u32,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let cfg = if cfg_path.exists() {
        Config::load(&cfg_path)?
    } else {
        Config::default()
    };

    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Info { input } => info_cmd(&cfg, input),
        Command::Compare { input, start, end } => compare(&cfg, input, *start, *end),
        Command::Extract {
            input,
            start,
            end,
            out_dir,
        } => extract(&cfg, input, *start, *end, out_dir.as_deref()),
        Command::Page { input, page } => single_page(&cfg, input, *page),
    }
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        if !p.exists() {
            return Err(anyhow!("config file not found: {}", p.display()));
        }
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("pagelift.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("pagelift.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let default_level = if cfg.extraction.verbose {
        "debug"
    } else {
        cfg.logging.level.as_str()
    };
    let level = args.log_level.as_deref().unwrap_or(default_level);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if cfg.logging.write_to_file {
        let path = resolve_log_path(cfg);
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> PathBuf {
    if !cfg.logging.file_path.is_empty() {
        return PathBuf::from(&cfg.logging.file_path);
    }
    PathBuf::from(&cfg.output.out_dir).join("pagelift.log")
}

fn info_cmd(cfg: &Config, input: &Path) -> Result<()> {
    let reader = PdfReader::open(input, cfg.clone())?;
    println!("{}", serde_json::to_string_pretty(&reader.file_info())?);
    Ok(())
}

fn compare(cfg: &Config, input: &Path, start: u32, end: Option<u32>) -> Result<()> {
    let reader = PdfReader::open(input, cfg.clone())?;
    let candidates = reader.compare(PageRange::new(start, end));
    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}

fn extract(
    cfg: &Config,
    input: &Path,
    start: u32,
    end: Option<u32>,
    out_override: Option<&Path>,
) -> Result<()> {
    let reader = PdfReader::open(input, cfg.clone())?;
    let requested = PageRange::new(start, end);

    let started = now_rfc3339();
    let result = reader.extract_best(requested);
    let finished = now_rfc3339();

    let report = ExtractionReport {
        input: InputInfo {
            path: input.display().to_string(),
            file_bytes: reader.handle().file_bytes(),
            sha256: sha256_file(input)
                .with_context(|| format!("hashing input: {}", input.display()))?,
            page_count: reader.page_count(),
        },
        requested,
        method: result.method().map(str::to_string),
        record_count: result.len(),
        started,
        finished,
    };

    let out_root = out_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.output.out_dir));
    ensure_dir(&out_root)?;

    let records_path = out_root.join(&cfg.output.records_filename);
    let report_path = out_root.join(&cfg.output.report_filename);
    std::fs::write(&records_path, serde_json::to_string_pretty(&result)?)?;
    std::fs::write(&report_path, serde_json::to_string_pretty(&report)?)?;

    info!(
        records = result.len(),
        out = %out_root.display(),
        "extraction written"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "records": result.len(),
            "method": report.method,
            "records_path": records_path,
            "report_path": report_path,
        }))?
    );
    Ok(())
}

fn single_page(cfg: &Config, input: &Path, page: u32) -> Result<()> {
    let reader = PdfReader::open(input, cfg.clone())?;
    let result = reader.extract_single_page(page);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
