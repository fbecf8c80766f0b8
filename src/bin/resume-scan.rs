//! CLI binary for resume-pipeline.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `PipelineConfig`, runs every input as its own request, and prints the
//! summaries.

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use resume_pipeline::{
    analyze_stream, BatchItem, FileInfo, PipelineConfig, PipelineProgressCallback, PipelineStage,
    ProgressCallback, RequestId, ResumeError, ResumeSummary,
};
use serde::Serialize;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// One bar tick per finished request, successful or not.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new(total: usize) -> Arc<Self> {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Analysing");
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }
}

impl PipelineProgressCallback for CliProgressCallback {
    fn on_stage(&self, request_id: &RequestId, stage: &PipelineStage) {
        self.bar.set_message(format!("{request_id}: {stage}"));
        if matches!(stage, PipelineStage::Finalized) {
            self.bar.inc(1);
        }
    }

    fn on_failed(&self, request_id: &RequestId, _error: &str) {
        self.bar.set_message(format!("{request_id}: failed"));
        self.bar.inc(1);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Human-readable summary
  resume-scan resume.pdf

  # Several files at once, JSON output
  resume-scan --json cv_a.pdf cv_b.docx > summaries.json

  # From a URL
  resume-scan https://example.com/jane_doe.pdf

  # Skills only, no text preview
  resume-scan --no-text resume.docx

EXIT STATUS:
  0  every input was analysed
  1  at least one input failed during extraction/processing
  2  some inputs were rejected (validation / missing file), none failed in processing

ENVIRONMENT VARIABLES:
  RUST_LOG               Override log filter (e.g. resume_pipeline=debug)
  RESUME_MAX_FILE_SIZE   Upload size limit in bytes
  RESUME_PREVIEW_CHARS   Preview length in characters
"#;

/// Extract text and skills from PDF/DOCX resumes.
#[derive(Parser, Debug)]
#[command(
    name = "resume-scan",
    version,
    about = "Extract text and skill keywords from PDF and DOCX resumes",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local file paths or HTTP/HTTPS URLs (.pdf or .docx).
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<String>,

    /// Output JSON instead of a text report.
    #[arg(long, env = "RESUME_JSON")]
    json: bool,

    /// Omit the text preview from the text report.
    #[arg(long)]
    no_text: bool,

    /// Maximum accepted file size in bytes.
    #[arg(long, env = "RESUME_MAX_FILE_SIZE", default_value_t = resume_pipeline::config::DEFAULT_MAX_FILE_SIZE)]
    max_file_size: usize,

    /// Characters of text kept in the preview.
    #[arg(long, env = "RESUME_PREVIEW_CHARS", default_value_t = resume_pipeline::config::DEFAULT_PREVIEW_CHARS)]
    preview_chars: usize,

    /// Maximum number of skills reported per file.
    #[arg(long, env = "RESUME_MAX_SKILLS", default_value_t = resume_pipeline::config::DEFAULT_MAX_SKILLS)]
    max_skills: usize,

    /// Files analysed concurrently.
    #[arg(short, long, env = "RESUME_CONCURRENCY", default_value_t = resume_pipeline::config::DEFAULT_CONCURRENCY)]
    concurrency: usize,

    /// HTTP download timeout in seconds.
    #[arg(long, env = "RESUME_DOWNLOAD_TIMEOUT", default_value_t = resume_pipeline::config::DEFAULT_DOWNLOAD_TIMEOUT_SECS)]
    download_timeout: u64,

    /// Disable progress bar.
    #[arg(long, env = "RESUME_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME_VERBOSE")]
    verbose: bool,

    /// Suppress all output except results and errors.
    #[arg(short, long, env = "RESUME_QUIET")]
    quiet: bool,
}

/// JSON shape of a successful result: the summary plus the echoed request id.
#[derive(Serialize)]
struct Report<'a> {
    request_id: &'a RequestId,
    #[serde(flatten)]
    summary: &'a ResumeSummary,
}

/// JSON shape of a failed result.
#[derive(Serialize)]
struct ErrorReport<'a> {
    request_id: &'a RequestId,
    input: &'a str,
    error: String,
    status: u16,
}

fn status_of(err: &ResumeError) -> u16 {
    if err.is_client_error() {
        400
    } else {
        500
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar replaces INFO logs unless --verbose is given.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress = show_progress.then(|| CliProgressCallback::new(cli.inputs.len()));
    let config = build_config(&cli, progress.clone().map(|p| p as ProgressCallback))?;

    // ── Run ──────────────────────────────────────────────────────────────
    let finished: Vec<BatchItem> = analyze_stream(cli.inputs.clone(), &config).collect().await;
    if let Some(ref p) = progress {
        p.bar.finish_and_clear();
    }
    let items = in_input_order(&cli.inputs, finished);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        write_json(&mut out, &items).context("Failed to write JSON output")?;
    } else {
        for item in &items {
            write_text(&mut out, item, !cli.no_text).context("Failed to write to stdout")?;
        }
    }

    // ── Summary + exit status ────────────────────────────────────────────
    if !cli.quiet && items.len() > 1 {
        let failed = items.iter().filter(|i| i.result.is_err()).count();
        eprintln!(
            "{} {}/{} files analysed",
            if failed == 0 { green("✔") } else { red("✘") },
            bold(&(items.len() - failed).to_string()),
            items.len()
        );
    }

    Ok(ExitCode::from(exit_status(&items)))
}

/// 0 when every input succeeded, 1 when any failed in processing, 2 when
/// the only failures were rejected inputs.
fn exit_status(items: &[BatchItem]) -> u8 {
    let mut rejected = false;
    for item in items {
        match &item.result {
            Err(e) if !e.is_client_error() => return 1,
            Err(_) => rejected = true,
            Ok(_) => {}
        }
    }
    if rejected {
        2
    } else {
        0
    }
}

/// Map CLI args to `PipelineConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .max_file_size(cli.max_file_size)
        .preview_chars(cli.preview_chars)
        .max_skills(cli.max_skills)
        .concurrency(cli.concurrency)
        .download_timeout_secs(cli.download_timeout);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// Reorder completion-ordered items to match the order inputs were given.
fn in_input_order(inputs: &[String], mut items: Vec<BatchItem>) -> Vec<BatchItem> {
    let mut ordered = Vec::with_capacity(items.len());
    for input in inputs {
        if let Some(pos) = items.iter().position(|i| &i.input == input) {
            ordered.push(items.remove(pos));
        }
    }
    ordered.append(&mut items);
    ordered
}

/// One JSON value per item: the flattened summary or an error object.
fn json_values(items: &[BatchItem]) -> serde_json::Result<Vec<serde_json::Value>> {
    items
        .iter()
        .map(|item| match &item.result {
            Ok(summary) => serde_json::to_value(Report {
                request_id: &item.request_id,
                summary,
            }),
            Err(e) => serde_json::to_value(ErrorReport {
                request_id: &item.request_id,
                input: &item.input,
                error: e.to_string(),
                status: status_of(e),
            }),
        })
        .collect()
}

fn write_json(out: &mut impl Write, items: &[BatchItem]) -> Result<()> {
    let values = json_values(items).context("Failed to serialise output")?;

    if let [single] = values.as_slice() {
        writeln!(out, "{}", serde_json::to_string_pretty(single)?)?;
    } else {
        writeln!(out, "{}", serde_json::to_string_pretty(&values)?)?;
    }
    Ok(())
}

fn write_text(out: &mut impl Write, item: &BatchItem, with_text: bool) -> Result<()> {
    let summary = match &item.result {
        Ok(summary) => summary,
        Err(e) => {
            writeln!(out, "{} {}", red("✗"), bold(&item.input))?;
            writeln!(out, "   {} [{}]: {e}\n", red("error"), item.request_id)?;
            return Ok(());
        }
    };

    writeln!(
        out,
        "{} {}  {}",
        green("✓"),
        bold(&summary.filename),
        dim(&format!("[{}]", item.request_id))
    )?;
    let kind = match summary.file_info {
        FileInfo::Pdf { page_count } => format!("pdf ({page_count} pages)"),
        FileInfo::Docx => "docx".to_string(),
    };
    writeln!(out, "   type:    {kind}")?;
    writeln!(out, "   size:    {} bytes", summary.file_size)?;
    writeln!(out, "   chars:   {}", summary.text_length)?;
    let skills = if summary.skills.is_empty() {
        dim("none")
    } else {
        summary.skills.join(", ")
    };
    writeln!(out, "   skills:  {skills}")?;

    if with_text {
        writeln!(out)?;
        writeln!(out, "{}", summary.text)?;
    }
    writeln!(out)?;
    Ok(())
}
