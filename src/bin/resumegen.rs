//! CLI binary for resumegen.
//!
//! A thin shim over the library crate that maps CLI flags to the pipeline
//! entry points and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use resumegen::{
    check_images, load, render, validate, PdfStatus, PipelineConfig, PipelineContext,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Generate HTML with the bundled template
  resumegen --data demos/resume.yaml

  # Custom output location
  resumegen --data resume.yaml --output-html site/cv.html

  # HTML + PDF (needs weasyprint or wkhtmltopdf installed)
  resumegen --data resume.yaml --output-pdf output/resume.pdf

  # Validate the data file without rendering anything
  resumegen --data resume.yaml --check-only

DATA FORMAT:
  A YAML mapping with name, date_of_birth (YYYY-MM-DD), position, email,
  phone, summary, experience[], education[], skills[], languages[] and
  projects[]; optionally linkedin, github, certifications[] and images:

    profile_image:
      type: url                # or: path
      value: https://example.com/me.png
      download: true           # fetch into the images/ dir next to the HTML

PDF OUTPUT:
  The print-mode HTML is converted by an external engine. weasyprint and
  wkhtmltopdf are probed on PATH; --pdf-engine overrides the probe. Without
  an engine the run still succeeds and produces HTML only.

ENVIRONMENT VARIABLES:
  RESUMEGEN_DATA              Data file path
  RESUMEGEN_TEMPLATE_DIR      Template directory
  RESUMEGEN_PDF_ENGINE        HTML-to-PDF engine executable
  RESUMEGEN_DOWNLOAD_TIMEOUT  Image download timeout in seconds
"#;

/// Generate HTML and PDF resumes from structured YAML.
#[derive(Parser, Debug)]
#[command(
    name = "resumegen",
    version,
    about = "Generate HTML and PDF resumes from structured YAML",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the YAML data file.
    #[arg(long, env = "RESUMEGEN_DATA", default_value = "data/resume.yaml")]
    data: PathBuf,

    /// Directory holding the HTML templates.
    #[arg(long, env = "RESUMEGEN_TEMPLATE_DIR", default_value = "templates")]
    template_dir: PathBuf,

    /// Template file name within the template directory.
    #[arg(long, env = "RESUMEGEN_TEMPLATE", default_value = "base.html")]
    template: String,

    /// Where to write the generated HTML.
    #[arg(long, env = "RESUMEGEN_OUTPUT_HTML", default_value = "output/resume.html")]
    output_html: PathBuf,

    /// Where to write a PDF as well (optional).
    #[arg(long, env = "RESUMEGEN_OUTPUT_PDF")]
    output_pdf: Option<PathBuf>,

    /// Explicit HTML-to-PDF engine executable; skips the PATH probe.
    #[arg(long, env = "RESUMEGEN_PDF_ENGINE")]
    pdf_engine: Option<PathBuf>,

    /// Image download timeout in seconds.
    #[arg(long, env = "RESUMEGEN_DOWNLOAD_TIMEOUT", default_value_t = 30)]
    download_timeout: u64,

    /// Load and validate the data file, then exit without rendering.
    #[arg(long)]
    check_only: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUMEGEN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUMEGEN_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Pipeline ─────────────────────────────────────────────────────────
    let mut builder = PipelineConfig::builder().download_timeout_secs(cli.download_timeout);
    if let Some(engine) = &cli.pdf_engine {
        builder = builder.pdf_engine(engine);
    }
    let config = builder.build().context("invalid configuration")?;
    let ctx = PipelineContext::new(config);

    let mut record = load(&cli.data)
        .with_context(|| format!("failed to load '{}'", cli.data.display()))?;
    record.output_html = Some(cli.output_html.to_string_lossy().into_owned());

    validate(&record).context("resume data is incomplete")?;

    if cli.check_only {
        if !cli.quiet {
            println!("OK: '{}' is complete and well-formed", cli.data.display());
        }
        return Ok(());
    }

    let report = check_images(&ctx, &mut record);
    let degraded = report.iter().filter(|(_, r)| r.is_degraded()).count();

    let outcome = render(
        &ctx,
        &mut record,
        &cli.template_dir,
        &cli.template,
        &cli.output_html,
        cli.output_pdf.as_deref(),
    )
    .context("resume generation failed")?;

    if !cli.quiet {
        println!("HTML: {}", outcome.html.display());
        match &outcome.pdf {
            PdfStatus::Written(p) => println!("PDF:  {}", p.display()),
            PdfStatus::EngineUnavailable => {
                println!("PDF:  skipped (no HTML-to-PDF engine found; install weasyprint or wkhtmltopdf)");
            }
            PdfStatus::NotRequested => {}
        }
        if degraded > 0 {
            println!("note: {degraded} image reference(s) could not be fully resolved");
        }
    }

    Ok(())
}
