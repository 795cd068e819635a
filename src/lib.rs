//! # resumegen
//!
//! Generate HTML (and optionally PDF) resumes from a structured YAML
//! description.
//!
//! ## Pipeline Overview
//!
//! ```text
//! resume.yaml
//!  │
//!  ├─ 1. Load      parse the YAML document into a ResumeRecord
//!  ├─ 2. Validate  require the core fields; one aggregated report
//!  ├─ 3. Enrich    derive age from the birth date
//!  ├─ 4. Images    resolve profile/project images (download + cache)
//!  ├─ 5. Render    full HTML pass, print pass for PDF
//!  └─ 6. Output    resume.html, images/, optionally resume.pdf
//! ```
//!
//! Load, validation, template and write failures are fatal and end the run;
//! image problems degrade (URL fallback or empty slot) and a missing
//! HTML-to-PDF engine skips the PDF with a warning. Partial artifacts from
//! completed steps stay on disk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resumegen::{check_images, load, render, validate, PipelineContext};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = PipelineContext::default();
//!
//!     let mut record = load("data/resume.yaml")?;
//!     record.output_html = Some("output/resume.html".into());
//!
//!     validate(&record)?;
//!     check_images(&ctx, &mut record);
//!     let outcome = render(
//!         &ctx,
//!         &mut record,
//!         Path::new("templates"),
//!         "base.html",
//!         Path::new("output/resume.html"),
//!         None,
//!     )?;
//!     println!("wrote {}", outcome.html.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Template Contract
//!
//! Templates are [tera] templates loaded from a directory; `.html`/`.xml`
//! files are auto-escaped. Every record field is available by name, plus a
//! `pdf_mode` boolean that is `false` for the canonical HTML artifact and
//! `true` for the print pass — templates branch on it to drop elements that
//! make no sense on paper.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resumegen` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod pdf;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use context::{DownloadCache, PipelineContext, TemplateEnvCache};
pub use error::ResumeError;
pub use model::{
    Certification, Education, Experience, ImageRef, ImageSlot, Project, ResumeRecord, Skill,
};
pub use pdf::PdfEngine;
pub use pipeline::enrich::{age_on, enrich};
pub use pipeline::images::{check_images, resolve_image, ImageResolution};
pub use pipeline::load::load;
pub use pipeline::render::{render, render_full, render_print, PdfStatus, RenderOutcome};
pub use pipeline::validate::validate;
