//! Error types for the resumegen library.
//!
//! One enum, [`ResumeError`], covers every fatal outcome of a pipeline run,
//! grouped by the stage that raises it. Degradations that the pipeline
//! recovers from on its own are *values*, not errors:
//!
//! * an unresolvable image becomes [`crate::pipeline::images::ImageResolution::Missing`]
//!   (or `Fallback` for a failed download), and
//! * a missing HTML-to-PDF engine becomes
//!   [`crate::pipeline::render::PdfStatus::EngineUnavailable`].
//!
//! Callers and tests observe the degraded path through those values rather
//! than by parsing log output. Fatal errors are never retried by the library;
//! the caller decides whether to re-run with corrected input.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the resumegen library.
#[derive(Debug, Error)]
pub enum ResumeError {
    // ── Load errors ───────────────────────────────────────────────────────
    /// Data file was not found at the given path.
    #[error("resume data file not found: '{path}'\nCheck the path exists and is readable.")]
    DataFileNotFound { path: PathBuf },

    /// Data file exists but could not be read.
    #[error("failed to read resume data file '{path}': {source}")]
    DataFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file content is not valid YAML for the resume schema.
    #[error("failed to parse '{path}' as resume YAML: {source}")]
    InvalidYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // ── Validation errors ─────────────────────────────────────────────────
    /// One aggregated report naming every missing and every empty required
    /// field, so the user fixes all of them from a single message.
    #[error(
        "resume data failed validation\n  missing fields: [{}]\n  empty fields: [{}]",
        .missing.join(", "),
        .empty.join(", ")
    )]
    Validation {
        missing: Vec<String>,
        empty: Vec<String>,
    },

    // ── Template errors ───────────────────────────────────────────────────
    /// Requested template does not exist in the template directory.
    #[error("template '{name}' not found in '{dir}'")]
    TemplateNotFound { dir: PathBuf, name: String },

    /// The template set failed to parse, or rendering it failed.
    #[error("template error in '{dir}': {source}")]
    TemplateBroken {
        dir: PathBuf,
        #[source]
        source: tera::Error,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTML-to-PDF engine was found but the conversion failed.
    /// A missing engine is not an error; see
    /// [`crate::pipeline::render::PdfStatus::EngineUnavailable`].
    #[error("PDF conversion via '{engine}' failed: {detail}")]
    PdfConversionFailed { engine: String, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ResumeError {
    /// Build the aggregated validation error from the two offender lists.
    /// At least one list must be non-empty; an empty pair means validation
    /// passed and no error should exist.
    pub(crate) fn validation(missing: Vec<String>, empty: Vec<String>) -> Self {
        debug_assert!(!missing.is_empty() || !empty.is_empty());
        ResumeError::Validation { missing, empty }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_names_every_offender() {
        let e = ResumeError::validation(
            vec!["name".into(), "email".into()],
            vec!["skills".into()],
        );
        let msg = e.to_string();
        assert!(msg.contains("name, email"), "got: {msg}");
        assert!(msg.contains("skills"), "got: {msg}");
    }

    #[test]
    fn template_not_found_display() {
        let e = ResumeError::TemplateNotFound {
            dir: PathBuf::from("templates"),
            name: "base.html".into(),
        };
        assert!(e.to_string().contains("base.html"));
        assert!(e.to_string().contains("templates"));
    }

    #[test]
    fn pdf_conversion_display() {
        let e = ResumeError::PdfConversionFailed {
            engine: "weasyprint".into(),
            detail: "exit status 1".into(),
        };
        assert!(e.to_string().contains("weasyprint"));
        assert!(e.to_string().contains("exit status 1"));
    }
}
