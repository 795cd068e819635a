//! Rendering: feed the record through the template and emit the artifacts.
//!
//! One template serves two artifacts. The full pass (`pdf_mode = false`)
//! produces the canonical HTML; the print pass (`pdf_mode = true`) produces
//! an auxiliary HTML that the template itself strips of elements unsuitable
//! for paginated output, which an external engine then converts to PDF. The
//! two passes are separate named operations rather than one call
//! parameterised by a loose flag, but the template contract is the same: it
//! must branch on a `pdf_mode` boolean.

use crate::context::PipelineContext;
use crate::error::ResumeError;
use crate::model::ResumeRecord;
use crate::pdf::PdfEngine;
use crate::pipeline::enrich::enrich;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What happened to the PDF artifact of a render run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfStatus {
    /// No `output_pdf` was requested.
    NotRequested,
    /// The PDF was written to this path.
    Written(PathBuf),
    /// No HTML-to-PDF engine is installed; the run completed with the HTML
    /// artifact only.
    EngineUnavailable,
}

/// Result of a successful [`render`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// The primary, full-fidelity HTML artifact.
    pub html: PathBuf,
    pub pdf: PdfStatus,
}

/// Render the full-fidelity artifact (`pdf_mode = false`).
pub fn render_full(
    ctx: &PipelineContext,
    record: &ResumeRecord,
    template_dir: &Path,
    template_name: &str,
) -> Result<String, ResumeError> {
    render_with_mode(ctx, record, template_dir, template_name, false)
}

/// Render the print variant (`pdf_mode = true`) destined for PDF conversion.
pub fn render_print(
    ctx: &PipelineContext,
    record: &ResumeRecord,
    template_dir: &Path,
    template_name: &str,
) -> Result<String, ResumeError> {
    render_with_mode(ctx, record, template_dir, template_name, true)
}

fn render_with_mode(
    ctx: &PipelineContext,
    record: &ResumeRecord,
    template_dir: &Path,
    template_name: &str,
    pdf_mode: bool,
) -> Result<String, ResumeError> {
    let env = ctx.environment(template_dir)?;

    let mut context =
        tera::Context::from_serialize(record).map_err(|e| ResumeError::TemplateBroken {
            dir: template_dir.to_path_buf(),
            source: e,
        })?;
    context.insert("pdf_mode", &pdf_mode);

    env.render(template_name, &context).map_err(|e| match &e.kind {
        tera::ErrorKind::TemplateNotFound(_) => ResumeError::TemplateNotFound {
            dir: template_dir.to_path_buf(),
            name: template_name.to_string(),
        },
        _ => ResumeError::TemplateBroken {
            dir: template_dir.to_path_buf(),
            source: e,
        },
    })
}

/// Generate the resume artifacts.
///
/// Steps, in order:
/// 1. Enrich the record with `age` (rendering does not assume the caller
///    already ran the enricher).
/// 2. Ensure the output HTML's parent directory exists.
/// 3. Render the full pass and write it to `output_html`.
/// 4. If `output_pdf` was requested and an engine is available: render the
///    print pass to a sibling `<stem>_pdf.html`, then convert it to the PDF.
///    A missing engine downgrades to [`PdfStatus::EngineUnavailable`].
///
/// An I/O failure aborts the remaining steps only — a PDF failure after a
/// successful HTML write leaves the HTML in place.
pub fn render(
    ctx: &PipelineContext,
    record: &mut ResumeRecord,
    template_dir: &Path,
    template_name: &str,
    output_html: &Path,
    output_pdf: Option<&Path>,
) -> Result<RenderOutcome, ResumeError> {
    enrich(record);

    if let Some(parent) = output_html.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ResumeError::OutputWriteFailed {
            path: output_html.to_path_buf(),
            source: e,
        })?;
    }

    let html = render_full(ctx, record, template_dir, template_name)?;
    std::fs::write(output_html, &html).map_err(|e| ResumeError::OutputWriteFailed {
        path: output_html.to_path_buf(),
        source: e,
    })?;
    info!("full HTML written to '{}'", output_html.display());

    let pdf = match output_pdf {
        None => PdfStatus::NotRequested,
        Some(pdf_path) => match PdfEngine::detect(ctx.config()) {
            None => {
                warn!("no HTML-to-PDF engine available; skipping PDF output");
                PdfStatus::EngineUnavailable
            }
            Some(engine) => {
                let print_html = render_print(ctx, record, template_dir, template_name)?;

                let stem = output_html
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let aux_path = output_html.with_file_name(format!("{stem}_pdf.html"));
                std::fs::write(&aux_path, &print_html).map_err(|e| {
                    ResumeError::OutputWriteFailed {
                        path: aux_path.clone(),
                        source: e,
                    }
                })?;
                info!("print HTML written to '{}'", aux_path.display());

                engine.convert(&aux_path, pdf_path)?;
                PdfStatus::Written(pdf_path.to_path_buf())
            }
        },
    };

    Ok(RenderOutcome {
        html: output_html.to_path_buf(),
        pdf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str =
        "<h1>{{ name }}</h1><p>{{ age }}</p>{% if pdf_mode %}<p>print-variant</p>{% endif %}";

    fn template_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("base.html"), TEMPLATE).unwrap();
        dir
    }

    fn record() -> ResumeRecord {
        serde_yaml::from_str("name: Ada\ndate_of_birth: \"1990-01-01\"\n").unwrap()
    }

    #[test]
    fn full_and_print_passes_differ_only_in_pdf_mode() {
        let tpl = template_dir();
        let ctx = PipelineContext::default();
        let mut rec = record();
        enrich(&mut rec);

        let full = render_full(&ctx, &rec, tpl.path(), "base.html").unwrap();
        let print = render_print(&ctx, &rec, tpl.path(), "base.html").unwrap();
        assert!(!full.contains("print-variant"));
        assert!(print.contains("print-variant"));
        assert!(full.contains("Ada"));
    }

    #[test]
    fn markup_in_data_is_escaped() {
        let tpl = template_dir();
        let ctx = PipelineContext::default();
        let mut rec = record();
        rec.name = Some("<script>alert(1)</script>".into());
        enrich(&mut rec);

        let html = render_full(&ctx, &rec, tpl.path(), "base.html").unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn missing_template_is_template_not_found() {
        let tpl = template_dir();
        let ctx = PipelineContext::default();
        let err = render_full(&ctx, &record(), tpl.path(), "nope.html").unwrap_err();
        assert!(matches!(err, ResumeError::TemplateNotFound { .. }));
    }

    #[test]
    fn render_writes_html_and_creates_parent_dirs() {
        let tpl = template_dir();
        let out = tempfile::tempdir().unwrap();
        let ctx = PipelineContext::default();
        let mut rec = record();

        let html_path = out.path().join("nested/dir/resume.html");
        let outcome = render(&ctx, &mut rec, tpl.path(), "base.html", &html_path, None).unwrap();

        assert_eq!(outcome.pdf, PdfStatus::NotRequested);
        let html = fs::read_to_string(&html_path).unwrap();
        assert!(html.contains("Ada"));
        assert!(html.contains(&rec.age.to_string()), "age must be rendered");
        assert!(rec.age > 0, "render must have enriched the record");
    }

    #[test]
    fn pdf_requested_without_engine_keeps_html_and_skips_pdf() {
        let tpl = template_dir();
        let out = tempfile::tempdir().unwrap();
        // Point at a nonexistent engine so detection fails even on machines
        // with weasyprint installed.
        let ctx = PipelineContext::new(
            PipelineConfig::builder()
                .pdf_engine("/no/such/engine")
                .build()
                .unwrap(),
        );
        let mut rec = record();

        let html_path = out.path().join("resume.html");
        let pdf_path = out.path().join("resume.pdf");
        let outcome = render(
            &ctx,
            &mut rec,
            tpl.path(),
            "base.html",
            &html_path,
            Some(&pdf_path),
        )
        .unwrap();

        assert_eq!(outcome.pdf, PdfStatus::EngineUnavailable);
        assert!(html_path.exists());
        assert!(!pdf_path.exists(), "output_pdf must stay unwritten");
    }

    #[cfg(unix)]
    #[test]
    fn pdf_requested_with_engine_writes_aux_html_and_pdf() {
        use std::os::unix::fs::PermissionsExt;

        let tpl = template_dir();
        let out = tempfile::tempdir().unwrap();

        let engine_path = out.path().join("fakeprint");
        fs::write(&engine_path, "#!/bin/sh\nprintf '%%PDF-1.4 stub' > \"$2\"\n").unwrap();
        fs::set_permissions(&engine_path, fs::Permissions::from_mode(0o755)).unwrap();

        let ctx = PipelineContext::new(
            PipelineConfig::builder()
                .pdf_engine(&engine_path)
                .build()
                .unwrap(),
        );
        let mut rec = record();

        let html_path = out.path().join("resume.html");
        let pdf_path = out.path().join("resume.pdf");
        let outcome = render(
            &ctx,
            &mut rec,
            tpl.path(),
            "base.html",
            &html_path,
            Some(&pdf_path),
        )
        .unwrap();

        assert_eq!(outcome.pdf, PdfStatus::Written(pdf_path.clone()));
        assert!(pdf_path.exists());

        let aux = fs::read_to_string(out.path().join("resume_pdf.html")).unwrap();
        assert!(aux.contains("print-variant"), "aux HTML must be the print pass");
    }
}
