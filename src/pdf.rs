//! External HTML-to-PDF engine discovery and invocation.
//!
//! PDF output is delegated to an installed converter rather than rendered
//! in-process: the print artifact is ordinary HTML, and weasyprint or
//! wkhtmltopdf turn HTML into paginated PDF better than anything this crate
//! could reimplement. Engine absence is a supported configuration — the
//! renderer degrades to HTML-only output with a warning, it does not fail
//! the run.

use crate::config::PipelineConfig;
use crate::error::ResumeError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Engines probed on PATH, in preference order. Each accepts
/// `<input.html> <output.pdf>` positional arguments.
const KNOWN_ENGINES: &[&str] = &["weasyprint", "wkhtmltopdf"];

/// A detected HTML-to-PDF converter executable.
#[derive(Debug, Clone)]
pub struct PdfEngine {
    path: PathBuf,
}

impl PdfEngine {
    /// Find a usable engine: the configured path if set, otherwise the first
    /// known engine on PATH. `None` means PDF output is unavailable in this
    /// environment.
    pub fn detect(config: &PipelineConfig) -> Option<PdfEngine> {
        if let Some(configured) = &config.pdf_engine {
            if configured.is_file() {
                return Some(PdfEngine {
                    path: configured.clone(),
                });
            }
            warn!(
                "configured PDF engine '{}' does not exist; PDF output unavailable",
                configured.display()
            );
            return None;
        }

        for name in KNOWN_ENGINES {
            if let Some(path) = find_on_path(name) {
                debug!("found PDF engine: {}", path.display());
                return Some(PdfEngine { path });
            }
        }
        None
    }

    /// Short name for logs and error messages.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Convert `html` into `pdf`.
    ///
    /// The HTML path is made absolute first so the engine resolves relative
    /// asset references (images, stylesheets) against the HTML file's own
    /// directory.
    ///
    /// # Errors
    /// [`ResumeError::PdfConversionFailed`] when the engine cannot be
    /// spawned or exits non-zero.
    pub fn convert(&self, html: &Path, pdf: &Path) -> Result<(), ResumeError> {
        let html_abs = html.canonicalize().map_err(|e| ResumeError::PdfConversionFailed {
            engine: self.name(),
            detail: format!("cannot resolve '{}': {e}", html.display()),
        })?;

        let mut cmd = Command::new(&self.path);
        if self.name() == "wkhtmltopdf" {
            // Recent wkhtmltopdf builds block file:// assets by default.
            cmd.arg("--enable-local-file-access");
        }
        cmd.arg(&html_abs).arg(pdf);

        let output = cmd.output().map_err(|e| ResumeError::PdfConversionFailed {
            engine: self.name(),
            detail: format!("failed to run '{}': {e}", self.path.display()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ResumeError::PdfConversionFailed {
                engine: self.name(),
                detail: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        info!("PDF written to '{}' via {}", pdf.display(), self.name());
        Ok(())
    }
}

fn find_on_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use std::fs;

    #[test]
    fn configured_engine_that_does_not_exist_means_unavailable() {
        let config = PipelineConfig::builder()
            .pdf_engine("/no/such/engine")
            .build()
            .unwrap();
        assert!(PdfEngine::detect(&config).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn stub_engine_converts() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let engine_path = dir.path().join("fakeprint");
        fs::write(&engine_path, "#!/bin/sh\nprintf '%%PDF-1.4 stub' > \"$2\"\n").unwrap();
        fs::set_permissions(&engine_path, fs::Permissions::from_mode(0o755)).unwrap();

        let html = dir.path().join("in.html");
        fs::write(&html, "<html></html>").unwrap();
        let pdf = dir.path().join("out.pdf");

        let config = PipelineConfig::builder()
            .pdf_engine(&engine_path)
            .build()
            .unwrap();
        let engine = PdfEngine::detect(&config).expect("stub engine must be detected");
        assert_eq!(engine.name(), "fakeprint");

        engine.convert(&html, &pdf).unwrap();
        assert!(fs::read_to_string(&pdf).unwrap().starts_with("%PDF"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_engine_reports_conversion_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let engine_path = dir.path().join("brokenprint");
        fs::write(&engine_path, "#!/bin/sh\necho boom >&2\nexit 3\n").unwrap();
        fs::set_permissions(&engine_path, fs::Permissions::from_mode(0o755)).unwrap();

        let html = dir.path().join("in.html");
        fs::write(&html, "<html></html>").unwrap();

        let config = PipelineConfig::builder()
            .pdf_engine(&engine_path)
            .build()
            .unwrap();
        let engine = PdfEngine::detect(&config).unwrap();

        let err = engine.convert(&html, dir.path().join("out.pdf").as_path());
        match err {
            Err(ResumeError::PdfConversionFailed { detail, .. }) => {
                assert!(detail.contains("boom"), "stderr must be preserved: {detail}");
            }
            other => panic!("expected PdfConversionFailed, got {other:?}"),
        }
    }
}
