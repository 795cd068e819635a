//! Configuration for a pipeline run.
//!
//! Every knob lives in [`PipelineConfig`], built via its
//! [`PipelineConfigBuilder`]. One struct keeps runs diffable and makes it
//! trivial to share a configuration between the CLI and library callers; the
//! builder lets callers set only what they care about and take documented
//! defaults for the rest.

use crate::error::ResumeError;
use std::path::PathBuf;

/// Configuration for resume generation.
///
/// Built via [`PipelineConfig::builder()`] or [`PipelineConfig::default()`].
///
/// # Example
/// ```rust
/// use resumegen::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .download_timeout_secs(10)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Timeout for each image download in seconds. Default: 30.
    ///
    /// Expiry is mapped to the same non-fatal fetch-failure outcome as any
    /// other download error, so a dead image host can delay a run but never
    /// hang it indefinitely or abort it.
    pub download_timeout_secs: u64,

    /// Name of the directory, sibling to the output HTML, that receives
    /// downloaded images. Default: `"images"`.
    pub images_dir_name: String,

    /// Explicit path to an HTML-to-PDF engine executable.
    ///
    /// When set, PATH probing is skipped and this executable is used as-is
    /// (it must accept `<input.html> <output.pdf>` positional arguments, the
    /// weasyprint/wkhtmltopdf convention). When unset, well-known engines
    /// are searched on PATH. A configured path that does not exist on disk
    /// counts as "no engine available", which downgrades PDF output to a
    /// warning rather than failing the run.
    pub pdf_engine: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            download_timeout_secs: 30,
            images_dir_name: "images".to_string(),
            pdf_engine: None,
        }
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn images_dir_name(mut self, name: impl Into<String>) -> Self {
        self.config.images_dir_name = name.into();
        self
    }

    pub fn pdf_engine(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdf_engine = Some(path.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, ResumeError> {
        let c = &self.config;
        if c.download_timeout_secs == 0 {
            return Err(ResumeError::InvalidConfig(
                "download timeout must be ≥ 1 second".into(),
            ));
        }
        if c.images_dir_name.is_empty() || c.images_dir_name.contains(std::path::is_separator) {
            return Err(ResumeError::InvalidConfig(format!(
                "images dir name must be a bare directory name, got '{}'",
                c.images_dir_name
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_build() {
        let c = PipelineConfig::builder().build().unwrap();
        assert_eq!(c.download_timeout_secs, 30);
        assert_eq!(c.images_dir_name, "images");
        assert!(c.pdf_engine.is_none());
    }

    #[test]
    fn zero_timeout_rejected() {
        assert!(PipelineConfig::builder()
            .download_timeout_secs(0)
            .build()
            .is_err());
    }

    #[test]
    fn images_dir_with_separator_rejected() {
        assert!(PipelineConfig::builder()
            .images_dir_name("a/b")
            .build()
            .is_err());
    }
}
