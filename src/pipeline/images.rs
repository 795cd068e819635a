//! Image resolution: turn each [`ImageRef`] into a value the template can
//! render.
//!
//! ## Failure policy
//!
//! Nothing in this module is fatal. A bad image reference must never block
//! document generation, so every failure degrades: a download that fails
//! falls back to the raw URL, a local path that does not exist resolves
//! empty. The outcome of each resolution is an explicit
//! [`ImageResolution`] value, so callers and tests observe the degraded path
//! directly instead of parsing log output.
//!
//! ## Download cache
//!
//! The same image is often resolved repeatedly in one process (a GUI
//! re-rendering the same data, or the profile photo reachable from several
//! views). The context's [`crate::context::DownloadCache`] records each URL
//! after a successful fetch; a later resolution short-circuits only while
//! the downloaded file still exists on disk — deleting it out-of-band forces
//! a re-fetch.

use crate::context::PipelineContext;
use crate::model::{ImageRef, ImageSlot, ResumeRecord};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Fallback output path when the caller injected none; matches the CLI
/// default.
pub(crate) const DEFAULT_OUTPUT_HTML: &str = "output/resume.html";

/// Outcome of resolving one image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResolution {
    /// A file on disk: an existing local path, or a fresh or cached download.
    Local(PathBuf),
    /// A remote URL passed to the template unchanged (`download: false`).
    Remote(String),
    /// The download failed; the raw URL is used instead.
    Fallback(String),
    /// No usable image; renders as the empty string.
    Missing,
}

impl ImageResolution {
    /// The plain string written back into the record for the template.
    pub fn into_value(self) -> String {
        match self {
            ImageResolution::Local(p) => p.to_string_lossy().into_owned(),
            ImageResolution::Remote(url) | ImageResolution::Fallback(url) => url,
            ImageResolution::Missing => String::new(),
        }
    }

    /// True when the resolution did not produce what the reference asked for.
    pub fn is_degraded(&self) -> bool {
        matches!(self, ImageResolution::Fallback(_) | ImageResolution::Missing)
    }
}

/// Why a download failed. Internal: download failures always degrade to
/// [`ImageResolution::Fallback`], they never propagate.
#[derive(Debug, Error)]
enum FetchError {
    #[error("could not create '{dir}': {source}")]
    CreateDir {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("HTTP client: {0}")]
    Client(reqwest::Error),
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("reading response body: {0}")]
    Body(reqwest::Error),
    #[error("could not write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolve a single image reference against `save_dir`.
///
/// | kind | download | outcome |
/// |------|----------|---------|
/// | url  | false    | `Remote(url)` |
/// | url  | true     | `Local(path)` on success, `Fallback(url)` on failure |
/// | path | —        | `Local(path)` if the file exists, else `Missing` |
///
/// An empty `value` resolves to `Missing`.
pub fn resolve_image(
    ctx: &PipelineContext,
    image: &ImageRef,
    save_dir: &Path,
) -> ImageResolution {
    match image {
        ImageRef::Url { value, .. } if value.is_empty() => {
            warn!("image reference has an empty URL");
            ImageResolution::Missing
        }
        ImageRef::Url {
            value,
            download: false,
        } => ImageResolution::Remote(value.clone()),
        ImageRef::Url {
            value,
            download: true,
        } => match download_image(ctx, value, save_dir) {
            Ok(path) => ImageResolution::Local(path),
            Err(e) => {
                warn!("could not download image from '{value}': {e}; using the URL directly");
                ImageResolution::Fallback(value.clone())
            }
        },
        ImageRef::Path { value } if value.is_empty() => {
            warn!("image reference has an empty path");
            ImageResolution::Missing
        }
        ImageRef::Path { value } => {
            if Path::new(value).is_file() {
                ImageResolution::Local(PathBuf::from(value))
            } else {
                warn!("image file '{value}' not found; dropping the reference");
                ImageResolution::Missing
            }
        }
    }
}

/// Download `url` into `save_dir`, reusing a previous download when the URL
/// is cached and its file is still on disk. The URL enters the cache only
/// after the bytes are written.
fn download_image(
    ctx: &PipelineContext,
    url: &str,
    save_dir: &Path,
) -> Result<PathBuf, FetchError> {
    let filename = filename_from_url(url);
    let filepath = save_dir.join(filename);

    std::fs::create_dir_all(save_dir).map_err(|e| FetchError::CreateDir {
        dir: save_dir.to_path_buf(),
        source: e,
    })?;

    if ctx.downloads().contains(url) && filepath.exists() {
        debug!("image {url} already downloaded, reusing {}", filepath.display());
        return Ok(filepath);
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(ctx.config().download_timeout_secs))
        .build()
        .map_err(FetchError::Client)?;

    let response = client.get(url).send().map_err(FetchError::Request)?;
    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }
    let bytes = response.bytes().map_err(FetchError::Body)?;

    std::fs::write(&filepath, &bytes).map_err(|e| FetchError::Write {
        path: filepath.clone(),
        source: e,
    })?;

    ctx.downloads().insert(url);
    info!("downloaded image from {url} to {}", filepath.display());
    Ok(filepath)
}

/// Target filename for a download: the URL's final path segment.
fn filename_from_url(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(mut segments) = parsed.path_segments() {
            if let Some(last) = segments.next_back() {
                if !last.is_empty() {
                    return last.to_string();
                }
            }
        }
    }
    "download.img".to_string()
}

/// Resolve every image reference in the record, in place.
///
/// Exactly two locations carry images: the top-level profile photo and the
/// `image` field of each project. Both resolve into a shared `images/`
/// directory sibling to the record's intended HTML output path. Slots that
/// are already plain strings, and projects without an image, are left
/// untouched.
///
/// Returns the per-location outcomes so callers can surface degraded
/// resolutions; ignoring the return value keeps the fire-and-forget
/// contract.
pub fn check_images(
    ctx: &PipelineContext,
    record: &mut ResumeRecord,
) -> Vec<(String, ImageResolution)> {
    let output_html = record
        .output_html
        .clone()
        .unwrap_or_else(|| DEFAULT_OUTPUT_HTML.to_string());
    let html_path = PathBuf::from(output_html);
    let out_dir = match html_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let save_dir = out_dir.join(&ctx.config().images_dir_name);

    let mut report = Vec::new();

    if let Some(slot) = record.profile_image.as_mut() {
        if let Some(res) = resolve_slot(ctx, slot, &save_dir) {
            report.push(("profile_image".to_string(), res));
        }
    }

    for (i, project) in record.projects.iter_mut().flatten().enumerate() {
        if let Some(slot) = project.image.as_mut() {
            if let Some(res) = resolve_slot(ctx, slot, &save_dir) {
                report.push((format!("projects[{i}].image"), res));
            }
        }
    }

    report
}

/// Resolve one slot in place; `None` when it was already a plain string.
fn resolve_slot(
    ctx: &PipelineContext,
    slot: &mut ImageSlot,
    save_dir: &Path,
) -> Option<ImageResolution> {
    match slot {
        ImageSlot::Resolved(_) => None,
        ImageSlot::Ref(image) => {
            let res = resolve_image(ctx, image, save_dir);
            *slot = ImageSlot::Resolved(res.clone().into_value());
            Some(res)
        }
    }
}
