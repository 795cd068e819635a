//! Process context: the caches shared by every pipeline run.
//!
//! ## Why explicit objects instead of globals?
//!
//! Both caches are process-lifetime state: URLs already downloaded, template
//! environments already compiled. Owning them in a [`PipelineContext`] passed
//! by reference gives that state a visible lifecycle — tests create a fresh
//! context per scenario, and a long-lived caller (GUI, server) keeps one for
//! the whole process. Each cache guards its map with a `Mutex`, so two runs
//! sharing one context are memory-safe; the worst race that remains is a
//! duplicate download of the same URL, where the last write wins and the
//! cache insert is idempotent.

use crate::config::PipelineConfig;
use crate::error::ResumeError;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tera::Tera;
use tracing::debug;

/// Record of URLs already fetched successfully.
///
/// A URL is inserted only after its bytes are on disk. Presence here is
/// necessary but not sufficient for a cache hit: the resolver also checks
/// that the target file still exists, and re-fetches when it was deleted
/// out-of-band.
#[derive(Debug, Default)]
pub struct DownloadCache {
    urls: Mutex<HashSet<String>>,
}

impl DownloadCache {
    pub fn contains(&self, url: &str) -> bool {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(url)
    }

    pub fn insert(&self, url: &str) {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.to_string());
    }
}

/// Cache of compiled template environments, keyed by template directory.
///
/// At most one environment exists per distinct directory for the lifetime of
/// the owning context. No eviction.
#[derive(Default)]
pub struct TemplateEnvCache {
    envs: Mutex<HashMap<PathBuf, Arc<Tera>>>,
}

impl TemplateEnvCache {
    /// Return the cached environment for `template_dir`, compiling it on
    /// first use.
    ///
    /// The environment globs every file under the directory; tera's default
    /// auto-escape applies to `.html`, `.htm` and `.xml` templates, so data
    /// fields containing markup-significant characters render inert. The
    /// lock is held across compilation: concurrent callers block rather than
    /// building the same environment twice.
    pub fn environment(&self, template_dir: &Path) -> Result<Arc<Tera>, ResumeError> {
        // Canonicalize so "templates" and "./templates" share one entry.
        let key = template_dir
            .canonicalize()
            .unwrap_or_else(|_| template_dir.to_path_buf());

        let mut envs = self.envs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(env) = envs.get(&key) {
            return Ok(Arc::clone(env));
        }

        debug!("compiling template environment for {}", key.display());
        let glob = format!("{}/**/*", key.to_string_lossy());
        let tera = Tera::new(&glob).map_err(|e| ResumeError::TemplateBroken {
            dir: template_dir.to_path_buf(),
            source: e,
        })?;

        let env = Arc::new(tera);
        envs.insert(key, Arc::clone(&env));
        Ok(env)
    }
}

/// Shared state for pipeline runs: configuration plus the download and
/// template caches. Create once, pass by reference into
/// [`crate::pipeline::images::check_images`] and
/// [`crate::pipeline::render::render`].
#[derive(Default)]
pub struct PipelineContext {
    config: PipelineConfig,
    downloads: DownloadCache,
    templates: TemplateEnvCache,
}

impl PipelineContext {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            downloads: DownloadCache::default(),
            templates: TemplateEnvCache::default(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn downloads(&self) -> &DownloadCache {
        &self.downloads
    }

    /// See [`TemplateEnvCache::environment`].
    pub fn environment(&self, template_dir: &Path) -> Result<Arc<Tera>, ResumeError> {
        self.templates.environment(template_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn download_cache_roundtrip() {
        let cache = DownloadCache::default();
        assert!(!cache.contains("https://x/a.png"));
        cache.insert("https://x/a.png");
        assert!(cache.contains("https://x/a.png"));
        // Re-insert is idempotent.
        cache.insert("https://x/a.png");
        assert!(cache.contains("https://x/a.png"));
    }

    #[test]
    fn same_directory_yields_same_environment() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("t.html"), "<p>{{ name }}</p>").unwrap();

        let cache = TemplateEnvCache::default();
        let a = cache.environment(dir.path()).unwrap();
        let b = cache.environment(dir.path()).unwrap();
        assert!(Arc::ptr_eq(&a, &b), "second lookup must hit the cache");
    }

    #[test]
    fn distinct_directories_get_distinct_environments() {
        let d1 = tempfile::tempdir().unwrap();
        let d2 = tempfile::tempdir().unwrap();
        fs::write(d1.path().join("t.html"), "a").unwrap();
        fs::write(d2.path().join("t.html"), "b").unwrap();

        let cache = TemplateEnvCache::default();
        let a = cache.environment(d1.path()).unwrap();
        let b = cache.environment(d2.path()).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn broken_template_set_fails_to_compile() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.html"), "{% if %}").unwrap();

        let cache = TemplateEnvCache::default();
        assert!(cache.environment(dir.path()).is_err());
    }
}
