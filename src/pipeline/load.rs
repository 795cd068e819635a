//! Loading: read a YAML data file into a [`ResumeRecord`].
//!
//! No schema enforcement happens here. Unknown keys are ignored and missing
//! keys deserialize to `None`, so an incomplete document loads fine and the
//! validator gets the chance to report every problem at once. The only hard
//! parse failures are malformed YAML and image maps with an unknown `type`
//! tag.

use crate::error::ResumeError;
use crate::model::ResumeRecord;
use std::path::Path;
use tracing::{debug, info};

/// Load and parse a resume data file.
///
/// # Errors
/// * [`ResumeError::DataFileNotFound`] / [`ResumeError::DataFileUnreadable`]
///   when the file cannot be opened or read.
/// * [`ResumeError::InvalidYaml`] when the content does not parse; the
///   original serde_yaml cause is preserved.
pub fn load(path: impl AsRef<Path>) -> Result<ResumeRecord, ResumeError> {
    let path = path.as_ref();

    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ResumeError::DataFileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(ResumeError::DataFileUnreadable {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    debug!("read {} bytes from {}", text.len(), path.display());

    let record: ResumeRecord =
        serde_yaml::from_str(&text).map_err(|e| ResumeError::InvalidYaml {
            path: path.to_path_buf(),
            source: e,
        })?;

    info!("loaded resume data from '{}'", path.display());
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_missing_file_is_not_found() {
        let err = load("/definitely/not/a/real/resume.yaml").unwrap_err();
        assert!(matches!(err, ResumeError::DataFileNotFound { .. }));
    }

    #[test]
    fn load_malformed_yaml_preserves_cause() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("bad.yaml");
        fs::write(&p, "name: [unclosed\n").unwrap();

        let err = load(&p).unwrap_err();
        match err {
            ResumeError::InvalidYaml { path, .. } => assert_eq!(path, p),
            other => panic!("expected InvalidYaml, got {other:?}"),
        }
    }

    #[test]
    fn load_incomplete_document_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("partial.yaml");
        fs::write(&p, "name: Grace Hopper\nposition: Rear Admiral\n").unwrap();

        let rec = load(&p).unwrap();
        assert_eq!(rec.name.as_deref(), Some("Grace Hopper"));
        assert!(rec.email.is_none(), "missing keys stay None");
    }
}
