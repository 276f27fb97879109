//! Registry JSON document types and release artifact selection

use std::collections::HashMap;

use serde::Deserialize;

use crate::constants::archive::{SOURCE_ARCHIVE_SUFFIXES, WHEEL_SUFFIX};
use crate::core::ResolvedArtifact;
use crate::error::DeptraceError;

/// Response of `GET {registry}/{name}/json`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDocument {
    pub info: ProjectInfo,
    #[serde(default)]
    pub releases: HashMap<String, Vec<ReleaseFile>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    /// Current version, used when no version is requested
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseFile {
    pub filename: String,
    pub url: String,
}

impl ProjectDocument {
    /// Pick the archive to inspect for `package` at `version`, or at the
    /// current version when none is given
    ///
    /// A wheel is preferred; otherwise the first zip source archive is used.
    pub fn select_artifact(
        &self,
        package: &str,
        version: Option<&str>,
    ) -> Result<ResolvedArtifact, DeptraceError> {
        let version = version.unwrap_or(self.info.version.as_str());

        let files = self
            .releases
            .get(version)
            .filter(|files| !files.is_empty())
            .ok_or_else(|| DeptraceError::VersionNotFound {
                package: package.to_string(),
                version: version.to_string(),
            })?;

        let chosen = files
            .iter()
            .find(|file| file.filename.ends_with(WHEEL_SUFFIX))
            .or_else(|| {
                files.iter().find(|file| {
                    SOURCE_ARCHIVE_SUFFIXES
                        .iter()
                        .any(|suffix| file.filename.ends_with(suffix))
                })
            })
            .ok_or_else(|| DeptraceError::NoUsableArtifact {
                package: package.to_string(),
                version: version.to_string(),
            })?;

        Ok(ResolvedArtifact {
            url: chosen.url.clone(),
            version: version.to_string(),
            filename: chosen.filename.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DOCUMENT: &str = r#"{
        "info": {"version": "2.0", "name": "demo", "summary": "ignored"},
        "releases": {
            "1.0": [
                {"filename": "demo-1.0.tar.gz", "url": "https://files/demo-1.0.tar.gz"},
                {"filename": "demo-1.0.zip", "url": "https://files/demo-1.0.zip"}
            ],
            "1.5": [
                {"filename": "demo-1.5.tar.gz", "url": "https://files/demo-1.5.tar.gz"}
            ],
            "2.0": [
                {"filename": "demo-2.0.tar.gz", "url": "https://files/demo-2.0.tar.gz"},
                {"filename": "demo-2.0-py3-none-any.whl", "url": "https://files/demo-2.0.whl", "size": 10}
            ],
            "3.0": []
        }
    }"#;

    fn document() -> ProjectDocument {
        serde_json::from_str(DOCUMENT).unwrap()
    }

    #[test]
    fn test_defaults_to_current_version_and_prefers_wheel() {
        let artifact = document().select_artifact("demo", None).unwrap();
        assert_eq!(artifact.version, "2.0");
        assert_eq!(artifact.url, "https://files/demo-2.0.whl");
        assert_eq!(artifact.filename, "demo-2.0-py3-none-any.whl");
    }

    #[test]
    fn test_falls_back_to_zip_source_archive() {
        let artifact = document().select_artifact("demo", Some("1.0")).unwrap();
        assert_eq!(artifact.filename, "demo-1.0.zip");
        assert_eq!(artifact.url, "https://files/demo-1.0.zip");
    }

    #[test]
    fn test_tarball_only_release_has_no_usable_artifact() {
        let err = document().select_artifact("demo", Some("1.5")).unwrap_err();
        assert!(matches!(err, DeptraceError::NoUsableArtifact { .. }));
    }

    #[test]
    fn test_missing_or_empty_version_is_not_found() {
        let err = document().select_artifact("demo", Some("9.9")).unwrap_err();
        assert!(matches!(err, DeptraceError::VersionNotFound { .. }));

        let err = document().select_artifact("demo", Some("3.0")).unwrap_err();
        assert!(matches!(err, DeptraceError::VersionNotFound { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_releases_field() {
        let doc: ProjectDocument = serde_json::from_str(r#"{"info": {"version": "1"}}"#).unwrap();
        assert!(doc.releases.is_empty());
        assert!(doc.select_artifact("x", None).unwrap_err().is_not_found());
    }
}
