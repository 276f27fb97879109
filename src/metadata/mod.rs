//! # Archive Metadata Module
//!
//! Reads the dependency declarations out of a distribution archive. An
//! archive is a zip container holding a metadata descriptor (`METADATA` in a
//! wheel, `PKG-INFO` in a source archive) whose `Requires-Dist:` lines list
//! the package's dependencies.
//!
//! ## Example
//!
//! ```
//! use deptrace::metadata::DependencyExtractor;
//!
//! let descriptor = "\
//! Metadata-Version: 2.1
//! Name: requests
//! Requires-Dist: charset-normalizer<4,>=2
//! Requires-Dist: idna<4,>=2.5
//! Requires-Dist: PySocks!=1.5.7,>=1.5.6; extra == \"socks\"
//! ";
//!
//! let deps = DependencyExtractor::parse_descriptor(descriptor);
//! let names: Vec<&str> = deps.iter().map(|d| d.as_str()).collect();
//! assert_eq!(names, vec!["charset-normalizer", "idna"]);
//! ```

mod requirement;

use std::collections::HashSet;
use std::io::{Cursor, Read};

use tracing::debug;
use zip::ZipArchive;

pub use requirement::DependencySpec;

use crate::constants::archive::{METADATA_ENTRY_SUFFIXES, REQUIRES_DIST_FIELD};
use crate::core::NodeId;
use crate::error::DeptraceError;

/// Extracts dependency names from distribution archives
pub struct DependencyExtractor;

impl DependencyExtractor {
    /// Dependency names declared by the archive, in first-seen order
    ///
    /// An archive that cannot be opened or carries no metadata descriptor
    /// declares zero dependencies.
    pub fn extract_dependencies(archive: &[u8]) -> Vec<NodeId> {
        Self::try_extract_dependencies(archive).unwrap_or_else(|err| {
            debug!("Treating archive as dependency-free: {err}");
            Vec::new()
        })
    }

    /// Same as [`Self::extract_dependencies`], keeping the failure reason
    pub fn try_extract_dependencies(archive: &[u8]) -> Result<Vec<NodeId>, DeptraceError> {
        let mut zip =
            ZipArchive::new(Cursor::new(archive)).map_err(|e| DeptraceError::ArchiveError {
                message: e.to_string(),
            })?;

        // Only the descriptor is opened; other entries may be unreadable
        let Some(name) = zip
            .file_names()
            .find(|name| is_metadata_entry(name))
            .map(str::to_string)
        else {
            return Err(DeptraceError::MetadataNotFound);
        };

        debug!("Reading metadata descriptor '{name}'");
        let mut raw = Vec::new();
        zip.by_name(&name)
            .and_then(|mut entry| Ok(entry.read_to_end(&mut raw)?))
            .map_err(|e| DeptraceError::ArchiveError {
                message: e.to_string(),
            })?;

        Ok(Self::parse_descriptor(&String::from_utf8_lossy(&raw)))
    }

    /// Dependency names declared by the text of a metadata descriptor
    pub fn parse_descriptor(descriptor: &str) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        descriptor
            .lines()
            .filter_map(|line| line.strip_prefix(REQUIRES_DIST_FIELD))
            .filter_map(|raw| DependencySpec::parse(raw).resolve())
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }
}

fn is_metadata_entry(name: &str) -> bool {
    METADATA_ENTRY_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}
