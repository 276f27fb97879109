//! # Registry Access Module
//!
//! Resolves a package name (and optional version) to a downloadable archive
//! and retrieves the archive bytes.
//!
//! ## Key Components
//!
//! - **PackageSource**: the two operations the graph builder needs from a
//!   registry
//! - **RegistryClient**: blocking HTTP implementation against a
//!   `{registry}/{name}/json` API
//! - **ProjectDocument**: the JSON document returned by the registry, with
//!   release artifact selection

mod client;
mod types;

pub use client::RegistryClient;
pub use types::{ProjectDocument, ProjectInfo, ReleaseFile};

use crate::core::{NodeId, ResolvedArtifact};
use crate::error::DeptraceError;

/// Source of package archives
pub trait PackageSource {
    /// Resolve `package` at `version` (or the current version) to an archive
    ///
    /// Fails with a not-found error when the package, the version or a usable
    /// archive is missing, and with [`DeptraceError::RegistryError`] on any
    /// other transport or HTTP failure.
    fn resolve_package(
        &self,
        package: &NodeId,
        version: Option<&str>,
    ) -> Result<ResolvedArtifact, DeptraceError>;

    /// Download the archive at `url`; every failure is a
    /// [`DeptraceError::FetchError`]
    fn download_archive(&self, url: &str) -> Result<Vec<u8>, DeptraceError>;
}

impl<S: PackageSource + ?Sized> PackageSource for &S {
    fn resolve_package(
        &self,
        package: &NodeId,
        version: Option<&str>,
    ) -> Result<ResolvedArtifact, DeptraceError> {
        (**self).resolve_package(package, version)
    }

    fn download_archive(&self, url: &str) -> Result<Vec<u8>, DeptraceError> {
        (**self).download_archive(url)
    }
}
