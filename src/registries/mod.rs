//! Registry clients for fetching artifact version information

use serde::{Deserialize, Serialize};

/// Information about an artifact's versions from a registry
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct VersionInfo {
    /// Latest stable version
    pub latest: Option<String>,
    /// Latest prerelease version
    pub latest_prerelease: Option<String>,
    /// All available versions, newest first
    pub versions: Vec<String>,
}

/// Trait for registry clients
/// Note: async_fn_in_trait is allowed because this trait is internal and already bounds Send + Sync
#[allow(async_fn_in_trait)]
pub trait Registry: Send + Sync {
    /// Get version information for a `groupId:artifactId` coordinate
    async fn get_version_info(
        &self,
        group_id: &str,
        artifact_id: &str,
    ) -> anyhow::Result<VersionInfo>;
}

pub mod http_client;
pub mod maven_central;
pub mod version_utils;
