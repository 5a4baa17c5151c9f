//! Sources of truth for the latest version of a coordinate
//!
//! The validator only sees [`VersionOracle`]. Lookups are total: a failed or
//! unknown lookup is `None`, never an error, so one bad coordinate cannot
//! abort the rest of a document.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::ReadCache;
use crate::file_types::FileType;

/// Answers "what is the latest version of `groupId:artifactId`?"
pub trait VersionOracle: Send + Sync {
    fn lookup_latest(&self, group_id: &str, artifact_id: &str) -> Option<String>;
}

impl<T: VersionOracle + ?Sized> VersionOracle for &T {
    fn lookup_latest(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        (**self).lookup_latest(group_id, artifact_id)
    }
}

impl<T: VersionOracle + ?Sized> VersionOracle for Arc<T> {
    fn lookup_latest(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        (**self).lookup_latest(group_id, artifact_id)
    }
}

/// Oracle backed by a fixed table of coordinates
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    latest: HashMap<(String, String), String>,
}

impl StaticOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(
        mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.insert(group_id, artifact_id, version);
        self
    }

    pub fn insert(
        &mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) {
        self.latest
            .insert((group_id.into(), artifact_id.into()), version.into());
    }

    /// Build from `groupId:artifactId=version` entries
    pub fn from_entries<S: AsRef<str>>(entries: &[S]) -> anyhow::Result<Self> {
        let mut oracle = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let parsed = entry.split_once('=').and_then(|(coordinate, version)| {
                let (group_id, artifact_id) = coordinate.split_once(':')?;
                Some((group_id.trim(), artifact_id.trim(), version.trim()))
            });
            match parsed {
                Some((g, a, v)) if !g.is_empty() && !a.is_empty() && !v.is_empty() => {
                    oracle.insert(g, a, v)
                }
                _ => anyhow::bail!("invalid entry '{entry}', expected groupId:artifactId=version"),
            }
        }
        Ok(oracle)
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

impl VersionOracle for StaticOracle {
    fn lookup_latest(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        self.latest
            .get(&(group_id.to_string(), artifact_id.to_string()))
            .cloned()
    }
}

/// Oracle that reports the same version for every coordinate
#[derive(Debug, Clone)]
pub struct FixedOracle {
    version: String,
}

impl FixedOracle {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }
}

impl VersionOracle for FixedOracle {
    fn lookup_latest(&self, _group_id: &str, _artifact_id: &str) -> Option<String> {
        Some(self.version.clone())
    }
}

/// Oracle reading the latest stable version from a version cache
pub struct CacheOracle<C> {
    cache: C,
    file_type: FileType,
}

impl<C: ReadCache> CacheOracle<C> {
    pub fn new(cache: C, file_type: FileType) -> Self {
        Self { cache, file_type }
    }
}

impl<C: ReadCache> VersionOracle for CacheOracle<C> {
    fn lookup_latest(&self, group_id: &str, artifact_id: &str) -> Option<String> {
        self.cache
            .get(&self.file_type.cache_key(group_id, artifact_id))
            .and_then(|info| info.latest)
    }
}
