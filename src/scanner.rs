//! Document scanning workflow
//!
//! The validator is synchronous and expects an oracle that answers
//! immediately. The scanner bridges it to an async registry: it parses the
//! manifest, fetches the latest versions of every checkable coordinate into
//! the cache concurrently, then validates against a [`CacheOracle`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::cache::{MemoryCache, ReadCache, WriteCache};
use crate::config::Config;
use crate::diagnostics::{Diagnostic, Severity};
use crate::document::Document;
use crate::file_types::FileType;
use crate::oracle::{CacheOracle, VersionOracle};
use crate::parsers::xml::XmlParser;
use crate::parsers::{ParseError, Parser};
use crate::registries::Registry;
use crate::validator::{DependencyDeclaration, DependencyValidator};

/// Outcome of checking one manifest
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// File that was checked
    pub file: String,
    /// Number of dependency declarations found
    pub dependencies: usize,
    /// Findings in document order
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn violations(&self) -> usize {
        self.count(Severity::Violation)
    }

    pub fn warnings(&self) -> usize {
        self.count(Severity::Warning)
    }
}

/// Parse and validate manifest text against an oracle that answers synchronously
pub fn check_content<O: VersionOracle + ?Sized>(
    validator: &DependencyValidator,
    file_name: &str,
    content: &str,
    oracle: &O,
) -> Result<ScanReport, ParseError> {
    if FileType::detect(file_name).is_none() {
        return Ok(empty_report(file_name));
    }
    let document = XmlParser::new().parse(file_name, content)?;
    Ok(report(validator, &document, oracle))
}

fn report<O: VersionOracle + ?Sized>(
    validator: &DependencyValidator,
    document: &Document,
    oracle: &O,
) -> ScanReport {
    let diagnostics = validator.validate(document, oracle);
    ScanReport {
        file: document.file_name.clone(),
        dependencies: validator.extract_declarations(document).len(),
        diagnostics,
    }
}

fn empty_report(file_name: &str) -> ScanReport {
    ScanReport {
        file: file_name.to_string(),
        ..Default::default()
    }
}

/// Checks manifests against a remote registry, caching lookups
pub struct Scanner<R> {
    registry: Arc<R>,
    cache: Arc<MemoryCache>,
    validator: DependencyValidator,
    parser: XmlParser,
}

impl<R: Registry> Scanner<R> {
    pub fn new(registry: R, config: Config) -> Self {
        let cache = MemoryCache::with_ttl(Duration::from_secs(config.cache.ttl_secs));
        Self {
            registry: Arc::new(registry),
            cache: Arc::new(cache),
            validator: DependencyValidator::new(config),
            parser: XmlParser::new(),
        }
    }

    /// Share a cache between scanners
    pub fn with_cache(mut self, cache: Arc<MemoryCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }

    /// Check one manifest.
    ///
    /// Files that are not manifests are skipped without parsing or network
    /// access. Registry failures only hide the affected coordinates.
    pub async fn scan(&self, file_name: &str, content: &str) -> anyhow::Result<ScanReport> {
        let Some(file_type) = FileType::detect(file_name) else {
            tracing::debug!("Skipping {file_name}: not a manifest");
            return Ok(empty_report(file_name));
        };

        let document = self.parser.parse(file_name, content)?;
        let declarations = self.validator.extract_declarations(&document);
        tracing::info!(
            "Parsed {} dependency declarations from {file_name}",
            declarations.len()
        );

        self.prefetch(file_type, &declarations).await;

        let oracle = CacheOracle::new(Arc::clone(&self.cache), file_type);
        Ok(report(&self.validator, &document, &oracle))
    }

    /// Fetch the latest versions of uncached coordinates concurrently.
    ///
    /// Expired cache entries are evicted first. At most
    /// `registry.max_concurrent_requests` requests are in flight at once.
    /// Returns the number of coordinates successfully fetched.
    pub async fn prefetch(
        &self,
        file_type: FileType,
        declarations: &[DependencyDeclaration],
    ) -> usize {
        self.cache.cleanup_expired();

        let mut seen = HashSet::new();
        let pending: Vec<(&str, &str)> = declarations
            .iter()
            .filter_map(DependencyDeclaration::complete)
            .map(|(group_id, artifact_id, _)| (group_id, artifact_id))
            .filter(|(g, a)| !self.validator.config().is_ignored(g, a))
            .filter(|coordinate| seen.insert(*coordinate))
            .filter(|(g, a)| !self.cache.contains(&file_type.cache_key(g, a)))
            .collect();

        if pending.is_empty() {
            tracing::debug!("All coordinates cached, skipping registry queries");
            return 0;
        }

        tracing::info!("Querying registry for {} artifacts", pending.len());

        let limit = self.validator.config().registry.max_concurrent_requests.max(1);
        let semaphore = Semaphore::new(limit);
        let semaphore = &semaphore;

        let fetches = pending.into_iter().map(|(group_id, artifact_id)| async move {
            let _permit = semaphore.acquire().await;
            match self.registry.get_version_info(group_id, artifact_id).await {
                Ok(info) => {
                    self.cache
                        .insert(file_type.cache_key(group_id, artifact_id), info);
                    true
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch version info for {group_id}:{artifact_id}: {e}");
                    false
                }
            }
        });

        join_all(fetches).await.into_iter().filter(|ok| *ok).count()
    }
}
