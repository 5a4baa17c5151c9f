//! Stale dependency detection
//!
//! Walks a [`Document`] in pre-order and checks every dependency declaration
//! against a [`VersionOracle`]:
//!
//! - no artifactId: warning, nothing else is checked
//! - no version: warning, version check skipped
//! - no groupId: version check skipped silently
//! - otherwise: violation when the oracle knows a different latest version
//!
//! The validator keeps no state between calls.

use crate::config::{Config, ValidatorConfig};
use crate::diagnostics::{Diagnostic, Severity};
use crate::document::{Document, Node};
use crate::file_types::is_in_scope;
use crate::oracle::VersionOracle;
use crate::utils::{collapse_whitespace, eq_ignore_case, truncate_string};

/// Longest raw fragment echoed back in a warning
const MAX_FRAGMENT_CHARS: usize = 120;

/// A dependency declaration extracted from one declaration node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDeclaration {
    /// Type name of the declaration node (e.g. "dependency")
    pub node_name: String,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    /// Line of the declaration node
    pub line: u32,
}

impl DependencyDeclaration {
    /// `(groupId, artifactId, version)` when all three are declared
    pub fn complete(&self) -> Option<(&str, &str, &str)> {
        Some((
            self.group_id.as_deref()?,
            self.artifact_id.as_deref()?,
            self.version.as_deref()?,
        ))
    }
}

/// Child fields the validator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    GroupId,
    ArtifactId,
    Version,
}

impl Field {
    fn from_name(names: &ValidatorConfig, name: &str) -> Option<Self> {
        if name == names.group_id {
            Some(Field::GroupId)
        } else if name == names.artifact_id {
            Some(Field::ArtifactId)
        } else if name == names.version {
            Some(Field::Version)
        } else {
            None
        }
    }
}

/// Checks dependency declarations of a manifest against a version oracle
#[derive(Debug, Clone, Default)]
pub struct DependencyValidator {
    config: Config,
}

impl DependencyValidator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract every declaration of the document, in document order.
    ///
    /// Does not apply the manifest filename filter.
    pub fn extract_declarations(&self, document: &Document) -> Vec<DependencyDeclaration> {
        self.declaration_nodes(document)
            .map(|node| self.extract(node))
            .collect()
    }

    fn declaration_nodes<'a>(&'a self, document: &'a Document) -> impl Iterator<Item = &'a Node> {
        let declaration = self.config.validator.declaration.as_str();
        document
            .nodes()
            .filter(move |node| !declaration.is_empty() && node.name == declaration)
    }

    /// Read the fields of one declaration from its direct children.
    /// The first child carrying a field wins.
    fn extract(&self, node: &Node) -> DependencyDeclaration {
        let mut group_id = None;
        let mut artifact_id = None;
        let mut version = None;

        for child in &node.children {
            let slot = match Field::from_name(&self.config.validator, &child.name) {
                Some(Field::GroupId) => &mut group_id,
                Some(Field::ArtifactId) => &mut artifact_id,
                Some(Field::Version) => &mut version,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(child.text.clone());
            }
        }

        DependencyDeclaration {
            node_name: node.name.clone(),
            group_id,
            artifact_id,
            version,
            line: node.line,
        }
    }

    /// Validate a document, returning findings in document order.
    ///
    /// Documents that are not a manifest yield no findings.
    pub fn validate<O: VersionOracle + ?Sized>(
        &self,
        document: &Document,
        oracle: &O,
    ) -> Vec<Diagnostic> {
        if !is_in_scope(document) {
            tracing::debug!("Skipping {}: not a manifest", document.file_name);
            return Vec::new();
        }

        self.declaration_nodes(document)
            .filter_map(|node| self.check(node, oracle))
            .collect()
    }

    fn check<O: VersionOracle + ?Sized>(&self, node: &Node, oracle: &O) -> Option<Diagnostic> {
        let names = &self.config.validator;
        let declaration = self.extract(node);

        let Some(artifact_id) = declaration.artifact_id.as_deref() else {
            let fragment =
                truncate_string(&collapse_whitespace(node.code()), MAX_FRAGMENT_CHARS);
            tracing::warn!(
                "'{}' has not been specified so the declaration cannot be processed: {fragment}",
                names.artifact_id
            );
            return self.incomplete(
                &declaration,
                format!("'{}' has not been specified", names.artifact_id),
                fragment,
                "declaration skipped",
            );
        };

        let group_id = declaration.group_id.as_deref();
        if self.config.is_ignored(group_id.unwrap_or_default(), artifact_id) {
            tracing::debug!("Ignoring {}:{artifact_id}", group_id.unwrap_or_default());
            return None;
        }

        let Some(version) = declaration.version.as_deref() else {
            let group = group_id.unwrap_or_default();
            tracing::warn!("There is no version specified for the artifact {group}:{artifact_id}");
            return self.incomplete(
                &declaration,
                format!("There is no version specified for the artifact {group}:{artifact_id}"),
                format!("{}::{group}::{artifact_id}", declaration.node_name),
                "version check skipped",
            );
        };

        // Without a group the oracle cannot be queried
        let group_id = group_id?;

        let latest = oracle.lookup_latest(group_id, artifact_id)?;
        if eq_ignore_case(version, &latest) {
            return None;
        }

        let diagnostic = Diagnostic {
            severity: Severity::Violation,
            line: declaration.line,
            message: format!("{group_id}:{artifact_id} {version} is outdated, latest is {latest}"),
            code_fragment: format!(
                "{}::{group_id}::{artifact_id}::{version}",
                declaration.node_name
            ),
            explanation: format!("last version is: {latest}"),
        };
        tracing::debug!(?diagnostic, "Outdated dependency");
        Some(diagnostic)
    }

    /// Warning for a declaration that cannot be checked, unless warnings are log-only
    fn incomplete(
        &self,
        declaration: &DependencyDeclaration,
        message: String,
        code_fragment: String,
        explanation: &str,
    ) -> Option<Diagnostic> {
        if !self.config.diagnostics.report_incomplete {
            return None;
        }
        Some(Diagnostic {
            severity: Severity::Warning,
            line: declaration.line,
            message,
            code_fragment,
            explanation: explanation.to_string(),
        })
    }
}

/// Validate with the default element names and settings
pub fn validate<O: VersionOracle + ?Sized>(document: &Document, oracle: &O) -> Vec<Diagnostic> {
    DependencyValidator::default().validate(document, oracle)
}
