//! stalepom - stale dependency checks for Maven manifests
//!
//! Walks a parsed `pom.xml`, extracts every dependency declaration and
//! compares its declared version with the latest version reported by a
//! pluggable [`oracle::VersionOracle`].

pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod file_types;
pub mod oracle;
pub mod parsers;
pub mod registries;
pub mod reports;
pub mod scanner;
pub mod utils;
pub mod validator;

pub use diagnostics::{Diagnostic, Severity};
pub use document::{Document, Node};
pub use oracle::VersionOracle;
pub use validator::{DependencyValidator, validate};
