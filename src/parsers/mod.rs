//! Parsers that turn manifest files into a [`Document`] tree

use crate::document::Document;

/// Errors raised while building a [`Document`] from raw text
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed XML at line {line}: {source}")]
    Xml {
        line: u32,
        #[source]
        source: quick_xml::Error,
    },
    #[error("element <{name}> opened at line {line} is never closed")]
    Unclosed { name: String, line: u32 },
    #[error("unexpected element <{name}> at line {line} after the root element")]
    MultipleRoots { name: String, line: u32 },
    #[error("document has no root element")]
    NoRootElement,
}

/// Trait for parsing manifest files
pub trait Parser: Send + Sync {
    /// Parse the given file content into a document tree
    fn parse(&self, file_name: &str, content: &str) -> Result<Document, ParseError>;
}

pub mod xml;
