//! File type detection
//!
//! Decides whether a document is a manifest this crate knows how to check,
//! and provides cache keys for the coordinates found in it.

use crate::document::Document;

/// Fixed manifest filename, compared case-insensitively
pub const POM_FILE_NAME: &str = "pom.xml";

/// Supported manifest file types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Maven project descriptor (pom.xml)
    Maven,
}

impl FileType {
    /// Detect the file type from a filename or path.
    ///
    /// Only the final path component is considered. Returns `None` for any
    /// file that is not a recognized manifest.
    pub fn detect(path: &str) -> Option<Self> {
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        if file_name.eq_ignore_ascii_case(POM_FILE_NAME) {
            Some(FileType::Maven)
        } else {
            None
        }
    }

    /// Generate a cache key for a coordinate.
    ///
    /// The prefix keeps keys distinct from other ecosystems sharing a cache.
    pub fn cache_key(self, group_id: &str, artifact_id: &str) -> String {
        match self {
            FileType::Maven => format!("maven:{group_id}:{artifact_id}"),
        }
    }
}

/// Whether the validator should run on this document at all
pub fn is_in_scope(document: &Document) -> bool {
    FileType::detect(&document.file_name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pom() {
        assert_eq!(FileType::detect("pom.xml"), Some(FileType::Maven));
        assert_eq!(FileType::detect("/project/pom.xml"), Some(FileType::Maven));
        assert_eq!(
            FileType::detect("C:\\project\\pom.xml"),
            Some(FileType::Maven)
        );
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(FileType::detect("POM.XML"), Some(FileType::Maven));
        assert_eq!(FileType::detect("/project/Pom.Xml"), Some(FileType::Maven));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(FileType::detect("build.xml"), None);
        assert_eq!(FileType::detect("/project/pom.xml.bak"), None);
        assert_eq!(FileType::detect("/project/my-pom.xml"), None);
        assert_eq!(FileType::detect("/pom.xml/settings.xml"), None);
        assert_eq!(FileType::detect(""), None);
    }

    #[test]
    fn test_is_in_scope() {
        assert!(is_in_scope(&Document::empty("/repo/POM.xml")));
        assert!(!is_in_scope(&Document::empty("/repo/web.xml")));
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(
            FileType::Maven.cache_key("org.slf4j", "slf4j-api"),
            "maven:org.slf4j:slf4j-api"
        );
    }
}
