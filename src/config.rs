//! Configuration management for stalepom

use std::path::Path;

use serde::Deserialize;

/// Default cache TTL (1 hour)
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Default Maven repository serving maven-metadata.xml
pub const DEFAULT_REGISTRY_URL: &str = "https://repo1.maven.org/maven2";

/// Default number of registry requests in flight at once
const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 5;

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Element names recognized by the validator
    pub validator: ValidatorConfig,
    /// Diagnostics configuration
    pub diagnostics: DiagnosticsConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Registry configuration
    pub registry: RegistryConfig,
    /// Coordinates to ignore (`groupId:artifactId`, `*` wildcard allowed)
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Element names the validator matches on
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Type name of a dependency declaration node
    pub declaration: String,
    /// Type name of the group identifier child
    pub group_id: String,
    /// Type name of the artifact identifier child
    pub artifact_id: String,
    /// Type name of the version child
    pub version: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            declaration: "dependency".to_string(),
            group_id: "groupId".to_string(),
            artifact_id: "artifactId".to_string(),
            version: "version".to_string(),
        }
    }
}

/// Diagnostics configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Report incomplete declarations as warnings (otherwise they are only logged)
    pub report_incomplete: bool,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            report_incomplete: true,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache TTL in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// Registry configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL of the Maven repository
    pub url: String,
    /// Upper bound on concurrent metadata requests
    pub max_concurrent_requests: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

impl Config {
    /// Parse configuration from a JSON value, falling back to defaults
    pub fn from_json(options: Option<serde_json::Value>) -> Self {
        match options {
            Some(value) => serde_json::from_value(value).unwrap_or_default(),
            None => Self::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Check whether a coordinate matches one of the ignore patterns
    pub fn is_ignored(&self, group_id: &str, artifact_id: &str) -> bool {
        let coordinate = format!("{group_id}:{artifact_id}");
        self.ignore
            .iter()
            .any(|pattern| matches_pattern(pattern, &coordinate))
    }
}

/// Match with a single optional `*` wildcard
fn matches_pattern(pattern: &str, value: &str) -> bool {
    match pattern.split_once('*') {
        Some((prefix, suffix)) => {
            value.len() >= prefix.len() + suffix.len()
                && value.starts_with(prefix)
                && value.ends_with(suffix)
        }
        None => value == pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.validator.declaration, "dependency");
        assert_eq!(config.validator.group_id, "groupId");
        assert_eq!(config.validator.artifact_id, "artifactId");
        assert_eq!(config.validator.version, "version");
        assert!(config.diagnostics.report_incomplete);
        assert_eq!(config.cache.ttl_secs, DEFAULT_CACHE_TTL_SECS);
        assert_eq!(config.registry.url, DEFAULT_REGISTRY_URL);
        assert_eq!(config.registry.max_concurrent_requests, 5);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_parse_from_json() {
        let json = json!({
            "validator": {
                "declaration": "plugin"
            },
            "diagnostics": {
                "report_incomplete": false
            },
            "cache": {
                "ttl_secs": 7200
            },
            "ignore": ["org.internal:*", "junit:junit"]
        });

        let config = Config::from_json(Some(json));
        assert_eq!(config.validator.declaration, "plugin");
        // Other names keep their defaults
        assert_eq!(config.validator.version, "version");
        assert!(!config.diagnostics.report_incomplete);
        assert_eq!(config.cache.ttl_secs, 7200);
        assert_eq!(config.ignore.len(), 2);
    }

    #[test]
    fn test_from_json_invalid() {
        let config = Config::from_json(Some(json!("invalid")));
        assert!(config.diagnostics.report_incomplete);
        assert_eq!(Config::from_json(None).validator, ValidatorConfig::default());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
ignore = ["com.acme:*"]

[registry]
url = "http://localhost:8081/repository"

[diagnostics]
report_incomplete = false
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.registry.url, "http://localhost:8081/repository");
        assert_eq!(
            config.registry.max_concurrent_requests,
            DEFAULT_MAX_CONCURRENT_REQUESTS
        );
        assert!(!config.diagnostics.report_incomplete);
        assert_eq!(config.ignore, vec!["com.acme:*".to_string()]);
        assert_eq!(config.cache.ttl_secs, DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn test_from_file_errors() {
        let missing = Config::from_file(Path::new("/nonexistent/stalepom.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ignore = 42").unwrap();
        let invalid = Config::from_file(file.path());
        assert!(matches!(invalid, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_is_ignored() {
        let config = Config {
            ignore: vec![
                "org.internal:*".to_string(),
                "*:test-utils".to_string(),
                "junit:junit".to_string(),
            ],
            ..Default::default()
        };
        assert!(config.is_ignored("org.internal", "core"));
        assert!(config.is_ignored("com.acme", "test-utils"));
        assert!(config.is_ignored("junit", "junit"));
        assert!(!config.is_ignored("junit", "junit-bom"));
        assert!(!config.is_ignored("org.slf4j", "slf4j-api"));
    }

    #[test]
    fn test_matches_pattern_overlap() {
        assert!(!matches_pattern("ab*ba", "aba"));
        assert!(matches_pattern("ab*ba", "abba"));
        assert!(matches_pattern("*", "anything"));
    }
}
