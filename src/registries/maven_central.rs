//! Client for Maven repositories (Maven Central by default)
//!
//! Versions come from the per-artifact `maven-metadata.xml`, which every
//! Maven 2 layout repository (Central, Nexus, Artifactory mirrors) serves.

use std::sync::Arc;

use reqwest::Client;

use super::http_client::create_shared_client;
use super::version_utils::{is_prerelease_maven, sort_newest_first};
use super::{Registry, VersionInfo};
use crate::config::DEFAULT_REGISTRY_URL;
use crate::parsers::Parser;
use crate::parsers::xml::XmlParser;

/// Client for a Maven 2 layout repository
pub struct MavenCentralRegistry {
    client: Arc<Client>,
    base_url: String,
}

impl MavenCentralRegistry {
    pub fn with_client(client: Arc<Client>) -> Self {
        Self {
            client,
            base_url: DEFAULT_REGISTRY_URL.to_string(),
        }
    }

    /// Point the client at another repository (mirror, proxy, test server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn http_client(&self) -> Arc<Client> {
        Arc::clone(&self.client)
    }

    fn metadata_url(&self, group_id: &str, artifact_id: &str) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.base_url,
            group_id.replace('.', "/"),
            artifact_id
        )
    }
}

impl Default for MavenCentralRegistry {
    fn default() -> Self {
        Self::with_client(create_shared_client().expect("Failed to create HTTP client"))
    }
}

impl Registry for MavenCentralRegistry {
    async fn get_version_info(
        &self,
        group_id: &str,
        artifact_id: &str,
    ) -> anyhow::Result<VersionInfo> {
        let url = self.metadata_url(group_id, artifact_id);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch metadata for {group_id}:{artifact_id}: {}",
                response.status()
            );
        }

        let body = response.text().await?;
        parse_metadata(&body)
    }
}

/// Extract version information from a maven-metadata.xml document
pub fn parse_metadata(content: &str) -> anyhow::Result<VersionInfo> {
    let document = XmlParser::new().parse("maven-metadata.xml", content)?;
    let Some(versioning) = document.root.as_ref().and_then(|r| r.child("versioning")) else {
        anyhow::bail!("maven-metadata.xml has no <versioning> section");
    };

    let mut versions: Vec<String> = versioning
        .child("versions")
        .map(|list| {
            list.children
                .iter()
                .filter(|v| v.name == "version" && !v.text.is_empty())
                .map(|v| v.text.clone())
                .collect()
        })
        .unwrap_or_default();
    sort_newest_first(&mut versions);

    let release = versioning
        .child("release")
        .map(|r| r.text.clone())
        .filter(|r| !r.is_empty() && !is_prerelease_maven(r));

    let latest = release.or_else(|| versions.iter().find(|v| !is_prerelease_maven(v)).cloned());
    let latest_prerelease = versions.iter().find(|v| is_prerelease_maven(v)).cloned();

    Ok(VersionInfo {
        latest,
        latest_prerelease,
        versions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SLF4J_METADATA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>org.slf4j</groupId>
  <artifactId>slf4j-api</artifactId>
  <versioning>
    <latest>2.1.0-alpha1</latest>
    <release>2.0.9</release>
    <versions>
      <version>1.7.36</version>
      <version>2.0.0</version>
      <version>2.0.9</version>
      <version>2.1.0-alpha1</version>
    </versions>
    <lastUpdated>20231001000000</lastUpdated>
  </versioning>
</metadata>
"#;

    #[test]
    fn test_parse_metadata() {
        let info = parse_metadata(SLF4J_METADATA).unwrap();
        assert_eq!(info.latest.as_deref(), Some("2.0.9"));
        assert_eq!(info.latest_prerelease.as_deref(), Some("2.1.0-alpha1"));
        assert_eq!(info.versions[0], "2.1.0-alpha1");
        assert_eq!(info.versions.len(), 4);
    }

    #[test]
    fn test_parse_metadata_without_release() {
        let content = r#"<metadata><versioning><versions>
            <version>1.0</version><version>1.1</version><version>2.0-SNAPSHOT</version>
        </versions></versioning></metadata>"#;
        let info = parse_metadata(content).unwrap();
        assert_eq!(info.latest.as_deref(), Some("1.1"));
        assert_eq!(info.latest_prerelease.as_deref(), Some("2.0-SNAPSHOT"));
    }

    #[test]
    fn test_parse_metadata_prerelease_release_is_ignored() {
        let content = r#"<metadata><versioning><release>3.0.0-M1</release><versions>
            <version>2.5.0</version><version>3.0.0-M1</version>
        </versions></versioning></metadata>"#;
        let info = parse_metadata(content).unwrap();
        assert_eq!(info.latest.as_deref(), Some("2.5.0"));
    }

    #[test]
    fn test_parse_metadata_errors() {
        assert!(parse_metadata("<metadata></metadata>").is_err());
        assert!(parse_metadata("not xml <").is_err());
    }

    #[test]
    fn test_metadata_url() {
        let registry = MavenCentralRegistry::with_client(create_shared_client().unwrap())
            .with_base_url("https://repo.example.com/maven2/");
        assert_eq!(
            registry.metadata_url("org.apache.commons", "commons-lang3"),
            "https://repo.example.com/maven2/org/apache/commons/commons-lang3/maven-metadata.xml"
        );
    }

    #[tokio::test]
    async fn test_get_version_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/slf4j/slf4j-api/maven-metadata.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SLF4J_METADATA))
            .mount(&server)
            .await;

        let registry = MavenCentralRegistry::default().with_base_url(server.uri());
        let info = registry
            .get_version_info("org.slf4j", "slf4j-api")
            .await
            .unwrap();
        assert_eq!(info.latest.as_deref(), Some("2.0.9"));
    }

    #[tokio::test]
    async fn test_get_version_info_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let registry = MavenCentralRegistry::default().with_base_url(server.uri());
        let result = registry.get_version_info("org.missing", "nothing").await;
        assert!(result.is_err());
    }
}
