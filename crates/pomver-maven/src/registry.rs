//! Remote repository metadata lookup.

use crate::metadata::parse_metadata;
use crate::selection::select_versions;
use async_trait::async_trait;
use pomver_core::{BranchKind, HttpCache, RemoteVersions, VersionSource};
use std::sync::Arc;

/// Repository queried when none are configured.
pub const MAVEN_CENTRAL: &str = "https://repo.maven.apache.org/maven2/";

/// Builds the `maven-metadata.xml` URL for an artifact in a repository.
pub fn metadata_url(repository: &str, group_id: &str, artifact_id: &str) -> String {
    format!(
        "{}/{}/{}/maven-metadata.xml",
        repository.trim_end_matches('/'),
        group_id.replace('.', "/"),
        artifact_id
    )
}

/// Queries configured repositories for published artifact versions.
///
/// Repositories are tried in order and the first one that knows the
/// artifact wins. Fetch and parse failures count as misses for that
/// repository; an artifact unknown everywhere yields an empty result, not
/// an error.
pub struct MavenRepoClient {
    cache: Arc<HttpCache>,
    repositories: Vec<String>,
}

impl MavenRepoClient {
    /// Creates a client over the given repositories, falling back to
    /// [`MAVEN_CENTRAL`] when the list is empty.
    pub fn new(cache: Arc<HttpCache>, repositories: Vec<String>) -> Self {
        let repositories = if repositories.is_empty() {
            vec![MAVEN_CENTRAL.to_string()]
        } else {
            repositories
        };
        Self {
            cache,
            repositories,
        }
    }

    pub fn repositories(&self) -> &[String] {
        &self.repositories
    }

    pub async fn remote_versions(
        &self,
        group_id: &str,
        artifact_id: &str,
        kind: Option<BranchKind>,
    ) -> RemoteVersions {
        for repository in &self.repositories {
            let url = metadata_url(repository, group_id, artifact_id);
            let body = match self.cache.get_cached(&url).await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!("metadata fetch failed for {url}: {e}");
                    continue;
                }
            };
            let content = String::from_utf8_lossy(&body);
            let metadata = match parse_metadata(&content) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::debug!("metadata parse failed for {url}: {e}");
                    continue;
                }
            };
            let versions = select_versions(&metadata, kind);
            if !versions.is_empty() {
                return versions;
            }
        }
        RemoteVersions::default()
    }
}

#[async_trait]
impl VersionSource for MavenRepoClient {
    async fn lookup(
        &self,
        group_id: &str,
        artifact_id: &str,
        kind: Option<BranchKind>,
    ) -> RemoteVersions {
        self.remote_versions(group_id, artifact_id, kind).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const METADATA: &str = r"<metadata><versioning>
        <release>1.2.3.RELEASE</release>
        <versions>
            <version>1.2.3.RELEASE</version>
            <version>1.2.4-qa-SNAPSHOT</version>
        </versions>
    </versioning></metadata>";

    fn client_for(urls: Vec<String>) -> MavenRepoClient {
        MavenRepoClient::new(Arc::new(HttpCache::new()), urls)
    }

    #[test]
    fn test_metadata_url() {
        assert_eq!(
            metadata_url(
                "https://repo.maven.apache.org/maven2/",
                "org.apache.commons",
                "commons-lang3"
            ),
            "https://repo.maven.apache.org/maven2/org/apache/commons/commons-lang3/maven-metadata.xml"
        );
        assert_eq!(
            metadata_url("https://repo.example.com", "com.acme", "app"),
            "https://repo.example.com/com/acme/app/maven-metadata.xml"
        );
    }

    #[test]
    fn test_empty_repository_list_falls_back_to_central() {
        let client = client_for(vec![]);
        assert_eq!(client.repositories(), [MAVEN_CENTRAL]);
    }

    #[tokio::test]
    async fn test_remote_versions_from_first_repository() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/com/acme/app/maven-metadata.xml")
            .with_body(METADATA)
            .create_async()
            .await;

        let client = client_for(vec![server.url()]);
        let versions = client
            .remote_versions("com.acme", "app", Some(BranchKind::Qa))
            .await;

        assert_eq!(versions.release.as_deref(), Some("1.2.3.RELEASE"));
        assert_eq!(versions.snapshot.as_deref(), Some("1.2.4-qa-SNAPSHOT"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_miss_falls_through_to_next_repository() {
        let mut server = mockito::Server::new_async().await;
        let missing = server
            .mock("GET", "/first/com/acme/app/maven-metadata.xml")
            .with_status(404)
            .create_async()
            .await;
        let found = server
            .mock("GET", "/second/com/acme/app/maven-metadata.xml")
            .with_body(METADATA)
            .create_async()
            .await;

        let client = client_for(vec![
            format!("{}/first", server.url()),
            format!("{}/second", server.url()),
        ]);
        let versions = client.remote_versions("com.acme", "app", None).await;

        assert_eq!(versions.release.as_deref(), Some("1.2.3.RELEASE"));
        missing.assert_async().await;
        found.assert_async().await;
    }

    #[tokio::test]
    async fn test_unparseable_metadata_counts_as_miss() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/com/acme/app/maven-metadata.xml")
            .with_body("<metadata><versioning></metadata>")
            .create_async()
            .await;

        let client = client_for(vec![server.url()]);
        let versions = client.remote_versions("com.acme", "app", None).await;
        assert!(versions.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_artifact_yields_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/com/acme/ghost/maven-metadata.xml")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(vec![server.url()]);
        let versions = client.remote_versions("com.acme", "ghost", None).await;
        assert!(versions.is_empty());
    }
}
