//! Build-attestation lookup seam.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::error::StatusError;

/// Queries an attestation registry for the existence of a build attestation
/// binding a module's content hash to a source repository.
#[async_trait]
pub trait AttestationLookup: Send + Sync {
    /// Returns whether an attestation exists for `(repo, wasm_hash)`.
    async fn lookup(&self, repo: &str, wasm_hash: &str) -> Result<bool, StatusError>;
}

/// Attestation lookup through the deployed proxy service.
///
/// Issues `GET {base}/attestation?repo=..&hash=..`; existence is exactly
/// "the lookup returned success".
pub struct HttpAttestationLookup {
    base: Url,
    http_client: Client,
}

impl HttpAttestationLookup {
    /// Creates a lookup client against the given proxy base URL.
    pub fn new(base: Url) -> Self {
        Self::with_client(Client::new(), base)
    }

    /// Creates a lookup client that reuses an existing HTTP client.
    pub fn with_client(http_client: Client, base: Url) -> Self {
        Self { base, http_client }
    }
}

#[async_trait]
impl AttestationLookup for HttpAttestationLookup {
    async fn lookup(&self, repo: &str, wasm_hash: &str) -> Result<bool, StatusError> {
        let mut url = self.base.clone();
        url.set_path("/attestation");
        url.query_pairs_mut()
            .clear()
            .append_pair("repo", repo)
            .append_pair("hash", wasm_hash);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| StatusError::attestation(e.to_string()))?;

        let status = response.status();
        debug!(repo, wasm_hash, %status, "attestation lookup");
        Ok(status == StatusCode::OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn query_matcher() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("repo".to_string(), "octo/demo".to_string()),
            Matcher::UrlEncoded("hash".to_string(), "abc123".to_string()),
        ])
    }

    #[tokio::test]
    async fn success_status_means_attested() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/attestation")
            .match_query(query_matcher())
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let base = Url::parse(&server.url()).expect("url");
        let lookup = HttpAttestationLookup::new(base);
        assert!(lookup.lookup("octo/demo", "abc123").await.expect("lookup"));
    }

    #[tokio::test]
    async fn not_found_means_unattested() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/attestation")
            .match_query(query_matcher())
            .with_status(404)
            .with_body(r#"{"message":"Not Found"}"#)
            .create_async()
            .await;

        let base = Url::parse(&server.url()).expect("url");
        let lookup = HttpAttestationLookup::new(base);
        assert!(!lookup.lookup("octo/demo", "abc123").await.expect("lookup"));
    }

    #[tokio::test]
    async fn unreachable_registry_is_an_error() {
        let base = Url::parse("http://127.0.0.1:1").expect("url");
        let lookup = HttpAttestationLookup::new(base);
        let error = lookup.lookup("octo/demo", "abc123").await.expect_err("should fail");
        assert!(matches!(error, StatusError::Attestation { .. }), "got {error:?}");
    }
}
