//! HTTP service: attestation proxying and static asset serving.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{AttestationCache, CachedResponse};

/// User agent sent on upstream registry fetches.
const PROXY_USER_AGENT: &str = concat!("soroscope-server/", env!("CARGO_PKG_VERSION"));

/// Response headers that are not relayed from the upstream.
const SKIPPED_HEADERS: &[&str] = &["connection", "content-length", "transfer-encoding"];

/// Errors raised while fetching from the attestation registry.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// The upstream fetch failed before a response was received.
    #[error("upstream fetch failed: {message}")]
    Upstream {
        /// Error message.
        message: String,
    },
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the attestation registry.
    pub upstream_base: String,

    /// Directory static assets are served from.
    pub static_root: PathBuf,
}

/// The proxy service.
///
/// `GET /attestation?repo=R&hash=H` relays the registry's response for
/// `(R, H)`, memoized by the literal upstream URL in the injected
/// [`AttestationCache`]. Every other `GET` serves a file from the static
/// root.
pub struct ProxyService {
    config: ProxyConfig,
    cache: Arc<AttestationCache>,
    http_client: reqwest::Client,
}

impl ProxyService {
    /// Creates the service over an injected cache.
    pub fn new(config: ProxyConfig, cache: Arc<AttestationCache>) -> Self {
        Self {
            config,
            cache,
            http_client: reqwest::Client::new(),
        }
    }

    /// Handles one request. Infallible: failures become error responses.
    pub async fn handle(&self, req: Request<Body>) -> Response<Body> {
        match (req.method(), req.uri().path()) {
            (&Method::GET, "/attestation") => {
                self.handle_attestation(req.uri().query().unwrap_or("")).await
            }
            (&Method::GET, path) => self.serve_static(path).await,
            _ => text_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
        }
    }

    async fn handle_attestation(&self, query: &str) -> Response<Body> {
        let params: HashMap<String, String> =
            url::form_urlencoded::parse(query.as_bytes()).into_owned().collect();
        let (Some(repo), Some(hash)) = (params.get("repo"), params.get("hash")) else {
            return text_response(StatusCode::BAD_REQUEST, "missing repo or hash parameter");
        };

        let upstream_url = format!(
            "{}/repos/{}/attestations/sha256:{}",
            self.config.upstream_base.trim_end_matches('/'),
            repo,
            hash,
        );
        info!(%repo, %hash, "attestation lookup");

        if let Some(cached) = self.cache.get(&upstream_url).await {
            debug!(url = %upstream_url, "serving attestation from cache");
            return relay_response(&cached);
        }

        match self.fetch_upstream(&upstream_url).await {
            Ok(fresh) => {
                // insert_first resolves races: the stored entry is what
                // every caller, including this one, relays.
                let stored = self.cache.insert_first(&upstream_url, fresh).await;
                relay_response(&stored)
            }
            Err(error) => {
                warn!(url = %upstream_url, %error, "attestation fetch failed");
                text_response(StatusCode::BAD_GATEWAY, "attestation registry unreachable")
            }
        }
    }

    async fn fetch_upstream(&self, url: &str) -> Result<CachedResponse, ProxyError> {
        let response = self
            .http_client
            .get(url)
            .header(USER_AGENT, PROXY_USER_AGENT)
            .send()
            .await
            .map_err(|e| ProxyError::Upstream {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter(|(name, _)| !SKIPPED_HEADERS.contains(&name.as_str()))
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(|e| ProxyError::Upstream {
            message: e.to_string(),
        })?;

        Ok(CachedResponse {
            status,
            body,
            headers,
        })
    }

    async fn serve_static(&self, path: &str) -> Response<Body> {
        let Some(relative) = sanitize_path(path) else {
            return text_response(StatusCode::NOT_FOUND, "not found");
        };
        let full = self.config.static_root.join(&relative);

        match tokio::fs::read(&full).await {
            Ok(contents) => {
                let mut response = Response::new(Body::from(contents));
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, content_type_for(&full));
                response
            }
            Err(error) => {
                debug!(path, %error, "static asset not served");
                text_response(StatusCode::NOT_FOUND, "not found")
            }
        }
    }
}

/// Maps a request path to a file path under the static root.
///
/// Rejects anything but plain relative components; `/` falls back to the
/// index page.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    let relative = if trimmed.is_empty() { "index.html" } else { trimmed };

    let mut sanitized = PathBuf::new();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => sanitized.push(part),
            _ => return None,
        }
    }
    Some(sanitized)
}

fn content_type_for(path: &Path) -> HeaderValue {
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("wasm") => "application/wasm",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    };
    HeaderValue::from_static(mime)
}

/// Rebuilds an HTTP response from a stored upstream response.
fn relay_response(cached: &CachedResponse) -> Response<Body> {
    let mut response = Response::new(Body::from(cached.body.clone()));
    *response.status_mut() =
        StatusCode::from_u16(cached.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    for (name, value) in &cached.headers {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            response.headers_mut().insert(name, value);
        }
    }
    response
}

fn text_response(status: StatusCode, message: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(message));
    *response.status_mut() = status;
    response
}

/// Binds the service and serves it until the process exits.
pub async fn serve(addr: SocketAddr, service: Arc<ProxyService>) -> anyhow::Result<()> {
    let make_svc = make_service_fn(move |_conn| {
        let service = service.clone();
        async move {
            Ok::<_, hyper::Error>(service_fn(move |req| {
                let service = service.clone();
                async move { Ok::<_, hyper::Error>(service.handle(req).await) }
            }))
        }
    });

    info!(%addr, "soroscope server listening");
    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_accepts_plain_paths() {
        assert_eq!(sanitize_path("/app.js"), Some(PathBuf::from("app.js")));
        assert_eq!(
            sanitize_path("/assets/logo.svg"),
            Some(PathBuf::from("assets/logo.svg"))
        );
    }

    #[test]
    fn sanitize_falls_back_to_index() {
        assert_eq!(sanitize_path("/"), Some(PathBuf::from("index.html")));
    }

    #[test]
    fn sanitize_rejects_traversal() {
        assert_eq!(sanitize_path("/../secret"), None);
        assert_eq!(sanitize_path("/assets/../../secret"), None);
    }

    #[test]
    fn content_types_cover_dashboard_assets() {
        assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Path::new("app.js")), "text/javascript");
        assert_eq!(content_type_for(Path::new("blob.bin")), "application/octet-stream");
    }
}
