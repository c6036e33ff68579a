// Pass-through handling for requests the simulator does not mock.
//
// With an upstream configured the request is relayed there untouched and the
// upstream answer is returned as-is. Without one the caller gets a 501 that
// is marked as a pass-through, so it can never be confused with a simulated
// 404.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    http::{header, HeaderMap, HeaderValue, Method, Uri},
    response::{IntoResponse, Response},
};
use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use super::error::ApiError;

/// Response header marking answers that did not come from a mocked route.
pub const PASSTHROUGH_HEADER: &str = "x-pizza-mock";

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Forwards unmocked requests to a real backend.
#[derive(Debug, Clone)]
pub struct Passthrough {
    client: Client,
    upstream: String,
}

impl Passthrough {
    pub fn new(upstream: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            upstream: upstream.trim_end_matches('/').to_string(),
        })
    }

    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// Upstream URL for the same path and query.
    pub fn target_url(&self, uri: &Uri) -> String {
        let path = uri.path_and_query().map_or("/", |pq| pq.as_str());
        format!("{}{}", self.upstream, path)
    }

    pub async fn forward(
        &self,
        method: Method,
        uri: &Uri,
        headers: &HeaderMap,
        body: Bytes,
    ) -> Result<Response, ApiError> {
        let url = self.target_url(uri);

        let mut outgoing = headers.clone();
        outgoing.remove(header::HOST);
        strip_hop_by_hop(&mut outgoing);

        info!(method = %method, url = %url, "Passing request through to upstream");

        let upstream = self
            .client
            .request(method, &url)
            .headers(outgoing)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Upstream request failed");
                ApiError::bad_gateway(format!("upstream request failed: {}", e))
            })?;

        let status = upstream.status();
        let mut incoming = upstream.headers().clone();
        strip_hop_by_hop(&mut incoming);

        let bytes = upstream.bytes().await.map_err(|e| {
            warn!(url = %url, error = %e, "Failed to read upstream response");
            ApiError::bad_gateway(format!("failed to read upstream response: {}", e))
        })?;

        let mut response = (status, bytes).into_response();
        response.headers_mut().extend(incoming);
        response
            .headers_mut()
            .insert(PASSTHROUGH_HEADER, HeaderValue::from_static("forwarded"));
        Ok(response)
    }
}

/// Answer for unmocked requests when no upstream is configured.
pub fn not_mocked() -> Response {
    let mut response = ApiError::not_mocked().into_response();
    response
        .headers_mut()
        .insert(PASSTHROUGH_HEADER, HeaderValue::from_static("passthrough"));
    response
}
