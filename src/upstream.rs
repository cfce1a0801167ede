//! Upstream HTTP access
//!
//! Every outbound call goes through the [`Upstream`] trait so handlers can be
//! driven against a fake in tests. One call is one attempt: there is no retry
//! and no caching.

use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::{NalssiError, Result};

const SLOW_CALL: Duration = Duration::from_secs(5);

/// One outbound GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub url: String,
    pub bearer_token: Option<String>,
    pub accept_json: bool,
}

impl UpstreamRequest {
    /// Plain request, used for Open-Meteo
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            bearer_token: None,
            accept_json: false,
        }
    }

    /// Edge-function request: asks for JSON and forwards the bearer token when one is configured
    pub fn edge<S: Into<String>>(url: S, bearer_token: Option<&str>) -> Self {
        Self {
            url: url.into(),
            bearer_token: bearer_token.map(str::to_string),
            accept_json: true,
        }
    }
}

#[async_trait]
pub trait Upstream: Send + Sync {
    /// Fetch `request.url` and decode the body as JSON
    async fn get_json(&self, request: UpstreamRequest) -> Result<Value>;
}

/// [`Upstream`] over a shared, pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("nalssi/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    #[instrument(name = "upstream_get", skip(self, request), fields(url = %request.url))]
    async fn get_json(&self, request: UpstreamRequest) -> Result<Value> {
        let start = Instant::now();

        let mut builder = self.client.get(&request.url);
        if request.accept_json {
            builder = builder.header(header::ACCEPT, "application/json");
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("Upstream request failed: {}", e);
            NalssiError::upstream(format!("Request failed: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Upstream answered with an error");
            debug!("Upstream error body: {}", body);
            return Err(NalssiError::upstream_status(
                status.as_u16(),
                format!("{} - {}", status.as_u16(), body),
            ));
        }

        let value: Value = response.json().await.map_err(|e| {
            warn!("Upstream body is not valid JSON: {}", e);
            NalssiError::upstream(format!("Invalid JSON from upstream: {e}"))
        })?;

        let elapsed = start.elapsed();
        info!("Upstream call finished in {:.3}s", elapsed.as_secs_f64());
        if elapsed > SLOW_CALL {
            warn!("Slow upstream response detected: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(value)
    }
}

/// Append `key=value` pairs to `base`, percent-encoding each value
#[must_use]
pub fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    let query = params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        return base.to_string();
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}
