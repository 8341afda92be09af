//! HTTP client for the document-analysis service.
//!
//! Two endpoints are used for analysis:
//! - `POST /process` with a multipart body holding a single `file` field
//! - `POST /process_text` with a JSON body `{"text": ...}`
//!
//! `GET /` returns the service welcome message and serves as a health probe.

mod transport;

pub use transport::AnalysisTransport;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::ServiceConfig;
use crate::error::TransportError;
use crate::models::{AnalysisInput, RawAnalysisResponse};

/// Default user agent sent with every request.
pub const USER_AGENT: &str = concat!("docscope/", env!("CARGO_PKG_VERSION"));

const PROCESS_PATH: &str = "process";
const PROCESS_TEXT_PATH: &str = "process_text";

/// Longest error body kept in `TransportError::Status`.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

/// Welcome payload returned by `GET /`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub message: Option<String>,
}

/// reqwest-backed analysis client.
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: Url,
}

/// Builder for `AnalysisClient`.
///
/// Without a timeout the transport default applies, so a service that never
/// answers leaves the submission loading.
pub struct AnalysisClientBuilder {
    endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl AnalysisClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = Some(ua.to_string());
        self
    }

    pub fn build(self) -> Result<AnalysisClient, TransportError> {
        let base_url = parse_base_url(&self.endpoint)?;

        let mut builder = Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(AnalysisClient { client, base_url })
    }
}

impl AnalysisClient {
    pub fn builder(endpoint: &str) -> AnalysisClientBuilder {
        AnalysisClientBuilder {
            endpoint: endpoint.to_string(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Build a client from the `[service]` configuration section.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, TransportError> {
        let mut builder = Self::builder(&config.endpoint);
        if let Some(secs) = config.request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Request(format!("invalid endpoint path {}: {}", path, e)))
    }

    /// Fetch the service welcome message.
    pub async fn service_info(&self) -> Result<ServiceInfo, TransportError> {
        let url = self.base_url.clone();
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }

        // A reachable service with an unexpected body still counts as up.
        Ok(resp.json().await.unwrap_or_default())
    }
}

#[async_trait]
impl AnalysisTransport for AnalysisClient {
    async fn analyze(&self, input: &AnalysisInput) -> Result<RawAnalysisResponse, TransportError> {
        let request = match input {
            AnalysisInput::File { filename, payload } => {
                let mime = mime_guess::from_path(filename).first_or_octet_stream();
                let part = Part::bytes(payload.clone())
                    .file_name(filename.clone())
                    .mime_str(mime.essence_str())
                    .map_err(|e| TransportError::Request(e.to_string()))?;
                let url = self.endpoint_url(PROCESS_PATH)?;
                debug!("POST {} ({}, {} bytes)", url, mime, payload.len());
                self.client
                    .post(url)
                    .multipart(Form::new().part("file", part))
            }
            AnalysisInput::Text(text) => {
                let url = self.endpoint_url(PROCESS_TEXT_PATH)?;
                debug!("POST {} ({} chars)", url, text.chars().count());
                self.client.post(url).json(&TextRequest { text })
            }
        };

        let resp = request
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(status_error(resp).await);
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        Ok(RawAnalysisResponse::from_bytes(body.to_vec()))
    }
}

async fn status_error(resp: reqwest::Response) -> TransportError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    TransportError::Status {
        status,
        body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
    }
}

/// Parse the configured endpoint, ensuring a trailing slash so relative
/// joins append to the path instead of replacing its last segment.
fn parse_base_url(endpoint: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(endpoint.trim())
        .map_err(|e| TransportError::Request(format!("invalid endpoint {}: {}", endpoint, e)))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
