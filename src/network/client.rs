//! HTTP client for the search API and the homeserver

use super::request::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::config::OutgoingSettings;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// Failure to complete an HTTP exchange
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Http(reqwest::Error),
}

/// Request URLs carry the search API key, so they never reach the message.
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Http(e.without_url())
        }
    }
}

/// Seconds to a timeout capped at `max`; unusable values fall back to `default`.
fn bounded_timeout(secs: f64, default: f64, max: f64) -> Duration {
    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => timeout.min(Duration::from_secs_f64(max)),
        _ => Duration::from_secs_f64(default),
    }
}

/// HTTP client wrapper shared by every command invocation
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    search_timeout: Duration,
    upload_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, reqwest::Error> {
        let search_timeout = bounded_timeout(
            settings.search_timeout,
            crate::DEFAULT_SEARCH_TIMEOUT,
            crate::MAX_SEARCH_TIMEOUT,
        );
        let upload_timeout = bounded_timeout(
            settings.upload_timeout,
            crate::DEFAULT_UPLOAD_TIMEOUT,
            crate::MAX_UPLOAD_TIMEOUT,
        );

        let mut builder = Client::builder()
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            search_timeout,
            upload_timeout,
            user_agent: format!("google-image-bot/{}", crate::VERSION),
        })
    }

    /// Timeout applied to search requests
    pub fn search_timeout(&self) -> Duration {
        self.search_timeout
    }

    /// Timeout applied to a whole fetch-and-upload exchange
    pub fn upload_timeout(&self) -> Duration {
        self.upload_timeout
    }

    /// Execute a request with a timeout
    pub async fn execute(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let url = request.full_url()?;

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
        };

        req_builder = req_builder
            .timeout(timeout)
            .header("User-Agent", &self.user_agent);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = request.body {
            req_builder = match body {
                RequestBody::Json(json) => req_builder.json(&json),
                RequestBody::Raw(bytes) => req_builder.body(bytes),
            };
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Simple GET request
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse, TransportError> {
        self.execute(HttpRequest::get(url), timeout).await
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse, TransportError> {
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_ascii_lowercase(), v.to_string());
            }
        }

        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
