//! Request and response types passed through the HTTP client

use std::collections::HashMap;

/// HTTP request to be executed by [`super::HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// URL to request
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters, encoded in insertion order
    pub params: Vec<(String, String)>,
    /// Request body
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HashMap::new(),
            params: Vec::new(),
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Create a PUT request
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add an `Authorization: Bearer` header
    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    /// Add JSON body
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(data));
        self
    }

    /// Add raw body with its content type
    pub fn raw(mut self, bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Raw(bytes));
        self.header("Content-Type", content_type)
    }

    /// Full URL with the query parameters encoded
    pub fn full_url(&self) -> Result<url::Url, url::ParseError> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        Ok(url)
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// Request body types
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Raw(Vec<u8>),
}

/// HTTP response returned by [`super::HttpClient`]
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, keys lowercased
    pub headers: HashMap<String, String>,
    /// Raw response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Response body as text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Value of the `Content-Type` header, if any
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_encodes_params_in_order() {
        let request = HttpRequest::get("https://example.com/search")
            .param("q", "big red cats")
            .param("num", "1");
        let url = request.full_url().unwrap();
        assert_eq!(url.as_str(), "https://example.com/search?q=big+red+cats&num=1");
    }

    #[test]
    fn test_bearer_header() {
        let request = HttpRequest::post("https://example.com").bearer("secret");
        assert_eq!(request.headers.get("Authorization").unwrap(), "Bearer secret");
    }

    #[test]
    fn test_raw_body_sets_content_type() {
        let request = HttpRequest::post("https://example.com").raw(vec![1, 2, 3], "image/png");
        assert_eq!(request.headers.get("Content-Type").unwrap(), "image/png");
        assert!(matches!(request.body, Some(RequestBody::Raw(ref b)) if b.len() == 3));
    }
}
