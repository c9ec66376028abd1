//! Google Custom Search image lookup

use super::models::{SearchItem, SearchResponse};
use crate::config::GoogleSettings;
use crate::error::SearchError;
use crate::network::{HttpClient, HttpRequest, HttpResponse, TransportError};
use tracing::{debug, info};

/// Image search against the Custom Search JSON API.
///
/// Only one result is ever requested: a command posts at most one image and
/// there is no ranking step to feed.
#[derive(Clone)]
pub struct ImageSearch {
    client: HttpClient,
    base_url: String,
    api_key: String,
    cx: String,
    img_size: String,
}

impl ImageSearch {
    pub fn new(client: HttpClient, settings: &GoogleSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.clone(),
            api_key: settings.api_key.clone(),
            cx: settings.cx.clone(),
            img_size: settings.img_size.clone(),
        }
    }

    /// Build the HTTP request for a query
    pub fn build_request(&self, query: &str) -> HttpRequest {
        HttpRequest::get(&self.base_url)
            .param("q", query)
            .param("num", "1")
            .param("start", "1")
            .param("imgSize", &self.img_size)
            .param("searchType", "image")
            .param("key", &self.api_key)
            .param("cx", &self.cx)
    }

    /// Run the search and return the first result
    pub async fn search(&self, query: &str) -> Result<SearchItem, SearchError> {
        info!("Searching Google for an image of a {}", query);

        let timeout = self.client.search_timeout();
        let response = self
            .client
            .execute(self.build_request(query), timeout)
            .await
            .map_err(|e| match e {
                TransportError::Timeout => SearchError::Timeout(timeout),
                TransportError::InvalidUrl(e) => SearchError::InvalidEndpoint(e),
                TransportError::Http(e) => SearchError::Transport(e.to_string()),
            })?;

        Self::first_result(response)
    }

    /// Interpret a search response, keeping only the first item
    pub fn first_result(response: HttpResponse) -> Result<SearchItem, SearchError> {
        if response.status > 200 {
            return Err(SearchError::Status {
                status: response.status,
                body: response.text(),
            });
        }

        let envelope: SearchResponse = response.json().map_err(SearchError::Decode)?;

        debug!(
            "Search reported {} total results, {} returned",
            envelope.search_information.total_results,
            envelope.items.len()
        );

        envelope.items.into_iter().next().ok_or(SearchError::NoItems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(base_url: &str) -> GoogleSettings {
        GoogleSettings {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: HashMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_google_request() {
        let search = ImageSearch::new(
            HttpClient::new().unwrap(),
            &settings(crate::config::DEFAULT_SEARCH_URL),
        );
        let request = search.build_request("big red cats");
        let params: HashMap<_, _> = request.params.iter().cloned().collect();

        assert!(request.url.contains("googleapis.com/customsearch/v1"));
        assert_eq!(params["q"], "big red cats");
        assert_eq!(params["num"], "1");
        assert_eq!(params["start"], "1");
        assert_eq!(params["imgSize"], "medium");
        assert_eq!(params["searchType"], "image");
        assert_eq!(params["key"], "test-key");
        assert_eq!(params["cx"], crate::config::DEFAULT_CX);
    }

    #[test]
    fn test_status_above_200_keeps_raw_body() {
        let err = ImageSearch::first_result(response(403, "{\"error\": \"denied\"}")).unwrap_err();
        match err {
            SearchError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "{\"error\": \"denied\"}");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_zero_items() {
        let err = ImageSearch::first_result(response(200, r#"{"items": []}"#)).unwrap_err();
        assert!(matches!(err, SearchError::NoItems));
        assert!(err.to_string().contains("No images found"));
    }

    #[test]
    fn test_undecodable_body() {
        let err = ImageSearch::first_result(response(200, "<html>oops</html>")).unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
        assert!(err.to_string().contains("No images found"));
    }

    #[test]
    fn test_first_item_selected() {
        let body = json!({
            "items": [
                { "link": "https://img.example/first.png" },
                { "link": "https://img.example/second.png" }
            ]
        })
        .to_string();
        let item = ImageSearch::first_result(response(200, &body)).unwrap();
        assert_eq!(item.link, "https://img.example/first.png");
    }

    #[tokio::test]
    async fn test_search_against_mock_api() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("q", "cats"))
            .and(query_param("searchType", "image"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "searchInformation": { "totalResults": "1" },
                "items": [{ "link": "https://img.example/cat.jpg", "mime": "image/jpeg" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let search = ImageSearch::new(
            HttpClient::new().unwrap(),
            &settings(&format!("{}/customsearch/v1", server.uri())),
        );
        let item = search.search("cats").await.unwrap();

        assert_eq!(item.link, "https://img.example/cat.jpg");
        assert_eq!(item.mime, "image/jpeg");
    }

    #[tokio::test]
    async fn test_search_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "items": [] }))
                    .set_delay(std::time::Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let outgoing = crate::config::OutgoingSettings {
            search_timeout: 0.05,
            ..Default::default()
        };
        let client = HttpClient::with_settings(&outgoing).unwrap();
        let search = ImageSearch::new(client, &settings(&server.uri()));

        let err = search.search("cats").await.unwrap_err();
        assert!(matches!(err, SearchError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        let google = GoogleSettings {
            api_key: "SUPER-SECRET-KEY".to_string(),
            base_url: "http://127.0.0.1:1/customsearch/v1".to_string(),
            ..Default::default()
        };
        let search = ImageSearch::new(HttpClient::new().unwrap(), &google);

        let err = search.search("cats").await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
        assert!(!err.to_string().contains("SUPER-SECRET-KEY"));

        let reply = crate::error::CommandError::from(err).to_string();
        assert!(!reply.contains("SUPER-SECRET-KEY"));
    }
}
