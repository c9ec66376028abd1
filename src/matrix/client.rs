//! Minimal homeserver client: media upload and message sending

use super::message::{ContentUri, Message};
use super::upload::ContentUploader;
use crate::config::MatrixSettings;
use crate::error::{DeliveryError, UploadError};
use crate::network::{HttpClient, HttpRequest, TransportError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    content_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    event_id: Option<String>,
}

/// Client for the homeserver the bot user is registered on
#[derive(Clone)]
pub struct MatrixClient {
    http: HttpClient,
    homeserver: Url,
    access_token: String,
}

impl MatrixClient {
    pub fn new(http: HttpClient, settings: &MatrixSettings) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            homeserver: Url::parse(&settings.homeserver_url)?,
            access_token: settings.access_token.clone(),
        })
    }

    /// Build an API URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, url::ParseError> {
        let mut url = self.homeserver.clone();
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_and_upload(&self, link: &str) -> Result<ContentUri, UploadError> {
        let timeout = self.http.upload_timeout();
        let map_transport = |e: TransportError| match e {
            TransportError::Timeout => UploadError::Timeout(timeout),
            other => UploadError::Transport(other.to_string()),
        };

        let source = self.http.get(link, timeout).await.map_err(map_transport)?;
        if !source.is_success() {
            return Err(UploadError::Fetch {
                url: link.to_string(),
                status: source.status,
            });
        }

        let content_type = source
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        debug!(
            "Fetched {} bytes of {} from {}",
            source.body.len(),
            content_type,
            link
        );

        let url = self.endpoint(&["_matrix", "media", "r0", "upload"])?;
        let request = HttpRequest::post(url.as_str())
            .bearer(&self.access_token)
            .raw(source.body, content_type);

        let response = self
            .http
            .execute(request, timeout)
            .await
            .map_err(map_transport)?;

        if response.status != 200 {
            return Err(UploadError::Status {
                status: response.status,
                body: response.text(),
            });
        }

        match response.json::<UploadResponse>() {
            Ok(UploadResponse {
                content_uri: Some(uri),
            }) if !uri.is_empty() => Ok(ContentUri::new(uri)),
            _ => Err(UploadError::Decode(response.text())),
        }
    }

    /// Send message content to a room, returning the new event ID
    pub async fn send_message(
        &self,
        room_id: &str,
        message: &Message,
    ) -> Result<String, DeliveryError> {
        let txn_id = uuid::Uuid::new_v4().simple().to_string();
        let url = self.endpoint(&[
            "_matrix",
            "client",
            "r0",
            "rooms",
            room_id,
            "send",
            "m.room.message",
            &txn_id,
        ])?;

        let content = serde_json::to_value(message)
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        let request = HttpRequest::put(url.as_str())
            .bearer(&self.access_token)
            .json(content);

        let response = self
            .http
            .execute(request, self.http.upload_timeout())
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        if response.status != 200 {
            return Err(DeliveryError::Status {
                status: response.status,
                body: response.text(),
            });
        }

        match response.json::<SendResponse>() {
            Ok(SendResponse {
                event_id: Some(event_id),
            }) => {
                info!("Sent {} to {}", event_id, room_id);
                Ok(event_id)
            }
            _ => Err(DeliveryError::Decode(response.text())),
        }
    }
}

#[async_trait]
impl ContentUploader for MatrixClient {
    async fn upload_link(&self, link: &str) -> Result<ContentUri, UploadError> {
        let timeout = self.http.upload_timeout();
        tokio::time::timeout(timeout, self.fetch_and_upload(link))
            .await
            .map_err(|_| UploadError::Timeout(timeout))?
    }
}
