//! Search-and-relay: from a query phrase to an image message

use super::search::ImageSearch;
use crate::error::{CommandError, Result};
use crate::matrix::{ContentUploader, ImageInfo, Message};
use std::sync::Arc;
use tracing::{debug, info};

/// Notice sent when the search result carries no image link
pub const NO_IMAGE_FOUND: &str = "No image found!";

/// Looks up one image and re-hosts it on the homeserver
#[derive(Clone)]
pub struct ImageRelay {
    search: ImageSearch,
    uploader: Arc<dyn ContentUploader>,
}

impl ImageRelay {
    pub fn new(search: ImageSearch, uploader: Arc<dyn ContentUploader>) -> Self {
        Self { search, uploader }
    }

    /// Search for `query`, upload the first image and build the message.
    ///
    /// An empty link is answered with a notice, not an error, and the
    /// uploader is not called.
    pub async fn handle(&self, query: &str) -> Result<Message> {
        let result = self.search.search(query).await?;

        if result.link.is_empty() {
            info!("First result for '{}' has no image link", query);
            return Ok(Message::notice(NO_IMAGE_FOUND));
        }

        debug!("Uploading {} to the content repository", result.link);
        let content_uri = self
            .uploader
            .upload_link(&result.link)
            .await
            .map_err(CommandError::Upload)?;

        let info = ImageInfo::from_descriptor(&result.image, result.mime);
        Ok(Message::image(query, content_uri, info))
    }
}
