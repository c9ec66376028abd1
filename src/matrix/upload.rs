//! Content upload seam

use super::message::ContentUri;
use crate::error::UploadError;
use async_trait::async_trait;

/// Re-hosts a remote resource in the homeserver content repository
#[async_trait]
pub trait ContentUploader: Send + Sync {
    /// Fetch `link` and upload it, returning the new content URI
    async fn upload_link(&self, link: &str) -> Result<ContentUri, UploadError>;
}
