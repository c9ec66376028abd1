//! Matrix homeserver integration
//!
//! Message content types, the content upload seam and a minimal client for
//! the media repository and room messaging endpoints.

mod client;
mod message;
mod upload;

pub use client::MatrixClient;
pub use message::{ContentUri, ImageInfo, ImageMessage, Message};
pub use upload::ContentUploader;
