//! Outbound `m.room.message` content

use crate::google::ImageDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque `mxc://` URI handed out by the content repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentUri(String);

impl ContentUri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message content produced by a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msgtype")]
pub enum Message {
    #[serde(rename = "m.notice")]
    Notice { body: String },
    #[serde(rename = "m.image")]
    Image(ImageMessage),
}

impl Message {
    /// Plain-text notice
    pub fn notice(body: impl Into<String>) -> Self {
        Message::Notice { body: body.into() }
    }

    /// Image message referencing uploaded content
    pub fn image(body: impl Into<String>, url: ContentUri, info: ImageInfo) -> Self {
        Message::Image(ImageMessage {
            body: body.into(),
            url,
            info,
        })
    }

    /// Text body of the message
    pub fn body(&self) -> &str {
        match self {
            Message::Notice { body } => body,
            Message::Image(image) => &image.body,
        }
    }
}

/// `m.image` content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMessage {
    pub body: String,
    pub url: ContentUri,
    pub info: ImageInfo,
}

/// Metadata shown alongside an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub h: u32,
    pub w: u32,
    pub mimetype: String,
}

impl ImageInfo {
    /// Integer pixel dimensions from a search descriptor, MIME type as reported by the search
    pub fn from_descriptor(image: &ImageDescriptor, mimetype: impl Into<String>) -> Self {
        Self {
            h: pixels(image.height),
            w: pixels(image.width),
            mimetype: mimetype.into(),
        }
    }
}

/// Truncates toward zero; `as` saturates, so negatives and NaN become 0.
fn pixels(value: f64) -> u32 {
    value.floor() as u32
}
