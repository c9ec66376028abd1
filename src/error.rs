//! Error types for the command pipeline

use thiserror::Error;

/// Result type alias for command execution
pub type Result<T> = std::result::Result<T, CommandError>;

/// Failure of a single command invocation
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Failed to upload Google image to matrix: {0}")]
    Upload(#[from] UploadError),
}

/// Errors raised while querying the image search API
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("{0}")]
    Transport(String),

    #[error("Search request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Request error: {status}, {body}")]
    Status { status: u16, body: String },

    /// The body was not a search response envelope
    #[error("No images found")]
    Decode(#[source] serde_json::Error),

    /// The envelope decoded but carried no items
    #[error("No images found")]
    NoItems,
}

/// Errors raised while re-hosting an image on the homeserver
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid homeserver URL: {0}")]
    InvalidHomeserver(#[from] url::ParseError),

    #[error("{0}")]
    Transport(String),

    #[error("timeout after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Failed to fetch {url}: status {status}")]
    Fetch { url: String, status: u16 },

    #[error("Upload request failed code={status} {body}")]
    Status { status: u16, body: String },

    #[error("Upload response carried no content URI: {0}")]
    Decode(String),

    /// Raised by uploaders that are not backed by HTTP
    #[error("{0}")]
    Other(String),
}

/// Errors raised while sending a message to a room
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Invalid homeserver URL: {0}")]
    InvalidHomeserver(#[from] url::ParseError),

    #[error("{0}")]
    Transport(String),

    #[error("Send request failed code={status} {body}")]
    Status { status: u16, body: String },

    #[error("Send response carried no event ID: {0}")]
    Decode(String),
}

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_empty_share_text() {
        let decode = SearchError::Decode(serde_json::from_str::<u8>("nope").unwrap_err());
        assert_eq!(decode.to_string(), "No images found");
        assert_eq!(SearchError::NoItems.to_string(), "No images found");
    }

    #[test]
    fn test_upload_error_prefix() {
        let err = CommandError::from(UploadError::Other("timeout".to_string()));
        assert_eq!(
            err.to_string(),
            "Failed to upload Google image to matrix: timeout"
        );
    }

    #[test]
    fn test_status_error_keeps_body() {
        let err = CommandError::from(SearchError::Status {
            status: 403,
            body: "quota exceeded".to_string(),
        });
        assert_eq!(err.to_string(), "Request error: 403, quota exceeded");
    }
}
