//! google-image-bot: a Matrix chat command that posts Google Images results
//!
//! `!google image <phrase>` looks up one image through the Google Custom Search
//! API, re-uploads it to the homeserver content repository and answers with an
//! `m.image` message referencing the new `mxc://` URI.

pub mod commands;
pub mod config;
pub mod error;
pub mod google;
pub mod matrix;
pub mod metrics;
pub mod network;
pub mod web;

pub use commands::{Command, CommandContext, CommandRegistry, GoogleCommand};
pub use config::Settings;
pub use error::{CommandError, SearchError, UploadError};
pub use google::{ImageRelay, ImageSearch};
pub use matrix::{ContentUploader, MatrixClient, Message};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default search request timeout in seconds
pub const DEFAULT_SEARCH_TIMEOUT: f64 = 5.0;

/// Maximum search request timeout that can be set
pub const MAX_SEARCH_TIMEOUT: f64 = 30.0;

/// Default fetch-and-upload timeout in seconds
pub const DEFAULT_UPLOAD_TIMEOUT: f64 = 30.0;

/// Maximum fetch-and-upload timeout that can be set
pub const MAX_UPLOAD_TIMEOUT: f64 = 120.0;
