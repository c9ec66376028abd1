//! HTTP networking module
//!
//! Provides the HTTP client used for the search API and the homeserver.

mod client;
mod request;

pub use client::{HttpClient, TransportError};
pub use request::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
