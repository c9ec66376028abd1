//! Google Custom Search image lookup and relay
//!
//! [`ImageSearch`] queries the Custom Search JSON API for a single image and
//! [`ImageRelay`] turns that result into a posted `m.image` message.

mod models;
pub(crate) mod relay;
mod search;

pub use models::{ImageDescriptor, SearchInformation, SearchItem, SearchResponse};
pub use relay::{ImageRelay, NO_IMAGE_FOUND};
pub use search::ImageSearch;
