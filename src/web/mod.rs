//! Web server module
//!
//! Receives chat commands over HTTP and reports health and statistics.

mod handlers;
mod routes;
mod state;

pub use handlers::{CommandRequest, CommandResponse};
pub use routes::create_router;
pub use state::AppState;
