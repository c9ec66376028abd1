//! Chat command module
//!
//! Defines the Command trait and a registry that routes message bodies to commands.

mod registry;
mod traits;

pub mod google;

pub use google::GoogleCommand;
pub use registry::{CommandRegistry, Dispatched};
pub use traits::*;
