//! Command traits and types

use crate::error::Result;
use crate::matrix::Message;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Where a command was issued
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandContext {
    /// Room the command was sent in
    pub room_id: String,
    /// User who sent it
    pub user_id: String,
}

impl CommandContext {
    pub fn new(room_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            room_id: room_id.into(),
            user_id: user_id.into(),
        }
    }
}

/// A `!`-command that answers with a single message
#[async_trait]
pub trait Command: Send + Sync {
    /// Tokens that select this command, e.g. `["google"]` for `!google`
    fn path(&self) -> Vec<&str>;

    /// One-line usage text
    fn usage(&self) -> &str {
        ""
    }

    /// Run the command with the tokens that follow its path
    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<Message>;
}
