//! Command registry: matches message bodies to commands

use super::traits::{Command, CommandContext};
use crate::error::Result;
use crate::matrix::Message;
use std::sync::Arc;
use tracing::debug;

/// Result of running a matched command
pub struct Dispatched {
    /// Space-joined path of the command that ran
    pub command: String,
    /// Its outcome
    pub result: Result<Message>,
}

/// Registry of all available commands
pub struct CommandRegistry {
    prefix: String,
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            commands: Vec::new(),
        }
    }

    /// Register a command
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.push(command);
    }

    /// Find the command addressed by `body` and split off its arguments.
    ///
    /// The longest registered path wins; path tokens match case-insensitively.
    pub fn parse(&self, body: &str) -> Option<(Arc<dyn Command>, Vec<String>)> {
        let rest = body.trim_start().strip_prefix(self.prefix.as_str())?;
        let tokens: Vec<String> = rest.split_whitespace().map(String::from).collect();

        let command = self
            .commands
            .iter()
            .filter(|command| {
                let path = command.path();
                !path.is_empty()
                    && path.len() <= tokens.len()
                    && path
                        .iter()
                        .zip(&tokens)
                        .all(|(p, t)| p.eq_ignore_ascii_case(t))
            })
            .max_by_key(|command| command.path().len())?;

        let args = tokens[command.path().len()..].to_vec();
        Some((command.clone(), args))
    }

    /// Run the command addressed by `body`, if any
    pub async fn dispatch(&self, ctx: &CommandContext, body: &str) -> Option<Dispatched> {
        let (command, args) = self.parse(body)?;
        let name = command.path().join(" ");

        debug!(
            "Dispatching {} for {} in {} with {} args",
            name,
            ctx.user_id,
            ctx.room_id,
            args.len()
        );

        let result = command.execute(ctx, &args).await;
        Some(Dispatched {
            command: name,
            result,
        })
    }

    /// Get all command names
    pub fn names(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.path().join(" ")).collect()
    }

    /// Get number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new("!")
    }
}
