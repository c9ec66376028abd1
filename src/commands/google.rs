//! `!google image <query>` command

use super::traits::{Command, CommandContext};
use crate::error::Result;
use crate::google::ImageRelay;
use crate::matrix::Message;
use async_trait::async_trait;
use tracing::info;

/// Reply to a malformed invocation
pub const USAGE: &str = "Usage: !google image image_search_text";

/// Validated shape of the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Arguments do not form an image search
    Usage,
    /// Image search for the joined phrase
    Image(String),
}

/// Posts the first Google Images result for a phrase
pub struct GoogleCommand {
    relay: ImageRelay,
}

impl GoogleCommand {
    pub fn new(relay: ImageRelay) -> Self {
        Self { relay }
    }

    /// Check the search type and join the remaining tokens with single spaces.
    ///
    /// `["image", ""]` yields an empty phrase, which is still searched.
    pub fn parse_args(args: &[String]) -> Invocation {
        match args.split_first() {
            Some((kind, rest)) if kind == "image" && !rest.is_empty() => {
                Invocation::Image(rest.join(" "))
            }
            _ => Invocation::Usage,
        }
    }
}

#[async_trait]
impl Command for GoogleCommand {
    fn path(&self) -> Vec<&str> {
        vec!["google"]
    }

    fn usage(&self) -> &str {
        USAGE
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> Result<Message> {
        match Self::parse_args(args) {
            Invocation::Usage => Ok(Message::notice(USAGE)),
            Invocation::Image(query) => {
                info!("{} requested an image of '{}'", ctx.user_id, query);
                self.relay.handle(&query).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google::relay::tests::{mock_search, search_for, FakeUploader};
    use crate::matrix::{ContentUri, ImageInfo};
    use serde_json::json;
    use wiremock::MockServer;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_usage_cases() {
        for tokens in [
            vec![],
            vec!["image"],
            vec!["images", "cats"],
            vec!["video", "cats"],
            vec!["IMAGE", "cats"],
        ] {
            assert_eq!(GoogleCommand::parse_args(&args(&tokens)), Invocation::Usage);
        }
    }

    #[test]
    fn test_query_phrase() {
        assert_eq!(
            GoogleCommand::parse_args(&args(&["image", "cats"])),
            Invocation::Image("cats".to_string())
        );
        assert_eq!(
            GoogleCommand::parse_args(&args(&["image", "big", "red", "cats"])),
            Invocation::Image("big red cats".to_string())
        );
    }

    #[test]
    fn test_empty_phrase_passes_through() {
        assert_eq!(
            GoogleCommand::parse_args(&args(&["image", ""])),
            Invocation::Image(String::new())
        );
    }

    #[tokio::test]
    async fn test_usage_reply_is_verbatim() {
        let server = MockServer::start().await;
        let uploader = FakeUploader::ok("mxc://server/unused");
        let command = GoogleCommand::new(ImageRelay::new(search_for(&server), uploader.clone()));

        let message = command
            .execute(&CommandContext::default(), &args(&["cats"]))
            .await
            .unwrap();

        assert_eq!(
            message,
            Message::notice("Usage: !google image image_search_text")
        );
        assert_eq!(message.body(), command.usage());
        assert_eq!(uploader.call_count(), 0);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_image_reply() {
        let server = MockServer::start().await;
        mock_search(
            &server,
            json!({
                "items": [{
                    "link": "https://img.example/cat.gif",
                    "mime": "image/gif",
                    "image": { "height": 200.9, "width": 300.1 }
                }]
            }),
        )
        .await;
        let command = GoogleCommand::new(ImageRelay::new(
            search_for(&server),
            FakeUploader::ok("mxc://server/abc123"),
        ));

        let message = command
            .execute(&CommandContext::default(), &args(&["image", "cats"]))
            .await
            .unwrap();

        assert_eq!(
            message,
            Message::image(
                "cats",
                ContentUri::new("mxc://server/abc123"),
                ImageInfo {
                    h: 200,
                    w: 300,
                    mimetype: "image/gif".to_string(),
                },
            )
        );
    }
}
