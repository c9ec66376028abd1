//! Application state shared across handlers

use crate::commands::{CommandRegistry, GoogleCommand};
use crate::config::Settings;
use crate::google::{ImageRelay, ImageSearch};
use crate::matrix::MatrixClient;
use crate::metrics::Metrics;
use crate::network::HttpClient;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Command registry
    pub registry: Arc<CommandRegistry>,
    /// Homeserver client used for delivery
    pub matrix: MatrixClient,
    /// Command metrics
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire the commands up against the configured services
    pub fn new(settings: Settings, client: HttpClient) -> Result<Self, url::ParseError> {
        let matrix = MatrixClient::new(client.clone(), &settings.matrix)?;
        let search = ImageSearch::new(client, &settings.google);
        let relay = ImageRelay::new(search, Arc::new(matrix.clone()));

        let mut registry = CommandRegistry::new(settings.server.command_prefix.clone());
        registry.register(Arc::new(GoogleCommand::new(relay)));

        Ok(Self::with_registry(settings, registry, matrix))
    }

    /// Create state around an already populated registry
    pub fn with_registry(settings: Settings, registry: CommandRegistry, matrix: MatrixClient) -> Self {
        Self {
            settings: Arc::new(settings),
            registry: Arc::new(registry),
            matrix,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Whether command results are sent to the originating room
    pub fn delivers_messages(&self) -> bool {
        self.settings.matrix.deliver_messages
    }
}
