//! Shared application state.

use std::sync::Arc;

use cellini_models::OpenAiClient;
use cellini_pipeline::Orchestrator;
use cellini_video::ViduClient;

/// The orchestrator wired against the production driver and video client.
pub type ProductionOrchestrator = Orchestrator<OpenAiClient, ViduClient>;

/// Application state shared across request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The request orchestrator; stateless per request, shared across all.
    pub orchestrator: Arc<ProductionOrchestrator>,
}

impl AppState {
    /// Wrap an orchestrator for sharing across handlers.
    pub fn new(orchestrator: ProductionOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}
