//! Service entry point: configuration, telemetry, wiring, serve.

use cellini_agents::AgentExecutor;
use cellini_core::CelliniConfig;
use cellini_error::{CelliniResult, ServerError, ServerErrorKind};
use cellini_models::OpenAiClient;
use cellini_pipeline::Orchestrator;
use cellini_server::{AppState, router};
use cellini_storage::AssetStore;
use cellini_video::ViduClient;
use tracing::info;

#[tokio::main]
async fn main() -> CelliniResult<()> {
    dotenvy::dotenv().ok();

    cellini_core::init_telemetry().map_err(|e| {
        ServerError::new(ServerErrorKind::Serve(format!(
            "Failed to initialize telemetry: {}",
            e
        )))
    })?;

    let config = CelliniConfig::load()?;
    info!(
        model = %config.openai().model(),
        video_backend = %config.vidu().base_url(),
        "Loaded configuration"
    );

    let driver = OpenAiClient::new(config.openai())?;
    let agents =
        AgentExecutor::new(driver).with_vision_model(config.openai().vision_model().clone());
    let video = ViduClient::new(config.vidu())?;
    let store = AssetStore::new(config.storage().asset_dir().clone())?;

    let orchestrator = Orchestrator::new(agents, video)
        .with_store(store)
        .with_max_iterations(*config.pipeline().max_refinement_iterations());

    let app = router(AppState::new(orchestrator));

    let address = format!("{}:{}", config.server().host(), config.server().port());
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: address.clone(),
            message: e.to_string(),
        })
    })?;
    info!(address = %address, "Cellini server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    cellini_core::shutdown_telemetry();
    Ok(())
}
