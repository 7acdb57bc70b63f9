use anyhow::Result;
use research_server::{AppState, ServerConfig, serve};
use research_stock::ResearchConfig;
use research_utils::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ResearchConfig::from_env()?;
    let server = ServerConfig::from_env()?;
    let state = AppState::from_config(&config)?;

    serve(state, &server).await
}
