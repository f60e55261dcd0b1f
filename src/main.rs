use std::env;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use std::sync::Arc;

use casecrux::core::config::AppPaths;
use casecrux::core::logging;
use casecrux::server::{autosync, router};
use casecrux::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The subscriber must exist before initialize() so its config warnings
    // are not dropped by the no-op default dispatcher.
    let paths = Arc::new(AppPaths::new());
    logging::init(&paths);
    let state = AppState::initialize(paths)?;

    let port = env::var("PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(state.config.server.port);
    let bind_addr = format!("{}:{}", state.config.server.host, port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    println!("CASECRUX_PORT={}", addr.port());
    tracing::info!("Listening on {}", addr);
    tracing::info!(
        provider = state.kb.name(),
        region = %state.config.retrieval.region,
        "knowledge-base provider ready"
    );

    let _sync_task = autosync::spawn(state.clone());

    let app: Router = router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
