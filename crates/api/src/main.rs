use std::sync::Arc;

use anyhow::Context;

use cookbook_api::app;
use cookbook_api::config::Config;
use cookbook_store::PgRecipeStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cookbook_observability::init();

    let config = Config::from_env();

    let store = PgRecipeStore::connect(&config.database_url())
        .await
        .context("failed to open the recipe database")?;
    store
        .ensure_schema()
        .await
        .context("failed to bootstrap the cookbook schema")?;

    let app = app::build_app(Arc::new(store.clone()));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
