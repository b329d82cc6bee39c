use std::sync::Arc;

use anyhow::Context;

use noteforge_api::app;
use noteforge_api::config::Config;
use noteforge_auth::{TokenCodec, password};
use noteforge_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    noteforge_observability::init();

    let config = Config::from_env()?;

    let store = Store::connect(&config.database_url, config.max_db_connections)
        .await
        .context("failed to connect to database")?;

    store.bootstrap().await.context("schema bootstrap failed")?;

    if config.seed_on_startup {
        let demo_hash = password::hash("password").context("failed to hash seed password")?;
        store
            .seed_demo_data(&demo_hash)
            .await
            .context("failed to seed demo data")?;
    }

    let codec = Arc::new(TokenCodec::new(config.jwt_secret.as_bytes()));
    let app = app::build_app(store, codec);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
