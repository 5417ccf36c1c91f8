//! Tool Catalog API - REST server with semantic search

use std::sync::Arc;

use axum_helpers::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_catalog::{
    handlers, CatalogService, FastEmbedder, PgToolRepository, QdrantToolIndex, ToolIndex,
};
use migration::Migrator;
use tracing::info;
use utoipa::OpenApi;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = connect_from_config_with_retry(config.database.clone(), None).await?;
    run_migrations::<Migrator>(&db, config.app.name).await?;

    info!("Connecting to Qdrant at {}", config.qdrant.url());
    let index = Arc::new(QdrantToolIndex::connect(&config.qdrant)?);
    index.ensure_collection().await?;

    info!("Loading embedding model");
    let embedder = Arc::new(FastEmbedder::new()?);

    let service = CatalogService::new(
        PgToolRepository::new(db.clone()),
        Arc::clone(&index),
        embedder,
    );

    let routes = handlers::router(service).merge(api::routes(api::HealthState {
        app: config.app,
        db: db.clone(),
        index: index as Arc<dyn ToolIndex>,
    }));

    let mut doc = openapi::ApiDoc::openapi();
    doc.merge(handlers::ApiDoc::openapi());

    let router = create_router(routes, doc);

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );
    create_app(router, &config.server).await?;

    info!("Shutting down: closing PostgreSQL connection");
    db.close().await?;

    info!("{} shutdown complete", config.app.name);
    Ok(())
}
