//! # Blog API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
#[cfg(feature = "postgres")]
use anyhow::Context;
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    tracing::info!(
        "Starting Blog API Server on {}:{}",
        config.host,
        config.port
    );

    #[cfg(feature = "postgres")]
    let (state, connections) = {
        use blog_infra::{DatabaseConnections, PostgresPostRepository};

        let connections = DatabaseConnections::init(&config.database)
            .await
            .context("database bootstrap failed")?;
        connections
            .ensure_schema()
            .await
            .context("schema bootstrap failed")?;

        let repo = Arc::new(PostgresPostRepository::new(connections.main.clone()));
        (AppState::new(repo), connections)
    };

    #[cfg(not(feature = "postgres"))]
    let state = {
        tracing::warn!("Running without postgres feature - posts are kept in memory");
        AppState::new(Arc::new(blog_infra::InMemoryPostRepository::new()))
    };

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    #[cfg(feature = "postgres")]
    connections.close().await?;

    tracing::info!("Server stopped");
    Ok(())
}
