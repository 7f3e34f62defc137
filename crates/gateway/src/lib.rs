//! Users API Gateway Library
//!
//! This crate provides the HTTP REST surface over the user service: JSON
//! decoding, routing, status mapping and the server bootstrap.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use user_service_lib::service::UserManager;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Open the record store and serve HTTP until the process is stopped.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = user_service_lib::connect_store(&config.user_service).await?;
    let user_service = Arc::new(UserManager::new(store.clone()));

    let state = AppState::new(user_service, store);
    let app = create_router(state);

    let addr: SocketAddr = config.server.addr().parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
