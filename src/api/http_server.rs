// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::vectorize_handler;
use crate::config::{CorsPolicy, ServerConfig};
use crate::embeddings::TextEmbedder;

/// Shared, read-only request state: the model loaded at startup.
#[derive(Clone)]
pub struct AppState {
    pub embedder: Arc<dyn TextEmbedder>,
}

impl AppState {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }
}

pub fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        // Wildcards are invalid alongside credentials, so methods and headers are mirrored
        CorsPolicy::Origin(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin.clone()))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()),
    }
}

pub fn create_app(state: AppState, cors: &CorsPolicy) -> Router {
    Router::new()
        .route("/vectorize", get(vectorize_handler))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds and serves until Ctrl-C or SIGTERM.
///
/// The embedder must already be loaded; nothing is accepted before the
/// listener is bound here.
pub async fn start_server(config: ServerConfig, embedder: Arc<dyn TextEmbedder>) -> Result<()> {
    let model_name = embedder.model_name().to_string();
    let dimension = embedder.dimension();
    let app = create_app(AppState::new(embedder), &config.cors);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;

    info!(
        addr = %config.addr,
        model = %model_name,
        dimension,
        cors = ?config.cors,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
