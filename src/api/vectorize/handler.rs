// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /vectorize HTTP handler

use axum::extract::{Json, Query, State};
use tracing::debug;

use crate::api::http_server::AppState;
use crate::api::vectorize::{VectorizeQuery, VectorizeResponse};
use crate::api::ApiError;

/// GET /vectorize handler
///
/// Embeds `text` with the loaded model. Inference runs on the blocking
/// pool; the shared model is only read.
///
/// # Errors
/// - Missing `text`: axum's `Query` rejection (400) before this runs
/// - Model failure or panic: [`ApiError`] (500, plain text)
pub async fn vectorize_handler(
    State(state): State<AppState>,
    Query(query): Query<VectorizeQuery>,
) -> Result<Json<VectorizeResponse>, ApiError> {
    let embedder = state.embedder.clone();
    let text = query.text;
    let text_len = text.len();

    let vector = tokio::task::spawn_blocking(move || embedder.embed(&text))
        .await
        .map_err(|e| ApiError::Internal(format!("inference task failed: {}", e)))?
        .map_err(|e| ApiError::Encoding(format!("{:#}", e)))?;

    debug!(text_len, dimension = vector.len(), "Vectorized text");
    Ok(Json(VectorizeResponse { vector }))
}
