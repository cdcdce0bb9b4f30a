// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end: provisioned model on disk -> router -> JSON vector
//!
//! Requires `models/all-MiniLM-L6-v2` (run the download-models binary first).

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use std::sync::Arc;
use text_vectorizer::{
    api::VectorizeResponse, config::CorsPolicy, create_app, embeddings::OnnxEmbeddingModel,
    AppState, ModelSpec,
};
use tower::util::ServiceExt;

const MODELS_DIR: &str = "models";

#[cfg(test)]
mod e2e_tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_hello_world_returns_384_floats() {
        let spec = ModelSpec::all_minilm_l6_v2();
        let model = OnnxEmbeddingModel::load(&spec, std::path::Path::new(MODELS_DIR).join(&spec.name))
            .expect("Failed to load model");
        let app = create_app(AppState::new(Arc::new(model)), &CorsPolicy::AllowAll);

        let request = Request::builder()
            .uri("/vectorize?text=hello%20world")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: VectorizeResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(parsed.vector.len(), 384);

        // Same text again through the same model
        let request = Request::builder()
            .uri("/vectorize?text=hello+world")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let again: VectorizeResponse = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(parsed, again);
    }

    #[tokio::test]
    #[ignore] // Only run if model files are downloaded
    async fn test_empty_text_with_real_model() {
        let spec = ModelSpec::all_minilm_l6_v2();
        let model = OnnxEmbeddingModel::load(&spec, std::path::Path::new(MODELS_DIR).join(&spec.name))
            .expect("Failed to load model");
        let app = create_app(AppState::new(Arc::new(model)), &CorsPolicy::AllowAll);

        for uri in ["/vectorize?text=", "/vectorize?text=after%20empty"] {
            let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
        }
    }
}
