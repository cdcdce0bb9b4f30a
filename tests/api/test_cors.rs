// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Cross-origin policy tests for GET /vectorize

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use text_vectorizer::{config::CorsPolicy, create_app, AppState};
use tower::util::ServiceExt;

use crate::common::HashEmbedder;

const FRONTEND: &str = "http://localhost:3000";

fn app(policy: &CorsPolicy) -> Router {
    create_app(AppState::new(Arc::new(HashEmbedder::new(8))), policy)
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/vectorize?text=hi")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom-header")
        .body(Body::empty())
        .unwrap()
}

#[cfg(test)]
mod cors_tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_origin_preflight_is_allowed() {
        let policy = CorsPolicy::parse(FRONTEND).unwrap();
        let response = app(&policy).oneshot(preflight(FRONTEND)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], FRONTEND);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "x-custom-header"
        );
    }

    #[tokio::test]
    async fn test_fixed_origin_rejects_other_origins() {
        let policy = CorsPolicy::parse(FRONTEND).unwrap();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/vectorize?text=hi")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();

        let response = app(&policy).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_allow_all_policy_uses_wildcard() {
        let response = app(&CorsPolicy::AllowAll)
            .oneshot(preflight("http://anywhere.example"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none());
    }
}
