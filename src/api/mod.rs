// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod http_server;
pub mod vectorize;

pub use errors::ApiError;
pub use http_server::{create_app, start_server, AppState};
pub use vectorize::{vectorize_handler, VectorizeQuery, VectorizeResponse};
