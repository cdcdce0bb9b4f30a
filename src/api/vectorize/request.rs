// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::Deserialize;

/// Query string for GET /vectorize
///
/// `text` is required; an empty value (`?text=`) is accepted and forwarded
/// to the model unchanged.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VectorizeQuery {
    pub text: String,
}
