// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};

/// Response body for GET /vectorize
///
/// # Example
/// ```json
/// { "vector": [0.012, -0.034, ...] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorizeResponse {
    pub vector: Vec<f32>,
}

impl VectorizeResponse {
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}
