// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use ndarray::{Array1, ArrayView2};

/// Averages token embeddings `[seq_len, hidden_dim]`, weighting each row by
/// its attention-mask value so padding tokens are ignored.
pub fn mean_pool(token_embeddings: ArrayView2<'_, f32>, attention_mask: &[i64]) -> Vec<f32> {
    let mut pooled = Array1::<f32>::zeros(token_embeddings.ncols());
    let mut sum_mask = 0.0f32;

    for (row, &mask) in token_embeddings.outer_iter().zip(attention_mask) {
        let weight = mask as f32;
        pooled.scaled_add(weight, &row);
        sum_mask += weight;
    }

    // Avoid division by zero
    pooled /= sum_mask.max(1e-9);
    pooled.to_vec()
}

/// Scales `vector` to unit length. A zero vector is left unchanged.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector.iter_mut() {
            *value /= norm;
        }
    }
}
