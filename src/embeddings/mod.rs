// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Sentence embeddings
//!
//! A model is loaded once from a provisioned artifact directory and then
//! shared read-only between request handlers through [`TextEmbedder`].

pub mod onnx_model;
pub mod pooling;

use anyhow::Result;

pub use onnx_model::{OnnxEmbeddingModel, MODEL_FILE, TOKENIZER_FILE};
pub use pooling::{l2_normalize, mean_pool};

/// Maps text to a fixed-length embedding vector.
///
/// Implementations are immutable after construction; `embed` must return
/// the same vector for the same text.
pub trait TextEmbedder: Send + Sync + 'static {
    /// Embeds one text. No validation is applied to the input.
    fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Length of every vector returned by `embed`
    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}
