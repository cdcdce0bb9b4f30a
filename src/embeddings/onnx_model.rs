// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX Embedding Model Wrapper
//!
//! This module provides a wrapper around ONNX Runtime for running
//! sentence-transformers models exported to ONNX (all-MiniLM-L6-v2,
//! multi-qa-MiniLM-L6-cos-v1, ...).
//!
//! Features:
//! - ONNX model loading from a provisioned artifact directory
//! - BERT tokenization with truncation to the model's max sequence length
//! - Mean pooling over token embeddings
//! - Optional L2 normalization
//! - Embedding dimension discovered by a validation inference at load time

use anyhow::{Context, Result};
use ndarray::{Array2, Axis, Ix2};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use crate::config::ModelSpec;
use crate::embeddings::pooling::{l2_normalize, mean_pool};
use crate::embeddings::TextEmbedder;

/// ONNX graph file inside an artifact directory
pub const MODEL_FILE: &str = "model.onnx";

/// Tokenizer definition inside an artifact directory
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Intra-op threads handed to ONNX Runtime
const INTRA_THREADS: usize = 4;

/// ONNX-based sentence embedding model
///
/// The model uses a sentence transformer architecture with:
/// - BERT-based tokenizer
/// - Mean pooling over token embeddings
/// - L2 normalization when the model's pipeline calls for it
///
/// # Thread Safety
/// All fields are wrapped in Arc for cheap cloning and thread-safe sharing.
/// `Session::run` needs `&mut self`, so the session sits behind a mutex.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,

    tokenizer: Arc<Tokenizer>,

    /// Model name (e.g., "all-MiniLM-L6-v2")
    model_name: String,

    /// Output dimension, taken from the validation inference
    dimension: usize,

    /// Maximum sequence length; longer inputs are truncated
    max_length: usize,

    normalize: bool,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .field("max_length", &self.max_length)
            .field("normalize", &self.normalize)
            .finish_non_exhaustive()
    }
}

/// Tokenized input ready to be fed to the session
struct EncodedInput {
    input_ids: Array2<i64>,
    attention_mask: Array2<i64>,
    token_type_ids: Array2<i64>,
    mask: Vec<i64>,
}

impl OnnxEmbeddingModel {
    /// Loads a model from a provisioned artifact directory
    ///
    /// # Arguments
    /// - `spec`: Catalog entry describing the model
    /// - `artifact_dir`: Directory holding `model.onnx` and `tokenizer.json`
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file or tokenizer file not found (model not provisioned)
    /// - ONNX Runtime initialization fails
    /// - Model output is not `[batch, seq_len, hidden]`
    /// - Hidden size differs from the dimension the catalog expects
    ///
    /// # Example
    /// ```ignore
    /// let spec = ModelSpec::all_minilm_l6_v2();
    /// let model = OnnxEmbeddingModel::load(&spec, "models/all-MiniLM-L6-v2")?;
    /// assert_eq!(model.dimension(), 384);
    /// ```
    pub fn load(spec: &ModelSpec, artifact_dir: impl AsRef<Path>) -> Result<Self> {
        let artifact_dir = artifact_dir.as_ref();
        let model_path = artifact_dir.join(MODEL_FILE);
        let tokenizer_path = artifact_dir.join(TOKENIZER_FILE);

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        info!(model = %spec.name, path = %artifact_dir.display(), "Loading ONNX embedding model");

        let mut session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(INTRA_THREADS)
            .context("Failed to set intra threads")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: spec.max_seq_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow::anyhow!("Failed to configure truncation: {}", e))?;

        // Validation inference: output must be token-level [batch, seq_len, hidden]
        let dimension = {
            let encoded = encode(&tokenizer, "validation test")?;
            let outputs = session.run(ort::inputs![
                "input_ids" => Value::from_array(encoded.input_ids)?,
                "attention_mask" => Value::from_array(encoded.attention_mask)?,
                "token_type_ids" => Value::from_array(encoded.token_type_ids)?
            ])?;
            let output_tensor = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            let output_shape = output_tensor.shape();

            if output_shape.len() != 3 {
                anyhow::bail!(
                    "Model outputs unexpected dimensions: {:?} (expected [batch, seq_len, hidden])",
                    output_shape
                );
            }
            output_shape[2]
        };

        if let Some(expected) = spec.dimension {
            if expected != dimension {
                anyhow::bail!(
                    "Model {} dimension mismatch: expected {}, got {}",
                    spec.name,
                    expected,
                    dimension
                );
            }
        }

        info!(
            model = %spec.name,
            dimension,
            max_length = spec.max_seq_length,
            "✅ ONNX embedding model loaded successfully"
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name: spec.name.clone(),
            dimension,
            max_length: spec.max_seq_length,
            normalize: spec.normalize,
        })
    }

    /// Generates embedding for a single text
    ///
    /// 1. Tokenize input (truncated to max_length)
    /// 2. Run ONNX inference
    /// 3. Mean pooling weighted by the attention mask
    /// 4. L2 normalization if the model calls for it
    pub fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let encoded = encode(&self.tokenizer, text)?;
        let mask = encoded.mask;

        let mut embedding = {
            let mut session_guard = lock_session(&self.session);
            let outputs = session_guard.run(ort::inputs![
                "input_ids" => Value::from_array(encoded.input_ids)?,
                "attention_mask" => Value::from_array(encoded.attention_mask)?,
                "token_type_ids" => Value::from_array(encoded.token_type_ids)?
            ])?;

            // Use index [0] instead of name since different exports name it differently
            let output_array = outputs[0]
                .try_extract_array::<f32>()
                .context("Failed to extract output tensor")?;
            let tokens = output_array
                .index_axis(Axis(0), 0)
                .into_dimensionality::<Ix2>()
                .context("Unexpected token embedding shape")?;

            mean_pool(tokens, &mask)
        };

        if self.normalize {
            l2_normalize(&mut embedding);
        }

        if embedding.len() != self.dimension {
            anyhow::bail!(
                "Unexpected embedding dimension: {} (expected {})",
                embedding.len(),
                self.dimension
            );
        }

        debug!(tokens = mask.len(), "Generated embedding");
        Ok(embedding)
    }

    /// Counts tokens (including special tokens) after truncation
    pub fn count_tokens(&self, text: &str) -> Result<usize> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;
        Ok(encoding.get_attention_mask().iter().map(|&m| m as usize).sum())
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl TextEmbedder for OnnxEmbeddingModel {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        OnnxEmbeddingModel::embed(self, text)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Locks the session even if an earlier run panicked while holding it.
/// An aborted run leaves no state behind in the session.
fn lock_session<T>(session: &Mutex<T>) -> MutexGuard<'_, T> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

fn encode(tokenizer: &Tokenizer, text: &str) -> Result<EncodedInput> {
    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

    let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
    let mask: Vec<i64> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as i64)
        .collect();
    let len = input_ids.len();

    Ok(EncodedInput {
        input_ids: Array2::from_shape_vec((1, len), input_ids)
            .context("Failed to create input_ids array")?,
        attention_mask: Array2::from_shape_vec((1, len), mask.clone())
            .context("Failed to create attention_mask array")?,
        // Single-segment input
        token_type_ids: Array2::zeros((1, len)),
        mask,
    })
}
