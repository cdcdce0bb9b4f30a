// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Test embedders that need no model files on disk.

#![allow(dead_code)]

use anyhow::Result;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use text_vectorizer::TextEmbedder;

/// Deterministic pseudo-random embeddings seeded by the text hash
pub struct HashEmbedder {
    pub dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl TextEmbedder for HashEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let mut current_seed = hasher.finish();

        let mut embedding = Vec::with_capacity(self.dimension);
        for i in 0..self.dimension {
            // Linear congruential step, value mapped to [-1, 1]
            current_seed =
                (current_seed.wrapping_mul(1664525).wrapping_add(1013904223)) ^ (i as u64);
            let value = (current_seed as f64 / u64::MAX as f64) * 2.0 - 1.0;
            embedding.push(value as f32);
        }

        text_vectorizer::embeddings::l2_normalize(&mut embedding);
        Ok(embedding)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "hash-embedder"
    }
}

/// Fails on one trigger text, otherwise behaves like [`HashEmbedder`]
pub struct FlakyEmbedder {
    pub inner: HashEmbedder,
    pub fail_on: &'static str,
    pub panic: bool,
}

impl TextEmbedder for FlakyEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text == self.fail_on {
            if self.panic {
                panic!("inference crashed on {:?}", text);
            }
            anyhow::bail!("Tokenization failed: unsupported input");
        }
        self.inner.embed(text)
    }

    fn dimension(&self) -> usize {
        self.inner.dimension
    }

    fn model_name(&self) -> &str {
        "flaky-embedder"
    }
}
