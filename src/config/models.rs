// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{bail, Result};

/// Model served when nothing else is configured.
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Registry organisation used when a bare model name is given.
pub const DEFAULT_ORGANISATION: &str = "sentence-transformers";

/// Max sequence length assumed for models outside the catalog.
pub const DEFAULT_MAX_SEQ_LENGTH: usize = 256;

/// A sentence-transformers model the provisioner can fetch and the service can load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSpec {
    /// Local name, also the artifact directory name (e.g., "all-MiniLM-L6-v2")
    pub name: String,
    /// Registry repository id (e.g., "sentence-transformers/all-MiniLM-L6-v2")
    pub repo_id: String,
    /// Expected embedding dimension; `None` means discover it at load time
    pub dimension: Option<usize>,
    /// Inputs longer than this many tokens are truncated by the tokenizer
    pub max_seq_length: usize,
    /// Whether the model's pipeline ends in an L2 normalization layer
    pub normalize: bool,
}

impl ModelSpec {
    pub fn all_minilm_l6_v2() -> Self {
        ModelSpec {
            name: "all-MiniLM-L6-v2".to_string(),
            repo_id: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimension: Some(384),
            max_seq_length: 256,
            normalize: true,
        }
    }

    pub fn multi_qa_minilm_l6_cos_v1() -> Self {
        ModelSpec {
            name: "multi-qa-MiniLM-L6-cos-v1".to_string(),
            repo_id: "sentence-transformers/multi-qa-MiniLM-L6-cos-v1".to_string(),
            dimension: Some(384),
            max_seq_length: 512,
            normalize: true,
        }
    }

    /// Every model with known parameters.
    pub fn catalog() -> Vec<ModelSpec> {
        vec![Self::all_minilm_l6_v2(), Self::multi_qa_minilm_l6_cos_v1()]
    }

    /// Resolves a user-supplied identifier.
    ///
    /// Accepts a catalog name (`all-MiniLM-L6-v2`), a full repository id
    /// (`owner/repo`), or a bare name that is looked up under the
    /// `sentence-transformers` organisation.
    ///
    /// The last path segment becomes the artifact directory name, so it must
    /// be a plain directory name: empty, `.`, `..` and backslashes are rejected.
    pub fn resolve(identifier: &str) -> Result<ModelSpec> {
        let identifier = identifier.trim().trim_matches('/');
        let (repo_id, name) = match identifier.rsplit_once('/') {
            Some((_, name)) => (identifier.to_string(), name.to_string()),
            None => (
                format!("{}/{}", DEFAULT_ORGANISATION, identifier),
                identifier.to_string(),
            ),
        };

        if name.is_empty() || name == "." || name == ".." || name.contains('\\') {
            bail!(
                "Invalid model identifier '{}': expected a model name or owner/repo",
                identifier
            );
        }

        if let Some(known) = Self::catalog().into_iter().find(|m| m.repo_id == repo_id) {
            return Ok(known);
        }

        Ok(ModelSpec {
            name,
            repo_id,
            dimension: None,
            max_seq_length: DEFAULT_MAX_SEQ_LENGTH,
            normalize: true,
        })
    }
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self::all_minilm_l6_v2()
    }
}
