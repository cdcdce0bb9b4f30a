// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use async_trait::async_trait;
use hf_hub::api::tokio::{Api, ApiBuilder};
use std::path::PathBuf;
use tracing::info;

/// Remote source of model files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelRegistry: Send + Sync {
    /// Fetches `remote_path` from repository `repo_id` and returns a local
    /// path holding its contents.
    async fn fetch(&self, repo_id: &str, remote_path: &str) -> Result<PathBuf>;
}

/// HuggingFace Hub registry
///
/// Files land in the hub cache (`~/.cache/huggingface/hub` unless `HF_HOME`
/// says otherwise) and are copied out by the provisioner.
pub struct HfHubRegistry {
    api: Api,
}

impl HfHubRegistry {
    pub fn new() -> Result<Self> {
        let api = ApiBuilder::new()
            .with_progress(true)
            .build()
            .context("Failed to initialise HuggingFace Hub client")?;
        Ok(Self { api })
    }
}

#[async_trait]
impl ModelRegistry for HfHubRegistry {
    async fn fetch(&self, repo_id: &str, remote_path: &str) -> Result<PathBuf> {
        info!(repo = repo_id, file = remote_path, "Fetching from HuggingFace Hub");
        self.api
            .model(repo_id.to_string())
            .get(remote_path)
            .await
            .with_context(|| format!("Failed to download {} from {}", remote_path, repo_id))
    }
}
