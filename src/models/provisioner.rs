// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Model provisioning
//!
//! Makes sure a model's artifact directory exists under the models
//! directory, fetching it from a [`ModelRegistry`] only when absent.
//! Files are staged in a hidden `.partial` directory and renamed into place,
//! so the artifact directory is either complete or missing.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::ModelSpec;
use crate::embeddings::{MODEL_FILE, TOKENIZER_FILE};
use crate::models::registry::ModelRegistry;

/// One file of a model artifact: where it lives remotely and locally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactFile {
    pub remote_path: &'static str,
    pub local_name: &'static str,
}

/// Files making up a provisioned artifact
pub const ARTIFACT_FILES: &[ArtifactFile] = &[
    ArtifactFile {
        remote_path: "onnx/model.onnx",
        local_name: MODEL_FILE,
    },
    ArtifactFile {
        remote_path: "tokenizer.json",
        local_name: TOKENIZER_FILE,
    },
    ArtifactFile {
        remote_path: "config.json",
        local_name: "config.json",
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// Artifact directory already existed; nothing was fetched
    AlreadyPresent(PathBuf),
    /// Artifact was fetched and saved
    Downloaded(PathBuf),
}

impl ProvisionOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ProvisionOutcome::AlreadyPresent(path) | ProvisionOutcome::Downloaded(path) => path,
        }
    }

    pub fn was_downloaded(&self) -> bool {
        matches!(self, ProvisionOutcome::Downloaded(_))
    }
}

pub struct ModelProvisioner<R: ModelRegistry> {
    models_dir: PathBuf,
    registry: R,
}

impl<R: ModelRegistry> ModelProvisioner<R> {
    pub fn new(models_dir: impl Into<PathBuf>, registry: R) -> Self {
        Self {
            models_dir: models_dir.into(),
            registry,
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    /// Deterministic local path for a model: `<models_dir>/<name>`
    pub fn artifact_dir(&self, spec: &ModelSpec) -> PathBuf {
        self.models_dir.join(&spec.name)
    }

    fn staging_dir(&self, spec: &ModelSpec) -> PathBuf {
        self.models_dir.join(format!(".{}.partial", spec.name))
    }

    /// Ensures the model is on local storage.
    ///
    /// Existence of the artifact directory alone suppresses the fetch. Any
    /// fetch or filesystem error is returned as-is; there is no retry.
    pub async fn ensure(&self, spec: &ModelSpec) -> Result<ProvisionOutcome> {
        let target = self.artifact_dir(spec);

        if tokio::fs::try_exists(&target)
            .await
            .with_context(|| format!("Failed to inspect {}", target.display()))?
        {
            info!(model = %spec.name, path = %target.display(), "Model already present, skipping download");
            return Ok(ProvisionOutcome::AlreadyPresent(target));
        }

        tokio::fs::create_dir_all(&self.models_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.models_dir.display()))?;

        let staging = self.staging_dir(spec);
        if tokio::fs::try_exists(&staging).await.unwrap_or(false) {
            warn!(path = %staging.display(), "Removing leftover partial download");
            tokio::fs::remove_dir_all(&staging)
                .await
                .with_context(|| format!("Failed to remove {}", staging.display()))?;
        }
        tokio::fs::create_dir_all(&staging)
            .await
            .with_context(|| format!("Failed to create {}", staging.display()))?;

        info!(model = %spec.name, repo = %spec.repo_id, "Downloading model");

        for file in ARTIFACT_FILES {
            let fetched = self.registry.fetch(&spec.repo_id, file.remote_path).await?;
            let dest = staging.join(file.local_name);
            tokio::fs::copy(&fetched, &dest).await.with_context(|| {
                format!("Failed to copy {} to {}", fetched.display(), dest.display())
            })?;
        }

        tokio::fs::rename(&staging, &target)
            .await
            .with_context(|| format!("Failed to move model into {}", target.display()))?;

        info!(model = %spec.name, path = %target.display(), "✅ Model downloaded successfully");
        Ok(ProvisionOutcome::Downloaded(target))
    }
}
