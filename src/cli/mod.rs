// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::models::DEFAULT_MODEL;
use crate::config::server::{DEFAULT_CORS_ORIGIN, DEFAULT_HOST, DEFAULT_PORT};
use crate::config::{ModelSpec, ServerConfig};

/// Serve a sentence-embedding model over HTTP
#[derive(Parser, Debug, Clone)]
#[command(name = "text-vectorizer")]
#[command(version)]
#[command(about = "Serves GET /vectorize backed by a local sentence-transformers model", long_about = None)]
pub struct ServeArgs {
    /// Model to load (catalog name or owner/repo)
    #[arg(long, env = "VECTORIZER_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Directory holding provisioned model artifacts
    #[arg(long, env = "VECTORIZER_MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,

    /// Address to bind
    #[arg(long, env = "VECTORIZER_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "VECTORIZER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Allowed cross-origin caller, or `*` for any origin
    #[arg(long, env = "VECTORIZER_CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,
}

impl ServeArgs {
    pub fn model_spec(&self) -> Result<ModelSpec> {
        ModelSpec::resolve(&self.model)
    }

    /// Local artifact directory for the configured model
    pub fn artifact_dir(&self) -> Result<PathBuf> {
        Ok(self.models_dir.join(self.model_spec()?.name))
    }

    pub fn server_config(&self) -> Result<ServerConfig> {
        ServerConfig::new(&self.host, self.port, &self.cors_origin)
    }
}

/// Download sentence-embedding models into the local models directory
#[derive(Parser, Debug, Clone)]
#[command(name = "download-models")]
#[command(version)]
#[command(about = "Fetches model artifacts once; existing artifacts are left untouched", long_about = None)]
pub struct DownloadArgs {
    /// Models to provision (repeatable or comma-separated)
    #[arg(long = "model", env = "VECTORIZER_MODEL", value_delimiter = ',', default_value = DEFAULT_MODEL)]
    pub models: Vec<String>,

    /// Directory to store model artifacts in
    #[arg(long, env = "VECTORIZER_MODELS_DIR", default_value = "models")]
    pub models_dir: PathBuf,
}

impl DownloadArgs {
    /// Resolves every requested model; one bad identifier fails the whole set
    pub fn model_specs(&self) -> Result<Vec<ModelSpec>> {
        self.models.iter().map(|m| ModelSpec::resolve(m)).collect()
    }
}
