// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod embeddings;
pub mod logging;
pub mod models;
pub mod version;

pub use api::{create_app, start_server, AppState};
pub use config::{ModelSpec, ServerConfig};
pub use embeddings::{OnnxEmbeddingModel, TextEmbedder};
pub use models::{HfHubRegistry, ModelProvisioner, ProvisionOutcome};
