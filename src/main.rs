// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use text_vectorizer::{
    api::start_server, cli::ServeArgs, embeddings::OnnxEmbeddingModel, logging, version,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args = ServeArgs::parse();
    let server_config = args.server_config()?;
    let spec = args.model_spec()?;
    let artifact_dir = args.artifact_dir()?;

    info!("🚀 Starting {}", version::get_version_string());

    // Load before binding: no request is accepted until the model is in memory
    let model = match OnnxEmbeddingModel::load(&spec, &artifact_dir) {
        Ok(model) => model,
        Err(e) => {
            error!("❌ Failed to load model {}: {:#}", spec.name, e);
            eprintln!("   Provision it first: download-models --model {}", spec.name);
            std::process::exit(1);
        }
    };

    start_server(server_config, Arc::new(model)).await
}
