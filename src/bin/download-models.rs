// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use text_vectorizer::{cli::DownloadArgs, logging, HfHubRegistry, ModelProvisioner};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args = DownloadArgs::parse();
    let specs = args.model_specs()?;
    let provisioner = ModelProvisioner::new(&args.models_dir, HfHubRegistry::new()?);

    for spec in specs {
        let outcome = provisioner.ensure(&spec).await?;
        info!(
            model = %spec.name,
            path = %outcome.path().display(),
            downloaded = outcome.was_downloaded(),
            "Model ready"
        );
    }

    println!("✅ Models ready in {}", provisioner.models_dir().display());
    Ok(())
}
