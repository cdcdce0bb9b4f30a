// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. `RUST_LOG` wins; otherwise `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (tests, benches)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
