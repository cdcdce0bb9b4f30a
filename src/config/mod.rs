// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod models;
pub mod server;

pub use models::{ModelSpec, DEFAULT_MODEL};
pub use server::{CorsPolicy, ServerConfig};
