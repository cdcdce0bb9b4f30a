// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the text vectorizer

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-13";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "onnx-embeddings",
    "mean-pooling",
    "l2-normalization",
    "hf-hub-provisioning",
    "cors",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("text-vectorizer {} ({})", VERSION_NUMBER, BUILD_DATE)
}
