// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod provisioner;
pub mod registry;

pub use provisioner::{ArtifactFile, ModelProvisioner, ProvisionOutcome, ARTIFACT_FILES};
pub use registry::{HfHubRegistry, ModelRegistry};
