// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Vectorize API Module
//!
//! This module provides the GET /vectorize endpoint that maps one text to
//! its sentence embedding.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::vectorize_handler;
pub use request::VectorizeQuery;
pub use response::VectorizeResponse;
