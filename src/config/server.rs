// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8081;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Cross-origin policy applied to every response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, method and header; credentials are not allowed
    AllowAll,
    /// One fixed origin with credentials; methods and headers are mirrored
    Origin(HeaderValue),
}

impl CorsPolicy {
    /// Parses `*` as [`CorsPolicy::AllowAll`], anything else as a single origin.
    pub fn parse(origin: &str) -> Result<Self> {
        let origin = origin.trim();
        if origin == "*" {
            return Ok(CorsPolicy::AllowAll);
        }
        let value = HeaderValue::from_str(origin)
            .with_context(|| format!("Invalid CORS origin: {}", origin))?;
        Ok(CorsPolicy::Origin(value))
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub cors: CorsPolicy,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, cors_origin: &str) -> Result<Self> {
        let ip: IpAddr = host
            .parse()
            .with_context(|| format!("Invalid bind host: {}", host))?;
        Ok(Self {
            addr: SocketAddr::new(ip, port),
            cors: CorsPolicy::parse(cors_origin)?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors: CorsPolicy::Origin(HeaderValue::from_static(DEFAULT_CORS_ORIGIN)),
        }
    }
}
