//! Route configuration.
//!
//! A configuration file is a JSON array with one route descriptor per
//! mocked endpoint.

use crate::latency::Latency;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// A single mocked endpoint, as declared in the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDescriptor {
    /// Request path served by this route. Dispatch is exact-match only;
    /// a later descriptor with the same URI replaces an earlier one.
    pub uri: String,

    /// HTTP status code to emit.
    #[serde(rename = "statusCode", default = "default_status")]
    pub status_code: u16,

    /// Response headers. A configured header with the same name as the
    /// default `Content-Type` overrides it.
    #[serde(rename = "header", default)]
    pub headers: HashMap<String, String>,

    /// Response body as an arbitrary JSON value. Absent or `null` means
    /// no body is written.
    #[serde(default)]
    pub body: Option<serde_json::Value>,

    /// Simulated latency.
    #[serde(default)]
    pub latency: Latency,
}

fn default_status() -> u16 {
    200
}

impl RouteDescriptor {
    /// Validate the descriptor.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.uri.is_empty() {
            anyhow::bail!("uri cannot be empty");
        }
        if !self.uri.starts_with('/') {
            anyhow::bail!("uri must start with '/': {:?}", self.uri);
        }
        if self.status_code < 100 || self.status_code > 599 {
            anyhow::bail!("Invalid status code: {}", self.status_code);
        }
        Ok(())
    }
}

/// Load and validate route descriptors from a JSON configuration file.
pub fn load_routes(path: &Path) -> anyhow::Result<Vec<RouteDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let routes: Vec<RouteDescriptor> = serde_json::from_str(&content)
        .with_context(|| format!("Malformed config file {}", path.display()))?;
    for (i, route) in routes.iter().enumerate() {
        route
            .validate()
            .map_err(|e| anyhow::anyhow!("Route {}: {}", i, e))?;
    }
    Ok(routes)
}
