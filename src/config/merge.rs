//! Command-line overrides for a single profile
//!
//! Overrides sit above every other layer (CLI > Env > File > Embedded) and
//! are validated with the same rules as file values.

use super::raw::{check_gas, check_port};
use crate::domain::{NetworkId, NetworkProfile};
use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOverrides {
    pub host: Option<String>,
    pub port: Option<i64>,
    pub network_id: Option<String>,
    pub gas: Option<i64>,
}

impl ProfileOverrides {
    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.port.is_none() && self.network_id.is_none() && self.gas.is_none()
    }
}

/// Apply `overrides` to a copy of `profile`.
pub fn apply_overrides(profile: &NetworkProfile, overrides: &ProfileOverrides) -> Result<NetworkProfile> {
    let mut merged = profile.clone();
    let path = |field: &str| format!("--{field} (profile {})", profile.name);

    if let Some(host) = &overrides.host {
        let host = host.trim();
        if host.is_empty() {
            return Err(ConfigError::field(&path("host"), "must not be empty"));
        }
        merged.host = host.to_string();
    }
    if let Some(port) = overrides.port {
        merged.port = check_port(port).map_err(|reason| ConfigError::field(&path("port"), reason))?;
    }
    if let Some(id) = &overrides.network_id {
        merged.network_id = NetworkId::parse(id)
            .ok_or_else(|| ConfigError::field(&path("network-id"), "must not be empty"))?;
    }
    if let Some(gas) = overrides.gas {
        merged.gas_limit = check_gas(i128::from(gas)).map_err(|reason| ConfigError::field(&path("gas"), reason))?;
    }

    if merged != *profile {
        tracing::debug!(profile = %profile.name, "applied command-line overrides");
    }
    Ok(merged)
}
