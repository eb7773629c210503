//! Loosely-typed wire shape
//!
//! Every field is optional and numbers are wide so that range and presence
//! problems surface as field-specific `MalformedConfig` errors instead of
//! opaque deserializer messages.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::{
    CompilerOptions, Configuration, NetworkId, NetworkProfile, OptimizerSettings,
    DEFAULT_OPTIMIZER_RUNS,
};
use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub networks: Option<BTreeMap<String, RawProfile>>,
    #[serde(default)]
    pub solc: Option<RawSolc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawProfile {
    pub host: Option<String>,
    pub port: Option<i64>,
    pub network_id: Option<RawNetworkId>,
    pub gas: Option<WideInt>,
}

/// Integer wide enough for every `u64` and every `i64`, so out-of-range
/// values reach validation instead of failing inside the deserializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideInt(pub i128);

impl<'de> Deserialize<'de> for WideInt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WideIntVisitor;

        impl<'de> Visitor<'de> for WideIntVisitor {
            type Value = WideInt;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<WideInt, E> {
                Ok(WideInt(i128::from(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<WideInt, E> {
                Ok(WideInt(i128::from(v)))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<WideInt, E> {
                Ok(WideInt(v))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<WideInt, E> {
                i128::try_from(v).map(WideInt).map_err(|_| E::custom(format!("integer {v} is too large")))
            }
        }

        deserializer.deserialize_any(WideIntVisitor)
    }
}

/// Accepts both `network_id = "*"` and `network_id = 1`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawNetworkId {
    Text(String),
    Number(i64),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSolc {
    #[serde(default)]
    pub optimizer: Option<RawOptimizer>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawOptimizer {
    pub enabled: Option<bool>,
    pub runs: Option<i64>,
}

/// Profile keys of `networks` in document order.
///
/// Only used on formats whose parser keeps the last of repeated keys (JSON,
/// YAML); the map figment builds would otherwise hide the repetition.
#[derive(Debug, Default, Deserialize)]
pub struct DocumentKeys {
    #[serde(default)]
    pub networks: Option<ProfileKeys>,
}

#[derive(Debug, Default)]
pub struct ProfileKeys {
    pub names: Vec<String>,
    /// First name that appeared more than once.
    pub duplicate: Option<String>,
}

impl DocumentKeys {
    pub fn check_unique(&self) -> Result<()> {
        match self.networks.as_ref().and_then(|keys| keys.duplicate.as_deref()) {
            Some(name) => Err(ConfigError::field(&format!("networks.{name}"), "duplicate profile name")),
            None => Ok(()),
        }
    }
}

impl<'de> Deserialize<'de> for ProfileKeys {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = ProfileKeys;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of profile names")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ProfileKeys, A::Error> {
                let mut seen = BTreeSet::new();
                let mut keys = ProfileKeys::default();
                // Drain every entry so the outer document still parses to the end.
                while let Some(name) = map.next_key::<String>()? {
                    map.next_value::<IgnoredAny>()?;
                    if !seen.insert(name.clone()) {
                        keys.duplicate.get_or_insert(name);
                        continue;
                    }
                    keys.names.push(name);
                }
                Ok(keys)
            }

            fn visit_unit<E: de::Error>(self) -> Result<ProfileKeys, E> {
                Ok(ProfileKeys::default())
            }
        }

        deserializer.deserialize_any(KeysVisitor)
    }
}

impl RawConfig {
    /// Check every field and build the immutable [`Configuration`].
    pub fn validate(self) -> Result<Configuration> {
        let raw_networks = self
            .networks
            .ok_or_else(|| ConfigError::field("networks", "missing required section"))?;
        if raw_networks.is_empty() {
            return Err(ConfigError::field("networks", "at least one profile is required"));
        }

        let mut networks = BTreeMap::new();
        for (name, raw) in raw_networks {
            let profile = raw.validate(&name)?;
            networks.insert(name, profile);
        }

        let compiler = match self.solc {
            Some(solc) => solc.validate()?,
            None => CompilerOptions::default(),
        };

        Ok(Configuration::new(networks, compiler))
    }
}

impl RawProfile {
    fn validate(self, name: &str) -> Result<NetworkProfile> {
        if name.trim().is_empty() {
            return Err(ConfigError::field("networks", "profile names must not be empty"));
        }
        let path = |field: &str| format!("networks.{name}.{field}");

        let host = self
            .host
            .map(|h| h.trim().to_string())
            .ok_or_else(|| ConfigError::field(&path("host"), "missing required field"))?;
        if host.is_empty() {
            return Err(ConfigError::field(&path("host"), "must not be empty"));
        }

        let port = self
            .port
            .ok_or_else(|| ConfigError::field(&path("port"), "missing required field"))?;
        let port = check_port(port).map_err(|reason| ConfigError::field(&path("port"), reason))?;

        let network_id = match self.network_id {
            Some(raw) => {
                raw.into_network_id().map_err(|reason| ConfigError::field(&path("network_id"), reason))?
            }
            None => return Err(ConfigError::field(&path("network_id"), "missing required field")),
        };

        let gas = self.gas.ok_or_else(|| ConfigError::field(&path("gas"), "missing required field"))?;
        let gas_limit = check_gas(gas.0).map_err(|reason| ConfigError::field(&path("gas"), reason))?;

        Ok(NetworkProfile { name: name.to_string(), host, port, network_id, gas_limit })
    }
}

impl RawNetworkId {
    fn into_network_id(self) -> std::result::Result<NetworkId, String> {
        match self {
            Self::Text(text) => NetworkId::parse(&text).ok_or_else(|| "must not be empty".to_string()),
            Self::Number(n) if n < 0 => Err(format!("must be non-negative, got {n}")),
            Self::Number(n) => Ok(NetworkId::Exact(n.to_string())),
        }
    }
}

impl RawSolc {
    fn validate(self) -> Result<CompilerOptions> {
        let Some(optimizer) = self.optimizer else {
            return Ok(CompilerOptions::default());
        };

        let enabled = optimizer
            .enabled
            .ok_or_else(|| ConfigError::field("solc.optimizer.enabled", "missing required field"))?;

        let runs = match optimizer.runs {
            Some(runs) => {
                let runs = check_runs(runs)
                    .map_err(|reason| ConfigError::field("solc.optimizer.runs", reason))?;
                if !enabled {
                    tracing::warn!(runs, "solc.optimizer.runs is ignored while the optimizer is disabled");
                }
                runs
            }
            None => DEFAULT_OPTIMIZER_RUNS,
        };

        Ok(CompilerOptions { optimizer: OptimizerSettings { enabled, runs } })
    }
}

pub(crate) fn check_port(port: i64) -> std::result::Result<u16, String> {
    match u16::try_from(port) {
        Ok(p) if p > 0 => Ok(p),
        _ => Err(format!("must be between 1 and 65535, got {port}")),
    }
}

pub(crate) fn check_gas(gas: i128) -> std::result::Result<u64, String> {
    match u64::try_from(gas) {
        Ok(g) if g > 0 => Ok(g),
        _ => Err(format!("must be a positive integer, got {gas}")),
    }
}

fn check_runs(runs: i64) -> std::result::Result<u32, String> {
    u32::try_from(runs).map_err(|_| format!("must be between 0 and {}, got {runs}", u32::MAX))
}
