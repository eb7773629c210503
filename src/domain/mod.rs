//! Core configuration types
//!
//! These are the validated, immutable values handed to consumers once a
//! configuration has been loaded. Construction goes through
//! [`crate::config::ConfigLoader`]; nothing here performs I/O.

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

/// Profile picked when the caller does not name one.
pub const DEFAULT_PROFILE: &str = "development";

/// Optimizer run count assumed when a config omits it.
pub const DEFAULT_OPTIMIZER_RUNS: u32 = 200;

/// Network identifier a profile is allowed to deploy to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkId {
    /// The `"*"` wildcard: any network.
    Any,
    Exact(String),
}

impl NetworkId {
    pub const WILDCARD: &'static str = "*";

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value {
            "" => None,
            Self::WILDCARD => Some(Self::Any),
            other => Some(Self::Exact(other.to_string())),
        }
    }

    /// Whether a node reporting `id` is an acceptable target.
    pub fn matches(&self, id: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == id.trim(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => Self::WILDCARD,
            Self::Exact(id) => id,
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Connection parameters for one deployment target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkProfile {
    /// Key of the profile in `networks`; serialized as the map key, not a field.
    #[serde(skip)]
    pub name: String,
    pub host: String,
    pub port: u16,
    pub network_id: NetworkId,
    #[serde(rename = "gas")]
    pub gas_limit: u64,
}

impl NetworkProfile {
    /// JSON-RPC endpoint the external tool connects to.
    ///
    /// A bare IPv6 host is bracketed; an already bracketed one is kept as is.
    pub fn endpoint(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("http://[{}]:{}", self.host, self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptimizerSettings {
    pub enabled: bool,
    /// Only meaningful when `enabled` is true.
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self { enabled: false, runs: DEFAULT_OPTIMIZER_RUNS }
    }
}

/// Compiler flags requested from the external build tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompilerOptions {
    pub optimizer: OptimizerSettings,
}

impl CompilerOptions {
    /// Runs to pass to the compiler, `None` when the optimizer is off.
    pub fn effective_runs(&self) -> Option<u32> {
        self.optimizer.enabled.then_some(self.optimizer.runs)
    }
}

/// Root configuration record. Immutable after load; share it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    networks: BTreeMap<String, NetworkProfile>,
    #[serde(rename = "solc")]
    compiler: CompilerOptions,
}

impl Configuration {
    pub(crate) fn new(networks: BTreeMap<String, NetworkProfile>, compiler: CompilerOptions) -> Self {
        Self { networks, compiler }
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&NetworkProfile, ConfigError> {
        self.networks.get(name).ok_or_else(|| ConfigError::UnknownProfile {
            name: name.to_string(),
            available: self.profile_names().map(str::to_string).collect(),
        })
    }

    /// Profiles in name order.
    pub fn profiles(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.networks.values()
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.networks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    /// `development` if defined, otherwise the sole profile if there is exactly one.
    pub fn default_profile(&self) -> Option<&NetworkProfile> {
        if let Some(profile) = self.networks.get(DEFAULT_PROFILE) {
            return Some(profile);
        }
        if self.networks.len() == 1 {
            return self.networks.values().next();
        }
        None
    }

    pub fn compiler(&self) -> &CompilerOptions {
        &self.compiler
    }

    /// SHA-256 over the canonical JSON form; independent of the source format.
    pub fn fingerprint(&self) -> String {
        // Field order is fixed and profiles are sorted, so the JSON is canonical.
        let canonical = serde_json::to_string(self)
            .expect("string keys and integer/bool/string values always serialize to JSON");
        let mut hasher = Sha256::new();
        hasher.update(canonical.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
