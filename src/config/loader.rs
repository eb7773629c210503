//! Config source resolution and loading

use clap::ValueEnum;
use figment::providers::{Format as _, Json, Serialized, Toml, Yaml};
use figment::Figment;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::env;
use super::raw::{DocumentKeys, RawConfig};
use crate::domain::Configuration;
use crate::error::{ConfigError, Result};

/// Environment prefix for overrides, e.g. `DEPLOY_CONFIG_NETWORKS__DEVELOPMENT__PORT=9545`.
pub const ENV_PREFIX: &str = "DEPLOY_CONFIG_";

/// Built-in configuration used when no file is found.
pub const EMBEDDED_CONFIG: &str = r#"
[networks.development]
host = "localhost"
port = 8555
network_id = "*" # match any network id
gas = 4500000

[solc.optimizer]
enabled = true
runs = 200
"#;

const CANDIDATES: [&str; 5] = [
    "deploy-config.toml",
    ".deploy-config.toml",
    "deploy-config.yaml",
    "deploy-config.yml",
    "deploy-config.json",
];

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Toml,
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Parse `content`, rejecting profile names that appear twice.
    fn document(self, content: &str, origin: &str) -> Result<Figment> {
        let keys = match self {
            // The TOML parser already rejects a table defined twice.
            Self::Toml => None,
            // Syntax errors are left for figment to report.
            Self::Yaml => serde_yaml::from_str::<DocumentKeys>(content).ok(),
            Self::Json => serde_json::from_str::<DocumentKeys>(content).ok(),
        };
        if let Some(keys) = keys {
            keys.check_unique().map_err(|err| with_origin(err, origin))?;
        }
        Ok(self.figment(content))
    }

    fn figment(self, content: &str) -> Figment {
        match self {
            Self::Toml => Figment::from(Toml::string(content)),
            Self::Yaml => Figment::from(Yaml::string(content)),
            Self::Json => Figment::from(Json::string(content)),
        }
    }
}

/// Where the base layer of a configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => f.write_str("<embedded>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Layered loader: file (explicit or discovered) or embedded literal, then env overrides.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    explicit: Option<PathBuf>,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), explicit: None, env_prefix: Some(ENV_PREFIX.to_string()) }
    }

    /// Use this file instead of discovery. A missing file is an error.
    pub fn explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn without_env(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// Resolve the base layer without reading it.
    pub fn source(&self) -> Source {
        match &self.explicit {
            Some(path) => Source::File(path.clone()),
            None => discover_config(&self.root).map_or(Source::Embedded, Source::File),
        }
    }

    pub fn load(&self) -> Result<Configuration> {
        let source = self.source();
        tracing::debug!(%source, "loading configuration");

        let origin = source.to_string();
        let mut figment = match &source {
            Source::Embedded => Format::Toml.document(EMBEDDED_CONFIG, &origin)?,
            Source::File(path) => file_figment(path)?,
        };
        if let Some(prefix) = &self.env_prefix {
            let overrides = env::collect(prefix, &profile_names(&figment));
            if !overrides.is_empty() {
                tracing::debug!(prefix = %prefix, "applying environment overrides");
                figment = figment.merge(Serialized::defaults(overrides));
            }
        }

        let config = extract(figment, &origin)?;
        tracing::debug!(profiles = config.len(), fingerprint = %config.fingerprint(), "configuration loaded");
        Ok(config)
    }

    /// The built-in literal, without env overrides.
    pub fn embedded() -> Result<Configuration> {
        Self::from_str(EMBEDDED_CONFIG, Format::Toml)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str, format: Format) -> Result<Configuration> {
        extract(format.document(content, "<string>")?, "<string>")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Configuration> {
        let path = path.as_ref();
        extract(file_figment(path)?, &path.display().to_string())
    }
}

fn file_figment(path: &Path) -> Result<Figment> {
    let format = Format::from_path(path).ok_or_else(|| {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        ConfigError::malformed(format!(
            "Unsupported config extension '.{}' for file {}",
            ext,
            path.display()
        ))
    })?;
    let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::malformed(format!("Failed reading config file {}: {}", path.display(), e))
    })?;
    format.document(&content, &path.display().to_string())
}

/// Profile names of the base layer, used to line up env keys with them.
fn profile_names(figment: &Figment) -> Vec<String> {
    figment
        .extract::<DocumentKeys>()
        .ok()
        .and_then(|keys| keys.networks)
        .map(|keys| keys.names)
        .unwrap_or_default()
}

fn with_origin(err: ConfigError, origin: &str) -> ConfigError {
    match err {
        ConfigError::MalformedConfig(reason) => ConfigError::malformed(format!("{origin}: {reason}")),
        other => other,
    }
}

fn extract(figment: Figment, origin: &str) -> Result<Configuration> {
    let raw: RawConfig = figment
        .extract()
        .map_err(|e| ConfigError::malformed(format!("{origin}: {e}")))?;
    raw.validate().map_err(|err| with_origin(err, origin))
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| root.join(candidate)).find(|path| path.is_file())
}
