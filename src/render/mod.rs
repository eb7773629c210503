//! Output rendering (TOML, YAML, JSON)

use anyhow::Result;

use crate::config::Format;
use crate::domain::{Configuration, NetworkProfile};

/// Serialize `config` in the persisted `networks` / `solc` shape.
pub fn render(config: &Configuration, format: Format) -> Result<String> {
    let rendered = match format {
        Format::Toml => toml::to_string_pretty(config)?,
        Format::Yaml => serde_yaml::to_string(config)?,
        Format::Json => format!("{}\n", serde_json::to_string_pretty(config)?),
    };
    Ok(rendered)
}

/// Human-readable block for one profile.
pub fn render_profile(profile: &NetworkProfile) -> String {
    format!(
        "Profile: {}\n  host: {}\n  port: {}\n  network_id: {}\n  gas: {}\n  endpoint: {}\n",
        profile.name,
        profile.host,
        profile.port,
        profile.network_id,
        profile.gas_limit,
        profile.endpoint()
    )
}

/// JSON object for one profile, including its name and endpoint.
pub fn profile_to_json(profile: &NetworkProfile) -> serde_json::Value {
    serde_json::json!({
        "name": profile.name,
        "host": profile.host,
        "port": profile.port,
        "network_id": profile.network_id,
        "gas": profile.gas_limit,
        "endpoint": profile.endpoint(),
    })
}
