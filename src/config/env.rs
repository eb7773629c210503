//! Environment overrides
//!
//! Keys come from figment's `Env` (prefix stripped, `__` split into `.`).
//! Values are typed by the field they target rather than guessed from their
//! text, so a host like `[::1]` or `true` stays a string.

use figment::providers::Env;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Nested `networks` / `solc` document built from `<prefix>*` variables.
///
/// Profile names are matched against `profiles` ignoring case, since env
/// keys do not keep it.
pub fn collect(prefix: &str, profiles: &[String]) -> Map<String, Value> {
    let env = Env::prefixed(prefix).split("__");
    let vars: Vec<(String, String)> =
        env.iter().map(|(key, value)| (key.as_str().to_string(), value)).collect();
    collect_from(vars, profiles)
}

fn collect_from(vars: impl IntoIterator<Item = (String, String)>, profiles: &[String]) -> Map<String, Value> {
    let mut networks: BTreeMap<String, Map<String, Value>> = BTreeMap::new();
    let mut optimizer = Map::new();

    for (key, value) in vars {
        let key = key.to_ascii_lowercase();
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["networks", name, field] => {
                let name = resolve_profile(name, profiles);
                networks.entry(name).or_default().insert(field.to_string(), typed(field, value));
            }
            ["solc", "optimizer", field] => {
                optimizer.insert(field.to_string(), typed(field, value));
            }
            _ => tracing::debug!(%key, "ignoring environment variable outside networks/solc"),
        }
    }

    let mut doc = Map::new();
    if !networks.is_empty() {
        let networks = networks.into_iter().map(|(name, fields)| (name, Value::Object(fields))).collect();
        doc.insert("networks".to_string(), Value::Object(networks));
    }
    if !optimizer.is_empty() {
        let mut solc = Map::new();
        solc.insert("optimizer".to_string(), Value::Object(optimizer));
        doc.insert("solc".to_string(), Value::Object(solc));
    }
    doc
}

fn resolve_profile(name: &str, profiles: &[String]) -> String {
    profiles
        .iter()
        .find(|p| p.as_str() == name)
        .or_else(|| profiles.iter().find(|p| p.eq_ignore_ascii_case(name)))
        .cloned()
        .unwrap_or_else(|| name.to_string())
}

fn typed(field: &str, raw: String) -> Value {
    match field {
        "port" | "gas" | "runs" => integer(&raw).unwrap_or(Value::String(raw)),
        "enabled" => raw.trim().parse::<bool>().map(Value::Bool).unwrap_or(Value::String(raw)),
        _ => Value::String(raw),
    }
}

fn integer(raw: &str) -> Option<Value> {
    let raw = raw.trim();
    raw.parse::<u64>().map(Value::from).or_else(|_| raw.parse::<i64>().map(Value::from)).ok()
}
