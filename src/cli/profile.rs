//! Profile command implementation

use anyhow::{Context, Result};
use clap::Args;

use super::SourceArgs;
use crate::config::{apply_overrides, ProfileOverrides};
use crate::render::{profile_to_json, render_profile};

#[derive(Args)]
pub struct ProfileArgs {
    /// Profile name (defaults to "development", or the only profile)
    #[arg(value_name = "NAME")]
    pub name: Option<String>,

    /// Override the host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Override the port
    #[arg(long, value_name = "PORT", allow_negative_numbers = true)]
    pub port: Option<i64>,

    /// Override the network id ("*" matches any)
    #[arg(long, value_name = "ID")]
    pub network_id: Option<String>,

    /// Override the gas limit
    #[arg(long, value_name = "GAS", allow_negative_numbers = true)]
    pub gas: Option<i64>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(source: &SourceArgs, args: ProfileArgs) -> Result<()> {
    let config = source.load()?;

    let profile = match &args.name {
        Some(name) => config.profile(name)?,
        None => config.default_profile().with_context(|| {
            format!(
                "No default profile; choose one of: {}",
                config.profile_names().collect::<Vec<_>>().join(", ")
            )
        })?,
    };

    let overrides = ProfileOverrides {
        host: args.host,
        port: args.port,
        network_id: args.network_id,
        gas: args.gas,
    };
    let profile = apply_overrides(profile, &overrides)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile_to_json(&profile))?);
    } else {
        print!("{}", render_profile(&profile));
    }
    Ok(())
}
