//! Show command implementation

use anyhow::Result;
use clap::Args;

use super::SourceArgs;
use crate::config::Format;
use crate::render::render;

#[derive(Args)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: Format,
}

pub fn run(source: &SourceArgs, args: ShowArgs) -> Result<()> {
    let config = source.load()?;
    print!("{}", render(&config, args.format)?);
    Ok(())
}
