//! deploy-config: inspect and validate deployment configuration
//!
//! Loads network profiles and compiler optimizer settings and prints,
//! queries or validates them.

use anyhow::Result;

fn main() -> Result<()> {
    deploy_config::cli::run()
}
