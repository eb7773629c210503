//! deploy-config: network deployment profiles and compiler optimizer settings
//!
//! Loads the `networks` / `solc` configuration consumed by a contract
//! build-and-deploy toolchain, validates it into an immutable
//! [`Configuration`], and renders it back out.
//!
//! ```no_run
//! use deploy_config::ConfigLoader;
//!
//! let config = ConfigLoader::new(".").load()?;
//! let dev = config.profile("development")?;
//! println!("{}", dev.endpoint());
//! # Ok::<(), deploy_config::ConfigError>(())
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;

pub use config::{ConfigLoader, Format};
pub use domain::{CompilerOptions, Configuration, NetworkId, NetworkProfile, OptimizerSettings};
pub use error::ConfigError;
