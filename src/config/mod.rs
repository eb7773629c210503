//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Embedded).

mod env;
pub mod loader;
pub mod merge;
mod raw;

pub use loader::{ConfigLoader, Format, Source, EMBEDDED_CONFIG, ENV_PREFIX};
pub use merge::{apply_overrides, ProfileOverrides};
