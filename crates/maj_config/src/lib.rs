//! Parsing and validation of `majsynth.toml` run configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`SynthConfig`] selecting the input width, the variants to build, the
//! scaffold search policy, and the gate basis for two-level emission.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
