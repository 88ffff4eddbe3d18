//! Configuration for the Tessera terrain tools.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, and
//! convert into validated [`tessera_terrain::TerrainParams`].

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, NoiseConfig, TerrainConfig, default_config_dir};
pub use error::ConfigError;
