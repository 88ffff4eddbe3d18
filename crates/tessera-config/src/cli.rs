//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Tessera command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tessera", about = "Dual-grid marching-squares terrain generator")]
pub struct CliArgs {
    /// Grid width in cells.
    #[arg(long)]
    pub width: Option<u32>,

    /// Grid height in cells.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of elevation layers (1-16).
    #[arg(long)]
    pub layers: Option<u32>,

    /// Spatial frequency of the sampled noise.
    #[arg(long)]
    pub noise_scale: Option<f64>,

    /// Contrast exponent applied to normalized noise.
    #[arg(long)]
    pub noise_power: Option<f64>,

    /// Fixed noise seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use fractal noise with this many octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Generate this many additional terrains, each with a fresh random seed.
    #[arg(long, default_value_t = 0)]
    pub reroll: u32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.terrain.width = w;
        }
        if let Some(h) = args.height {
            self.terrain.height = h;
        }
        if let Some(layers) = args.layers {
            self.terrain.layer_count = layers;
        }
        if let Some(scale) = args.noise_scale {
            self.terrain.noise_scale = scale;
        }
        if let Some(power) = args.noise_power {
            self.terrain.noise_power = power;
        }
        if let Some(seed) = args.seed {
            self.terrain.seed = Some(seed);
        }
        if let Some(octaves) = args.octaves {
            self.terrain.noise.fractal = true;
            self.terrain.noise.octaves = octaves;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
