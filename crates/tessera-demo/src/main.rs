//! Headless terrain demo.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p tessera-demo -- --seed 42` for a reproducible map, or
//! `cargo run -p tessera-demo -- --reroll 3` to draw three more random terrains.

mod report;

use std::process::ExitCode;

use clap::Parser;
use tessera_config::{CliArgs, Config, ConfigError, default_config_dir};
use tessera_terrain::TerrainGenerator;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);

    let mut config = match config_dir.as_deref() {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    let log_dir = config
        .debug
        .log_dir
        .clone()
        .or_else(|| config_dir.as_ref().map(|dir| dir.join("logs")));
    tessera_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    match run(&config, args.reroll) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config, rerolls: u32) -> Result<(), ConfigError> {
    let params = config.terrain.to_params()?;
    info!(
        "Generating {}x{} terrain with {} layers (seed {})",
        params.width, params.height, params.layer_count, params.seed.0
    );

    let mut generator = TerrainGenerator::new(params)?;
    report::print_terrain(generator.generate(), config.debug.show_layer_histogram);

    for _ in 0..rerolls {
        let seed = generator.reroll();
        info!("Rerolled terrain with seed {}", seed.0);
        if let Some(terrain) = generator.state().generated() {
            report::print_terrain(terrain, config.debug.show_layer_histogram);
        }
    }

    Ok(())
}
