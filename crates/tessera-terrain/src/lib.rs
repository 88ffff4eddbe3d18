//! Dual-grid marching-squares terrain classification.
//!
//! Samples seeded noise at every grid corner, quantizes it into elevation
//! layers, and packs each cell's dominant layer and corner occupancy into a
//! single autotile [`Variant`].

mod dual_grid;
mod error;
mod generator;
mod grid;
mod layer_field;
mod noise_source;
mod tiles;

pub mod debug_viz;

pub use dual_grid::{
    Corner, DualSample, MAX_LAYERS, Neighborhood, OCCUPANCY_THRESHOLD, Variant, build_dual_grid,
    cell_variant,
};
pub use error::TerrainError;
pub use generator::{GeneratedTerrain, TerrainGenerator, TerrainParams, TerrainState};
pub use grid::{Grid, GridSize};
pub use layer_field::{CORNER_ALIGNMENT, CornerSample, LayerField, LayerParams, layer_value};
pub use noise_source::{FractalSource, NoiseSettings, NoiseSource, SimplexSource, TerrainSeed};
pub use tiles::{TILES_PER_LAYER, TileTable};
