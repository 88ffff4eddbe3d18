//! Terrain generator: noise source, layer field and dual grid in one pass.
//!
//! The generator starts [`TerrainState::Uninitialized`] and moves to
//! [`TerrainState::Generated`] after the first [`TerrainGenerator::generate`].
//! Each pass allocates fresh grids and overwrites the previous result.

use glam::DVec2;
use tracing::debug;

use crate::dual_grid::{DualSample, build_dual_grid, check_layer_count};
use crate::error::TerrainError;
use crate::grid::{Grid, GridSize};
use crate::layer_field::{CornerSample, LayerField, LayerParams};
use crate::noise_source::{NoiseSettings, TerrainSeed};

/// Full set of caller-supplied generation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Number of discrete elevation bands, `1..=16`.
    pub layer_count: u32,
    /// Spatial frequency of sampled noise.
    pub noise_scale: f64,
    /// Contrast exponent applied to normalized noise.
    pub noise_power: f64,
    /// Shift of the sampling window, in grid units.
    pub offset: DVec2,
    /// Noise seed. Change it to reroll the terrain.
    pub seed: TerrainSeed,
    /// Which noise source to sample.
    pub noise: NoiseSettings,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            width: 60,
            height: 60,
            layer_count: 3,
            noise_scale: 0.05,
            noise_power: 1.0,
            offset: DVec2::ZERO,
            seed: TerrainSeed(0),
            noise: NoiseSettings::Simplex,
        }
    }
}

impl TerrainParams {
    /// Check every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), TerrainError> {
        GridSize::new(self.width, self.height)?;
        check_layer_count(self.layer_count)?;
        if !(self.noise_scale.is_finite() && self.noise_scale > 0.0) {
            return Err(TerrainError::InvalidNoiseScale(self.noise_scale));
        }
        if !(self.noise_power.is_finite() && self.noise_power > 0.0) {
            return Err(TerrainError::InvalidNoisePower(self.noise_power));
        }
        self.noise.validate()
    }

    fn layer_params(&self) -> LayerParams {
        LayerParams {
            layer_count: self.layer_count as u8,
            noise_scale: self.noise_scale,
            noise_power: self.noise_power,
            offset: self.offset,
        }
    }
}

/// Output of one generation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedTerrain {
    field: LayerField,
    dual: Grid<DualSample>,
    seed: TerrainSeed,
}

impl GeneratedTerrain {
    /// Classify a pre-computed layer field.
    ///
    /// Bypasses noise entirely, which makes it the entry point for
    /// hand-authored fields.
    pub fn from_field(field: LayerField, seed: TerrainSeed) -> Self {
        let dual = build_dual_grid(&field);
        Self { field, dual, seed }
    }

    /// Corner samples in row-major order.
    pub fn corners(&self) -> &[CornerSample] {
        self.field.samples()
    }

    /// The corner layer field.
    pub fn field(&self) -> &LayerField {
        &self.field
    }

    /// Dual samples in row-major order, `index = x + y * width`.
    pub fn variants(&self) -> &[DualSample] {
        self.dual.as_slice()
    }

    /// The dual grid with boundary-safe lookup.
    pub fn dual_grid(&self) -> &Grid<DualSample> {
        &self.dual
    }

    /// Seed this terrain was generated from.
    pub fn seed(&self) -> TerrainSeed {
        self.seed
    }

    /// Grid extent.
    pub fn size(&self) -> GridSize {
        self.field.size()
    }

    /// Number of cells per dominant layer, indexed by layer.
    ///
    /// Has at least `layer_count` entries, and one more when a hand-authored
    /// field puts cells on layer `layer_count` itself.
    pub fn layer_histogram(&self) -> Vec<usize> {
        let highest = self.dual.iter().map(|s| s.variant.layer()).max().unwrap_or(0);
        let len = usize::from(self.field.layer_count()).max(usize::from(highest) + 1);
        let mut counts = vec![0; len];
        for sample in self.dual.iter() {
            counts[usize::from(sample.variant.layer())] += 1;
        }
        counts
    }
}

/// Generation state, borrowed from a [`TerrainGenerator`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TerrainState<'a> {
    /// No pass has run yet.
    #[default]
    Uninitialized,
    /// A complete, consistent result is available.
    Generated(&'a GeneratedTerrain),
}

impl<'a> TerrainState<'a> {
    /// The generated terrain, if any.
    pub fn generated(self) -> Option<&'a GeneratedTerrain> {
        match self {
            Self::Uninitialized => None,
            Self::Generated(terrain) => Some(terrain),
        }
    }
}

/// Drives terrain generation for a fixed parameter set.
#[derive(Debug)]
pub struct TerrainGenerator {
    params: TerrainParams,
    size: GridSize,
    latest: Option<GeneratedTerrain>,
}

impl TerrainGenerator {
    /// Create a generator after validating `params`.
    ///
    /// # Errors
    ///
    /// Returns the first parameter constraint that `params` violates.
    pub fn new(params: TerrainParams) -> Result<Self, TerrainError> {
        params.validate()?;
        let size = GridSize::new(params.width, params.height)?;
        Ok(Self {
            params,
            size,
            latest: None,
        })
    }

    /// Run a full generation pass and return the result.
    ///
    /// Safe to call repeatedly; each call replaces the previous result.
    pub fn generate(&mut self) -> &GeneratedTerrain {
        let seed = self.params.seed;
        debug!(
            width = self.size.width(),
            height = self.size.height(),
            layers = self.params.layer_count,
            seed = seed.0,
            "generating terrain"
        );

        let noise = self.params.noise.build(seed);
        let field = LayerField::sample(self.size, &self.params.layer_params(), &noise);
        self.latest.insert(GeneratedTerrain::from_field(field, seed))
    }

    /// Dual samples of the latest pass.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NotGenerated`] before the first `generate`.
    pub fn variants(&self) -> Result<&[DualSample], TerrainError> {
        self.latest
            .as_ref()
            .map(GeneratedTerrain::variants)
            .ok_or(TerrainError::NotGenerated)
    }

    /// Current state.
    pub fn state(&self) -> TerrainState<'_> {
        self.latest
            .as_ref()
            .map_or(TerrainState::Uninitialized, TerrainState::Generated)
    }

    /// Parameters this generator runs with.
    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Replace the seed and regenerate.
    pub fn reseed(&mut self, seed: TerrainSeed) -> &GeneratedTerrain {
        self.params.seed = seed;
        self.generate()
    }

    /// Draw a random seed, regenerate with it, and return the seed used.
    pub fn reroll(&mut self) -> TerrainSeed {
        let seed = TerrainSeed::random();
        self.reseed(seed);
        seed
    }
}
