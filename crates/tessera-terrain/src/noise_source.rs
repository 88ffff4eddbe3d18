//! Seeded continuous 2D noise sources.
//!
//! A [`NoiseSource`] maps any 2D coordinate to a value in `[-1, 1]`. Sources
//! never hold hidden randomness: every one is built from a caller-owned
//! [`TerrainSeed`], so identical seeds always reproduce identical fields.

use noise::{NoiseFn, Simplex};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::TerrainError;

/// Caller-owned seed for terrain generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerrainSeed(pub u64);

impl TerrainSeed {
    /// Draw a fresh seed from the thread-local RNG.
    ///
    /// This is the only place randomness enters the system; use it when a
    /// new, independent terrain is wanted ("reroll").
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Derive the 32-bit seed consumed by the simplex permutation table.
    ///
    /// Runs the 64-bit seed through ChaCha8 so nearby seeds still produce
    /// well-separated permutation tables.
    pub fn noise_seed(self) -> u32 {
        ChaCha8Rng::seed_from_u64(self.0).next_u32()
    }
}

impl From<u64> for TerrainSeed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A deterministic 2D noise function with output in `[-1, 1]`.
pub trait NoiseSource {
    /// Sample the noise at `(x, y)`.
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Single-octave simplex noise.
pub struct SimplexSource {
    noise: Simplex,
}

impl SimplexSource {
    /// Create a simplex source for the given seed.
    pub fn new(seed: TerrainSeed) -> Self {
        Self {
            noise: Simplex::new(seed.noise_seed()),
        }
    }
}

impl NoiseSource for SimplexSource {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y]).clamp(-1.0, 1.0)
    }
}

/// Multi-octave fractal simplex noise, normalized back into `[-1, 1]`.
pub struct FractalSource {
    noise: Simplex,
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
}

impl FractalSource {
    /// Create a fractal source. `octaves` is clamped to at least 1.
    pub fn new(seed: TerrainSeed, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            noise: Simplex::new(seed.noise_seed()),
            octaves: octaves.max(1),
            persistence,
            lacunarity,
        }
    }

    /// Geometric sum of all octave amplitudes.
    pub fn max_amplitude(&self) -> f64 {
        amplitude_sum(self.octaves, self.persistence)
    }
}

fn amplitude_sum(octaves: u32, persistence: f64) -> f64 {
    let mut sum = 0.0;
    let mut amp = 1.0;
    for _ in 0..octaves.max(1) {
        sum += amp;
        amp *= persistence;
    }
    sum
}

impl NoiseSource for FractalSource {
    fn sample(&self, x: f64, y: f64) -> f64 {
        let max_amp = self.max_amplitude();
        if max_amp == 0.0 {
            return 0.0;
        }

        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        for _ in 0..self.octaves {
            total += self.noise.get([x * frequency, y * frequency]) * amplitude;
            frequency *= self.lacunarity;
            amplitude *= self.persistence;
        }

        (total / max_amp).clamp(-1.0, 1.0)
    }
}

/// Which kind of noise drives the layer field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum NoiseSettings {
    /// Plain single-octave simplex noise.
    #[default]
    Simplex,
    /// Fractal sum of simplex octaves.
    Fractal {
        /// Number of octaves to composite.
        octaves: u32,
        /// Amplitude multiplier between octaves.
        persistence: f64,
        /// Frequency multiplier between octaves.
        lacunarity: f64,
    },
}

impl NoiseSettings {
    /// Default fractal configuration: 4 octaves, persistence 0.5, lacunarity 2.
    pub const FRACTAL: Self = Self::Fractal {
        octaves: 4,
        persistence: 0.5,
        lacunarity: 2.0,
    };

    /// Check that every octave stays finite.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidNoiseSettings`] if persistence or
    /// lacunarity is not a positive finite number, or if the octave
    /// amplitudes or frequencies overflow.
    pub fn validate(&self) -> Result<(), TerrainError> {
        let Self::Fractal {
            octaves,
            persistence,
            lacunarity,
        } = *self
        else {
            return Ok(());
        };
        let invalid = |reason: String| -> Result<(), TerrainError> {
            Err(TerrainError::InvalidNoiseSettings(reason))
        };
        if !(persistence.is_finite() && persistence > 0.0) {
            return invalid(format!("persistence must be positive and finite, got {persistence}"));
        }
        if !(lacunarity.is_finite() && lacunarity > 0.0) {
            return invalid(format!("lacunarity must be positive and finite, got {lacunarity}"));
        }
        let max_amplitude = amplitude_sum(octaves, persistence);
        if !max_amplitude.is_finite() {
            return invalid(format!("amplitude sum over {octaves} octaves overflows"));
        }
        let top_frequency = lacunarity.powf(f64::from(octaves.max(1) - 1));
        if !top_frequency.is_finite() {
            return invalid(format!("frequency over {octaves} octaves overflows"));
        }
        Ok(())
    }

    /// Build the configured source for `seed`.
    pub fn build(&self, seed: TerrainSeed) -> Box<dyn NoiseSource> {
        match *self {
            Self::Simplex => Box::new(SimplexSource::new(seed)),
            Self::Fractal {
                octaves,
                persistence,
                lacunarity,
            } => Box::new(FractalSource::new(seed, octaves, persistence, lacunarity)),
        }
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}
