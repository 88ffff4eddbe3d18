//! Corner layer field: noise sampled at every grid corner and mapped into
//! continuous layer space `[0, layer_count - 1]`.

use glam::{DVec2, UVec2};

use crate::dual_grid::{MAX_LAYERS, check_layer_count};
use crate::error::TerrainError;
use crate::grid::{Grid, GridSize};
use crate::noise_source::NoiseSource;

/// Offset applied to every stored corner position so corners line up with
/// the cell-centered dual grid.
pub const CORNER_ALIGNMENT: DVec2 = DVec2::new(-0.5, -0.5);

/// Parameters controlling how noise is turned into layer values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerParams {
    /// Number of discrete elevation bands.
    pub layer_count: u8,
    /// Spatial frequency applied to grid coordinates before sampling.
    pub noise_scale: f64,
    /// Contrast exponent applied to normalized noise. `1.0` leaves it linear.
    pub noise_power: f64,
    /// Shift of the sampling window, in grid units.
    pub offset: DVec2,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            layer_count: 2,
            noise_scale: 0.05,
            noise_power: 1.0,
            offset: DVec2::ZERO,
        }
    }
}

/// One sampled grid corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerSample {
    /// Corner position, already shifted by [`CORNER_ALIGNMENT`].
    pub position: DVec2,
    /// Continuous layer value in `[0, layer_count - 1]`.
    pub value: f64,
}

/// Compute the layer value for one grid position.
///
/// The position is centered on the grid, shifted by `offset`, scaled by
/// `noise_scale`, sampled, normalized to `[0, 1]`, run through the
/// `noise_power` contrast curve, clamped, and finally scaled by
/// `layer_count - 1`.
pub fn layer_value(
    params: &LayerParams,
    size: GridSize,
    position: UVec2,
    noise: &impl NoiseSource,
) -> f64 {
    let t = (position.as_dvec2() - size.center() - params.offset) * params.noise_scale;
    let normalized = (1.0 + noise.sample(t.x, t.y)) / 2.0;
    let curved = normalized.powf(params.noise_power).clamp(0.0, 1.0);
    curved * f64::from(params.layer_count.saturating_sub(1))
}

/// The classified corner grid.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerField {
    samples: Grid<CornerSample>,
    layer_count: u8,
}

impl LayerField {
    /// Sample `noise` at every corner of a `size` grid.
    pub fn sample(size: GridSize, params: &LayerParams, noise: &impl NoiseSource) -> Self {
        let samples = Grid::from_fn(size, |position| CornerSample {
            position: position.as_dvec2() + CORNER_ALIGNMENT,
            value: layer_value(params, size, position, noise),
        });
        Self {
            samples,
            layer_count: params.layer_count,
        }
    }

    /// Build a field from pre-computed row-major values.
    ///
    /// Values may reach `layer_count` itself, one band above what noise
    /// sampling produces. Positions receive the usual alignment shift.
    ///
    /// # Errors
    ///
    /// - [`TerrainError::InvalidLayerCount`] if `layer_count` is outside
    ///   `1..=MAX_LAYERS`.
    /// - [`TerrainError::ValueCountMismatch`] if `values` does not hold
    ///   exactly `width * height` entries.
    /// - [`TerrainError::InvalidCornerValue`] for a value that is NaN,
    ///   negative, above `layer_count`, or floors past the last layer index.
    pub fn from_values(
        size: GridSize,
        layer_count: u8,
        values: Vec<f64>,
    ) -> Result<Self, TerrainError> {
        check_layer_count(u32::from(layer_count))?;
        if values.len() != size.len() {
            return Err(TerrainError::ValueCountMismatch {
                expected: size.len(),
                actual: values.len(),
            });
        }
        let top = f64::from(layer_count);
        let last_layer = f64::from(MAX_LAYERS - 1);
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|&(_, &v)| !((0.0..=top).contains(&v) && v.floor() <= last_layer))
        {
            return Err(TerrainError::InvalidCornerValue {
                index,
                value,
                layer_count,
            });
        }
        let cells = size
            .positions()
            .zip(values)
            .map(|(position, value)| CornerSample {
                position: position.as_dvec2() + CORNER_ALIGNMENT,
                value,
            })
            .collect();
        Ok(Self {
            samples: Grid::from_vec(size, cells)?,
            layer_count,
        })
    }

    /// Layer value at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn value_at(&self, x: i64, y: i64) -> Option<f64> {
        self.samples.get(x, y).map(|s| s.value)
    }

    /// All corner samples in row-major order.
    pub fn samples(&self) -> &[CornerSample] {
        self.samples.as_slice()
    }

    /// The grid extent.
    pub fn size(&self) -> GridSize {
        self.samples.size()
    }

    /// Number of layers the values were scaled into.
    pub fn layer_count(&self) -> u8 {
        self.layer_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the same value everywhere.
    struct ConstantNoise(f64);

    impl NoiseSource for ConstantNoise {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    /// Echoes the transformed x coordinate so the transform can be observed.
    struct EchoX;

    impl NoiseSource for EchoX {
        fn sample(&self, x: f64, _y: f64) -> f64 {
            x
        }
    }

    fn size(w: u32, h: u32) -> GridSize {
        GridSize::new(w, h).unwrap()
    }

    #[test]
    fn test_noise_extremes_map_to_layer_bounds() {
        let params = LayerParams {
            layer_count: 3,
            ..Default::default()
        };
        let s = size(4, 4);
        let low = layer_value(&params, s, UVec2::ZERO, &ConstantNoise(-1.0));
        let high = layer_value(&params, s, UVec2::ZERO, &ConstantNoise(1.0));
        let mid = layer_value(&params, s, UVec2::ZERO, &ConstantNoise(0.0));
        assert_eq!(low, 0.0);
        assert_eq!(high, 2.0);
        assert!((mid - 1.0).abs() < 1e-12, "mid noise should map to 1.0, got {mid}");
    }

    #[test]
    fn test_noise_power_curves_toward_low_values() {
        let params = LayerParams {
            layer_count: 2,
            noise_power: 2.0,
            ..Default::default()
        };
        // normalized 0.5 squared
        let v = layer_value(&params, size(2, 2), UVec2::ZERO, &ConstantNoise(0.0));
        assert!((v - 0.25).abs() < 1e-12, "expected 0.25, got {v}");
    }

    #[test]
    fn test_single_layer_is_always_zero() {
        let params = LayerParams {
            layer_count: 1,
            ..Default::default()
        };
        let field = LayerField::sample(size(5, 5), &params, &ConstantNoise(1.0));
        assert!(field.samples().iter().all(|s| s.value == 0.0));
    }

    #[test]
    fn test_coordinate_transform_centers_and_scales() {
        let params = LayerParams {
            layer_count: 2,
            noise_scale: 0.1,
            noise_power: 1.0,
            offset: DVec2::new(1.0, 0.0),
        };
        // x = 9, center 5, offset 1 => (9 - 5 - 1) * 0.1 = 0.3
        let v = layer_value(&params, size(10, 10), UVec2::new(9, 0), &EchoX);
        assert!((v - 0.65).abs() < 1e-12, "expected (1 + 0.3) / 2, got {v}");
    }

    #[test]
    fn test_positions_shifted_to_dual_grid() {
        let field = LayerField::sample(size(3, 2), &LayerParams::default(), &ConstantNoise(0.0));
        assert_eq!(field.samples()[0].position, DVec2::new(-0.5, -0.5));
        assert_eq!(field.samples()[5].position, DVec2::new(1.5, 0.5));
    }

    #[test]
    fn test_from_values_rejects_wrong_count() {
        let result = LayerField::from_values(size(2, 2), 2, vec![0.0; 5]);
        assert_eq!(
            result,
            Err(TerrainError::ValueCountMismatch {
                expected: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn test_from_values_rejects_bad_layer_count() {
        for count in [0, 17, 40] {
            assert_eq!(
                LayerField::from_values(size(2, 2), count, vec![0.0; 4]),
                Err(TerrainError::InvalidLayerCount {
                    count: u32::from(count),
                    max: 16
                })
            );
        }
    }

    #[test]
    fn test_from_values_rejects_out_of_range_values() {
        for (layer_count, bad) in [(16, 17.0), (16, 16.0), (3, 3.5), (2, -0.5)] {
            let result = LayerField::from_values(size(2, 1), layer_count, vec![0.0, bad]);
            assert_eq!(
                result,
                Err(TerrainError::InvalidCornerValue {
                    index: 1,
                    value: bad,
                    layer_count
                }),
                "{bad} with {layer_count} layers"
            );
        }
        let nan = LayerField::from_values(size(2, 1), 2, vec![f64::NAN, 0.0]);
        assert!(matches!(
            nan,
            Err(TerrainError::InvalidCornerValue { index: 0, .. })
        ));
    }

    #[test]
    fn test_from_values_accepts_top_band() {
        let field = LayerField::from_values(size(2, 1), 3, vec![0.0, 3.0]).unwrap();
        assert_eq!(field.value_at(1, 0), Some(3.0));
        assert!(LayerField::from_values(size(1, 1), 16, vec![15.9]).is_ok());
    }

    #[test]
    fn test_value_at_outside_is_none() {
        let field = LayerField::from_values(size(2, 2), 2, vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(field.value_at(1, 1), Some(0.4));
        assert_eq!(field.value_at(2, 0), None);
        assert_eq!(field.value_at(0, -1), None);
    }
}
