//! Dual grid classification: multi-layer marching squares.
//!
//! Every cell looks at its four corners (self, right, diagonal, down) and
//! packs a dominant layer plus a 4-bit occupancy mask into one [`Variant`].
//! Corners outside the grid count as layer 0 and unoccupied, which pulls
//! boundary cells toward the lowest layer so terrain closes at the edge.

use glam::UVec2;

use crate::error::TerrainError;
use crate::grid::Grid;
use crate::layer_field::LayerField;

/// Largest layer count whose index still fits in the variant's upper nibble.
pub const MAX_LAYERS: u8 = 16;

/// Reject layer counts outside `1..=MAX_LAYERS`.
pub(crate) fn check_layer_count(count: u32) -> Result<(), TerrainError> {
    if count == 0 || count > u32::from(MAX_LAYERS) {
        return Err(TerrainError::InvalidLayerCount {
            count,
            max: u32::from(MAX_LAYERS),
        });
    }
    Ok(())
}

/// Fractional height above the dominant layer a corner must exceed to count
/// as occupied.
pub const OCCUPANCY_THRESHOLD: f64 = 0.5;

/// Cell corners in clockwise order starting top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners in bit order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    /// Offset from the cell's own corner to this corner.
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Corner::TopLeft => (0, 0),
            Corner::TopRight => (1, 0),
            Corner::BottomRight => (1, 1),
            Corner::BottomLeft => (0, 1),
        }
    }

    /// Occupancy bit for this corner.
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Packed cell classification: bits 0-3 occupancy mask, bits 4-7 layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variant(u8);

impl Variant {
    /// Pack a layer index and occupancy mask.
    ///
    /// Only the low nibble of each is kept.
    pub const fn new(layer: u8, mask: u8) -> Self {
        Self(((layer & 0x0F) << 4) | (mask & 0x0F))
    }

    /// Reinterpret raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw packed value.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Dominant layer index.
    pub const fn layer(self) -> u8 {
        self.0 >> 4
    }

    /// Marching-squares configuration in `0..16`.
    pub const fn mask(self) -> u8 {
        self.0 & 0x0F
    }

    pub fn is_occupied(self, corner: Corner) -> bool {
        self.mask() & corner.bit() != 0
    }
}

impl From<Variant> for u8 {
    fn from(variant: Variant) -> Self {
        variant.0
    }
}

/// The four corner readings of one cell, `None` where the corner is missing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighborhood(pub [Option<f64>; 4]);

impl Neighborhood {
    /// Gather the corners of the cell at `(x, y)`.
    pub fn gather(field: &LayerField, x: i64, y: i64) -> Self {
        Self(Corner::ALL.map(|corner| {
            let (dx, dy) = corner.offset();
            field.value_at(x + dx, y + dy)
        }))
    }

    /// Floored layer of one reading; missing corners sit on layer 0.
    fn floor_layer(reading: Option<f64>) -> i64 {
        reading.map_or(0, |v| v.floor() as i64)
    }

    /// Lowest floored layer among the four corners.
    ///
    /// Readings gathered from a [`LayerField`] always floor into
    /// `0..MAX_LAYERS`. Hand-built readings outside that range are clamped
    /// to it.
    pub fn dominant_layer(&self) -> u8 {
        let lowest = self
            .0
            .iter()
            .map(|&r| Self::floor_layer(r))
            .min()
            .unwrap_or(0);
        lowest.clamp(0, i64::from(MAX_LAYERS - 1)) as u8
    }

    /// Occupancy mask relative to `layer`.
    pub fn occupancy_mask(&self, layer: u8) -> u8 {
        Corner::ALL
            .iter()
            .zip(self.0)
            .filter(|&(_, reading)| {
                reading.is_some_and(|v| v - f64::from(layer) > OCCUPANCY_THRESHOLD)
            })
            .fold(0, |mask, (corner, _)| mask | corner.bit())
    }

    /// Classify the cell.
    pub fn variant(&self) -> Variant {
        let layer = self.dominant_layer();
        Variant::new(layer, self.occupancy_mask(layer))
    }
}

/// One classified dual cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DualSample {
    /// Cell position on the grid.
    pub position: UVec2,
    /// Packed classification.
    pub variant: Variant,
}

/// Classify the cell whose top-left corner is `(x, y)`.
pub fn cell_variant(field: &LayerField, x: u32, y: u32) -> Variant {
    Neighborhood::gather(field, i64::from(x), i64::from(y)).variant()
}

/// Classify every cell of the field's grid.
pub fn build_dual_grid(field: &LayerField) -> Grid<DualSample> {
    Grid::from_fn(field.size(), |position| DualSample {
        position,
        variant: cell_variant(field, position.x, position.y),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSize;

    fn field(w: u32, h: u32, layers: u8, values: &[f64]) -> LayerField {
        LayerField::from_values(GridSize::new(w, h).unwrap(), layers, values.to_vec()).unwrap()
    }

    #[test]
    fn test_variant_packing() {
        let v = Variant::new(2, 0b1011);
        assert_eq!(v.bits(), 0b0010_1011);
        assert_eq!(v.layer(), 2);
        assert_eq!(v.mask(), 11);
        assert!(v.is_occupied(Corner::TopLeft));
        assert!(v.is_occupied(Corner::TopRight));
        assert!(!v.is_occupied(Corner::BottomRight));
        assert!(v.is_occupied(Corner::BottomLeft));
    }

    #[test]
    fn test_corner_bits_clockwise() {
        let bits: Vec<u8> = Corner::ALL.iter().map(|c| c.bit()).collect();
        assert_eq!(bits, vec![1, 2, 4, 8]);
    }

    #[test]
    fn test_checkerboard_top_left_cell() {
        let f = field(3, 3, 1, &[1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let v = cell_variant(&f, 0, 0);
        assert_eq!(v.bits(), 11, "corners (1,1,0,1) should give 0b1011");
        assert_eq!(v.layer(), 0);
    }

    #[test]
    fn test_missing_corners_pull_to_layer_zero() {
        // every corner high, but the right column and bottom row cells see
        // missing neighbours
        let f = field(2, 2, 3, &[2.0, 2.0, 2.0, 2.0]);
        let grid = build_dual_grid(&f);
        let variants: Vec<u8> = grid.iter().map(|s| s.variant.bits()).collect();
        // (0,0): all present, layer 2, nothing above 2.5
        // (1,0): TL, BL present at 2.0 over layer 0 => bits 0 and 3
        // (0,1): TL, TR present => bits 0 and 1
        // (1,1): only TL present => bit 0
        assert_eq!(variants, vec![0x20, 0b1001, 0b0011, 0b0001]);
    }

    #[test]
    fn test_occupancy_threshold_is_strict() {
        let f = field(2, 2, 2, &[0.5, 0.51, 0.5, 0.5]);
        assert_eq!(cell_variant(&f, 0, 0).mask(), Corner::TopRight.bit());
    }

    #[test]
    fn test_dominant_layer_is_minimum_floor() {
        let hood = Neighborhood([Some(2.7), Some(1.2), Some(2.0), Some(1.9)]);
        assert_eq!(hood.dominant_layer(), 1);
        // 2.7 - 1, 2.0 - 1 and 1.9 - 1 exceed the threshold, 1.2 - 1 does not
        assert_eq!(hood.occupancy_mask(1), 0b1101);
    }

    #[test]
    fn test_all_missing_is_empty_variant() {
        let hood = Neighborhood([None; 4]);
        assert_eq!(hood.variant(), Variant::default());
    }

    #[test]
    fn test_dual_positions_row_major() {
        let f = field(3, 2, 2, &[0.0; 6]);
        let grid = build_dual_grid(&f);
        for (i, sample) in grid.iter().enumerate() {
            assert_eq!(
                f.size().index_of(sample.position).unwrap(),
                i,
                "dual sample {i} at wrong position"
            );
        }
    }
}
