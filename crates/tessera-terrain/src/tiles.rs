//! Autotile lookup: maps a [`Variant`] to a renderer-defined tile.

use crate::dual_grid::Variant;

/// Number of marching-squares configurations per layer.
pub const TILES_PER_LAYER: usize = 16;

/// Per-layer tables of 16 tiles each, indexed by occupancy mask.
///
/// `T` is whatever the renderer draws with (a sprite index, an atlas rect,
/// a character); the table only performs the lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct TileTable<T> {
    layers: Vec<[T; TILES_PER_LAYER]>,
}

impl<T> TileTable<T> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Append the table for the next layer and return its layer index.
    pub fn push_layer(&mut self, tiles: [T; TILES_PER_LAYER]) -> usize {
        self.layers.push(tiles);
        self.layers.len() - 1
    }

    /// Tile for `variant`, or `None` if its layer has no table.
    pub fn resolve(&self, variant: Variant) -> Option<&T> {
        self.layers
            .get(usize::from(variant.layer()))
            .map(|tiles| &tiles[usize::from(variant.mask())])
    }

    /// Number of layers with a table.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

impl<T> Default for TileTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<[T; TILES_PER_LAYER]> for TileTable<T> {
    fn from_iter<I: IntoIterator<Item = [T; TILES_PER_LAYER]>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}
