//! Terrain debug renderers: corner field heatmap, variant map, ASCII map.

use super::image::{DebugImage, Rgba};
use crate::dual_grid::Variant;
use crate::generator::GeneratedTerrain;
use crate::layer_field::LayerField;

/// Glyph for a cell fully inside layer `n`; a full mask uses `n + 1`.
const LAYER_GLYPHS: [char; 17] = [
    '~', '.', ',', ':', ';', '=', '+', '*', '%', '#', '@', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Glyph for a cell straddling two layers.
const EDGE_GLYPH: char = '/';

/// Base color for a layer: water, land, dirt, then a gray ramp.
pub fn layer_color(layer: u8) -> Rgba {
    match layer {
        0 => [30, 80, 200, 255],
        1 => [70, 160, 60, 255],
        2 => [150, 110, 60, 255],
        n => {
            let shade = 120u8.saturating_add(n.saturating_mul(8));
            [shade, shade, shade, 255]
        }
    }
}

/// Grayscale heatmap of the corner layer values, one pixel per corner.
///
/// Values are normalized by `layer_count - 1`; a single-layer field
/// renders black.
pub fn render_layer_field_debug(field: &LayerField) -> DebugImage {
    let size = field.size();
    let mut image = DebugImage::new(size.width(), size.height());
    let max = f64::from(field.layer_count().saturating_sub(1));

    for (position, sample) in size.positions().zip(field.samples()) {
        let normalized = if max > 0.0 {
            (sample.value / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let v = (normalized * 255.0).round() as u8;
        image.set_pixel(position.x, position.y, [v, v, v, 255]);
    }

    image
}

/// One pixel per dual cell, colored by dominant layer and brightened by the
/// number of occupied corners.
pub fn render_variant_debug(terrain: &GeneratedTerrain) -> DebugImage {
    let size = terrain.size();
    let mut image = DebugImage::new(size.width(), size.height());

    for sample in terrain.variants() {
        let [r, g, b, a] = layer_color(sample.variant.layer());
        let lift = sample.variant.mask().count_ones() as u8 * 12;
        image.set_pixel(
            sample.position.x,
            sample.position.y,
            [
                r.saturating_add(lift),
                g.saturating_add(lift),
                b.saturating_add(lift),
                a,
            ],
        );
    }

    image
}

/// Character for one cell in the ASCII map.
pub fn variant_glyph(variant: Variant) -> char {
    let layer = usize::from(variant.layer());
    match variant.mask() {
        0 => LAYER_GLYPHS[layer],
        0x0F => LAYER_GLYPHS[layer + 1],
        _ => EDGE_GLYPH,
    }
}

/// Render the variant grid as text, one line per row.
pub fn render_ascii(terrain: &GeneratedTerrain) -> String {
    let width = terrain.size().width() as usize;
    let mut out = String::with_capacity(terrain.variants().len() + terrain.size().height() as usize);

    for row in terrain.variants().chunks(width) {
        out.extend(row.iter().map(|s| variant_glyph(s.variant)));
        out.push('\n');
    }

    out
}
