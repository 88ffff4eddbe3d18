//! Console output for generated terrain.

use tessera_terrain::GeneratedTerrain;
use tessera_terrain::debug_viz::render_ascii;
use tracing::info;

/// Print the ASCII map and, optionally, the per-layer cell counts.
pub fn print_terrain(terrain: &GeneratedTerrain, show_histogram: bool) {
    println!("seed {}", terrain.seed().0);
    print!("{}", render_ascii(terrain));

    if show_histogram {
        let total = terrain.variants().len().max(1);
        for (layer, count) in terrain.layer_histogram().iter().enumerate() {
            info!(
                "layer {layer}: {count} cells ({:.1}%)",
                *count as f64 * 100.0 / total as f64
            );
        }
    }
}
