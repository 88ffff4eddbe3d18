//! End-to-end properties of generated terrain.

use glam::UVec2;
use tessera_terrain::{
    Corner, GeneratedTerrain, GridSize, LayerField, NoiseSettings, TerrainError, TerrainGenerator,
    TerrainParams, TerrainSeed,
};

fn generate(params: TerrainParams) -> GeneratedTerrain {
    TerrainGenerator::new(params).unwrap().generate().clone()
}

fn params(width: u32, height: u32, layer_count: u32, seed: u64) -> TerrainParams {
    TerrainParams {
        width,
        height,
        layer_count,
        noise_scale: 0.12,
        noise_power: 1.2,
        seed: TerrainSeed(seed),
        ..Default::default()
    }
}

/// Recompute a cell's variant bits directly from the corner values.
fn expected_bits(terrain: &GeneratedTerrain, x: u32, y: u32) -> u8 {
    let size = terrain.size();
    let readings: Vec<Option<f64>> = Corner::ALL
        .iter()
        .map(|corner| {
            let (dx, dy) = corner.offset();
            let (cx, cy) = (x as i64 + dx, y as i64 + dy);
            size.contains(cx, cy)
                .then(|| terrain.corners()[(cx + cy * size.width() as i64) as usize].value)
        })
        .collect();
    let layer = readings
        .iter()
        .map(|r| r.map_or(0, |v| v.floor() as i64))
        .min()
        .unwrap() as u8;
    let mask = readings.iter().enumerate().fold(0u8, |mask, (i, r)| match r {
        Some(v) if v - f64::from(layer) > 0.5 => mask | (1 << i),
        _ => mask,
    });
    (layer << 4) | mask
}

#[test]
fn test_index_position_bijection() {
    let size = GridSize::new(13, 7).unwrap();
    for i in 0..size.len() {
        assert_eq!(size.index_of(size.position_of(i).unwrap()).unwrap(), i);
    }
    for position in size.positions() {
        let index = size.index_of(position).unwrap();
        assert_eq!(size.position_of(index).unwrap(), position);
    }
}

#[test]
fn test_grids_are_complete() {
    let terrain = generate(params(20, 9, 3, 1));
    assert_eq!(terrain.corners().len(), 20 * 9);
    assert_eq!(terrain.variants().len(), 20 * 9);

    let mut seen = vec![false; 20 * 9];
    for sample in terrain.variants() {
        let index = terrain.size().index_of(sample.position).unwrap();
        assert!(!seen[index], "cell {:?} covered twice", sample.position);
        seen[index] = true;
    }
    assert!(seen.iter().all(|&s| s), "every cell must be covered");
}

#[test]
fn test_corner_values_within_layer_range() {
    for layers in [1, 2, 3, 5, 16] {
        let terrain = generate(params(24, 24, layers, 77));
        let max = f64::from(layers - 1);
        for corner in terrain.corners() {
            assert!(
                (0.0..=max).contains(&corner.value),
                "value {} outside [0, {max}]",
                corner.value
            );
        }
    }
}

#[test]
fn test_variants_are_valid() {
    let terrain = generate(params(30, 30, 4, 3));
    for sample in terrain.variants() {
        assert!(sample.variant.mask() <= 15);
        assert!(sample.variant.layer() <= 3, "layer {} too high", sample.variant.layer());
    }
}

#[test]
fn test_variants_follow_corner_formula() {
    let terrain = generate(params(17, 11, 3, 2024));
    for sample in terrain.variants() {
        let UVec2 { x, y } = sample.position;
        assert_eq!(
            sample.variant.bits(),
            expected_bits(&terrain, x, y),
            "cell ({x}, {y})"
        );
    }
}

#[test]
fn test_two_by_two_boundary_pull() {
    for seed in 0..20 {
        let terrain = generate(params(2, 2, 3, seed));
        for sample in terrain.variants() {
            let UVec2 { x, y } = sample.position;
            assert_eq!(sample.variant.bits(), expected_bits(&terrain, x, y));
            if x == 1 || y == 1 {
                assert_eq!(
                    sample.variant.layer(),
                    0,
                    "edge cell ({x}, {y}) has a missing corner and must sit on layer 0"
                );
            }
        }
        // the bottom-right cell only has its own corner
        let last = terrain.variants()[3].variant;
        assert_eq!(last.mask() & !Corner::TopLeft.bit(), 0);
    }
}

#[test]
fn test_fixed_seed_is_deterministic() {
    for noise in [NoiseSettings::Simplex, NoiseSettings::FRACTAL] {
        let p = TerrainParams {
            noise,
            ..params(32, 32, 3, 12345)
        };
        let a = generate(p.clone());
        let b = generate(p);
        assert_eq!(a.variants(), b.variants());
        assert_eq!(a.corners(), b.corners());
    }
}

#[test]
fn test_different_seeds_differ() {
    let a = generate(params(32, 32, 3, 1));
    let b = generate(params(32, 32, 3, 2));
    assert_ne!(a.corners(), b.corners());
}

#[test]
fn test_checkerboard_scenario() {
    let size = GridSize::new(3, 3).unwrap();
    let values = vec![1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let field = LayerField::from_values(size, 1, values).unwrap();
    let terrain = GeneratedTerrain::from_field(field, TerrainSeed(0));

    assert_eq!(terrain.variants()[0].variant.bits(), 11);
    assert_eq!(terrain.variants()[0].variant.layer(), 0);
}

#[test]
fn test_results_unavailable_before_generate() {
    let generator = TerrainGenerator::new(params(4, 4, 2, 0)).unwrap();
    assert_eq!(generator.variants().err(), Some(TerrainError::NotGenerated));
}
