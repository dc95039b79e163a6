//! # Volume Property Tests
//!
//! Randomised checks that growth, pruning and translation never lose or
//! invent values. A `HashMap` model is the reference.
//!
//! Run with: cargo test --package seedgrid_core --test volume_properties

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use seedgrid_core::VolumeStore;

const DEFAULT: i32 = -1;

fn random_coord(rng: &mut ChaCha8Rng, radius: i32) -> [i32; 3] {
    [
        rng.gen_range(-radius..=radius),
        rng.gen_range(-radius..=radius),
        rng.gen_range(-radius..=radius),
    ]
}

fn assert_matches_model(volume: &VolumeStore, model: &HashMap<[i32; 3], i32>, radius: i32) {
    for z in -radius - 1..=radius + 1 {
        for y in -radius - 1..=radius + 1 {
            for x in -radius - 1..=radius + 1 {
                let expected = model.get(&[x, y, z]).copied().unwrap_or(DEFAULT);
                assert_eq!(volume.get(x, y, z), expected, "mismatch at ({x}, {y}, {z})");
            }
        }
    }
}

#[test]
fn test_random_sets_preserve_all_values() {
    for seed in 0..8u64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut volume = VolumeStore::new(DEFAULT);
        let mut model = HashMap::new();

        for _ in 0..200 {
            let coord = random_coord(&mut rng, 6);
            let value = rng.gen_range(0..1000);
            volume.set(coord[0], coord[1], coord[2], value);
            model.insert(coord, value);

            assert_eq!(volume.get(coord[0], coord[1], coord[2]), value);
        }

        assert_matches_model(&volume, &model, 6);
        assert_eq!(volume.non_default_count(), model.len());
    }
}

#[test]
fn test_corner_growth_sequences() {
    // Alternate extreme corners so every call grows several axes on opposite sides.
    let corners = [
        [0, 0, 0],
        [-4, 5, -6],
        [7, -8, 9],
        [-10, -11, 12],
        [13, 14, -15],
    ];
    let mut volume = VolumeStore::new(DEFAULT);
    let mut model = HashMap::new();
    for (i, corner) in corners.iter().enumerate() {
        let value = i as i32 * 10 + 1;
        volume.set(corner[0], corner[1], corner[2], value);
        model.insert(*corner, value);
        for (coord, expected) in &model {
            assert_eq!(volume.get(coord[0], coord[1], coord[2]), *expected);
        }
    }
    let bounds = volume.bounds().unwrap();
    assert_eq!(bounds.min(), [-10, -11, -15]);
    assert_eq!(bounds.max(), [13, 14, 12]);
}

#[test]
fn test_prune_keeps_values_and_is_idempotent() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut volume = VolumeStore::new(DEFAULT);
    let mut model = HashMap::new();

    volume.ensure_allocated([-8, -8, -8], [8, 8, 8]).unwrap();
    for _ in 0..20 {
        let coord = random_coord(&mut rng, 4);
        volume.set(coord[0], coord[1], coord[2], 5);
        model.insert(coord, 5);
    }

    volume.prune();
    assert_matches_model(&volume, &model, 8);

    let bounds = volume.bounds().unwrap();
    for axis in 0..3 {
        let lo = model.keys().map(|c| c[axis]).min().unwrap();
        let hi = model.keys().map(|c| c[axis]).max().unwrap();
        assert_eq!(bounds.min()[axis], lo);
        assert_eq!(bounds.max()[axis], hi);
    }

    let once = volume.clone();
    volume.prune();
    assert_eq!(volume, once);
}

#[test]
fn test_move_all_translates_every_value() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut volume = VolumeStore::new(DEFAULT);
    let mut model = HashMap::new();
    for _ in 0..50 {
        let coord = random_coord(&mut rng, 3);
        let value = rng.gen_range(0..50);
        volume.set(coord[0], coord[1], coord[2], value);
        model.insert(coord, value);
    }

    let (dx, dy, dz) = (3, -2, 1);
    volume.move_all(dx, dy, dz);
    let moved: HashMap<_, _> = model
        .into_iter()
        .map(|([x, y, z], v)| ([x + dx, y + dy, z + dz], v))
        .collect();
    assert_matches_model(&volume, &moved, 6);
}

#[test]
fn test_erase_then_reads_default() {
    let mut volume = VolumeStore::new(DEFAULT);
    volume.fill([-2, -2, -2], [2, 2, 2], 3);
    volume.erase();
    assert_matches_model(&volume, &HashMap::new(), 3);

    volume.set(1, 1, 1, 4);
    assert_eq!(volume.size(), [1, 1, 1]);
}
