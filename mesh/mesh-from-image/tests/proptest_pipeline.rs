//! Property-based tests for the image-to-STL pipeline.
//!
//! Run with: cargo test -p mesh-from-image -- proptest

#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation)]

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use mesh_from_image::field::{normalize, outline};
use mesh_from_image::raster::{SampleMode, sample, target_dimensions};
use mesh_from_image::{
    Field, GenerationConfig, Grid, SampleParams, Strategy, build_mesh, run, run_with_mesh,
};
use proptest::prelude::*;
use proptest::strategy::Strategy as _;

// =============================================================================
// Strategies
// =============================================================================

/// A small grayscale RGBA image with random pixels.
fn arb_image(max_side: u32) -> impl proptest::strategy::Strategy<Value = RgbaImage> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<u8>(), (w * h) as usize).prop_map(move |levels| {
            RgbaImage::from_fn(w, h, |x, y| {
                let v = levels[(y * w + x) as usize];
                Rgba([v, v, v, 255])
            })
        })
    })
}

/// A random occupancy field.
fn arb_occupancy() -> impl proptest::strategy::Strategy<Value = Grid<bool>> {
    (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<bool>(), w * h)
            .prop_map(move |cells| Grid::from_vec(w, h, cells).unwrap())
    })
}

fn png(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
    bytes
}

// =============================================================================
// Property Tests: Sampling
// =============================================================================

proptest! {
    /// Downscaled dimensions are positive and fit the cap.
    #[test]
    fn target_dimensions_fit_cap(w in 1u32..5000, h in 1u32..5000, cap in 1u32..1024) {
        let (tw, th) = target_dimensions(w, h, cap);
        prop_assert!(tw >= 1 && th >= 1);
        prop_assert!(tw.max(th) <= cap);
        prop_assert!(tw <= w && th <= h);
    }

    /// Sampled grids are non-empty and fit the cap.
    #[test]
    fn sampled_grid_fits_cap(img in arb_image(40), cap in 1u32..48) {
        let params = SampleParams { max_dimension: cap, ..SampleParams::default() };
        let grid = sample(&png(&img), &params, SampleMode::Luminance).unwrap();
        prop_assert!(grid.width() >= 1 && grid.height() >= 1);
        prop_assert!(grid.width().max(grid.height()) <= cap as usize);
    }
}

// =============================================================================
// Property Tests: Fields
// =============================================================================

proptest! {
    /// A field with any variation normalizes onto exactly [0, 1].
    #[test]
    fn normalize_hits_both_ends(values in prop::collection::vec(0.0f64..255.0, 2..64)) {
        prop_assume!(values.iter().any(|&v| v != values[0]));
        let grid = Grid::from_vec(values.len(), 1, values).unwrap();
        let heights = normalize(&grid, true).unwrap();

        let min = heights.cells().iter().copied().fold(f64::INFINITY, f64::min);
        let max = heights.cells().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(min.abs() < 1e-12);
        prop_assert!((max - 1.0).abs() < 1e-12);
    }

    /// Outline cells are always occupied interior cells.
    #[test]
    fn outline_is_subset_of_interior_occupancy(occupancy in arb_occupancy()) {
        let edges = outline(&occupancy);
        for y in 0..edges.height() {
            for x in 0..edges.width() {
                if edges.at(x, y) {
                    prop_assert!(occupancy.at(x, y));
                    prop_assert!(!occupancy.is_border(x, y));
                }
            }
        }
    }

    /// The outline builder always emits the base plate, and more when the
    /// outline is non-empty.
    #[test]
    fn outline_mesh_is_never_empty(edges in arb_occupancy()) {
        let boundary = edges.count_true();
        let mesh = build_mesh(&Field::Outline(edges), &GenerationConfig::cookie_cutter()).unwrap();
        if boundary == 0 {
            prop_assert_eq!(mesh.len(), 12);
        } else {
            prop_assert!(mesh.len() > 12);
        }
    }
}

// =============================================================================
// Property Tests: Pipeline
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Identical bytes and config give identical text.
    #[test]
    fn pipeline_is_deterministic(img in arb_image(16), outline_strategy in any::<bool>()) {
        let strategy = if outline_strategy { Strategy::Outline } else { Strategy::HeightMap };
        let config = GenerationConfig::for_strategy(strategy);
        let bytes = png(&img);
        prop_assert_eq!(run(&bytes, &config).unwrap(), run(&bytes, &config).unwrap());
    }

    /// The STL has exactly one facet block per triangle.
    #[test]
    fn facet_count_matches_mesh(img in arb_image(16), outline_strategy in any::<bool>()) {
        let strategy = if outline_strategy { Strategy::Outline } else { Strategy::HeightMap };
        let config = GenerationConfig::for_strategy(strategy);
        let generated = run_with_mesh(&png(&img), &config).unwrap();
        prop_assert_eq!(generated.stl.matches("endfacet").count(), generated.mesh.len());
        prop_assert!(generated.mesh.is_finite());
    }
}
