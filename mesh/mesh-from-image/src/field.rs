//! Field transforms between raster samples and mesh builders.
//!
//! The height-map strategy needs elevations in `[0, 1]`; the outline
//! strategy needs the boundary of a thresholded silhouette.

use tracing::{debug, info, warn};

use crate::error::{GenerateError, GenerateResult};
use crate::grid::{HeightField, OccupancyField, OutlineField, SampleGrid};
use crate::params::{GenerationConfig, SampleParams, Strategy};
use crate::raster::SampleMode;

/// A transformed field, tagged by the strategy that consumes it.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Normalized elevations for [`Strategy::HeightMap`].
    Height(HeightField),
    /// Silhouette boundary for [`Strategy::Outline`].
    Outline(OutlineField),
}

impl Field {
    /// Grid dimensions as `(width, height)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        match self {
            Self::Height(grid) => (grid.width(), grid.height()),
            Self::Outline(grid) => (grid.width(), grid.height()),
        }
    }

    /// The strategy this field was produced for.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Height(_) => Strategy::HeightMap,
            Self::Outline(_) => Strategy::Outline,
        }
    }
}

impl Strategy {
    /// How the raster sampler should reduce pixels for this strategy.
    #[must_use]
    pub const fn sample_mode(self, params: &SampleParams) -> SampleMode {
        match self {
            Self::HeightMap => SampleMode::Luminance,
            Self::Outline => SampleMode::Silhouette {
                alpha_cutoff: params.alpha_cutoff,
            },
        }
    }

    /// Turn raster samples into the field this strategy builds from.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`normalize`].
    pub fn transform(self, grid: &SampleGrid, config: &GenerationConfig) -> GenerateResult<Field> {
        match self {
            Self::HeightMap => normalize(grid, config.require_variation).map(Field::Height),
            Self::Outline => Ok(Field::Outline(outline(&binarize(grid, config.threshold)))),
        }
    }
}

/// Rescale samples linearly so the smallest becomes 0 and the largest 1.
///
/// A flat grid (every sample equal) normalizes to all zeros.
///
/// # Arguments
///
/// * `grid` - Raster samples
/// * `require_variation` - Fail on a flat grid instead of returning zeros
///
/// # Errors
///
/// Returns [`GenerateError::Internal`] if a sample is not finite, and
/// [`GenerateError::DegenerateInput`] if the grid is flat and
/// `require_variation` is set.
///
/// # Example
///
/// ```
/// use mesh_from_image::{field::normalize, Grid};
///
/// let grid = Grid::from_vec(3, 1, vec![50.0, 100.0, 150.0]).unwrap();
/// let heights = normalize(&grid, false).unwrap();
/// assert_eq!(heights.cells(), &[0.0, 0.5, 1.0]);
/// ```
pub fn normalize(grid: &SampleGrid, require_variation: bool) -> GenerateResult<HeightField> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in grid.cells() {
        if !value.is_finite() {
            return Err(GenerateError::internal(format!(
                "non-finite sample {value} in raster grid"
            )));
        }
        min = min.min(value);
        max = max.max(value);
    }

    let range = max - min;
    if range <= 0.0 {
        if require_variation {
            return Err(GenerateError::degenerate(format!(
                "image is flat (every sample is {min}); nothing to extrude"
            )));
        }
        debug!(value = min, "Flat height field, normalizing to zero");
        return Ok(grid.map(|_| 0.0));
    }

    Ok(grid.map(|&value| (value - min) / range))
}

/// Mark samples strictly below `threshold` as foreground.
///
/// Dark ink on light paper becomes `true`; transparent pixels were already
/// sampled as background by the raster stage.
#[must_use]
pub fn binarize(grid: &SampleGrid, threshold: f64) -> OccupancyField {
    grid.map(|&value| value < threshold)
}

/// Extract the silhouette boundary of an occupancy field.
///
/// An interior cell is on the outline when it is occupied and its
/// 8-neighbourhood holds both background and occupied cells. Cells in the
/// first or last row or column are never on the outline.
///
/// A lone occupied cell has no occupied neighbour and so no boundary.
///
/// # Example
///
/// ```
/// use mesh_from_image::{field::outline, Grid};
///
/// // 5x5 field with a filled 3x3 square in the middle
/// let occupancy = Grid::from_fn(5, 5, |x, y| (1..4).contains(&x) && (1..4).contains(&y)).unwrap();
/// let edges = outline(&occupancy);
/// assert_eq!(edges.count_true(), 8);
/// assert!(!edges.at(2, 2));
/// ```
#[must_use]
pub fn outline(occupancy: &OccupancyField) -> OutlineField {
    let edges = occupancy.map_xy(|x, y, &occupied| {
        if !occupied || occupancy.is_border(x, y) {
            return false;
        }
        let (mut background, mut inside) = (false, false);
        for &neighbor in occupancy.neighbors(x, y) {
            if neighbor {
                inside = true;
            } else {
                background = true;
            }
        }
        background && inside
    });

    let boundary = edges.count_true();
    if boundary == 0 {
        warn!(
            occupied = occupancy.count_true(),
            "Outline field has no boundary cells"
        );
    } else {
        info!(
            width = edges.width(),
            height = edges.height(),
            boundary,
            "Extracted outline"
        );
    }
    edges
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::grid::Grid;
    use approx::assert_relative_eq;

    fn occupancy(rows: &[&str]) -> OccupancyField {
        let width = rows[0].len();
        let cells = rows.iter().flat_map(|row| row.bytes().map(|b| b == b'#')).collect();
        Grid::from_vec(width, rows.len(), cells).unwrap()
    }

    fn render(field: &OutlineField) -> Vec<String> {
        field
            .rows()
            .map(|row| row.iter().map(|&c| if c { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn normalize_spans_unit_interval() {
        let grid = Grid::from_vec(2, 2, vec![20.0, 220.0, 120.0, 70.0]).unwrap();
        let heights = normalize(&grid, true).unwrap();

        assert_relative_eq!(heights.at(0, 0), 0.0);
        assert_relative_eq!(heights.at(1, 0), 1.0);
        assert_relative_eq!(heights.at(0, 1), 0.5);
        assert_relative_eq!(heights.at(1, 1), 0.25);
    }

    #[test]
    fn flat_grid_normalizes_to_zero() {
        let grid = Grid::from_vec(4, 4, vec![255.0; 16]).unwrap();
        let heights = normalize(&grid, false).unwrap();
        assert!(heights.cells().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn flat_grid_is_degenerate_when_variation_required() {
        let grid = Grid::from_vec(4, 4, vec![255.0; 16]).unwrap();
        let err = normalize(&grid, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn non_finite_sample_is_internal() {
        let grid = Grid::from_vec(2, 1, vec![1.0, f64::NAN]).unwrap();
        let err = normalize(&grid, false).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn binarize_is_strict() {
        let grid = Grid::from_vec(3, 1, vec![127.9, 128.0, 0.0]).unwrap();
        let occupied = binarize(&grid, 128.0);
        assert_eq!(occupied.cells(), &[true, false, true]);
    }

    #[test]
    fn filled_square_keeps_only_perimeter() {
        let field = occupancy(&[
            ".......",
            ".#####.",
            ".#####.",
            ".#####.",
            ".#####.",
            ".#####.",
            ".......",
        ]);
        let edges = outline(&field);
        assert_eq!(
            render(&edges),
            [
                ".......",
                ".#####.",
                ".#...#.",
                ".#...#.",
                ".#...#.",
                ".#####.",
                ".......",
            ]
        );
    }

    #[test]
    fn lone_centre_cell_has_no_outline() {
        let field = occupancy(&["...", ".#.", "..."]);
        let edges = outline(&field);
        assert_eq!(edges.count_true(), 0);
        assert_eq!((edges.width(), edges.height()), (3, 3));
    }

    #[test]
    fn border_cells_never_outline() {
        let field = occupancy(&["####", "##..", "####"]);
        let edges = outline(&field);
        assert_eq!(render(&edges), ["....", ".#..", "...."]);
    }

    #[test]
    fn fully_occupied_field_has_no_outline() {
        let field = Grid::from_vec(5, 5, vec![true; 25]).unwrap();
        assert_eq!(outline(&field).count_true(), 0);
    }

    #[test]
    fn diagonal_background_counts() {
        let field = occupancy(&[
            "#####",
            "#####",
            "####.",
            "#####",
        ]);
        let edges = outline(&field);
        // (3, 1) and (3, 2) see the hole at (4, 2) diagonally or directly
        assert_eq!(render(&edges), [".....", "...#.", "...#.", "....."]);
    }

    #[test]
    fn transform_selects_field_kind() {
        let mut cells = vec![255.0; 9];
        cells[4] = 0.0;
        let grid = Grid::from_vec(3, 3, cells).unwrap();

        let height = Strategy::HeightMap
            .transform(&grid, &GenerationConfig::height_map())
            .unwrap();
        assert_eq!(height.strategy(), Strategy::HeightMap);
        assert_eq!(height.dimensions(), (3, 3));

        let outline = Strategy::Outline
            .transform(&grid, &GenerationConfig::cookie_cutter())
            .unwrap();
        assert_eq!(outline, Field::Outline(Grid::from_vec(3, 3, vec![false; 9]).unwrap()));
    }

    #[test]
    fn sample_mode_per_strategy() {
        let params = SampleParams::default();
        assert_eq!(Strategy::HeightMap.sample_mode(&params), SampleMode::Luminance);
        assert_eq!(
            Strategy::Outline.sample_mode(&params),
            SampleMode::Silhouette { alpha_cutoff: 200 }
        );
    }
}
