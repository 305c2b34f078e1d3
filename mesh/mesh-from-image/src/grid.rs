//! Rectangular cell grids.

use crate::error::{GenerateError, GenerateResult};

/// A non-empty, row-major `width × height` grid with its origin top-left.
///
/// # Example
///
/// ```
/// use mesh_from_image::Grid;
///
/// let grid = Grid::from_fn(3, 2, |x, y| x + 10 * y).unwrap();
/// assert_eq!(grid.get(2, 1), Some(&12));
/// assert_eq!(grid.get(3, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Raster samples on a 0-255 scale.
pub type SampleGrid = Grid<f64>;

/// Normalized elevations in `[0, 1]`.
pub type HeightField = Grid<f64>;

/// Foreground (`true`) versus background cells.
pub type OccupancyField = Grid<bool>;

/// Foreground cells on the silhouette boundary.
pub type OutlineField = Grid<bool>;

impl<T> Grid<T> {
    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Internal`] if either side is zero or the
    /// buffer length is not `width * height`.
    pub fn from_vec(width: usize, height: usize, cells: Vec<T>) -> GenerateResult<Self> {
        if width == 0 || height == 0 {
            return Err(GenerateError::internal(format!(
                "grid must be non-empty, got {width}x{height}"
            )));
        }
        if width.checked_mul(height) != Some(cells.len()) {
            return Err(GenerateError::internal(format!(
                "grid {width}x{height} needs {} cells, got {}",
                width.saturating_mul(height),
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every cell in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Internal`] if either side is zero.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> GenerateResult<Self> {
        let mut cells = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self::from_vec(width, height, cells)
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Cells in row-major order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.cells.chunks(self.width)
    }

    /// Apply `f` to every cell, keeping the dimensions.
    #[must_use]
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Apply `f(x, y, cell)` to every cell, keeping the dimensions.
    #[must_use]
    pub fn map_xy<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> Grid<U> {
        let width = self.width;
        Grid {
            width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .enumerate()
                .map(|(i, cell)| f(i % width, i / width, cell))
                .collect(),
        }
    }

    /// The 8-connected neighbours of `(x, y)` that lie inside the grid.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = &T> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let nx = x.checked_add_signed(dx)?;
            let ny = y.checked_add_signed(dy)?;
            self.get(nx, ny)
        })
    }

    /// Whether `(x, y)` lies on the first or last row or column.
    #[inline]
    #[must_use]
    pub const fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 >= self.width || y + 1 >= self.height
    }
}

/// 8-neighbour offsets: the four axis directions first, then the diagonals.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

impl<T: Copy> Grid<T> {
    /// Copy of the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    #[must_use]
    pub fn at(&self, x: usize, y: usize) -> T {
        assert!(x < self.width && y < self.height, "cell ({x}, {y}) out of bounds");
        self.cells[y * self.width + x]
    }
}

impl Grid<bool> {
    /// Number of `true` cells.
    #[must_use]
    pub fn count_true(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
