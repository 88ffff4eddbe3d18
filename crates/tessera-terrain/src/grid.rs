//! Fixed-size rectangular grids stored as flat row-major arrays.
//!
//! Both the corner field and the dual grid use [`Grid`]: one contiguous
//! allocation of `width * height` entries addressed by `x + y * width`.

use glam::{DVec2, UVec2};

use crate::error::TerrainError;

/// Immutable grid extent. Both dimensions are guaranteed non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Create a grid extent.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of entries, `width * height`.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Never true: both dimensions are non-zero.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Geometric center of the grid, `(width / 2, height / 2)`.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Returns `true` if the signed coordinate lies inside `[0, width) x [0, height)`.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    /// Convert a position to its flat index.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::OutOfRange`] if the position is outside the grid.
    pub fn index_of(&self, position: UVec2) -> Result<usize, TerrainError> {
        if position.x >= self.width || position.y >= self.height {
            return Err(self.out_of_range(format!("position ({}, {})", position.x, position.y)));
        }
        Ok(position.x as usize + position.y as usize * self.width as usize)
    }

    /// Convert a flat index back to its position.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::OutOfRange`] if `index >= len()`.
    pub fn position_of(&self, index: usize) -> Result<UVec2, TerrainError> {
        if index >= self.len() {
            return Err(self.out_of_range(format!("index {index}")));
        }
        let width = self.width as usize;
        Ok(UVec2::new((index % width) as u32, (index / width) as u32))
    }

    /// Iterate every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = UVec2> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| UVec2::new(x, y)))
    }

    fn out_of_range(&self, what: String) -> TerrainError {
        TerrainError::OutOfRange {
            what,
            width: self.width,
            height: self.height,
        }
    }
}

/// A flat, row-major arena holding one `T` per grid position.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    size: GridSize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by calling `f` once per position, in row-major order.
    pub fn from_fn(size: GridSize, mut f: impl FnMut(UVec2) -> T) -> Self {
        let cells = size.positions().map(&mut f).collect();
        Self { size, cells }
    }

    /// Wrap an existing row-major vector.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ValueCountMismatch`] if `cells.len() != size.len()`.
    pub fn from_vec(size: GridSize, cells: Vec<T>) -> Result<Self, TerrainError> {
        if cells.len() != size.len() {
            return Err(TerrainError::ValueCountMismatch {
                expected: size.len(),
                actual: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }

    /// The grid extent.
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Boundary-safe lookup; `None` for any coordinate outside the grid.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<&T> {
        if !self.size.contains(x, y) {
            return None;
        }
        self.cells.get(x as usize + y as usize * self.size.width as usize)
    }

    /// Entries in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate entries in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false` for a grid built from a valid [`GridSize`].
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
