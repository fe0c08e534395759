//! Fixed-size grid of wave cells with four-neighbor adjacency
//!
//! Cells are stored in an `Array2` indexed `[y, x]`. Neighbor lookups never
//! wrap: positions past the border have no neighbor.

use ndarray::Array2;

use crate::algorithm::bitset::CandidateSet;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, WaveError, invalid_parameter};
use crate::spatial::wave::WaveCell;
use crate::tiles::catalog::Catalog;
use crate::tiles::sockets::Edge;

/// Grid of cells, every one starting with the full catalog as candidates
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<WaveCell>,
}

impl Grid {
    /// Create a `width` x `height` grid over the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - The catalog is empty
    pub fn new(width: usize, height: usize, catalog: &Catalog) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(WaveCell::new(x, y, CandidateSet::all(catalog.len()), catalog)?);
            }
        }

        let cells = Array2::from_shape_vec((height, width), cells).map_err(|e| {
            invalid_parameter("dimensions", &format!("{width}x{height}"), &e)
        })?;
        Ok(Self { cells })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Dimensions as `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Cell at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<&WaveCell> {
        self.cells.get([y, x])
    }

    /// Mutable cell at `(x, y)`
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut WaveCell> {
        self.cells.get_mut([y, x])
    }

    /// Validate signed coordinates against the grid
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the position lies outside the grid.
    pub fn checked_position(&self, x: i64, y: i64) -> Result<(usize, usize)> {
        let inside = |value: i64, limit: usize| usize::try_from(value).ok().filter(|&v| v < limit);
        match (inside(x, self.width()), inside(y, self.height())) {
            (Some(col), Some(row)) => Ok((col, row)),
            _ => Err(WaveError::OutOfBounds {
                position: (x, y),
                dimensions: self.dimensions(),
            }),
        }
    }

    /// Position of the neighbor across `edge`, `None` at the border
    pub fn neighbor_position(&self, x: usize, y: usize, edge: Edge) -> Option<(usize, usize)> {
        let (dx, dy) = edge.offset();
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        (nx < self.width() && ny < self.height()).then_some((nx, ny))
    }

    /// Neighbor cell across `edge`
    pub fn neighbor(&self, x: usize, y: usize, edge: Edge) -> Option<&WaveCell> {
        self.neighbor_position(x, y, edge)
            .and_then(|(nx, ny)| self.get(nx, ny))
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &WaveCell> {
        self.cells.iter()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Positions of every contradicted cell in row-major order
    pub fn contradictions(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|cell| cell.is_contradicted())
            .map(WaveCell::position)
            .collect()
    }

    /// Whether every cell holds exactly one candidate
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(WaveCell::is_collapsed)
    }

    /// Catalog index of each collapsed cell, row-major, `None` elsewhere
    pub fn snapshot(&self) -> Vec<Option<usize>> {
        self.cells.iter().map(WaveCell::collapsed_reality).collect()
    }
}
