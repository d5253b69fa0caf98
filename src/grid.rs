use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Taxicab distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Playfield bounds plus the pixel size of one cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cell_size: u16,
}

impl Grid {
    #[must_use]
    pub fn new(size: GridSize, cell_size: u16) -> Self {
        debug_assert!(size.width > 0 && size.height > 0 && cell_size > 0);
        Self { size, cell_size }
    }

    #[must_use]
    pub fn size(self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn cell_size(self) -> u16 {
        self.cell_size
    }

    /// Returns true when `cell` lies in `[0, width) x [0, height)`.
    #[must_use]
    pub fn in_bounds(self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < i32::from(self.size.width)
            && cell.y < i32::from(self.size.height)
    }

    /// Picks a uniformly random in-bounds cell that is not in `excluded`.
    ///
    /// Returns `None` only when every cell is excluded.
    pub fn random_free_cell<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        excluded: &HashSet<Cell>,
    ) -> Option<Cell> {
        let candidates: Vec<Cell> = self
            .cells()
            .filter(|cell| !excluded.contains(cell))
            .collect();

        if candidates.is_empty() {
            return None;
        }

        Some(candidates[rng.gen_range(0..candidates.len())])
    }

    /// Iterates every cell row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell { x, y }))
    }

    /// Maps a grid-aligned pixel coordinate to its cell.
    #[must_use]
    pub fn cell_at_pixel(self, px: i32, py: i32) -> Option<Cell> {
        let size = i32::from(self.cell_size);
        if px < 0 || py < 0 || px % size != 0 || py % size != 0 {
            return None;
        }

        Some(Cell {
            x: px / size,
            y: py / size,
        })
    }

    /// Top-left pixel of `cell`, for hosts that draw in pixel space.
    #[must_use]
    pub fn pixel_origin(self, cell: Cell) -> (i32, i32) {
        let size = i32::from(self.cell_size);
        (cell.x * size, cell.y * size)
    }
}
