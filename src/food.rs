use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid};

/// Fruit tiers, named after their colour on screen.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum FruitKind {
    Red,
    Blue,
    Orange,
}

impl FruitKind {
    /// Every kind, in the order a uniform draw picks from.
    pub const ALL: [Self; 3] = [Self::Red, Self::Blue, Self::Orange];

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Red => 1,
            Self::Blue => 3,
            Self::Orange => 5,
        }
    }
}

/// Fruit entity currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub cell: Cell,
    pub kind: FruitKind,
}

impl Fruit {
    #[must_use]
    pub fn new(cell: Cell, kind: FruitKind) -> Self {
        Self { cell, kind }
    }
}

/// Places fruit on free cells and picks their kind.
#[derive(Debug, Clone)]
pub struct FruitSpawner {
    grid: Grid,
    rng: StdRng,
}

impl FruitSpawner {
    /// Creates a deterministic spawner for tests and reproducible rounds.
    #[must_use]
    pub fn with_seed(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a spawner seeded from OS entropy.
    #[must_use]
    pub fn from_entropy(grid: Grid) -> Self {
        Self {
            grid,
            rng: StdRng::from_entropy(),
        }
    }

    /// Spawns a fruit of a uniformly chosen kind on a cell outside `occupied`.
    ///
    /// Returns `None` when the board has no free cell left.
    pub fn spawn(&mut self, occupied: &HashSet<Cell>) -> Option<Fruit> {
        let cell = self.grid.random_free_cell(&mut self.rng, occupied)?;
        let kind = *FruitKind::ALL.choose(&mut self.rng)?;
        Some(Fruit::new(cell, kind))
    }

    /// Fixed point table lookup.
    #[must_use]
    pub fn value_of(kind: FruitKind) -> u32 {
        kind.points()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::grid::{Cell, Grid, GridSize};

    use super::{FruitKind, FruitSpawner};

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height }, 20)
    }

    #[test]
    fn fruit_spawn_never_overlaps_snake() {
        let mut spawner = FruitSpawner::with_seed(grid(8, 6), 7);
        let occupied: HashSet<Cell> = [Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
            .into_iter()
            .collect();

        for _ in 0..100 {
            let fruit = spawner.spawn(&occupied).expect("board has room");
            assert!(!occupied.contains(&fruit.cell));
        }
    }

    #[test]
    fn every_kind_eventually_spawns() {
        let mut spawner = FruitSpawner::with_seed(grid(10, 10), 11);
        let occupied = HashSet::new();
        let mut seen = HashSet::new();

        for _ in 0..200 {
            seen.insert(spawner.spawn(&occupied).expect("board has room").kind);
        }

        assert_eq!(seen.len(), FruitKind::ALL.len());
    }

    #[test]
    fn same_seed_spawns_the_same_sequence() {
        let occupied = HashSet::new();
        let mut first = FruitSpawner::with_seed(grid(10, 10), 3);
        let mut second = FruitSpawner::with_seed(grid(10, 10), 3);

        for _ in 0..20 {
            assert_eq!(first.spawn(&occupied), second.spawn(&occupied));
        }
    }

    #[test]
    fn full_board_spawns_nothing() {
        let grid = grid(2, 2);
        let mut spawner = FruitSpawner::with_seed(grid, 5);
        let occupied: HashSet<Cell> = grid.cells().collect();

        assert_eq!(spawner.spawn(&occupied), None);
    }

    #[test]
    fn value_table_is_fixed() {
        assert_eq!(FruitSpawner::value_of(FruitKind::Red), 1);
        assert_eq!(FruitSpawner::value_of(FruitKind::Blue), 3);
        assert_eq!(FruitSpawner::value_of(FruitKind::Orange), 5);
    }
}
