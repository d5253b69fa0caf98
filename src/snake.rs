use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use crate::config::{INITIAL_HEAD_X, INITIAL_HEAD_Y, INITIAL_SNAKE_LENGTH};
use crate::grid::{Cell, Grid};
use crate::input::{Direction, direction_change_is_valid};

/// Why a single advance step was refused.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("head would leave the grid at ({}, {})", target.x, target.y)]
    OutOfBounds { target: Cell },
    #[error("head would run into the body at ({}, {})", target.x, target.y)]
    SelfCollision { target: Cell },
}

/// Snake body (head first) and its last applied direction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Creates the fixed three-segment start: head at (5, 5) heading right,
    /// body trailing to the left.
    #[must_use]
    pub fn initial() -> Self {
        let body = (0..INITIAL_SNAKE_LENGTH as i32)
            .map(|offset| Cell::new(INITIAL_HEAD_X - offset, INITIAL_HEAD_Y))
            .collect();

        Self {
            body,
            direction: Direction::Right,
        }
    }

    /// Creates a snake from explicit body segments (front is head). Scenario
    /// and test helper.
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least a head segment");
        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Returns the last applied direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Resolves a requested direction against the no-reversal rule.
    ///
    /// A reversal is only refused once the snake has a neck to turn into.
    #[must_use]
    pub fn request_direction(&self, requested: Direction) -> Direction {
        if self.body.len() > 1 && !direction_change_is_valid(self.direction, requested) {
            return self.direction;
        }
        requested
    }

    /// Returns the cell the head would occupy after one step in `direction`.
    #[must_use]
    pub fn next_head(&self, direction: Direction) -> Cell {
        self.head().step(direction)
    }

    /// Moves one cell in `direction`, keeping the tail when `grow` is set.
    ///
    /// The target is checked against the whole pre-move body, tail included,
    /// so stepping into the cell the tail is about to vacate is a collision.
    /// On error the snake is left untouched.
    pub fn advance(
        &mut self,
        direction: Direction,
        grow: bool,
        grid: Grid,
    ) -> Result<Cell, MoveError> {
        let target = self.next_head(direction);

        if !grid.in_bounds(target) {
            return Err(MoveError::OutOfBounds { target });
        }

        if self.occupies(target) {
            return Err(MoveError::SelfCollision { target });
        }

        self.body.push_front(target);
        if !grow {
            let _ = self.body.pop_back();
        }
        self.direction = direction;

        Ok(target)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns the set of occupied cells, for spawn exclusion.
    #[must_use]
    pub fn occupied(&self) -> HashSet<Cell> {
        self.body.iter().copied().collect()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}
