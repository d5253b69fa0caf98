use crate::game::Snapshot;
use crate::grid::{Cell, Grid};
use crate::input::Direction;

/// Candidate order; earlier entries win distance ties.
pub const CANDIDATE_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// One-step greedy autopilot.
///
/// Picks the safe neighbouring cell closest to the food. There is no
/// lookahead, so it can steer into a pocket it cannot leave.
#[derive(Debug, Clone, Copy)]
pub struct AutoController {
    grid: Grid,
}

impl AutoController {
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Chooses the next direction for `body` (head first).
    ///
    /// A move is safe when its target is in bounds and not on any body cell.
    /// With no safe move, `current` is returned unchanged even though it is
    /// fatal.
    #[must_use]
    pub fn next_move(&self, body: &[Cell], current: Direction, food: Cell) -> Direction {
        let Some(&head) = body.first() else {
            return current;
        };

        CANDIDATE_ORDER
            .iter()
            .copied()
            .map(|direction| (direction, head.step(direction)))
            .filter(|(_, target)| self.grid.in_bounds(*target) && !body.contains(target))
            // min_by_key keeps the first minimum, which gives the tie-break order.
            .min_by_key(|(_, target)| target.manhattan_distance(food))
            .map_or(current, |(direction, _)| direction)
    }

    /// Convenience over [`Self::next_move`] for a host holding a snapshot.
    #[must_use]
    pub fn next_move_for(&self, snapshot: &Snapshot) -> Direction {
        self.next_move(&snapshot.body, snapshot.direction, snapshot.fruit.cell)
    }
}
