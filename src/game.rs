use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, SimConfig, VICTORY_SCORE};
use crate::food::{Fruit, FruitSpawner};
use crate::grid::{Cell, Grid};
use crate::input::Direction;
use crate::snake::{MoveError, Snake};

/// Result of one tick as seen by the host.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Continue,
    GameOver,
    Victory,
}

/// What ended a lost round.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}

impl From<MoveError> for DeathReason {
    fn from(error: MoveError) -> Self {
        match error {
            MoveError::OutOfBounds { .. } => Self::WallCollision,
            MoveError::SelfCollision { .. } => Self::SelfCollision,
        }
    }
}

/// Read-only copy of round state for drawing.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Body cells, head first.
    pub body: Vec<Cell>,
    pub direction: Direction,
    /// Fruit on the board. After a board-filling victory this is the fruit
    /// just eaten, so it sits under the head and should not be drawn.
    pub fruit: Fruit,
    pub score: u32,
    /// Completed ticks this round.
    pub ticks: u64,
}

/// State owned by one live round.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    grid: Grid,
    snake: Snake,
    fruit: Fruit,
    score: u32,
    ticks: u64,
    victory_score: u32,
    spawner: FruitSpawner,
}

impl SimulationEngine {
    /// Starts a round from `config`, seeding fruit from `config.seed` when set.
    pub fn new_round(config: &SimConfig) -> Result<Self, ConfigError> {
        let grid = config.grid()?;
        let spawner = match config.seed {
            Some(seed) => FruitSpawner::with_seed(grid, seed),
            None => FruitSpawner::from_entropy(grid),
        };

        Self::start(grid, spawner, config.victory_score)
    }

    /// Creates a deterministic round for tests and reproducible simulations.
    pub fn new_with_seed(grid: Grid, seed: u64) -> Result<Self, ConfigError> {
        Self::start(grid, FruitSpawner::with_seed(grid, seed), VICTORY_SCORE)
    }

    fn start(
        grid: Grid,
        mut spawner: FruitSpawner,
        victory_score: u32,
    ) -> Result<Self, ConfigError> {
        let snake = Snake::initial();
        if !snake.segments().all(|cell| grid.in_bounds(*cell)) {
            return Err(ConfigError::Invalid("grid cannot hold the starting snake".into()));
        }

        let fruit = spawner
            .spawn(&snake.occupied())
            .ok_or_else(|| ConfigError::Invalid("grid has no room for fruit".into()))?;

        Ok(Self {
            grid,
            snake,
            fruit,
            score: 0,
            ticks: 0,
            victory_score,
            spawner,
        })
    }

    /// Replaces the snake. Scenario and test helper.
    ///
    /// # Panics
    ///
    /// Panics when any segment lies outside the grid.
    #[must_use]
    pub fn with_snake(mut self, snake: Snake) -> Self {
        assert!(
            snake.segments().all(|cell| self.grid.in_bounds(*cell)),
            "scenario snake must fit inside the grid"
        );
        self.snake = snake;
        self
    }

    /// Replaces the fruit. Scenario and test helper.
    ///
    /// # Panics
    ///
    /// Panics when the cell is off the grid or under the snake.
    #[must_use]
    pub fn with_fruit(mut self, fruit: Fruit) -> Self {
        assert!(
            self.grid.in_bounds(fruit.cell) && !self.snake.occupies(fruit.cell),
            "scenario fruit must sit on a free cell"
        );
        self.fruit = fruit;
        self
    }

    /// Advances the round by one tick.
    ///
    /// A reversal request is replaced by the current direction. Hitting a wall
    /// or the body ends the round with the pre-tick state intact.
    pub fn tick(mut self, requested: Direction) -> Step {
        let direction = self.snake.request_direction(requested);
        let grow = self.snake.next_head(direction) == self.fruit.cell;

        if let Err(error) = self.snake.advance(direction, grow, self.grid) {
            debug!(%error, score = self.score, ticks = self.ticks, "round lost");
            return Step::Ended(self.finish(RoundOutcome::GameOver, Some(error.into())));
        }
        self.ticks += 1;

        if grow {
            self.score += FruitSpawner::value_of(self.fruit.kind);
            debug!(
                kind = ?self.fruit.kind,
                score = self.score,
                length = self.snake.len(),
                "fruit eaten"
            );

            if self.snake.len() == self.grid.size().total_cells() {
                debug!(score = self.score, "board filled");
                return Step::Ended(self.finish(RoundOutcome::Victory, None));
            }

            match self.spawner.spawn(&self.snake.occupied()) {
                Some(fruit) => self.fruit = fruit,
                None => return Step::Ended(self.finish(RoundOutcome::Victory, None)),
            }
        }

        if self.score >= self.victory_score {
            debug!(score = self.score, ticks = self.ticks, "round won");
            return Step::Ended(self.finish(RoundOutcome::Victory, None));
        }

        Step::Running(self)
    }

    /// Returns an owned copy of the drawable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.snake.segments().copied().collect(),
            direction: self.snake.direction(),
            fruit: self.fruit,
            score: self.score,
            ticks: self.ticks,
        }
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn fruit(&self) -> Fruit {
        self.fruit
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn victory_score(&self) -> u32 {
        self.victory_score
    }

    fn finish(self, outcome: RoundOutcome, death_reason: Option<DeathReason>) -> EndedRound {
        EndedRound {
            outcome,
            death_reason,
            snapshot: self.snapshot(),
        }
    }
}

/// A round that can no longer be ticked.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EndedRound {
    outcome: RoundOutcome,
    death_reason: Option<DeathReason>,
    snapshot: Snapshot,
}

impl EndedRound {
    /// Either [`RoundOutcome::GameOver`] or [`RoundOutcome::Victory`].
    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.snapshot.score
    }
}

/// What the host gets back from [`SimulationEngine::tick`].
#[derive(Debug, Clone)]
pub enum Step {
    Running(SimulationEngine),
    Ended(EndedRound),
}

impl Step {
    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        match self {
            Self::Running(_) => RoundOutcome::Continue,
            Self::Ended(ended) => ended.outcome(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        match self {
            Self::Running(engine) => engine.snapshot(),
            Self::Ended(ended) => ended.snapshot().clone(),
        }
    }

    /// Returns the live engine, or `None` once the round has ended.
    #[must_use]
    pub fn into_running(self) -> Option<SimulationEngine> {
        match self {
            Self::Running(engine) => Some(engine),
            Self::Ended(_) => None,
        }
    }
}
