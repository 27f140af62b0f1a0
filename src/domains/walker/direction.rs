use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One of the four cardinal unit moves on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::PositiveX,
        Direction::NegativeX,
        Direction::PositiveY,
        Direction::NegativeY,
    ];

    /// Unit offset `(dx, dy)` applied by this move.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::PositiveX => (1, 0),
            Direction::NegativeX => (-1, 0),
            Direction::PositiveY => (0, 1),
            Direction::NegativeY => (0, -1),
        }
    }
}

/// Port the walker draws its next move from.
pub trait DirectionSource: Send {
    fn next_direction(&mut self) -> Direction;
}

/// Uniform, independent draws over the four directions.
pub struct RandomDirections {
    rng: StdRng,
}

impl RandomDirections {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same walk.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomDirections {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl DirectionSource for RandomDirections {
    fn next_direction(&mut self) -> Direction {
        let index = self.rng.gen_range(0..Direction::ALL.len());
        Direction::ALL[index]
    }
}

/// Replays a fixed sequence of moves, starting over once exhausted.
/// An empty script always moves along +x.
#[derive(Debug, Clone)]
pub struct ScriptedDirections {
    script: Vec<Direction>,
    cursor: usize,
}

impl ScriptedDirections {
    pub fn new(script: Vec<Direction>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl DirectionSource for ScriptedDirections {
    fn next_direction(&mut self) -> Direction {
        if self.script.is_empty() {
            return Direction::PositiveX;
        }
        let direction = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        direction
    }
}
