//! Enumerations shared across the simulation.

use serde::{Deserialize, Serialize};

/// Which combatant an entity or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Horizontal travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, +1.0 for right.
    pub fn sign(self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    /// Direction of a horizontal displacement, `None` when stationary.
    pub fn of_delta(dx: f64) -> Option<Direction> {
        if dx < 0.0 {
            Some(Direction::Left)
        } else if dx > 0.0 {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Top-level match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    /// The player combatant was destroyed. The engine only produces snapshots.
    GameOver,
}

/// What a piercing projectile does after its repeat explosion fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiercePolicy {
    /// Keep flying; drill is decremented once per tick spent touching ground.
    #[default]
    Continue,
    /// A projectile with `repeat_explosions` is removed after its first pierce.
    DetonateOnRepeat,
}

/// Side of a ground cell a projectile struck, used to pick the reflection normal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellFace {
    Top,
    Bottom,
    Left,
    Right,
}
