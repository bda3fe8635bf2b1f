//! Per-tick input from the presentation layer.
//!
//! Key and mouse state are captured elsewhere; the core only sees booleans,
//! edges and the cursor position.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// Held movement keys for one combatant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn left() -> Self {
        Self {
            left: true,
            right: false,
        }
    }

    pub fn right() -> Self {
        Self {
            left: false,
            right: true,
        }
    }

    pub fn from_direction(direction: Option<Direction>) -> Self {
        match direction {
            Some(Direction::Left) => Self::left(),
            Some(Direction::Right) => Self::right(),
            None => Self::default(),
        }
    }

    /// Net direction. Both keys held cancel out.
    pub fn direction(&self) -> Option<Direction> {
        match (self.left, self.right) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Everything the engine consumes for one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Seconds since the previous tick.
    pub dt: f64,
    pub player_move: MoveIntent,
    /// Cursor position in world units; the player's cannon points at it.
    pub cursor: Option<DVec2>,
    /// Fire button released this tick.
    pub fire: bool,
    /// How long fire was held before release. `None` fires at full speed.
    pub charge_secs: Option<f64>,
    /// Weapon-switch key released this tick.
    pub cycle_weapon: bool,
    /// Manual reload key held.
    pub reload: bool,
}
