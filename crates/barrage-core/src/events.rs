//! Events emitted by the simulation for the presentation layer.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Side;

/// What a projectile ran into when it was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpactKind {
    Ground,
    Bulletproof,
    Combatant,
    OutOfBounds,
    /// A laser ran out of drill.
    Spent,
}

/// Emitted on player death. Persisting it is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub level: u32,
    pub shots_fired: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    ShotFired {
        side: Side,
        /// Catalog index for player shots. The enemy's rolled weapon has none.
        weapon: Option<usize>,
        angle: f64,
    },
    ProjectileRemoved {
        owner: Side,
        position: DVec2,
        impact: ImpactKind,
    },
    /// An explosion reached full size and applied its single damage pass.
    ExplosionResolved {
        position: DVec2,
        cells_destroyed: u32,
    },
    CombatantHit {
        side: Side,
        health: f64,
    },
    WeaponSwitched {
        index: usize,
    },
    ReloadStarted {
        side: Side,
    },
    ReloadFinished {
        side: Side,
    },
    CombatantDestroyed {
        side: Side,
    },
    LevelAdvanced {
        level: u32,
    },
    Score(ScoreRecord),
}
