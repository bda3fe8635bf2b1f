//! Per-level state: terrain, both combatants and the enemy's rolled profile.
//!
//! Rebuilt from scratch whenever the enemy is destroyed.

use barrage_ai::profiles::EnemyProfile;
use barrage_core::enums::Side;
use barrage_terrain::{Terrain, TerrainParams};

use crate::combatant::Combatant;

pub struct Level {
    /// Levels cleared so far (0 for the first).
    pub number: u32,
    pub params: TerrainParams,
    pub terrain: Terrain,
    pub player: Combatant,
    pub enemy: Combatant,
    pub enemy_profile: EnemyProfile,
}

impl Level {
    pub fn width(&self) -> f64 {
        self.terrain.width()
    }

    pub fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }
}

#[cfg(test)]
impl Level {
    /// Level over `terrain` with both combatants parked in the top corners.
    pub(crate) fn for_terrain(terrain: Terrain) -> Self {
        use barrage_core::config::TerrainConfig;
        use barrage_core::types::Aabb;
        use barrage_core::weapons::WeaponCatalog;
        use rand::SeedableRng;

        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        let params = TerrainParams::random(&mut rng, &TerrainConfig::default(), false);
        let enemy_profile = EnemyProfile::roll(0, 0.0, &mut rng);
        let size = 2.0 * terrain.cell_size();
        let top = 100.0 * terrain.cell_size();
        let weapon = WeaponCatalog::default().get(0).clone();
        let player = Combatant::new(Side::Player, Aabb::new(0.0, top, size, size), 10.0, weapon, Some(0));
        let enemy = Combatant::new(
            Side::Enemy,
            Aabb::new(terrain.width() - size, top, size, size),
            10.0,
            enemy_profile.weapon.clone(),
            None,
        );
        Self {
            number: 0,
            params,
            terrain,
            player,
            enemy,
            enemy_profile,
        }
    }
}
