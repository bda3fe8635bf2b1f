//! Weapon parameter sets and the immutable catalog they are looked up in.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable weapon parameters. Distances and speeds are in cells (per tick).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(default)]
    pub name: String,
    /// Gravity coefficient of fired projectiles.
    pub mass: f64,
    /// Full diameter of the explosion a projectile leaves behind.
    pub effect_diameter: f64,
    pub speed: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Seconds to refill an empty magazine.
    pub reload_time: f64,
    pub ammo_capacity: u32,
    pub radius: f64,
    /// Ground cells a projectile can pierce before it detonates.
    pub drill: i32,
    pub repeat_explosions: bool,
    pub is_laser: bool,
}

impl Weapon {
    /// Seconds that must pass between two shots.
    pub fn cooldown_secs(&self) -> f64 {
        if self.fire_rate > 0.0 {
            1.0 / self.fire_rate
        } else {
            f64::INFINITY
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidWeapon {
            name: self.name.clone(),
            reason,
        };
        if self.ammo_capacity == 0 {
            return Err(invalid("ammo_capacity must be at least 1"));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(invalid("speed must be finite and non-negative"));
        }
        if !(self.reload_time.is_finite() && self.reload_time >= 0.0) {
            return Err(invalid("reload_time must be finite and non-negative"));
        }
        if !(self.effect_diameter.is_finite() && self.effect_diameter >= 0.0) {
            return Err(invalid("effect_diameter must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Ordered, non-empty weapon table. Index 0 is the default equipped weapon.
///
/// Serializes as a plain list of weapons (`[[weapons]]` inside a sim config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Weapon>", into = "Vec<Weapon>")]
pub struct WeaponCatalog {
    weapons: Vec<Weapon>,
}

/// Standalone catalog file: `[[weapons]]` tables in TOML, `{"weapons": [...]}` in JSON.
#[derive(Deserialize)]
struct CatalogFile {
    weapons: Vec<Weapon>,
}

impl TryFrom<Vec<Weapon>> for WeaponCatalog {
    type Error = ConfigError;

    fn try_from(weapons: Vec<Weapon>) -> Result<Self, Self::Error> {
        WeaponCatalog::new(weapons)
    }
}

impl From<WeaponCatalog> for Vec<Weapon> {
    fn from(catalog: WeaponCatalog) -> Self {
        catalog.weapons
    }
}

impl WeaponCatalog {
    pub fn new(weapons: Vec<Weapon>) -> Result<Self, ConfigError> {
        if weapons.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for weapon in &weapons {
            weapon.validate()?;
        }
        Ok(Self { weapons })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.weapons)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::new(file.weapons)
    }

    /// Weapon at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is out of range. The catalog is fixed at load time, so a bad
    /// index is a programming error.
    pub fn get(&self, index: usize) -> &Weapon {
        match self.weapons.get(index) {
            Some(weapon) => weapon,
            None => panic!(
                "weapon index {index} out of range for catalog of {}",
                self.weapons.len()
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }

    /// Index after `index`, wrapping to 0.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.weapons.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.iter()
    }
}

impl Default for WeaponCatalog {
    /// Bullet, Bombshell and Laser.
    fn default() -> Self {
        Self {
            weapons: vec![
                Weapon {
                    name: "Bullet".into(),
                    mass: 0.025,
                    effect_diameter: 7.0,
                    speed: 2.0,
                    fire_rate: 2.0,
                    reload_time: 1.0,
                    ammo_capacity: 5,
                    radius: 0.5,
                    drill: 0,
                    repeat_explosions: false,
                    is_laser: false,
                },
                Weapon {
                    name: "Bombshell".into(),
                    mass: 0.05,
                    effect_diameter: 10.0,
                    speed: 1.3,
                    fire_rate: 3.0,
                    reload_time: 1.0,
                    ammo_capacity: 30,
                    radius: 0.3,
                    drill: 10,
                    repeat_explosions: false,
                    is_laser: false,
                },
                Weapon {
                    name: "Laser".into(),
                    mass: 0.0,
                    effect_diameter: 1.0,
                    speed: 1.0,
                    fire_rate: 3.0,
                    reload_time: 1.0,
                    ammo_capacity: 30,
                    radius: 0.5,
                    drill: 500,
                    repeat_explosions: false,
                    is_laser: true,
                },
            ],
        }
    }
}
