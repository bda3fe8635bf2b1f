//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units. `min` is the bottom-left corner, y points up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub size: DVec2,
}

impl Aabb {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(width, height),
        }
    }

    pub fn x(&self) -> f64 {
        self.min.x
    }

    pub fn y(&self) -> f64 {
        self.min.y
    }

    pub fn width(&self) -> f64 {
        self.size.x
    }

    pub fn height(&self) -> f64 {
        self.size.y
    }

    pub fn right(&self) -> f64 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> DVec2 {
        self.min + self.size * 0.5
    }

    /// The same rectangle moved by `delta`.
    pub fn translated(&self, delta: DVec2) -> Self {
        Self {
            min: self.min + delta,
            size: self.size,
        }
    }

    /// Point containment, inclusive of the bottom/left edges.
    pub fn contains(&self, point: DVec2) -> bool {
        point.x >= self.min.x && point.x < self.right() && point.y >= self.min.y && point.y < self.top()
    }
}

/// Simulation time tracking.
///
/// Ticks are counted; seconds accumulate from the caller-supplied `dt` and
/// drive reload deadlines and fire-rate cooldowns only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds. Negative or NaN `dt` counts as zero.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_secs += dt;
        }
    }
}

/// Unit vector for an angle in radians (0 = +x, counter-clockwise).
pub fn heading(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Wrap an angle into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let mut a = angle.rem_euclid(TAU);
    if a > PI {
        a -= TAU;
    }
    a
}
