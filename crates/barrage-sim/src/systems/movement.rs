//! Combatant movement: fall, then step horizontally with auto-climb.
//!
//! Ground cells are fetched once per combatant from the chunks its step
//! sweeps, widened toward the commanded direction. Blockers are tested
//! against the swept box, so no step is long enough to pass through a wall.

use glam::DVec2;

use barrage_core::enums::Direction;
use barrage_core::types::Aabb;
use barrage_terrain::{cells_near, rects_overlap, CellId, GroundCell, Terrain};

use crate::combatant::Combatant;

/// Inset into a cell, as a fraction of the cell size.
const INSET: f64 = 0.3;
const CLIMB_SLACK: f64 = 1e-9;

/// Move one combatant for one tick.
pub fn run(terrain: &Terrain, combatant: &mut Combatant, intent: Option<Direction>, world_width: f64) {
    let cs = terrain.cell_size();
    let dx = intent.map_or(0.0, |d| d.sign() * combatant.speed);
    let nearby: Vec<(CellId, &GroundCell)> = cells_near(terrain, &combatant.bounds, dx)
        .into_iter()
        .filter_map(|id| terrain.get(id).map(|cell| (id, cell)))
        .collect();

    fall(combatant, &nearby, cs);
    if let Some(direction) = intent {
        step(terrain, combatant, &nearby, direction, dx, cs);
    }

    let max_x = (world_width - combatant.bounds.width()).max(0.0);
    combatant.bounds.min.x = combatant.bounds.x().clamp(0.0, max_x);
}

/// Drop by the fall rate unless a cell is underneath, then rest on the highest one.
fn fall(combatant: &mut Combatant, nearby: &[(CellId, &GroundCell)], cell_size: f64) {
    let support = highest_blocker(&combatant.bounds, nearby, 0.0, combatant.fall_rate);
    match support {
        Some(top) => {
            if combatant.bounds.y() >= top {
                combatant.bounds.min.y = top;
            }
        }
        None => combatant.bounds.min.y -= combatant.fall_rate,
    }
    if combatant.bounds.y() < 0.0 {
        combatant.bounds.min.y = cell_size;
    }
}

fn step(
    terrain: &Terrain,
    combatant: &mut Combatant,
    nearby: &[(CellId, &GroundCell)],
    direction: Direction,
    dx: f64,
    cell_size: f64,
) {
    let path = swept(&combatant.bounds, dx);
    let blockers: Vec<&GroundCell> = nearby
        .iter()
        .map(|(_, cell)| *cell)
        .filter(|cell| rects_overlap(&path, &cell.bounds, 0.0, 0.0))
        .collect();

    if blockers.is_empty() {
        combatant.bounds.min.x += dx;
        return;
    }

    let top = blockers
        .iter()
        .map(|cell| cell.bounds.top())
        .fold(f64::NEG_INFINITY, f64::max);
    if can_climb(terrain, combatant, &blockers, nearby, top, dx, cell_size) {
        combatant.bounds.min.y = top;
        combatant.bounds.min.x += dx;
        return;
    }

    combatant.bounds.min.x = match direction {
        Direction::Right => blockers
            .iter()
            .map(|cell| cell.bounds.x())
            .fold(f64::INFINITY, f64::min)
            - combatant.bounds.width(),
        Direction::Left => blockers
            .iter()
            .map(|cell| cell.bounds.right())
            .fold(f64::NEG_INFINITY, f64::max),
    };
}

/// A one-cell step with empty space above it that the combatant fits into.
fn can_climb(
    terrain: &Terrain,
    combatant: &Combatant,
    blockers: &[&GroundCell],
    nearby: &[(CellId, &GroundCell)],
    top: f64,
    dx: f64,
    cell_size: f64,
) -> bool {
    if top - combatant.bounds.y() > cell_size * (1.0 + CLIMB_SLACK) {
        return false;
    }
    let inset = cell_size * INSET;
    let clear_above = blockers.iter().all(|cell| {
        let base = DVec2::new(cell.bounds.x() + inset, top + inset);
        terrain.cell_at(base).is_none() && terrain.cell_at(base + DVec2::new(0.0, cell_size)).is_none()
    });
    if !clear_above {
        return false;
    }
    let climbed = Aabb::new(combatant.bounds.x(), top, combatant.bounds.width(), combatant.bounds.height());
    let path = swept(&climbed, dx);
    !nearby
        .iter()
        .any(|(_, cell)| rects_overlap(&path, &cell.bounds, 0.0, 0.0))
}

/// Box covering `bounds` and every position along a horizontal step of `dx`.
fn swept(bounds: &Aabb, dx: f64) -> Aabb {
    Aabb::new(
        bounds.x().min(bounds.x() + dx),
        bounds.y(),
        bounds.width() + dx.abs(),
        bounds.height(),
    )
}

/// Top of the highest cell the box would overlap after the given offset.
fn highest_blocker(bounds: &Aabb, nearby: &[(CellId, &GroundCell)], speed: f64, gravity: f64) -> Option<f64> {
    nearby
        .iter()
        .filter(|(_, cell)| rects_overlap(bounds, &cell.bounds, speed, gravity))
        .map(|(_, cell)| cell.bounds.top())
        .reduce(f64::max)
}
