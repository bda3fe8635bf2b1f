//! Narrow-phase overlap tests against ground cells.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use barrage_core::enums::CellFace;
use barrage_core::types::Aabb;

/// Would `moving` overlap `fixed` after shifting it right by `speed` and down by `gravity`?
///
/// Touching edges do not count as overlap.
pub fn rects_overlap(moving: &Aabb, fixed: &Aabb, speed: f64, gravity: f64) -> bool {
    let x = moving.x() + speed;
    let y = moving.y() - gravity;
    x + moving.width() > fixed.x()
        && x < fixed.right()
        && y + moving.height() > fixed.y()
        && y < fixed.top()
}

/// Circle-vs-square approximation: centre distance within `(reach + rect.width) / 2`.
///
/// Explosions pass their diameter as `reach`.
pub fn circle_touches_rect(center: DVec2, reach: f64, rect: &Aabb) -> bool {
    center.distance(rect.center()) <= (reach + rect.width()) / 2.0
}

/// Face of the square cell at `rect` closest to `point`.
///
/// Near a corner (within half a cell) the two adjacent faces are compared on
/// signed offsets, so a point outside the cell resolves to the face it crossed.
pub fn nearest_face(point: DVec2, rect: &Aabb) -> CellFace {
    let (x, y) = (point.x, point.y);
    let (bx, by) = (rect.x(), rect.y());
    let width = rect.width();

    let corners = [
        DVec2::new(bx, by),
        DVec2::new(bx + width, by),
        DVec2::new(bx, by + width),
        DVec2::new(bx + width, by + width),
    ];
    let (nearest, distance) = corners
        .iter()
        .map(|c| point.distance(*c))
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best });

    if distance <= 0.5 * width {
        return match nearest {
            0 if x - bx < y - by => CellFace::Left,
            0 => CellFace::Bottom,
            1 if bx + width - x < y - by => CellFace::Right,
            1 => CellFace::Bottom,
            2 if x - bx < by + width - y => CellFace::Left,
            2 => CellFace::Top,
            _ if bx + width - x < by + width - y => CellFace::Right,
            _ => CellFace::Top,
        };
    }

    let top = (y - (by + width)).abs();
    let bottom = (y - by).abs();
    let left = (x - bx).abs();
    let right = (x - (bx + width)).abs();
    let min = top.min(bottom).min(left).min(right);
    if min == top {
        CellFace::Top
    } else if min == bottom {
        CellFace::Bottom
    } else if min == left {
        CellFace::Left
    } else {
        CellFace::Right
    }
}

/// Angle of the mirror line for a face: horizontal faces reflect about the x-axis,
/// vertical faces about the y-axis.
pub fn mirror_angle(face: CellFace) -> f64 {
    match face {
        CellFace::Top | CellFace::Bottom => 0.0,
        CellFace::Left | CellFace::Right => FRAC_PI_2,
    }
}
