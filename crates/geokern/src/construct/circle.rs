//! Circle fitting: two points, three points, three tangent lines.
//!
//! Degenerate inputs (collinear points, parallel tangents) are normal
//! outcomes and return no circle; they are never errors.

use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::ellipse::Ellipse;
use super::primitives::{
    angle_bisector, cross, distance_to_line, line_angle, project, segment_intersection,
};
use crate::cfg::GeomCfg;
use crate::error::{GeomError, GeomResult};

/// Circle with `p1p2` as diameter; azimuth is the bearing `p1 → p2` in degrees.
pub fn circle_2p(p1: Vector2<f64>, p2: Vector2<f64>) -> Ellipse {
    let center = (p1 + p2) / 2.0;
    let radius = (p1 - p2).norm() / 2.0;
    let azimuth = line_angle(p1, p2).to_degrees();
    Ellipse::new(center, radius, radius, azimuth)
}

/// Chords `pt1→pt2` or `pt2→pt3` are parallel to an axis, which breaks the
/// slope formula. The vertical-then-horizontal right angle is handled directly.
fn is_perpendicular(
    pt1: Vector2<f64>,
    pt2: Vector2<f64>,
    pt3: Vector2<f64>,
    cfg: &GeomCfg,
) -> bool {
    let a = pt2 - pt1;
    let b = pt3 - pt2;
    if cfg.near_zero(a.x) && cfg.near_zero(b.y) {
        return false;
    }
    cfg.near_zero(a.y) || cfg.near_zero(b.y) || cfg.near_zero(a.x) || cfg.near_zero(b.x)
}

/// Circumscribed circle of three points; `None` when they are collinear.
pub fn circle_3p(
    pt1: Vector2<f64>,
    pt2: Vector2<f64>,
    pt3: Vector2<f64>,
    cfg: &GeomCfg,
) -> Option<Ellipse> {
    let orders = [
        (pt1, pt2, pt3),
        (pt1, pt3, pt2),
        (pt2, pt1, pt3),
        (pt2, pt3, pt1),
        (pt3, pt2, pt1),
        (pt3, pt1, pt2),
    ];
    let Some(&(p1, p2, p3)) = orders
        .iter()
        .find(|(a, b, c)| !is_perpendicular(*a, *b, *c, cfg))
    else {
        tracing::trace!("three-point circle: no usable ordering (collinear on an axis)");
        return None;
    };
    let a = p2 - p1;
    let b = p3 - p2;

    if cfg.near_zero(a.x) && cfg.near_zero(b.y) {
        let center = Vector2::new(0.5 * (p2.x + p3.x), 0.5 * (p1.y + p2.y));
        return Some(Ellipse::circle(center, (center - pt1).norm()));
    }
    if cfg.near_zero(a.x) || cfg.near_zero(b.x) {
        return None;
    }
    let a_slope = a.y / a.x;
    let b_slope = b.y / b.x;
    if cfg.near_zero(a_slope - b_slope) {
        tracing::trace!("three-point circle: collinear input");
        return None;
    }
    let cx = (a_slope * b_slope * (p1.y - p3.y) + b_slope * (p1.x + p2.x)
        - a_slope * (p2.x + p3.x))
        / (2.0 * (b_slope - a_slope));
    let cy = -(cx - (p1.x + p2.x) / 2.0) / a_slope + (p1.y + p2.y) / 2.0;
    let center = Vector2::new(cx, cy);
    Some(Ellipse::circle(center, (center - pt1).norm()))
}

/// Incircle of a triangle: vertices weighted by the opposite side length.
fn tri_incircle(p1: Vector2<f64>, p2: Vector2<f64>, p3: Vector2<f64>) -> Ellipse {
    let l = [(p1 - p2).norm(), (p2 - p3).norm(), (p3 - p1).norm()];
    let per = l[0] + l[1] + l[2];
    let center = (p3 * l[0] + p1 * l[1] + p2 * l[2]) / per;
    let r = cross(p1, p2, p3).abs() / per;
    Ellipse::circle(center, r)
}

fn contains_circle(found: &[Ellipse], center: Vector2<f64>, r: f64, cfg: &GeomCfg) -> bool {
    found
        .iter()
        .any(|e| (e.center - center).norm() <= cfg.tol && cfg.near(e.major, r))
}

/// A line given by two distinct points.
pub type Tangent = [Vector2<f64>; 2];

/// Circles tangent to two parallel lines and one transversal (at most two).
fn from_two_parallels(par1: Tangent, par2: Tangent, line: Tangent, cfg: &GeomCfg) -> Vec<Ellipse> {
    let radius = distance_to_line(par1[0], par2[0], par2[1]) / 2.0;
    let (Some((i1, angle1)), Some((i2, angle2))) = (
        angle_bisector(par1[0], par1[1], line[0], line[1], cfg),
        angle_bisector(par2[0], par2[1], line[0], line[1], cfg),
    ) else {
        return Vec::new();
    };
    let mut out: Vec<Ellipse> = Vec::with_capacity(2);
    for (d1, d2) in [(0.0, 0.0), (0.0, 90.0), (90.0, 0.0), (90.0, 90.0)] {
        let hit = segment_intersection(
            i1,
            project(i1, 1.0, angle1 + d1),
            i2,
            project(i2, 1.0, angle2 + d2),
            cfg,
        );
        if let Some(hit) = hit {
            if !contains_circle(&out, hit.point, radius, cfg) {
                out.push(Ellipse::circle(hit.point, radius));
            }
        }
    }
    out
}

/// Which circles to keep when the tangent construction is ambiguous.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TangentPick {
    #[default]
    All,
    First,
}

/// Circles tangent to three lines.
///
/// - all three parallel: none;
/// - exactly one parallel pair: up to two circles between the parallels;
/// - a proper triangle: its incircle.
pub fn circle_tangents(tangents: [Tangent; 3], pick: TangentPick, cfg: &GeomCfg) -> Vec<Ellipse> {
    let [tg1, tg2, tg3] = tangents;
    let i12 = segment_intersection(tg1[0], tg1[1], tg2[0], tg2[1], cfg);
    let i13 = segment_intersection(tg1[0], tg1[1], tg3[0], tg3[1], cfg);
    let i23 = segment_intersection(tg2[0], tg2[1], tg3[0], tg3[1], cfg);

    let mut out = match (i12, i13, i23) {
        (None, _, None) => {
            tracing::trace!("tangent circle: all three tangents parallel");
            Vec::new()
        }
        (None, _, _) => from_two_parallels(tg1, tg2, tg3, cfg),
        (_, None, _) => from_two_parallels(tg1, tg3, tg2, cfg),
        (_, _, None) => from_two_parallels(tg2, tg3, tg1, cfg),
        (Some(a), Some(b), Some(c)) => vec![tri_incircle(a.point, b.point, c.point)],
    };
    if pick == TangentPick::First {
        out.truncate(1);
    }
    out
}

/// Construction method for [`construct_circle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircleMethod {
    /// Two points on a diameter.
    TwoPoints,
    /// Three points on the circle.
    ThreePoints,
    /// Three tangent lines given as six points.
    Tangents(TangentPick),
}

/// Run a circle construction over a flat point list.
///
/// The number of circles produced is the length of the result.
pub fn construct_circle(
    points: &[Vector2<f64>],
    method: CircleMethod,
    cfg: &GeomCfg,
) -> GeomResult<Vec<Ellipse>> {
    let need = match method {
        CircleMethod::TwoPoints => 2,
        CircleMethod::ThreePoints => 3,
        CircleMethod::Tangents(_) => 6,
    };
    if points.len() < need {
        return Err(GeomError::InvalidArgument(format!(
            "{method:?} needs {need} points, got {}",
            points.len()
        )));
    }
    let p = points;
    Ok(match method {
        CircleMethod::TwoPoints => vec![circle_2p(p[0], p[1])],
        CircleMethod::ThreePoints => circle_3p(p[0], p[1], p[2], cfg).into_iter().collect(),
        CircleMethod::Tangents(pick) => {
            circle_tangents([[p[0], p[1]], [p[2], p[3]], [p[4], p[5]]], pick, cfg)
        }
    })
}

/// Points along the circular arc `p1 → p2 → p3`, 36 segments per full turn.
///
/// Collinear control points come back unchanged.
pub fn arc_points(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
    cfg: &GeomCfg,
) -> Vec<Vector2<f64>> {
    let Some(circle) = circle_3p(p1, p2, p3, cfg) else {
        return vec![p1, p2, p3];
    };
    let c = circle.center;
    let r = circle.major;
    let a1 = (p1.y - c.y).atan2(p1.x - c.x);
    let a3 = (p3.y - c.y).atan2(p3.x - c.x);
    let ccw = cross(p1, p2, p3) > 0.0;
    let mut sweep = (a3 - a1).rem_euclid(TAU);
    if !ccw {
        sweep -= TAU;
    }
    let n = ((sweep.abs() / (TAU / 36.0)).ceil() as usize).max(2);
    let mut pts = Vec::with_capacity(n + 1);
    pts.push(p1);
    for i in 1..n {
        let t = a1 + sweep * i as f64 / n as f64;
        pts.push(Vector2::new(c.x + r * t.cos(), c.y + r * t.sin()));
    }
    pts.push(p3);
    pts
}
