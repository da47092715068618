//! Planar primitives shared by construction, derivation and validity.
//!
//! Angles follow two conventions:
//! - azimuth: degrees, clockwise from north (`+y`), as used by `project`;
//! - line angle: radians in `[0, 2π)`, same bearing convention.

use std::f64::consts::{FRAC_PI_2, TAU};

use nalgebra::Vector2;

use crate::cfg::GeomCfg;

/// Twice the signed area of triangle `abc` (positive when counter-clockwise).
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle;
    if a >= TAU || a <= -TAU {
        a %= TAU;
    }
    if a < 0.0 {
        a += TAU;
    }
    a
}

/// Bearing of `a → b` in radians, `[0, 2π)`, zero pointing north.
pub fn line_angle(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let at = (b.y - a.y).atan2(b.x - a.x);
    normalize_angle(-at + FRAC_PI_2)
}

/// Bearing of `a → b` in degrees, `(-180, 180]`.
#[inline]
pub fn azimuth(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (b.x - a.x).atan2(b.y - a.y).to_degrees()
}

/// Point at distance `dis` from `p` along bearing `azimuth` (degrees).
#[inline]
pub fn project(p: Vector2<f64>, dis: f64, azimuth: f64) -> Vector2<f64> {
    let rads = azimuth.to_radians();
    Vector2::new(p.x + dis * rads.sin(), p.y + dis * rads.cos())
}

/// Intersection of the infinite lines through two segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentIntersection {
    pub point: Vector2<f64>,
    /// The point lies strictly inside both segments (beyond `tol` from the ends)
    /// or the segments meet at a shared endpoint.
    pub on_segments: bool,
}

/// Intersect lines `p1p2` and `q1q2`.
///
/// Returns `None` when either segment is degenerate or the lines are parallel.
pub fn segment_intersection(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
    cfg: &GeomCfg,
) -> Option<SegmentIntersection> {
    let v = p2 - p1;
    let w = q2 - q1;
    let vl = v.norm();
    let wl = w.norm();
    if cfg.near_zero(vl) || cfg.near_zero(wl) {
        return None;
    }
    let v = v / vl;
    let w = w / wl;
    let d = v.y * w.x - v.x * w.y;
    if cfg.near_zero(d) {
        return None;
    }
    let dx = q1.x - p1.x;
    let dy = q1.y - p1.y;
    let k = (dy * w.x - dx * w.y) / d;
    let point = p1 + v * k;

    let shared_end = [p1, p2]
        .iter()
        .any(|a| [q1, q2].iter().any(|b| (a - b).norm() <= cfg.tol));
    let lv = (point - p1).dot(&v);
    let lw = (point - q1).dot(&w);
    let inside = lv > cfg.tol && lv < vl - cfg.tol && lw > cfg.tol && lw < wl - cfg.tol;
    Some(SegmentIntersection {
        point,
        on_segments: inside || shared_end,
    })
}

/// Bisector of the angle formed by lines `ab` and `cd`.
///
/// Returns the intersection of the two lines and the bisector's azimuth
/// (degrees, mean of the two line azimuths); `None` for parallel lines.
pub fn angle_bisector(
    a: Vector2<f64>,
    b: Vector2<f64>,
    c: Vector2<f64>,
    d: Vector2<f64>,
    cfg: &GeomCfg,
) -> Option<(Vector2<f64>, f64)> {
    let angle = (azimuth(a, b) + azimuth(c, d)) / 2.0;
    let hit = segment_intersection(a, b, c, d, cfg)?;
    Some((hit.point, angle))
}

/// Distance from `p` to the infinite line through `s1`, `s2`.
pub fn distance_to_line(p: Vector2<f64>, s1: Vector2<f64>, s2: Vector2<f64>) -> f64 {
    let len = (s2 - s1).norm();
    if len == 0.0 {
        return (p - s1).norm();
    }
    cross(s1, s2, p).abs() / len
}

/// Distance from `p` to the closed segment `s1s2`.
pub fn distance_to_segment(p: Vector2<f64>, s1: Vector2<f64>, s2: Vector2<f64>) -> f64 {
    let d = s2 - s1;
    let l2 = d.norm_squared();
    if l2 == 0.0 {
        return (p - s1).norm();
    }
    let t = ((p - s1).dot(&d) / l2).clamp(0.0, 1.0);
    (p - (s1 + d * t)).norm()
}

/// Orientation of `c` relative to `ab`: 1 left, -1 right, 0 collinear within `tol`.
fn orient(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, cfg: &GeomCfg) -> i8 {
    let scale = (b - a).norm().max(1.0);
    let v = cross(a, b, c);
    if v.abs() <= cfg.tol * scale {
        0
    } else if v > 0.0 {
        1
    } else {
        -1
    }
}

fn within_box(a: Vector2<f64>, b: Vector2<f64>, p: Vector2<f64>, cfg: &GeomCfg) -> bool {
    p.x >= a.x.min(b.x) - cfg.tol
        && p.x <= a.x.max(b.x) + cfg.tol
        && p.y >= a.y.min(b.y) - cfg.tol
        && p.y <= a.y.max(b.y) + cfg.tol
}

/// Closed segments `p1p2` and `q1q2` share at least one point.
pub fn segments_touch(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
    cfg: &GeomCfg,
) -> bool {
    let o1 = orient(p1, p2, q1, cfg);
    let o2 = orient(p1, p2, q2, cfg);
    let o3 = orient(q1, q2, p1, cfg);
    let o4 = orient(q1, q2, p2, cfg);
    if o1 != o2 && o3 != o4 && o1 != 0 && o2 != 0 && o3 != 0 && o4 != 0 {
        return true;
    }
    (o1 == 0 && within_box(p1, p2, q1, cfg))
        || (o2 == 0 && within_box(p1, p2, q2, cfg))
        || (o3 == 0 && within_box(q1, q2, p1, cfg))
        || (o4 == 0 && within_box(q1, q2, p2, cfg))
}

/// Segments cross at a single interior point of both.
pub fn segments_cross(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
    cfg: &GeomCfg,
) -> bool {
    let o1 = orient(p1, p2, q1, cfg);
    let o2 = orient(p1, p2, q2, cfg);
    let o3 = orient(q1, q2, p1, cfg);
    let o4 = orient(q1, q2, p2, cfg);
    o1 * o2 < 0 && o3 * o4 < 0
}

/// Segments are collinear and share a stretch longer than `tol`.
pub fn segments_overlap(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
    cfg: &GeomCfg,
) -> bool {
    if orient(p1, p2, q1, cfg) != 0 || orient(p1, p2, q2, cfg) != 0 {
        return false;
    }
    let d = p2 - p1;
    let len = d.norm();
    if len <= cfg.tol {
        return false;
    }
    let u = d / len;
    let (a0, a1) = (0.0_f64, len);
    let (mut b0, mut b1) = ((q1 - p1).dot(&u), (q2 - p1).dot(&u));
    if b0 > b1 {
        std::mem::swap(&mut b0, &mut b1);
    }
    a1.min(b1) - a0.max(b0) > cfg.tol
}

/// Shoelace signed area (positive for counter-clockwise rings).
pub fn signed_area(ring: &[Vector2<f64>]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let mut s = 0.0;
    for k in 0..ring.len() {
        let p = ring[k];
        let q = ring[(k + 1) % ring.len()];
        s += p.x * q.y - q.x * p.y;
    }
    s / 2.0
}

/// Even–odd point-in-ring test; points on the boundary may go either way.
pub fn point_in_ring(p: Vector2<f64>, ring: &[Vector2<f64>]) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = ring[i];
        let b = ring[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// `p` lies on the polyline `pts` within `tol`.
pub fn point_on_path(p: Vector2<f64>, pts: &[Vector2<f64>], cfg: &GeomCfg) -> bool {
    match pts {
        [] => false,
        [only] => (p - only).norm() <= cfg.tol,
        _ => pts
            .windows(2)
            .any(|w| distance_to_segment(p, w[0], w[1]) <= cfg.tol),
    }
}
