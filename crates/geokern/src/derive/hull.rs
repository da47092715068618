use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::construct::primitives::cross;

fn lex(a: &Vector2<f64>, b: &Vector2<f64>) -> std::cmp::Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal) {
        std::cmp::Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal),
        o => o,
    }
}

/// Andrew's monotone chain convex hull, CCW, not closed.
///
/// Coincident points (within `cfg.tol`) collapse; collinear points are
/// dropped, so the result has 0, 1, 2 or ≥3 vertices.
pub fn convex_hull_points(points: &[Vector2<f64>], cfg: &GeomCfg) -> Vec<Vector2<f64>> {
    let mut pts: Vec<_> = points.to_vec();
    pts.sort_by(lex);
    pts.dedup_by(|a, b| (*a - *b).norm() <= cfg.tol);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0 {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Vector2<f64>> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0 {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}
