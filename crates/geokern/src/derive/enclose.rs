//! Enclosing and inscribed shapes.
//!
//! - Minimum enclosing circle: Welzl's incremental scheme over the two- and
//!   three-point circle constructors.
//! - Inscribed circle: pole of inaccessibility of the largest area part, radius
//!   equal to its distance to the nearest ring.
//! - Inscribed square/rectangle: axis-aligned, centred on the same pole, grown
//!   by bisection while it stays contained.

use geo::{Area, BoundingRect, Contains, Coord, Polygon, Rect};
use nalgebra::Vector2;
use polylabel::polylabel;

use crate::cfg::GeomCfg;
use crate::construct::primitives::distance_to_segment;
use crate::construct::{circle_2p, circle_3p, Ellipse};
use crate::convert::{area_part, polygon};
use crate::error::{GeomError, GeomResult};
use crate::model::{AreaPart, Geometry};

const BISECT_STEPS: usize = 48;

fn covers(c: &Ellipse, p: Vector2<f64>, cfg: &GeomCfg) -> bool {
    (p - c.center).norm() <= c.major + cfg.tol.max(c.major * 1e-12)
}

/// Circle through three boundary points; collinear triples fall back to
/// the widest pair.
fn circle_of_three(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>, cfg: &GeomCfg) -> Ellipse {
    circle_3p(a, b, c, cfg).unwrap_or_else(|| {
        [(a, b), (a, c), (b, c)]
            .into_iter()
            .map(|(p, q)| circle_2p(p, q))
            .fold(Ellipse::circle(a, 0.0), |best, e| {
                if e.major > best.major {
                    e
                } else {
                    best
                }
            })
    })
}

/// Smallest circle containing every point; `None` for no points.
pub fn min_enclosing_circle(points: &[Vector2<f64>], cfg: &GeomCfg) -> Option<Ellipse> {
    let first = *points.first()?;
    let mut c = Ellipse::circle(first, 0.0);
    for i in 1..points.len() {
        let p = points[i];
        if covers(&c, p, cfg) {
            continue;
        }
        c = Ellipse::circle(p, 0.0);
        for j in 0..i {
            let q = points[j];
            if covers(&c, q, cfg) {
                continue;
            }
            c = circle_2p(p, q);
            for &r in &points[..j] {
                if !covers(&c, r, cfg) {
                    c = circle_of_three(p, q, r, cfg);
                }
            }
        }
    }
    Some(Ellipse::circle(c.center, c.major))
}

fn largest_part(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Polygon<f64>> {
    if g.dim_g() < 2 {
        return Err(GeomError::IncorrectGeometryKind(format!(
            "inscribed shapes need an area, got {:?}",
            g.kind()
        )));
    }
    g.components(cfg)
        .areas
        .iter()
        .map(polygon)
        .max_by(|a, b| {
            a.unsigned_area()
                .partial_cmp(&b.unsigned_area())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .ok_or(GeomError::Domain("inscribed shape of an empty area"))
}

fn boundary_distance(p: Vector2<f64>, part: &AreaPart) -> f64 {
    part.rings()
        .flat_map(|r| r.windows(2))
        .map(|w| distance_to_segment(p, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Pole of inaccessibility and its clearance.
fn pole(poly: &Polygon<f64>, cfg: &GeomCfg) -> GeomResult<(Vector2<f64>, f64)> {
    let size = poly.unsigned_area().sqrt();
    let precision = (size * 1e-6).max(cfg.tol);
    let p = polylabel(poly, &precision)?;
    let center = Vector2::new(p.x(), p.y());
    Ok((center, boundary_distance(center, &area_part(poly))))
}

/// Largest inscribed circle of the biggest area part.
pub fn inner_circle(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Ellipse> {
    let poly = largest_part(g, cfg)?;
    let (center, radius) = pole(&poly, cfg)?;
    Ok(Ellipse::circle(center, radius))
}

fn rect_around(c: Vector2<f64>, hw: f64, hh: f64) -> Polygon<f64> {
    Rect::new(
        Coord {
            x: c.x - hw,
            y: c.y - hh,
        },
        Coord {
            x: c.x + hw,
            y: c.y + hh,
        },
    )
    .to_polygon()
}

/// Largest `s` in `[lo, hi]` such that the rectangle with half-sizes
/// `(s·wx, s·wy)` stays inside `poly`; `lo` is assumed to fit.
fn grow(
    poly: &Polygon<f64>,
    c: Vector2<f64>,
    (wx, wy): (f64, f64),
    mut lo: f64,
    mut hi: f64,
) -> f64 {
    for _ in 0..BISECT_STEPS {
        let mid = 0.5 * (lo + hi);
        if poly.contains(&rect_around(c, mid * wx, mid * wy)) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

fn half_extent(poly: &Polygon<f64>) -> (f64, f64) {
    poly.bounding_rect()
        .map(|r| (0.5 * r.width(), 0.5 * r.height()))
        .unwrap_or((0.0, 0.0))
}

/// Largest axis-aligned square centred on the pole of inaccessibility,
/// as `(center, half_side)`.
pub fn inner_square(g: &Geometry, cfg: &GeomCfg) -> GeomResult<(Vector2<f64>, f64)> {
    let poly = largest_part(g, cfg)?;
    let (center, radius) = pole(&poly, cfg)?;
    let (ex, ey) = half_extent(&poly);
    let lo = radius * std::f64::consts::FRAC_1_SQRT_2 * (1.0 - 1e-9);
    let hi = ex.min(ey).max(lo);
    Ok((center, grow(&poly, center, (1.0, 1.0), lo, hi)))
}

/// Aspect ratios (width / height) tried by the rectangle search.
const ASPECTS: [f64; 9] = [0.25, 1.0 / 3.0, 0.5, 2.0 / 3.0, 1.0, 1.5, 2.0, 3.0, 4.0];

/// Largest-area axis-aligned rectangle centred on the pole of
/// inaccessibility, as `(min, max)`.
pub fn inner_rect(g: &Geometry, cfg: &GeomCfg) -> GeomResult<(Vector2<f64>, Vector2<f64>)> {
    let poly = largest_part(g, cfg)?;
    let (center, radius) = pole(&poly, cfg)?;
    let (ex, ey) = half_extent(&poly);
    let mut best = (0.0, 0.0);
    for k in ASPECTS {
        let (wx, wy) = (k.sqrt(), 1.0 / k.sqrt());
        // the inscribed circle always holds this one
        let lo = radius / wx.hypot(wy) * (1.0 - 1e-9);
        let hi = (ex / wx).min(ey / wy).max(lo);
        let s = grow(&poly, center, (wx, wy), lo, hi);
        if s * s > best.0 * best.1 {
            best = (s * wx, s * wy);
        }
    }
    let (hw, hh) = best;
    Ok((center - Vector2::new(hw, hh), center + Vector2::new(hw, hh)))
}
