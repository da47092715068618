//! Derived geometries: envelopes, hulls, inscribed and enclosing shapes,
//! simplification, boundary and per-vertex edits.
//!
//! Purpose
//! - Every function returns a newly owned tree; inputs are never touched.
//! - Results are XY except for the vertex edits (`reverse`,
//!   `remove_repeated`), which keep Z/M by filtering the source buffers.
//!
//! Notes
//! - Simplification rebuilds the tree shape: curves come back as paths and
//!   areas as rings (or polygons when holes survive).

mod enclose;
mod hull;

pub use enclose::{inner_circle, inner_rect, inner_square, min_enclosing_circle};
pub use hull::convex_hull_points;

use geo::{InteriorPoint, MinimumRotatedRect, Simplify, SimplifyVwPreserve};
use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::construct::{Ellipse, StrokeParam};
use crate::convert::{area_part, line_string, points_of, polygon, to_geo};
use crate::error::{GeomError, GeomResult};
use crate::measure::bounds;
use crate::model::{group_rings, AreaPart, GeomKind, Geometry};

/// Axis-aligned envelope; an empty input gives an empty envelope.
pub fn envelope(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    match bounds(g, cfg) {
        Some((lo, hi)) => Geometry::envelope(lo, hi),
        None => Geometry::single(GeomKind::Envelope, Default::default()),
    }
}

/// Midpoint of the envelope.
pub fn center(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Vector2<f64>> {
    let (lo, hi) = bounds(g, cfg).ok_or(GeomError::Domain("center of an empty geometry"))?;
    Ok((lo + hi) * 0.5)
}

/// A point guaranteed to lie on the geometry (interior for areas).
pub fn label_point(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Vector2<f64>> {
    let p = to_geo(g, cfg)
        .interior_point()
        .ok_or(GeomError::Domain("label point of an empty geometry"))?;
    Ok(Vector2::new(p.x(), p.y()))
}

/// Minimum-area rotated rectangle as a ring.
pub fn oriented_envelope(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    if g.is_empty() {
        return Err(GeomError::Domain("oriented envelope of an empty geometry"));
    }
    let rect = to_geo(g, cfg)
        .minimum_rotated_rect()
        .ok_or(GeomError::Domain("oriented envelope is undefined"))?;
    Geometry::ring(&points_of(rect.exterior()))
}

fn stroked(e: &Ellipse) -> GeomResult<Geometry> {
    Geometry::from_ellipse(e, StrokeParam::AREA_36)?
        .ok_or(GeomError::Domain("circle could not be stroked"))
}

pub fn enclosing_circle(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let e = min_enclosing_circle(&g.all_xy(cfg), cfg)
        .ok_or(GeomError::Domain("enclosing circle of an empty geometry"))?;
    stroked(&e)
}

pub fn inscribed_circle(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    stroked(&inner_circle(g, cfg)?)
}

pub fn inscribed_square(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let (c, h) = inner_square(g, cfg)?;
    let d = Vector2::new(h, h);
    Geometry::envelope(c - d, c + d)
}

pub fn inscribed_rect(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let (lo, hi) = inner_rect(g, cfg)?;
    Geometry::envelope(lo, hi)
}

/// Convex hull: point, line or ring depending on how many extreme points remain.
pub fn convex_hull(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let hull = convex_hull_points(&g.all_xy(cfg), cfg);
    match hull.as_slice() {
        [] => Geometry::collection(vec![]),
        [p] => Geometry::point(*p),
        [a, b] => Geometry::line(*a, *b),
        _ => Geometry::ring(&hull),
    }
}

fn area_geometry(part: AreaPart) -> GeomResult<Geometry> {
    if part.holes.is_empty() {
        Geometry::ring(&part.exterior)
    } else {
        Geometry::polygon(&part.exterior, &part.holes)
    }
}

/// Rebuild `g` with every curve passed through `curve` and every area part
/// through `area`. Points are copied.
fn rebuild(
    g: &Geometry,
    cfg: &GeomCfg,
    curve: &impl Fn(&[Vector2<f64>]) -> Vec<Vector2<f64>>,
    area: &impl Fn(&AreaPart) -> AreaPart,
) -> GeomResult<Geometry> {
    match g {
        Geometry::Simple(s) => match s.dim_g() {
            0 => Ok(g.clone()),
            1 => Geometry::path(&curve(&s.vertices(cfg))),
            _ => area_geometry(area(&AreaPart {
                exterior: s.vertices(cfg),
                holes: Vec::new(),
            })),
        },
        Geometry::Composite(c) if c.kind() == GeomKind::Polygon => {
            let rings = c
                .children()
                .iter()
                .filter_map(Geometry::as_simple)
                .map(|s| s.vertices(cfg))
                .collect();
            let rings = group_rings(rings)
                .iter()
                .map(area)
                .flat_map(|p| std::iter::once(p.exterior).chain(p.holes))
                .map(|r| Geometry::ring(&r))
                .collect::<GeomResult<Vec<_>>>()?;
            Geometry::multi(GeomKind::Polygon, rings)
        }
        Geometry::Composite(c) => {
            let children = c
                .children()
                .iter()
                .map(|child| rebuild(child, cfg, curve, area))
                .collect::<GeomResult<Vec<_>>>()?;
            Geometry::multi(c.kind(), children)
        }
    }
}

/// Douglas–Peucker simplification with distance threshold `epsilon`.
pub fn simplify(g: &Geometry, epsilon: f64, cfg: &GeomCfg) -> GeomResult<Geometry> {
    rebuild(
        g,
        cfg,
        &|pts| points_of(&line_string(pts).simplify(&epsilon)),
        &|part| area_part(&polygon(part).simplify(&epsilon)),
    )
}

/// Visvalingam–Whyatt simplification that avoids introducing self-intersections.
pub fn simplify_preserve(g: &Geometry, epsilon: f64, cfg: &GeomCfg) -> GeomResult<Geometry> {
    rebuild(
        g,
        cfg,
        &|pts| points_of(&line_string(pts).simplify_vw_preserve(&epsilon)),
        &|part| area_part(&polygon(part).simplify_vw_preserve(&epsilon)),
    )
}

/// Area → its rings as a polyline; curves → endpoints of the open ones;
/// anything else → an empty collection.
pub fn boundary(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let comps = g.components(cfg);
    match g.dim_g() {
        2 => {
            let rings: Vec<Vec<Vector2<f64>>> =
                comps.areas.iter().flat_map(|a| a.rings().cloned()).collect();
            Geometry::polyline(&rings)
        }
        1 => {
            let ends: Vec<Vector2<f64>> = comps
                .curves
                .iter()
                .filter_map(|c| match c.as_slice() {
                    [a, .., b] if a != b => Some([*a, *b]),
                    _ => None,
                })
                .flatten()
                .collect();
            if ends.is_empty() {
                Geometry::collection(vec![])
            } else {
                Geometry::multi_point(&ends)
            }
        }
        _ => Geometry::collection(vec![]),
    }
}

/// Kinds whose point count is fixed by construction.
fn fixed_arity(kind: GeomKind) -> bool {
    matches!(
        kind,
        GeomKind::Point | GeomKind::Line | GeomKind::CircularArc | GeomKind::Envelope
    )
}

/// Drop every vertex within `threshold` of the previously kept one.
///
/// The last vertex of a ring is always kept so the ring stays closed.
pub fn remove_repeated(g: &Geometry, threshold: f64) -> GeomResult<Geometry> {
    g.map_simples(&mut |s| {
        let coords = s.coords();
        if fixed_arity(s.kind()) || coords.len() < 2 {
            return Ok(coords.clone());
        }
        let last = coords.len() - 1;
        let ring = s.kind() == GeomKind::Ring;
        let mut kept = coords.xy(0);
        Ok(coords.filtered(|i| {
            if i == 0 {
                return true;
            }
            let p = coords.xy(i);
            if (p - kept).norm() > threshold || (ring && i == last) {
                kept = p;
                true
            } else {
                false
            }
        }))
    })
}

/// Reverse the vertex order of every leaf. Envelopes are left as they are.
pub fn reverse(g: &Geometry) -> GeomResult<Geometry> {
    g.map_simples(&mut |s| {
        Ok(if s.kind() == GeomKind::Envelope {
            s.coords().clone()
        } else {
            s.coords().reversed()
        })
    })
}

#[cfg(test)]
mod tests;
