//! Flatten a geometry tree into point, curve and area components.
//!
//! Rings of a composite polygon are grouped in order: a ring lying inside the
//! current exterior (and outside its holes so far) is one of its holes, any
//! other ring opens a new exterior. Containment is decided by the first ring
//! vertex not on the other ring's boundary.

use nalgebra::Vector2;

use super::geometry::{GeomKind, Geometry};
use crate::cfg::GeomCfg;
use crate::construct::primitives::{distance_to_segment, point_in_ring};

/// One area: exterior ring plus holes, vertices linearized.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaPart {
    pub exterior: Vec<Vector2<f64>>,
    pub holes: Vec<Vec<Vector2<f64>>>,
}

impl AreaPart {
    /// Exterior followed by holes.
    pub fn rings(&self) -> impl Iterator<Item = &Vec<Vector2<f64>>> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }
}

/// Leaf components by topological dimension.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Components {
    pub points: Vec<Vector2<f64>>,
    pub curves: Vec<Vec<Vector2<f64>>>,
    pub areas: Vec<AreaPart>,
}

fn on_boundary(p: Vector2<f64>, ring: &[Vector2<f64>]) -> bool {
    let eps = 1e-12 * (1.0 + p.norm());
    ring.windows(2).any(|w| distance_to_segment(p, w[0], w[1]) <= eps)
}

fn ring_inside(ring: &[Vector2<f64>], outer: &[Vector2<f64>]) -> bool {
    ring.iter()
        .find(|p| !on_boundary(**p, outer))
        .is_some_and(|p| point_in_ring(*p, outer))
}

/// For each ring in order, whether it is a hole of the exterior before it.
pub fn hole_flags(rings: &[Vec<Vector2<f64>>]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(rings.len());
    let mut exterior: Option<usize> = None;
    let mut holes: Vec<usize> = Vec::new();
    for (k, ring) in rings.iter().enumerate() {
        let is_hole = exterior.is_some_and(|e| {
            ring_inside(ring, &rings[e]) && !holes.iter().any(|&h| ring_inside(ring, &rings[h]))
        });
        if is_hole {
            holes.push(k);
        } else {
            exterior = Some(k);
            holes.clear();
        }
        flags.push(is_hole);
    }
    flags
}

/// Group an ordered ring list into exteriors and holes.
pub fn group_rings(rings: Vec<Vec<Vector2<f64>>>) -> Vec<AreaPart> {
    let flags = hole_flags(&rings);
    let mut parts: Vec<AreaPart> = Vec::new();
    for (ring, is_hole) in rings.into_iter().zip(flags) {
        match parts.last_mut() {
            Some(part) if is_hole => part.holes.push(ring),
            _ => parts.push(AreaPart {
                exterior: ring,
                holes: Vec::new(),
            }),
        }
    }
    parts
}

impl Geometry {
    pub fn components(&self, cfg: &GeomCfg) -> Components {
        let mut out = Components::default();
        collect(self, cfg, &mut out);
        out
    }
}

fn collect(g: &Geometry, cfg: &GeomCfg, out: &mut Components) {
    match g {
        Geometry::Simple(s) => {
            let pts = s.vertices(cfg);
            match s.dim_g() {
                0 => out.points.extend(pts),
                1 => out.curves.push(pts),
                _ => out.areas.push(AreaPart {
                    exterior: pts,
                    holes: Vec::new(),
                }),
            }
        }
        Geometry::Composite(c) if c.kind() == GeomKind::Polygon => {
            let rings = c
                .children()
                .iter()
                .filter_map(Geometry::as_simple)
                .map(|s| s.vertices(cfg))
                .collect();
            out.areas.extend(group_rings(rings));
        }
        Geometry::Composite(c) => {
            for child in c.children() {
                collect(child, cfg, out);
            }
        }
    }
}
