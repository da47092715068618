//! Boolean combination of two geometries.
//!
//! Each operand acts through the components of its own dimension:
//! - area with area: polygon overlay;
//! - curve with area: the curves are clipped against the area;
//! - points with anything: per-point membership;
//! - curve with curve: not supported.

use geo::BooleanOps;
use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::construct::primitives::{point_in_ring, point_on_path};
use crate::convert::{from_line_strings, from_polygons, to_multi_line_string, to_multi_polygon};
use crate::error::{GeomError, GeomResult};
use crate::mode::CombineMode;
use crate::model::{Components, Geometry};

/// Whether `p` lies on the dimension-`dim` part of `comps`.
pub(crate) fn covers_point(comps: &Components, dim: u8, p: Vector2<f64>, cfg: &GeomCfg) -> bool {
    match dim {
        0 => comps.points.iter().any(|q| (p - q).norm() <= cfg.tol),
        1 => comps.curves.iter().any(|c| point_on_path(p, c, cfg)),
        _ => comps.areas.iter().any(|a| {
            let on_ring = a.rings().any(|r| point_on_path(p, r, cfg));
            let inside = point_in_ring(p, &a.exterior)
                && !a.holes.iter().any(|h| point_in_ring(p, h));
            on_ring || inside
        }),
    }
}

fn points_where(
    pts: &[Vector2<f64>],
    other: &Geometry,
    keep_covered: bool,
    cfg: &GeomCfg,
) -> Vec<Vector2<f64>> {
    let comps = other.components(cfg);
    let dim = other.dim_g();
    pts.iter()
        .copied()
        .filter(|p| covers_point(&comps, dim, *p, cfg) == keep_covered)
        .collect()
}

/// `g` plus the points of `pts` it does not already cover.
fn with_points(g: &Geometry, pts: &[Vector2<f64>], cfg: &GeomCfg) -> GeomResult<Geometry> {
    let extra = points_where(pts, g, false, cfg);
    if extra.is_empty() {
        return Ok(g.clone());
    }
    Geometry::collection(vec![g.clone(), Geometry::multi_point(&extra)?])
}

fn combine_points(
    a: &[Vector2<f64>],
    b: &Geometry,
    mode: CombineMode,
    cfg: &GeomCfg,
) -> GeomResult<Geometry> {
    match mode {
        CombineMode::Intersection => Geometry::multi_point(&points_where(a, b, true, cfg)),
        CombineMode::Difference => Geometry::multi_point(&points_where(a, b, false, cfg)),
        CombineMode::Union | CombineMode::SymDifference if b.dim_g() == 0 => {
            let mut out = points_where(a, b, false, cfg);
            let bp = b.components(cfg).points;
            if mode == CombineMode::SymDifference {
                let pa = Geometry::multi_point(a)?;
                out.extend(points_where(&bp, &pa, false, cfg));
            } else {
                out.extend(bp);
            }
            Geometry::multi_point(&out)
        }
        CombineMode::Union | CombineMode::SymDifference => with_points(b, a, cfg),
    }
}

/// Combine `a` with `b`; neither input is modified.
pub fn combine(
    a: &Geometry,
    b: &Geometry,
    mode: CombineMode,
    cfg: &GeomCfg,
) -> GeomResult<Geometry> {
    if a.is_empty() || b.is_empty() {
        let keep = match mode {
            CombineMode::Union | CombineMode::SymDifference => {
                Some(if a.is_empty() { b } else { a })
            }
            CombineMode::Difference => (!a.is_empty()).then_some(a),
            CombineMode::Intersection => None,
        };
        return match keep {
            Some(g) => Ok(g.clone()),
            None => Geometry::collection(vec![]),
        };
    }

    match (a.dim_g(), b.dim_g()) {
        (0, _) => combine_points(&a.components(cfg).points, b, mode, cfg),
        (_, 0) => match mode {
            CombineMode::Intersection => {
                Geometry::multi_point(&points_where(&b.components(cfg).points, a, true, cfg))
            }
            CombineMode::Difference => Ok(a.clone()),
            CombineMode::Union | CombineMode::SymDifference => {
                with_points(a, &b.components(cfg).points, cfg)
            }
        },
        (2, 2) => {
            let pa = to_multi_polygon(a, cfg);
            let pb = to_multi_polygon(b, cfg);
            let out = match mode {
                CombineMode::Union => pa.union(&pb),
                CombineMode::Intersection => pa.intersection(&pb),
                CombineMode::Difference => pa.difference(&pb),
                CombineMode::SymDifference => pa.xor(&pb),
            };
            from_polygons(&out.0)
        }
        (1, 2) | (2, 1) => {
            let (line, area) = if a.dim_g() == 1 { (a, b) } else { (b, a) };
            let lines = to_multi_line_string(line, cfg);
            let poly = to_multi_polygon(area, cfg);
            match (mode, a.dim_g()) {
                (CombineMode::Intersection, _) => from_line_strings(&poly.clip(&lines, false).0),
                (CombineMode::Difference, 1) => from_line_strings(&poly.clip(&lines, true).0),
                (CombineMode::Difference, _) => Ok(from_polygons(&poly.0)?),
                (CombineMode::Union | CombineMode::SymDifference, _) => {
                    let outside = from_line_strings(&poly.clip(&lines, true).0)?;
                    let area = from_polygons(&poly.0)?;
                    if outside.is_empty() {
                        Ok(area)
                    } else {
                        Geometry::collection(vec![area, outside])
                    }
                }
            }
        }
        (da, db) => Err(GeomError::IncorrectGeometryKind(format!(
            "cannot combine dimension {da} with dimension {db}"
        ))),
    }
}
