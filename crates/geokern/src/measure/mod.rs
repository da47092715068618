//! Measurement and aggregation.
//!
//! Every query dispatches on the topological dimension of the whole
//! geometry, determined once, then folds all components:
//! - length: dim 1 sums curve lengths, dim 2 sums ring perimeters, dim 0 is 0;
//! - area: dim 2 sums `|exterior| − Σ|holes|` per part, otherwise 0;
//! - width/height: extent of the axis-aligned envelope.
//!
//! An empty geometry has no length, area or extent: those queries fail with
//! [`GeomError::Domain`].

mod centroid;

pub use centroid::{centroid, CentroidAcc};

use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::construct::primitives::signed_area;
use crate::error::{GeomError, GeomResult};
use crate::model::Geometry;

fn path_length(pts: &[Vector2<f64>]) -> f64 {
    pts.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

pub fn length(g: &Geometry, cfg: &GeomCfg) -> GeomResult<f64> {
    if g.is_empty() {
        return Err(GeomError::Domain("length of an empty geometry"));
    }
    let comps = g.components(cfg);
    Ok(match g.dim_g() {
        0 => 0.0,
        1 => comps.curves.iter().map(|c| path_length(c)).sum(),
        _ => comps
            .areas
            .iter()
            .flat_map(|a| a.rings())
            .map(|r| path_length(r))
            .sum(),
    })
}

pub fn area(g: &Geometry, cfg: &GeomCfg) -> GeomResult<f64> {
    if g.is_empty() {
        return Err(GeomError::Domain("area of an empty geometry"));
    }
    if g.dim_g() < 2 {
        return Ok(0.0);
    }
    Ok(g.components(cfg)
        .areas
        .iter()
        .map(|a| {
            let holes: f64 = a.holes.iter().map(|h| signed_area(h).abs()).sum();
            signed_area(&a.exterior).abs() - holes
        })
        .sum())
}

/// Axis-aligned bounds `(min, max)`; `None` for an empty geometry.
pub fn bounds(g: &Geometry, cfg: &GeomCfg) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let pts = g.all_xy(cfg);
    let first = *pts.first()?;
    Some(pts.iter().fold((first, first), |(lo, hi), p| {
        (
            Vector2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Vector2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

fn extent(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Vector2<f64>> {
    let (lo, hi) = bounds(g, cfg).ok_or(GeomError::Domain("envelope of an empty geometry"))?;
    Ok(hi - lo)
}

pub fn width(g: &Geometry, cfg: &GeomCfg) -> GeomResult<f64> {
    Ok(extent(g, cfg)?.x)
}

pub fn height(g: &Geometry, cfg: &GeomCfg) -> GeomResult<f64> {
    Ok(extent(g, cfg)?.y)
}

#[cfg(test)]
mod tests;
