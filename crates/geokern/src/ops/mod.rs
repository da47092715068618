//! Numeric-mode facade.
//!
//! One entry point per result shape. Each decodes the integer mode into its
//! family enum (failing with [`GeomError::UnknownMode`]) and matches
//! exhaustively; the typed functions in the algorithm modules do the work.

use nalgebra::Vector2;
use tracing::debug;

use crate::cfg::GeomCfg;
use crate::check::CheckFlags;
use crate::error::{GeomError, GeomResult};
use crate::mode::{CheckMode, CombineMode, GeoMode, ModifyMode, RelationMode, ValueMode};
use crate::model::Geometry;
use crate::relate::Relation;
use crate::{check as chk, combine as comb, derive, measure, relate};

/// Scalar modes 0–3.
pub fn prop_value(g: &Geometry, mode: i32, cfg: &GeomCfg) -> GeomResult<f64> {
    let mode = ValueMode::try_from(mode)?;
    debug!(?mode, kind = ?g.kind(), dim = g.dim_g(), "prop_value");
    match mode {
        ValueMode::Length => measure::length(g, cfg),
        ValueMode::Width => measure::width(g, cfg),
        ValueMode::Height => measure::height(g, cfg),
        ValueMode::Area => measure::area(g, cfg),
    }
}

/// Geometry modes 10–23.
pub fn prop_geo(g: &Geometry, mode: i32, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let mode = GeoMode::try_from(mode)?;
    debug!(?mode, kind = ?g.kind(), dim = g.dim_g(), "prop_geo");
    match mode {
        GeoMode::Clone => Ok(g.clone()),
        GeoMode::Label => Geometry::point(derive::label_point(g, cfg)?),
        GeoMode::Center => Geometry::point(derive::center(g, cfg)?),
        GeoMode::Centroid => Geometry::point(measure::centroid(g, cfg)?),
        GeoMode::Envelope => derive::envelope(g, cfg),
        GeoMode::OrientedEnvelope => derive::oriented_envelope(g, cfg),
        GeoMode::EnclosingCircle => derive::enclosing_circle(g, cfg),
        GeoMode::InnerRect => derive::inscribed_rect(g, cfg),
        GeoMode::InnerSquare => derive::inscribed_square(g, cfg),
        GeoMode::InnerCircle => derive::inscribed_circle(g, cfg),
        GeoMode::ConvexHull => derive::convex_hull(g, cfg),
        GeoMode::Simplify => derive::simplify(g, cfg.tol, cfg),
        GeoMode::SimplifyPreserve => derive::simplify_preserve(g, cfg.tol, cfg),
        GeoMode::Boundary => derive::boundary(g, cfg),
    }
}

fn xy(p: Vector2<f64>) -> Vec<f64> {
    vec![p.x, p.y]
}

/// Flat-array outputs: `[x, y]` for label/center/centroid,
/// `[minx, miny, maxx, maxy]` for the envelope.
pub fn prop_geo2(g: &Geometry, mode: i32, cfg: &GeomCfg) -> GeomResult<Vec<f64>> {
    let mode = GeoMode::try_from(mode)?;
    debug!(?mode, kind = ?g.kind(), "prop_geo2");
    match mode {
        GeoMode::Label => Ok(xy(derive::label_point(g, cfg)?)),
        GeoMode::Center => Ok(xy(derive::center(g, cfg)?)),
        GeoMode::Centroid => Ok(xy(measure::centroid(g, cfg)?)),
        GeoMode::Envelope => {
            let (lo, hi) = measure::bounds(g, cfg)
                .ok_or(GeomError::Domain("envelope of an empty geometry"))?;
            Ok(vec![lo.x, lo.y, hi.x, hi.y])
        }
        other => Err(GeomError::UnknownMode(other.code())),
    }
}

/// Vertex edits 40–42; `para` is the distance threshold (ignored by reverse).
pub fn modify(g: &Geometry, mode: i32, para: f64, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let mode = ModifyMode::try_from(mode)?;
    debug!(?mode, para, kind = ?g.kind(), "modify");
    match mode {
        ModifyMode::RemoveRepeat => derive::remove_repeated(g, para),
        ModifyMode::Douglas => derive::simplify(g, para, cfg),
        ModifyMode::Reverse => derive::reverse(g),
    }
}

/// Combination modes 50–53.
pub fn combine(a: &Geometry, b: &Geometry, mode: i32, cfg: &GeomCfg) -> GeomResult<Geometry> {
    let mode = CombineMode::try_from(mode)?;
    debug!(?mode, a = ?a.kind(), b = ?b.kind(), "combine");
    comb::combine(a, b, mode, cfg)
}

/// Relation modes 60–67.
pub fn relation(a: &Geometry, b: &Geometry, mode: i32, cfg: &GeomCfg) -> GeomResult<Relation> {
    let mode = RelationMode::try_from(mode)?;
    let r = relate::relation(a, b, mode, cfg);
    debug!(?mode, a = ?a.kind(), b = ?b.kind(), result = r.code(), "relation");
    Ok(r)
}

/// Single-answer checks 80–85.
pub fn check(g: &Geometry, mode: i32, cfg: &GeomCfg) -> GeomResult<bool> {
    let mode = CheckMode::try_from(mode)?;
    debug!(?mode, kind = ?g.kind(), "check");
    Ok(chk::check(g, mode, cfg))
}

/// Bitmask check over `0x01 | 0x02 | 0x04`; unknown bits are rejected.
pub fn check2(g: &Geometry, mask: u32, cfg: &GeomCfg) -> GeomResult<CheckFlags> {
    let flags = CheckFlags::from_bits(mask).ok_or(GeomError::UnknownMode(mask as i32))?;
    debug!(mask, kind = ?g.kind(), "check2");
    Ok(chk::check2(g, flags, cfg))
}
