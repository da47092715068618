//! Conversion between the geometry tree and [`geo`] types.
//!
//! Only X/Y survive the trip; curves are linearized on the way out.

use geo::{
    Coord, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::error::GeomResult;
use crate::model::{AreaPart, GeomKind, Geometry};

#[inline]
fn coord(p: &Vector2<f64>) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

#[inline]
fn vector(c: &Coord<f64>) -> Vector2<f64> {
    Vector2::new(c.x, c.y)
}

pub(crate) fn line_string(pts: &[Vector2<f64>]) -> LineString<f64> {
    LineString::new(pts.iter().map(coord).collect())
}

pub(crate) fn polygon(part: &AreaPart) -> Polygon<f64> {
    Polygon::new(
        line_string(&part.exterior),
        part.holes.iter().map(|h| line_string(h)).collect(),
    )
}

pub(crate) fn points_of(ls: &LineString<f64>) -> Vec<Vector2<f64>> {
    ls.coords().map(vector).collect()
}

pub(crate) fn area_part(poly: &Polygon<f64>) -> AreaPart {
    AreaPart {
        exterior: points_of(poly.exterior()),
        holes: poly.interiors().iter().map(points_of).collect(),
    }
}

/// Convert to a [`geo::Geometry`]. Empty leaves become empty collections.
pub fn to_geo(g: &Geometry, cfg: &GeomCfg) -> geo::Geometry<f64> {
    match g {
        Geometry::Simple(s) => {
            let pts = s.vertices(cfg);
            match (s.kind(), pts.as_slice()) {
                (_, []) => geo::Geometry::GeometryCollection(GeometryCollection::new_from(vec![])),
                (GeomKind::Point, [p]) => geo::Geometry::Point(Point(coord(p))),
                (GeomKind::Ring | GeomKind::Envelope, _) => {
                    geo::Geometry::Polygon(Polygon::new(line_string(&pts), vec![]))
                }
                _ => geo::Geometry::LineString(line_string(&pts)),
            }
        }
        Geometry::Composite(c) => match c.kind() {
            GeomKind::Polygon => {
                let comps = g.components(cfg);
                let mut polys: Vec<Polygon<f64>> = comps.areas.iter().map(polygon).collect();
                if polys.len() == 1 {
                    geo::Geometry::Polygon(polys.remove(0))
                } else {
                    geo::Geometry::MultiPolygon(MultiPolygon::new(polys))
                }
            }
            GeomKind::MultiPoint => geo::Geometry::MultiPoint(MultiPoint::new(
                g.all_xy(cfg).iter().map(|p| Point(coord(p))).collect(),
            )),
            GeomKind::Polyline => geo::Geometry::MultiLineString(MultiLineString::new(
                g.components(cfg)
                    .curves
                    .iter()
                    .map(|c| line_string(c))
                    .collect(),
            )),
            _ => geo::Geometry::GeometryCollection(GeometryCollection::new_from(
                c.children().iter().map(|child| to_geo(child, cfg)).collect(),
            )),
        },
    }
}

/// Areas of `g` as one multipolygon.
pub(crate) fn to_multi_polygon(g: &Geometry, cfg: &GeomCfg) -> MultiPolygon<f64> {
    MultiPolygon::new(g.components(cfg).areas.iter().map(polygon).collect())
}

/// Curves of `g` as one multilinestring.
pub(crate) fn to_multi_line_string(g: &Geometry, cfg: &GeomCfg) -> MultiLineString<f64> {
    MultiLineString::new(
        g.components(cfg)
            .curves
            .iter()
            .map(|c| line_string(c))
            .collect(),
    )
}

fn rings_of(poly: &Polygon<f64>) -> impl Iterator<Item = Vec<Vector2<f64>>> + '_ {
    std::iter::once(poly.exterior())
        .chain(poly.interiors().iter())
        .map(points_of)
        .filter(|r| !r.is_empty())
}

pub(crate) fn from_polygons<'a>(
    polys: impl IntoIterator<Item = &'a Polygon<f64>>,
) -> GeomResult<Geometry> {
    let rings = polys
        .into_iter()
        .flat_map(rings_of)
        .map(|r| Geometry::ring(&r))
        .collect::<GeomResult<Vec<_>>>()?;
    Geometry::multi(GeomKind::Polygon, rings)
}

pub(crate) fn from_line_strings<'a>(
    lines: impl IntoIterator<Item = &'a LineString<f64>>,
) -> GeomResult<Geometry> {
    let paths: Vec<Vec<Vector2<f64>>> = lines.into_iter().map(points_of).collect();
    Geometry::polyline(&paths)
}

/// Convert a [`geo::Geometry`] back into a tree.
pub fn from_geo(g: &geo::Geometry<f64>) -> GeomResult<Geometry> {
    match g {
        geo::Geometry::Point(p) => Geometry::point(vector(&p.0)),
        geo::Geometry::Line(l) => Geometry::line(vector(&l.start), vector(&l.end)),
        geo::Geometry::LineString(ls) => Geometry::path(&points_of(ls)),
        geo::Geometry::Polygon(p) => from_polygons([p]),
        geo::Geometry::MultiPoint(mp) => Geometry::multi_point(
            &mp.0.iter().map(|p| vector(&p.0)).collect::<Vec<_>>(),
        ),
        geo::Geometry::MultiLineString(mls) => from_line_strings(&mls.0),
        geo::Geometry::MultiPolygon(mp) => from_polygons(&mp.0),
        geo::Geometry::GeometryCollection(gc) => Geometry::collection(
            gc.0.iter().map(from_geo).collect::<GeomResult<Vec<_>>>()?,
        ),
        geo::Geometry::Rect(r) => Geometry::envelope(vector(&r.min()), vector(&r.max())),
        geo::Geometry::Triangle(t) => {
            Geometry::ring(&[vector(&t.v1()), vector(&t.v2()), vector(&t.v3())])
        }
    }
}
