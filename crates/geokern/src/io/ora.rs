//! Flat-array ("ORA") interchange.
//!
//! Layout
//! - `ordinates`: every point of every element, `dim` values per point.
//! - `elem_info`: triplets `(start, etype, interpretation)`, `start` being the
//!   1-based index of the element's first ordinate. An element runs up to the
//!   next element's start (or the end of `ordinates`).
//!
//! Element types
//! - `1` points; interpretation = number of points.
//! - `2` line; interpretation `1` straight segments, `2` one circular arc (3 points).
//! - `1003`/`2003` exterior/interior ring; interpretation `1` straight,
//!   `3` rectangle from two corners, `4` circle through three points.
//!
//! A dimension of 3 is read as XYZ.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::cfg::GeomCfg;
use crate::construct::{circle_3p, StrokeParam};
use crate::error::{GeomError, GeomResult};
use crate::model::{hole_flags, CoordBuffer, CoordDim, GeomKind, Geometry, Simple};

pub const ETYPE_POINT: i32 = 1;
pub const ETYPE_LINE: i32 = 2;
pub const ETYPE_EXTERIOR: i32 = 1003;
pub const ETYPE_INTERIOR: i32 = 2003;

/// Three parallel flat arrays describing one geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OraArrays {
    pub elem_info: Vec<i32>,
    pub dim: usize,
    pub ordinates: Vec<f64>,
}

fn invalid(msg: impl Into<String>) -> GeomError {
    GeomError::InvalidArgument(msg.into())
}

/// One decoded element before assembly.
enum Part {
    Points(Vec<Geometry>),
    Line(Geometry),
    Area(Vec<Geometry>),
}

fn ring_element(
    interp: i32,
    buf: CoordBuffer,
    cfg: &GeomCfg,
) -> GeomResult<Geometry> {
    match interp {
        1 => Geometry::single(GeomKind::Ring, buf),
        3 => Geometry::single(GeomKind::Envelope, buf),
        4 if buf.len() == 3 => {
            let e = circle_3p(buf.xy(0), buf.xy(1), buf.xy(2), cfg)
                .ok_or_else(|| invalid("circle element through collinear points"))?;
            Geometry::from_ellipse(&e, StrokeParam::AREA_36)?
                .ok_or_else(|| invalid("circle element could not be stroked"))
        }
        _ => Err(invalid(format!("ring interpretation {interp} with {} points", buf.len()))),
    }
}

impl Geometry {
    /// Decode flat arrays. An empty `elem_info` gives an empty collection.
    pub fn from_ora(ora: &OraArrays, cfg: &GeomCfg) -> GeomResult<Geometry> {
        let dim = CoordDim::from_stride(ora.dim)?;
        if ora.elem_info.len() % 3 != 0 {
            return Err(invalid("elem_info length must be a multiple of 3"));
        }
        let triplets: Vec<&[i32]> = ora.elem_info.chunks(3).collect();
        let mut parts: Vec<Part> = Vec::with_capacity(triplets.len());
        for (k, t) in triplets.iter().enumerate() {
            let (start, etype, interp) = (t[0], t[1], t[2]);
            let end = match triplets.get(k + 1) {
                Some(next) => usize::try_from(next[0] - 1).map_err(|_| invalid("bad offset"))?,
                None => ora.ordinates.len(),
            };
            let begin = usize::try_from(start - 1).map_err(|_| invalid("bad offset"))?;
            if begin > end || end > ora.ordinates.len() || begin % ora.dim != 0 {
                return Err(invalid(format!("element {k}: ordinates {start}..{end} out of range")));
            }
            let buf = CoordBuffer::from_slice(dim, &ora.ordinates[begin..end])?;
            let part = match (etype, interp) {
                (ETYPE_POINT, n) if n >= 1 && n as usize == buf.len() => {
                    let stride = dim.stride();
                    let pts = buf
                        .ordinates()
                        .chunks(stride)
                        .map(|o| {
                            Geometry::single(GeomKind::Point, CoordBuffer::from_slice(dim, o)?)
                        })
                        .collect::<GeomResult<Vec<_>>>()?;
                    Part::Points(pts)
                }
                (ETYPE_LINE, 1) => Part::Line(Geometry::single(GeomKind::Path, buf)?),
                (ETYPE_LINE, 2) => Part::Line(Geometry::single(GeomKind::CircularArc, buf)?),
                (ETYPE_EXTERIOR, i) => Part::Area(vec![ring_element(i, buf, cfg)?]),
                (ETYPE_INTERIOR, i) => match parts.last_mut() {
                    Some(Part::Area(rings)) => {
                        rings.push(ring_element(i, buf, cfg)?);
                        continue;
                    }
                    _ => {
                        return Err(invalid(format!(
                            "element {k}: interior ring without exterior"
                        )))
                    }
                },
                _ => return Err(invalid(format!("element {k}: unsupported ({etype}, {interp})"))),
            };
            parts.push(part);
        }
        assemble(parts)
    }

    /// Encode into flat arrays; the dimension is the tree's aggregate one.
    pub fn to_ora(&self, cfg: &GeomCfg) -> GeomResult<OraArrays> {
        let dim = self.dim_c();
        let mut out = OraArrays {
            elem_info: Vec::new(),
            dim: dim.stride(),
            ordinates: Vec::new(),
        };
        encode(self, dim, false, cfg, &mut out)?;
        Ok(out)
    }
}

fn assemble(parts: Vec<Part>) -> GeomResult<Geometry> {
    let single = |p: Part| -> GeomResult<Geometry> {
        match p {
            Part::Points(mut pts) if pts.len() == 1 => Ok(pts.remove(0)),
            Part::Points(pts) => Geometry::multi(GeomKind::MultiPoint, pts),
            Part::Line(g) => Ok(g),
            Part::Area(mut rings) if rings.len() == 1 => Ok(rings.remove(0)),
            Part::Area(rings) => Geometry::multi(GeomKind::Polygon, rings),
        }
    };
    if parts.len() <= 1 {
        return match parts.into_iter().next() {
            Some(p) => single(p),
            None => Geometry::collection(vec![]),
        };
    }
    if parts.iter().all(|p| matches!(p, Part::Points(_))) {
        let pts = parts
            .into_iter()
            .flat_map(|p| match p {
                Part::Points(pts) => pts,
                _ => Vec::new(),
            })
            .collect();
        return Geometry::multi(GeomKind::MultiPoint, pts);
    }
    if parts.iter().all(|p| matches!(p, Part::Line(_))) {
        let lines = parts.into_iter().map(single).collect::<GeomResult<Vec<_>>>()?;
        return Geometry::multi(GeomKind::Polyline, lines);
    }
    if parts.iter().all(|p| matches!(p, Part::Area(_))) {
        let rings = parts
            .into_iter()
            .flat_map(|p| match p {
                Part::Area(rings) => rings,
                _ => Vec::new(),
            })
            .collect();
        return Geometry::multi(GeomKind::Polygon, rings);
    }
    Geometry::collection(parts.into_iter().map(single).collect::<GeomResult<Vec<_>>>()?)
}

/// Append one point's ordinates, converted from `from` to `to` (missing Z/M → 0).
fn push_point(out: &mut Vec<f64>, src: &[f64], from: CoordDim, to: CoordDim) {
    out.extend_from_slice(&src[..2]);
    if to.has_z() {
        out.push(if from.has_z() { src[2] } else { 0.0 });
    }
    if to.has_m() {
        out.push(if from.has_m() { src[from.stride() - 1] } else { 0.0 });
    }
}

fn push_element(
    s: &Simple,
    to: CoordDim,
    etype: i32,
    interp: i32,
    out: &mut OraArrays,
) -> GeomResult<()> {
    let c = s.coords();
    if c.is_empty() {
        return Ok(());
    }
    let start = i32::try_from(out.ordinates.len() + 1).map_err(|_| invalid("too many ordinates"))?;
    out.elem_info.extend_from_slice(&[start, etype, interp]);
    for i in 0..c.len() {
        push_point(&mut out.ordinates, c.point_ords(i), c.dim(), to);
    }
    Ok(())
}

fn encode(
    g: &Geometry,
    to: CoordDim,
    hole: bool,
    cfg: &GeomCfg,
    out: &mut OraArrays,
) -> GeomResult<()> {
    let ring_type = if hole { ETYPE_INTERIOR } else { ETYPE_EXTERIOR };
    match g {
        Geometry::Simple(s) => match s.kind() {
            GeomKind::Point => push_element(s, to, ETYPE_POINT, 1, out),
            GeomKind::Path | GeomKind::Line => push_element(s, to, ETYPE_LINE, 1, out),
            GeomKind::CircularArc => push_element(s, to, ETYPE_LINE, 2, out),
            GeomKind::Ring => push_element(s, to, ring_type, 1, out),
            GeomKind::Envelope => push_element(s, to, ring_type, 3, out),
            kind => Err(GeomError::IncorrectGeometryKind(format!("{kind:?} as a leaf"))),
        },
        Geometry::Composite(c) => match c.kind() {
            GeomKind::MultiPoint if !g.is_empty() => {
                let start = i32::try_from(out.ordinates.len() + 1)
                    .map_err(|_| invalid("too many ordinates"))?;
                let n = i32::try_from(g.point_n()).map_err(|_| invalid("too many points"))?;
                out.elem_info.extend_from_slice(&[start, ETYPE_POINT, n]);
                for s in g.simples() {
                    let cb = s.coords();
                    for i in 0..cb.len() {
                        push_point(&mut out.ordinates, cb.point_ords(i), cb.dim(), to);
                    }
                }
                Ok(())
            }
            GeomKind::Polygon => {
                let rings: Vec<Vec<Vector2<f64>>> = c
                    .children()
                    .iter()
                    .map(|r| r.all_xy(cfg))
                    .collect();
                for (child, is_hole) in c.children().iter().zip(hole_flags(&rings)) {
                    encode(child, to, is_hole, cfg, out)?;
                }
                Ok(())
            }
            _ => c
                .children()
                .iter()
                .try_for_each(|child| encode(child, to, false, cfg, out)),
        },
    }
}
