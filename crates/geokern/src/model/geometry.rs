//! Geometry tree: simple nodes own one coordinate buffer, composite nodes own
//! an ordered list of children.
//!
//! Invariants
//! - Strict tree: every node has one owner; `Clone` is a deep copy.
//! - A composite's dimension is the maximum of its children's (or the
//!   natural dimension of its kind when it has none).
//! - Nodes are never mutated in place by algorithms; results are new trees.

use nalgebra::Vector2;

use super::coords::{CoordBuffer, CoordDim};
use crate::cfg::GeomCfg;
use crate::construct::{arc_points, Ellipse, StrokeParam};
use crate::error::{GeomError, GeomResult};

/// Structural category of a node. Discriminants are stable external codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GeomKind {
    Point = 1,
    Path = 2,
    Polygon = 3,
    Collection = 4,
    MultiPoint = 5,
    Polyline = 6,
    Envelope = 7,
    Line = 8,
    CircularArc = 9,
    Ring = 10,
}

impl GeomKind {
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Kinds that own a coordinate buffer.
    pub fn is_simple(self) -> bool {
        matches!(
            self,
            GeomKind::Point
                | GeomKind::Path
                | GeomKind::Line
                | GeomKind::CircularArc
                | GeomKind::Ring
                | GeomKind::Envelope
        )
    }

    /// Natural topological dimension of the kind.
    pub fn natural_dim(self) -> u8 {
        match self {
            GeomKind::Point | GeomKind::MultiPoint | GeomKind::Collection => 0,
            GeomKind::Path | GeomKind::Line | GeomKind::CircularArc | GeomKind::Polyline => 1,
            GeomKind::Ring | GeomKind::Envelope | GeomKind::Polygon => 2,
        }
    }
}

impl TryFrom<i32> for GeomKind {
    type Error = GeomError;

    fn try_from(code: i32) -> GeomResult<Self> {
        Ok(match code {
            1 => GeomKind::Point,
            2 => GeomKind::Path,
            3 => GeomKind::Polygon,
            4 => GeomKind::Collection,
            5 => GeomKind::MultiPoint,
            6 => GeomKind::Polyline,
            7 => GeomKind::Envelope,
            8 => GeomKind::Line,
            9 => GeomKind::CircularArc,
            10 => GeomKind::Ring,
            _ => {
                return Err(GeomError::InvalidArgument(format!(
                    "unknown geometry kind code {code}"
                )))
            }
        })
    }
}

/// Leaf node.
#[derive(Clone, Debug, PartialEq)]
pub struct Simple {
    kind: GeomKind,
    coords: CoordBuffer,
}

impl Simple {
    #[inline]
    pub fn kind(&self) -> GeomKind {
        self.kind
    }

    #[inline]
    pub fn coords(&self) -> &CoordBuffer {
        &self.coords
    }

    #[inline]
    pub fn dim_g(&self) -> u8 {
        self.kind.natural_dim()
    }

    /// Planar vertices with envelopes expanded to their closed counter-clockwise
    /// ring and arcs stroked.
    pub fn vertices(&self, cfg: &GeomCfg) -> Vec<Vector2<f64>> {
        match self.kind {
            GeomKind::Envelope if self.coords.len() == 2 => {
                let (lo, hi) = (self.coords.xy(0), self.coords.xy(1));
                vec![
                    lo,
                    Vector2::new(hi.x, lo.y),
                    hi,
                    Vector2::new(lo.x, hi.y),
                    lo,
                ]
            }
            GeomKind::CircularArc if self.coords.len() == 3 => {
                arc_points(self.coords.xy(0), self.coords.xy(1), self.coords.xy(2), cfg)
            }
            _ => self.coords.iter_xy().collect(),
        }
    }

    /// Same node kind over a new buffer.
    pub(crate) fn with_coords(&self, coords: CoordBuffer) -> Simple {
        Simple {
            kind: self.kind,
            coords,
        }
    }
}

/// Interior node.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite {
    kind: GeomKind,
    dim: u8,
    children: Vec<Geometry>,
}

impl Composite {
    #[inline]
    pub fn kind(&self) -> GeomKind {
        self.kind
    }

    #[inline]
    pub fn children(&self) -> &[Geometry] {
        &self.children
    }
}

/// A geometry node: simple (one coordinate buffer) or composite (children).
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Simple(Simple),
    Composite(Composite),
}

fn point_count_ok(kind: GeomKind, n: usize) -> bool {
    match kind {
        GeomKind::Point => n <= 1,
        GeomKind::Line | GeomKind::Envelope => n == 2 || n == 0,
        GeomKind::CircularArc => n == 3 || n == 0,
        _ => true,
    }
}

impl Geometry {
    /// Simple node from a coordinate buffer.
    pub fn single(kind: GeomKind, coords: CoordBuffer) -> GeomResult<Self> {
        if !kind.is_simple() {
            return Err(GeomError::IncorrectGeometryKind(format!(
                "{kind:?} is not a simple kind"
            )));
        }
        if !point_count_ok(kind, coords.len()) {
            return Err(GeomError::InvalidArgument(format!(
                "{kind:?} cannot hold {} points",
                coords.len()
            )));
        }
        Ok(Geometry::Simple(Simple { kind, coords }))
    }

    /// Composite node; children must fit the kind.
    pub fn multi(kind: GeomKind, children: Vec<Geometry>) -> GeomResult<Self> {
        let fits = |g: &Geometry| match kind {
            GeomKind::MultiPoint => g.kind() == GeomKind::Point,
            GeomKind::Polyline => matches!(
                g.kind(),
                GeomKind::Path | GeomKind::Line | GeomKind::CircularArc
            ),
            GeomKind::Polygon => matches!(g.kind(), GeomKind::Ring | GeomKind::Envelope),
            GeomKind::Collection => true,
            _ => false,
        };
        if kind.is_simple() {
            return Err(GeomError::IncorrectGeometryKind(format!(
                "{kind:?} is not a composite kind"
            )));
        }
        if let Some(bad) = children.iter().find(|g| !fits(g)) {
            return Err(GeomError::IncorrectGeometryKind(format!(
                "{:?} cannot be a child of {kind:?}",
                bad.kind()
            )));
        }
        let dim = children
            .iter()
            .map(Geometry::dim_g)
            .max()
            .unwrap_or_else(|| kind.natural_dim());
        Ok(Geometry::Composite(Composite {
            kind,
            dim,
            children,
        }))
    }

    pub fn point(p: Vector2<f64>) -> GeomResult<Self> {
        Self::single(GeomKind::Point, CoordBuffer::from_xy(&[p])?)
    }

    pub fn path(points: &[Vector2<f64>]) -> GeomResult<Self> {
        Self::single(GeomKind::Path, CoordBuffer::from_xy(points)?)
    }

    pub fn line(a: Vector2<f64>, b: Vector2<f64>) -> GeomResult<Self> {
        Self::single(GeomKind::Line, CoordBuffer::from_xy(&[a, b])?)
    }

    pub fn arc(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> GeomResult<Self> {
        Self::single(GeomKind::CircularArc, CoordBuffer::from_xy(&[a, b, c])?)
    }

    /// Ring through `points`, closed by repeating the first point if needed.
    pub fn ring(points: &[Vector2<f64>]) -> GeomResult<Self> {
        let mut pts = points.to_vec();
        if let (Some(first), Some(last)) = (pts.first().copied(), pts.last().copied()) {
            if pts.len() > 1 && first != last {
                pts.push(first);
            }
        }
        Self::single(GeomKind::Ring, CoordBuffer::from_xy(&pts)?)
    }

    pub fn envelope(min: Vector2<f64>, max: Vector2<f64>) -> GeomResult<Self> {
        Self::single(GeomKind::Envelope, CoordBuffer::from_xy(&[min, max])?)
    }

    pub fn multi_point(points: &[Vector2<f64>]) -> GeomResult<Self> {
        let children = points
            .iter()
            .map(|p| Geometry::point(*p))
            .collect::<GeomResult<Vec<_>>>()?;
        Self::multi(GeomKind::MultiPoint, children)
    }

    pub fn polyline(paths: &[Vec<Vector2<f64>>]) -> GeomResult<Self> {
        let children = paths
            .iter()
            .map(|p| Geometry::path(p))
            .collect::<GeomResult<Vec<_>>>()?;
        Self::multi(GeomKind::Polyline, children)
    }

    /// Polygon from an exterior ring and holes.
    pub fn polygon(exterior: &[Vector2<f64>], holes: &[Vec<Vector2<f64>>]) -> GeomResult<Self> {
        let mut rings = Vec::with_capacity(holes.len() + 1);
        rings.push(Geometry::ring(exterior)?);
        for h in holes {
            rings.push(Geometry::ring(h)?);
        }
        Self::multi(GeomKind::Polygon, rings)
    }

    pub fn collection(children: Vec<Geometry>) -> GeomResult<Self> {
        Self::multi(GeomKind::Collection, children)
    }

    /// Stroke an ellipse; `None` when the segment count is below 3.
    ///
    /// Dimension 1 yields a closed path, dimension 2 a ring.
    pub fn from_ellipse(e: &Ellipse, param: StrokeParam) -> GeomResult<Option<Self>> {
        let pts = e.stroke_points(param.segments)?;
        if pts.is_empty() {
            return Ok(None);
        }
        let kind = if param.dim == 2 {
            GeomKind::Ring
        } else {
            GeomKind::Path
        };
        Ok(Some(Self::single(kind, CoordBuffer::from_xy(&pts)?)?))
    }

    #[inline]
    pub fn kind(&self) -> GeomKind {
        match self {
            Geometry::Simple(s) => s.kind,
            Geometry::Composite(c) => c.kind,
        }
    }

    /// Topological dimension (0 points, 1 curves, 2 areas).
    #[inline]
    pub fn dim_g(&self) -> u8 {
        match self {
            Geometry::Simple(s) => s.dim_g(),
            Geometry::Composite(c) => c.dim,
        }
    }

    /// Coordinate dimensionality; composites report the union over children.
    pub fn dim_c(&self) -> CoordDim {
        match self {
            Geometry::Simple(s) => s.coords.dim(),
            Geometry::Composite(c) => c
                .children
                .iter()
                .fold(CoordDim::Xy, |acc, g| acc.union(g.dim_c())),
        }
    }

    /// Number of direct children (0 for simple nodes).
    #[inline]
    pub fn sub_n(&self) -> usize {
        match self {
            Geometry::Simple(_) => 0,
            Geometry::Composite(c) => c.children.len(),
        }
    }

    pub fn sub_at(&self, index: usize) -> GeomResult<&Geometry> {
        self.children().get(index).ok_or(GeomError::Index {
            index,
            count: self.sub_n(),
        })
    }

    #[inline]
    pub fn children(&self) -> &[Geometry] {
        match self {
            Geometry::Simple(_) => &[],
            Geometry::Composite(c) => &c.children,
        }
    }

    /// Total number of leaf points.
    pub fn point_n(&self) -> usize {
        match self {
            Geometry::Simple(s) => s.coords.len(),
            Geometry::Composite(c) => c.children.iter().map(Geometry::point_n).sum(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_n() == 0
    }

    #[inline]
    pub fn as_simple(&self) -> Option<&Simple> {
        match self {
            Geometry::Simple(s) => Some(s),
            Geometry::Composite(_) => None,
        }
    }

    /// Leaf nodes in depth-first order.
    pub fn simples(&self) -> Vec<&Simple> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(g) = stack.pop() {
            match g {
                Geometry::Simple(s) => out.push(s),
                Geometry::Composite(c) => stack.extend(c.children.iter().rev()),
            }
        }
        out
    }

    /// All planar vertices (linearized) in depth-first order.
    pub fn all_xy(&self, cfg: &GeomCfg) -> Vec<Vector2<f64>> {
        self.simples()
            .into_iter()
            .flat_map(|s| s.vertices(cfg))
            .collect()
    }

    /// Same tree shape with every leaf buffer replaced by `f`.
    pub fn map_simples(
        &self,
        f: &mut impl FnMut(&Simple) -> GeomResult<CoordBuffer>,
    ) -> GeomResult<Geometry> {
        match self {
            Geometry::Simple(s) => Ok(Geometry::Simple(s.with_coords(f(s)?))),
            Geometry::Composite(c) => {
                let children = c
                    .children
                    .iter()
                    .map(|g| g.map_simples(f))
                    .collect::<GeomResult<Vec<_>>>()?;
                Geometry::multi(c.kind, children)
            }
        }
    }
}
