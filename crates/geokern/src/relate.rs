//! Spatial relation predicates with a tri-state answer.
//!
//! A predicate that does not apply to the dimension pair answers
//! [`Relation::Unfit`]; otherwise the DE-9IM matrix decides.
//!
//! Before relating, each operand is snapped onto the other within the
//! tolerance: vertices closer than `tol` to a vertex of the other operand
//! take its exact position, and vertices closer than `tol` to a segment are
//! inserted into that segment. Near-coincident input then relates the same
//! way it combines.

use geo::coords_iter::CoordsIter;
use geo::relate::IntersectionMatrix;
use geo::{
    Coord, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon, Relate,
};
use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::construct::primitives::distance_to_segment;
use crate::convert::to_geo;
use crate::mode::RelationMode;
use crate::model::Geometry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Relation {
    Unfit = -1,
    False = 0,
    True = 1,
}

impl Relation {
    #[inline]
    pub fn code(self) -> i8 {
        self as i8
    }
}

impl From<bool> for Relation {
    fn from(b: bool) -> Self {
        if b {
            Relation::True
        } else {
            Relation::False
        }
    }
}

/// Whether `mode` is meaningful for operands of dimensions `da` and `db`.
pub fn applies(mode: RelationMode, da: u8, db: u8) -> bool {
    match mode {
        RelationMode::Cross => !(da == db && (da == 0 || da == 2)),
        RelationMode::Overlap => da == db,
        RelationMode::Touch => !(da == 0 && db == 0),
        RelationMode::Contain => da >= db,
        RelationMode::Within => da <= db,
        RelationMode::Disjoint | RelationMode::Intersect | RelationMode::Equal => true,
    }
}

fn predicate(mode: RelationMode, m: &IntersectionMatrix) -> bool {
    match mode {
        RelationMode::Disjoint => m.is_disjoint(),
        RelationMode::Intersect => m.is_intersects(),
        RelationMode::Contain => m.is_contains(),
        RelationMode::Cross => m.is_crosses(),
        RelationMode::Equal => m.is_equal_topo(),
        RelationMode::Touch => m.is_touches(),
        RelationMode::Overlap => m.is_overlaps(),
        RelationMode::Within => m.is_within(),
    }
}

#[inline]
fn vec2(c: Coord<f64>) -> Vector2<f64> {
    Vector2::new(c.x, c.y)
}

struct Snapper {
    refs: Vec<Coord<f64>>,
    tol: f64,
}

impl Snapper {
    fn new(reference: &geo::Geometry<f64>, tol: f64) -> Self {
        Self {
            refs: reference.coords_iter().collect(),
            tol,
        }
    }

    fn vertex(&self, c: Coord<f64>) -> Coord<f64> {
        self.refs
            .iter()
            .map(|r| (*r, (vec2(*r) - vec2(c)).norm()))
            .filter(|&(_, d)| d <= self.tol)
            .min_by(|x, y| x.1.total_cmp(&y.1))
            .map_or(c, |(r, _)| r)
    }

    /// Reference vertices strictly inside segment `pq`, ordered from `p`.
    fn inserts(&self, p: Coord<f64>, q: Coord<f64>) -> Vec<Coord<f64>> {
        let (pv, qv) = (vec2(p), vec2(q));
        let d = qv - pv;
        let l2 = d.norm_squared();
        if l2 == 0.0 {
            return Vec::new();
        }
        let mut hits: Vec<(f64, Coord<f64>)> = self
            .refs
            .iter()
            .filter(|r| {
                let rv = vec2(**r);
                (rv - pv).norm() > self.tol
                    && (rv - qv).norm() > self.tol
                    && distance_to_segment(rv, pv, qv) <= self.tol
            })
            .map(|r| ((vec2(*r) - pv).dot(&d) / l2, *r))
            .collect();
        hits.sort_by(|x, y| x.0.total_cmp(&y.0));
        hits.into_iter().map(|(_, r)| r).collect()
    }

    fn line(&self, ls: &LineString<f64>) -> LineString<f64> {
        let snapped: Vec<Coord<f64>> = ls.coords().map(|c| self.vertex(*c)).collect();
        let mut out: Vec<Coord<f64>> = Vec::with_capacity(snapped.len());
        for (i, c) in snapped.iter().enumerate() {
            if i > 0 {
                out.extend(self.inserts(snapped[i - 1], *c));
            }
            out.push(*c);
        }
        out.dedup();
        LineString::new(out)
    }

    fn polygon(&self, p: &Polygon<f64>) -> Polygon<f64> {
        Polygon::new(
            self.line(p.exterior()),
            p.interiors().iter().map(|r| self.line(r)).collect(),
        )
    }

    fn geometry(&self, g: &geo::Geometry<f64>) -> geo::Geometry<f64> {
        use geo::Geometry as G;
        match g {
            G::Point(p) => G::Point(Point(self.vertex(p.0))),
            G::MultiPoint(mp) => G::MultiPoint(MultiPoint::new(
                mp.0.iter().map(|p| Point(self.vertex(p.0))).collect(),
            )),
            G::LineString(ls) => G::LineString(self.line(ls)),
            G::MultiLineString(mls) => G::MultiLineString(MultiLineString::new(
                mls.0.iter().map(|l| self.line(l)).collect(),
            )),
            G::Polygon(p) => G::Polygon(self.polygon(p)),
            G::MultiPolygon(mp) => G::MultiPolygon(MultiPolygon::new(
                mp.0.iter().map(|p| self.polygon(p)).collect(),
            )),
            G::GeometryCollection(gc) => G::GeometryCollection(GeometryCollection::new_from(
                gc.0.iter().map(|c| self.geometry(c)).collect(),
            )),
            other => other.clone(),
        }
    }
}

/// Both operands converted and snapped onto each other within `cfg.tol`.
fn snapped_pair(
    a: &Geometry,
    b: &Geometry,
    cfg: &GeomCfg,
) -> (geo::Geometry<f64>, geo::Geometry<f64>) {
    let (ga, gb) = (to_geo(a, cfg), to_geo(b, cfg));
    let ga = Snapper::new(&gb, cfg.tol).geometry(&ga);
    let gb = Snapper::new(&ga, cfg.tol).geometry(&gb);
    (ga, gb)
}

pub fn relation(a: &Geometry, b: &Geometry, mode: RelationMode, cfg: &GeomCfg) -> Relation {
    if a.is_empty() || b.is_empty() || !applies(mode, a.dim_g(), b.dim_g()) {
        return Relation::Unfit;
    }
    let (ga, gb) = snapped_pair(a, b, cfg);
    predicate(mode, &ga.relate(&gb)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::combine;
    use crate::mode::CombineMode;
    use nalgebra::{vector, Vector2};
    use proptest::prelude::*;

    fn square(x0: f64, y0: f64, s: f64) -> Vec<Vector2<f64>> {
        vec![
            vector![x0, y0],
            vector![x0 + s, y0],
            vector![x0 + s, y0 + s],
            vector![x0, y0 + s],
        ]
    }

    fn rel(a: &Geometry, b: &Geometry, mode: RelationMode) -> Relation {
        relation(a, b, mode, &GeomCfg::default())
    }

    #[test]
    fn squares() {
        let big = Geometry::ring(&square(0.0, 0.0, 4.0)).unwrap();
        let small = Geometry::ring(&square(1.0, 1.0, 1.0)).unwrap();
        let shifted = Geometry::ring(&square(3.0, 3.0, 4.0)).unwrap();
        let far = Geometry::ring(&square(10.0, 10.0, 1.0)).unwrap();
        let adjacent = Geometry::ring(&square(4.0, 0.0, 1.0)).unwrap();

        assert_eq!(rel(&big, &small, RelationMode::Contain), Relation::True);
        assert_eq!(rel(&small, &big, RelationMode::Within), Relation::True);
        assert_eq!(rel(&big, &shifted, RelationMode::Overlap), Relation::True);
        assert_eq!(rel(&big, &small, RelationMode::Overlap), Relation::False);
        assert_eq!(rel(&big, &far, RelationMode::Disjoint), Relation::True);
        assert_eq!(rel(&big, &far, RelationMode::Intersect), Relation::False);
        assert_eq!(rel(&big, &adjacent, RelationMode::Touch), Relation::True);
        assert_eq!(rel(&big, &big.clone(), RelationMode::Equal), Relation::True);
        assert_eq!(rel(&big, &shifted, RelationMode::Cross), Relation::Unfit);
    }

    #[test]
    fn line_crosses_area() {
        let sq = Geometry::ring(&square(0.0, 0.0, 2.0)).unwrap();
        let line = Geometry::path(&[vector![-1.0, 1.0], vector![3.0, 1.0]]).unwrap();
        assert_eq!(rel(&line, &sq, RelationMode::Cross), Relation::True);
        assert_eq!(rel(&line, &sq, RelationMode::Contain), Relation::Unfit);
        assert_eq!(rel(&line, &sq, RelationMode::Overlap), Relation::Unfit);
    }

    #[test]
    fn point_pairs() {
        let p = Geometry::point(vector![1.0, 1.0]).unwrap();
        let q = Geometry::point(vector![1.0, 1.0]).unwrap();
        assert_eq!(rel(&p, &q, RelationMode::Cross), Relation::Unfit);
        assert_eq!(rel(&p, &q, RelationMode::Touch), Relation::Unfit);
        assert_eq!(rel(&p, &q, RelationMode::Equal), Relation::True);
        let sq = Geometry::ring(&square(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(rel(&sq, &p, RelationMode::Contain), Relation::True);
        assert_eq!(rel(&p, &sq, RelationMode::Within), Relation::True);
    }

    #[test]
    fn empty_operand_is_unfit() {
        let e = Geometry::collection(vec![]).unwrap();
        let p = Geometry::point(vector![0.0, 0.0]).unwrap();
        for &mode in RelationMode::ALL {
            assert_eq!(rel(&e, &p, mode), Relation::Unfit);
        }
    }

    #[test]
    fn near_points_relate_within_tolerance() {
        let cfg = GeomCfg { tol: 1e-3 };
        let p = Geometry::point(vector![1.0, 1.0]).unwrap();
        let q = Geometry::point(vector![1.0 + 1e-6, 1.0]).unwrap();
        assert_eq!(relation(&p, &q, RelationMode::Equal, &cfg), Relation::True);
        assert_eq!(relation(&p, &q, RelationMode::Disjoint, &cfg), Relation::False);
        assert_eq!(relation(&p, &q, RelationMode::Intersect, &cfg), Relation::True);

        let exact = GeomCfg { tol: 0.0 };
        assert_eq!(relation(&p, &q, RelationMode::Equal, &exact), Relation::False);
        assert_eq!(relation(&p, &q, RelationMode::Disjoint, &exact), Relation::True);

        let union = combine(&p, &q, CombineMode::Union, &cfg).unwrap();
        assert_eq!(union.point_n(), 1);
    }

    #[test]
    fn point_near_curve_intersects_within_tolerance() {
        let cfg = GeomCfg { tol: 1e-3 };
        let line = Geometry::path(&[vector![0.0, 0.0], vector![4.0, 0.0]]).unwrap();
        let p = Geometry::point(vector![1.5, 5e-4]).unwrap();
        assert_eq!(relation(&p, &line, RelationMode::Intersect, &cfg), Relation::True);
        assert_eq!(relation(&line, &p, RelationMode::Intersect, &cfg), Relation::True);
        assert_eq!(relation(&p, &line, RelationMode::Within, &cfg), Relation::True);
        let off = Geometry::point(vector![1.5, 0.1]).unwrap();
        assert_eq!(relation(&off, &line, RelationMode::Disjoint, &cfg), Relation::True);
    }

    fn any_geometry() -> impl Strategy<Value = Geometry> {
        let c = -5.0..5.0f64;
        prop_oneof![
            (c.clone(), c.clone()).prop_map(|(x, y)| Geometry::point(vector![x, y]).unwrap()),
            (c.clone(), c.clone(), c.clone(), c.clone())
                .prop_map(|(a, b, x, y)| Geometry::path(&[vector![a, b], vector![x, y]]).unwrap()),
            (c.clone(), c, 0.1..4.0f64)
                .prop_map(|(x, y, s)| Geometry::ring(&square(x, y, s)).unwrap()),
        ]
    }

    proptest! {
        #[test]
        fn every_relation_is_tri_state(a in any_geometry(), b in any_geometry()) {
            for &mode in RelationMode::ALL {
                let r = rel(&a, &b, mode);
                prop_assert!(matches!(r.code(), -1..=1));
                prop_assert_eq!(r == Relation::Unfit, !applies(mode, a.dim_g(), b.dim_g()));
            }
        }
    }
}
