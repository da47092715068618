use super::*;
use crate::cfg::GeomCfg;
use crate::error::GeomError;
use nalgebra::vector;

fn square(x0: f64, y0: f64, s: f64) -> Vec<nalgebra::Vector2<f64>> {
    vec![
        vector![x0, y0],
        vector![x0 + s, y0],
        vector![x0 + s, y0 + s],
        vector![x0, y0 + s],
    ]
}

#[test]
fn composite_dimension_is_max_of_children() {
    let g = Geometry::collection(vec![
        Geometry::point(vector![0.0, 0.0]).unwrap(),
        Geometry::path(&[vector![0.0, 0.0], vector![1.0, 0.0]]).unwrap(),
    ])
    .unwrap();
    assert_eq!(g.dim_g(), 1);
    assert_eq!(g.sub_n(), 2);
    assert_eq!(g.point_n(), 3);
    assert_eq!(Geometry::collection(vec![]).unwrap().point_n(), 0);
    assert_eq!(Geometry::multi(GeomKind::Polygon, vec![]).unwrap().dim_g(), 2);
}

#[test]
fn child_index_out_of_range() {
    let g = Geometry::multi_point(&[vector![0.0, 0.0]]).unwrap();
    assert!(g.sub_at(0).is_ok());
    assert!(matches!(
        g.sub_at(1),
        Err(GeomError::Index { index: 1, count: 1 })
    ));
    let p = Geometry::point(vector![0.0, 0.0]).unwrap();
    assert!(p.sub_at(0).is_err());
}

#[test]
fn kinds_reject_wrong_children() {
    let p = Geometry::point(vector![0.0, 0.0]).unwrap();
    assert!(Geometry::multi(GeomKind::Polyline, vec![p.clone()]).is_err());
    assert!(Geometry::multi(GeomKind::Point, vec![p]).is_err());
    assert!(Geometry::single(
        GeomKind::Line,
        CoordBuffer::from_xy(&[vector![0.0, 0.0]]).unwrap()
    )
    .is_err());
}

#[test]
fn clone_is_deep() {
    let g = Geometry::polygon(&square(0.0, 0.0, 1.0), &[]).unwrap();
    let h = g.clone();
    assert_eq!(g, h);
    let gs = g.simples()[0].coords().ordinates().as_ptr();
    let hs = h.simples()[0].coords().ordinates().as_ptr();
    assert_ne!(gs, hs);
}

#[test]
fn ring_closes_itself() {
    let r = Geometry::ring(&square(0.0, 0.0, 1.0)).unwrap();
    assert_eq!(r.point_n(), 5);
    let s = r.as_simple().unwrap();
    assert_eq!(s.coords().xy(0), s.coords().xy(4));
}

#[test]
fn kind_codes_round_trip() {
    for code in 1..=10 {
        assert_eq!(GeomKind::try_from(code).unwrap().code(), code);
    }
    assert!(GeomKind::try_from(0).is_err());
}

#[test]
fn envelope_expands_to_ring() {
    let cfg = GeomCfg::default();
    let e = Geometry::envelope(vector![0.0, 0.0], vector![2.0, 1.0]).unwrap();
    let v = e.as_simple().unwrap().vertices(&cfg);
    assert_eq!(v.len(), 5);
    assert_eq!(v[2], vector![2.0, 1.0]);
}

#[test]
fn polygon_rings_grouped_into_parts() {
    let cfg = GeomCfg::default();
    let rings = vec![
        Geometry::ring(&square(0.0, 0.0, 10.0)).unwrap(),
        Geometry::ring(&square(2.0, 2.0, 2.0)).unwrap(),
        Geometry::ring(&square(20.0, 0.0, 5.0)).unwrap(),
    ];
    let g = Geometry::multi(GeomKind::Polygon, rings).unwrap();
    let comps = g.components(&cfg);
    assert_eq!(comps.areas.len(), 2);
    assert_eq!(comps.areas[0].holes.len(), 1);
    assert!(comps.areas[1].holes.is_empty());
}

#[test]
fn coordinate_dimensionality_aggregates() {
    let z = Geometry::single(
        GeomKind::Point,
        CoordBuffer::from_slice(CoordDim::Xyz, &[0.0, 0.0, 5.0]).unwrap(),
    )
    .unwrap();
    let m = Geometry::single(
        GeomKind::Point,
        CoordBuffer::from_slice(CoordDim::Xym, &[1.0, 0.0, 7.0]).unwrap(),
    )
    .unwrap();
    let mp = Geometry::multi(GeomKind::MultiPoint, vec![z, m]).unwrap();
    assert_eq!(mp.dim_c(), CoordDim::Xyzm);
}
