use super::*;
use crate::cfg::GeomCfg;
use crate::error::GeomError;
use crate::model::Geometry;
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

#[test]
fn point_centroid_is_mean() {
    let cfg = GeomCfg::default();
    let g =
        Geometry::multi_point(&[vector![0.0, 0.0], vector![2.0, 0.0], vector![1.0, 3.0]]).unwrap();
    let c = centroid(&g, &cfg).unwrap();
    assert!((c - vector![1.0, 1.0]).norm() < 1e-12);
    assert_eq!(length(&g, &cfg).unwrap(), 0.0);
    assert_eq!(area(&g, &cfg).unwrap(), 0.0);
}

#[test]
fn empty_geometry_has_no_centroid() {
    let cfg = GeomCfg::default();
    let g = Geometry::collection(vec![]).unwrap();
    assert!(matches!(centroid(&g, &cfg), Err(GeomError::Domain(_))));
    let p = Geometry::multi(crate::model::GeomKind::Polygon, vec![]).unwrap();
    assert!(matches!(centroid(&p, &cfg), Err(GeomError::Domain(_))));
    assert!(width(&g, &cfg).is_err());
}

#[test]
fn empty_composite_has_no_area_or_length() {
    let cfg = GeomCfg::default();
    let p = Geometry::multi(crate::model::GeomKind::Polygon, vec![]).unwrap();
    assert!(matches!(area(&p, &cfg), Err(GeomError::Domain(_))));
    assert!(matches!(length(&p, &cfg), Err(GeomError::Domain(_))));
    let nested = Geometry::collection(vec![Geometry::collection(vec![]).unwrap()]).unwrap();
    assert!(matches!(area(&nested, &cfg), Err(GeomError::Domain(_))));
}

#[test]
fn curve_centroid_is_length_weighted() {
    let cfg = GeomCfg::default();
    // long horizontal segment and a short vertical one
    let g = Geometry::polyline(&[
        vec![vector![0.0, 0.0], vector![4.0, 0.0]],
        vec![vector![10.0, 0.0], vector![10.0, 1.0]],
    ])
    .unwrap();
    assert!((length(&g, &cfg).unwrap() - 5.0).abs() < 1e-12);
    let c = centroid(&g, &cfg).unwrap();
    let expect = (vector![2.0, 0.0] * 4.0 + vector![10.0, 0.5]) / 5.0;
    assert!((c - expect).norm() < 1e-12);
}

#[test]
fn degenerate_curve_falls_back_to_its_first_point() {
    let cfg = GeomCfg::default();
    let g = Geometry::path(&[vector![3.0, 4.0], vector![3.0, 4.0], vector![3.0, 4.0]]).unwrap();
    assert_eq!(g.dim_g(), 1);
    assert_eq!(length(&g, &cfg).unwrap(), 0.0);
    let c = centroid(&g, &cfg).unwrap();
    assert_eq!(c, vector![3.0, 4.0]);
}

#[test]
fn zero_length_segments_are_skipped() {
    let cfg = GeomCfg::default();
    let g = Geometry::path(&[vector![0.0, 0.0], vector![0.0, 0.0], vector![2.0, 0.0]]).unwrap();
    let c = centroid(&g, &cfg).unwrap();
    assert!((c - vector![1.0, 0.0]).norm() < 1e-12);
}

#[test]
fn polygon_with_hole() {
    let cfg = GeomCfg::default();
    let g = Geometry::polygon(&square(0.0, 0.0, 4.0), &[square(1.0, 1.0, 2.0)]).unwrap();
    assert!((area(&g, &cfg).unwrap() - 12.0).abs() < 1e-12);
    assert!((length(&g, &cfg).unwrap() - 24.0).abs() < 1e-12);
    let c = centroid(&g, &cfg).unwrap();
    assert!((c - vector![2.0, 2.0]).norm() < 1e-12);
    assert!((width(&g, &cfg).unwrap() - 4.0).abs() < 1e-12);
    assert!((height(&g, &cfg).unwrap() - 4.0).abs() < 1e-12);
}

#[test]
fn area_component_wins_over_lower_dimensions() {
    let cfg = GeomCfg::default();
    let g = Geometry::collection(vec![
        Geometry::point(vector![100.0, 100.0]).unwrap(),
        Geometry::path(&[vector![-50.0, 0.0], vector![-40.0, 0.0]]).unwrap(),
        Geometry::ring(&square(0.0, 0.0, 2.0)).unwrap(),
    ])
    .unwrap();
    assert_eq!(g.dim_g(), 2);
    let c = centroid(&g, &cfg).unwrap();
    assert!((c - vector![1.0, 1.0]).norm() < 1e-12);
    assert!((area(&g, &cfg).unwrap() - 4.0).abs() < 1e-12);
    // perimeter of the ring only
    assert!((length(&g, &cfg).unwrap() - 8.0).abs() < 1e-12);
}

#[test]
fn envelope_measures_as_rectangle() {
    let cfg = GeomCfg::default();
    let g = Geometry::envelope(vector![1.0, 2.0], vector![4.0, 6.0]).unwrap();
    assert!((area(&g, &cfg).unwrap() - 12.0).abs() < 1e-12);
    assert!((length(&g, &cfg).unwrap() - 14.0).abs() < 1e-12);
    assert!((width(&g, &cfg).unwrap() - 3.0).abs() < 1e-12);
    assert!((height(&g, &cfg).unwrap() - 4.0).abs() < 1e-12);
    let c = centroid(&g, &cfg).unwrap();
    assert!((c - vector![2.5, 4.0]).norm() < 1e-12);
}

fn coord() -> impl Strategy<Value = f64> {
    -1e3..1e3f64
}

proptest! {
    #[test]
    fn centroid_of_coincident_points(x in coord(), y in coord(), n in 1usize..50) {
        let cfg = GeomCfg::default();
        let p = vector![x, y];
        let g = Geometry::multi_point(&vec![p; n]).unwrap();
        let c = centroid(&g, &cfg).unwrap();
        prop_assert!((c - p).norm() <= 1e-9 * (1.0 + p.norm()));
    }

    #[test]
    fn child_order_does_not_matter(
        offsets in prop::collection::vec((coord(), coord(), 0.5..20.0f64), 1..8),
        rot in 0usize..8,
    ) {
        let cfg = GeomCfg::default();
        let children: Vec<Geometry> = offsets
            .iter()
            .map(|&(x, y, s)| Geometry::ring(&square(x, y, s)).unwrap())
            .collect();
        let mut permuted = children.clone();
        permuted.reverse();
        let k = rot % permuted.len();
        permuted.rotate_left(k);

        let a = Geometry::collection(children).unwrap();
        let b = Geometry::collection(permuted).unwrap();
        let (area_a, area_b) = (area(&a, &cfg).unwrap(), area(&b, &cfg).unwrap());
        prop_assert!((area_a - area_b).abs() <= 1e-9 * (1.0 + area_a));
        let (len_a, len_b) = (length(&a, &cfg).unwrap(), length(&b, &cfg).unwrap());
        prop_assert!((len_a - len_b).abs() <= 1e-9 * (1.0 + len_a));
        let ca = centroid(&a, &cfg).unwrap();
        let cb = centroid(&b, &cfg).unwrap();
        prop_assert!((ca - cb).norm() <= 1e-7 * (1.0 + ca.norm()));
    }
}
