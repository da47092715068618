use super::*;
use crate::measure::{area, centroid};
use crate::model::CoordBuffer;
use crate::model::CoordDim;
use nalgebra::vector;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn square(x0: f64, y0: f64, s: f64) -> Vec<Vector2<f64>> {
    vec![
        vector![x0, y0],
        vector![x0 + s, y0],
        vector![x0 + s, y0 + s],
        vector![x0, y0 + s],
    ]
}

#[test]
fn envelope_and_center() {
    let cfg = GeomCfg::default();
    let g = Geometry::multi_point(&[vector![1.0, 5.0], vector![-3.0, 2.0], vector![4.0, -1.0]])
        .unwrap();
    let env = envelope(&g, &cfg).unwrap();
    assert_eq!(env.kind(), GeomKind::Envelope);
    let s = env.as_simple().unwrap();
    assert_eq!(s.coords().xy(0), vector![-3.0, -1.0]);
    assert_eq!(s.coords().xy(1), vector![4.0, 5.0]);
    assert_eq!(center(&g, &cfg).unwrap(), vector![0.5, 2.0]);

    let empty = Geometry::collection(vec![]).unwrap();
    assert!(envelope(&empty, &cfg).unwrap().is_empty());
    assert!(center(&empty, &cfg).is_err());
}

#[test]
fn hull_of_point_cloud() {
    let cfg = GeomCfg::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut pts: Vec<Vector2<f64>> = (0..200)
        .map(|_| vector![rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)])
        .collect();
    pts.extend(square(-2.0, -2.0, 4.0));
    let g = Geometry::multi_point(&pts).unwrap();
    let h = convex_hull(&g, &cfg).unwrap();
    assert_eq!(h.kind(), GeomKind::Ring);
    // four corners plus closure
    assert_eq!(h.point_n(), 5);
    assert!((area(&h, &cfg).unwrap() - 16.0).abs() < 1e-12);
}

#[test]
fn hull_degenerates_to_point_and_line() {
    let cfg = GeomCfg::default();
    let same = Geometry::multi_point(&[vector![1.0, 1.0]; 4]).unwrap();
    assert_eq!(convex_hull(&same, &cfg).unwrap().kind(), GeomKind::Point);
    let collinear =
        Geometry::multi_point(&[vector![0.0, 0.0], vector![1.0, 1.0], vector![3.0, 3.0]]).unwrap();
    let h = convex_hull(&collinear, &cfg).unwrap();
    assert_eq!(h.kind(), GeomKind::Line);
    assert_eq!(h.point_n(), 2);
}

#[test]
fn enclosing_circle_of_square() {
    let cfg = GeomCfg::default();
    let g = Geometry::ring(&square(0.0, 0.0, 2.0)).unwrap();
    let e = min_enclosing_circle(&g.all_xy(&cfg), &cfg).unwrap();
    assert!((e.center - vector![1.0, 1.0]).norm() < 1e-9);
    assert!((e.major - 2f64.sqrt()).abs() < 1e-9);
    let ring = enclosing_circle(&g, &cfg).unwrap();
    assert_eq!(ring.kind(), GeomKind::Ring);
    assert_eq!(ring.point_n(), 37);
}

#[test]
fn enclosing_circle_contains_all_points() {
    let cfg = GeomCfg::default();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let pts: Vec<Vector2<f64>> = (0..50)
            .map(|_| vector![rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)])
            .collect();
        let e = min_enclosing_circle(&pts, &cfg).unwrap();
        for p in &pts {
            assert!((p - e.center).norm() <= e.major + 1e-7);
        }
    }
}

#[test]
fn inscribed_shapes_of_square() {
    let cfg = GeomCfg::default();
    let g = Geometry::ring(&square(0.0, 0.0, 4.0)).unwrap();
    let c = inner_circle(&g, &cfg).unwrap();
    assert!((c.center - vector![2.0, 2.0]).norm() < 1e-3);
    assert!((c.major - 2.0).abs() < 1e-3);

    let (sc, h) = inner_square(&g, &cfg).unwrap();
    assert!((sc - vector![2.0, 2.0]).norm() < 1e-3);
    assert!((h - 2.0).abs() < 1e-3);

    let r = inscribed_rect(&g, &cfg).unwrap();
    assert_eq!(r.kind(), GeomKind::Envelope);
    assert!((area(&r, &cfg).unwrap() - 16.0).abs() < 0.05);
}

#[test]
fn inscribed_rect_follows_elongated_shape() {
    let cfg = GeomCfg::default();
    // rhombus |x - 4| / 4 + |y| <= 1: best box is 4 x 1
    let g = Geometry::ring(&[
        vector![0.0, 0.0],
        vector![4.0, -1.0],
        vector![8.0, 0.0],
        vector![4.0, 1.0],
    ])
    .unwrap();
    let (lo, hi) = inner_rect(&g, &cfg).unwrap();
    let side = hi - lo;
    assert!(side.x > 3.0 * side.y);
    assert!(side.x * side.y > 3.9);
    assert!(side.x * side.y <= 4.0 + 1e-6);
}

#[test]
fn inscribed_needs_area() {
    let cfg = GeomCfg::default();
    let g = Geometry::path(&[vector![0.0, 0.0], vector![1.0, 0.0]]).unwrap();
    assert!(matches!(
        inner_circle(&g, &cfg),
        Err(GeomError::IncorrectGeometryKind(_))
    ));
}

#[test]
fn label_point_lies_inside() {
    let cfg = GeomCfg::default();
    // L-shape: the centroid is outside, the label is not
    let g = Geometry::ring(&[
        vector![0.0, 0.0],
        vector![10.0, 0.0],
        vector![10.0, 1.0],
        vector![1.0, 1.0],
        vector![1.0, 10.0],
        vector![0.0, 10.0],
    ])
    .unwrap();
    let p = label_point(&g, &cfg).unwrap();
    let ring = g.all_xy(&cfg);
    assert!(crate::construct::primitives::point_in_ring(p, &ring));
    let c = centroid(&g, &cfg).unwrap();
    assert!(!crate::construct::primitives::point_in_ring(c, &ring));
}

#[test]
fn oriented_envelope_of_rotated_square() {
    let cfg = GeomCfg::default();
    let g = Geometry::ring(&[
        vector![0.0, -1.0],
        vector![1.0, 0.0],
        vector![0.0, 1.0],
        vector![-1.0, 0.0],
    ])
    .unwrap();
    let r = oriented_envelope(&g, &cfg).unwrap();
    assert_eq!(r.kind(), GeomKind::Ring);
    assert!((area(&r, &cfg).unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn simplify_drops_collinear_vertices() {
    let cfg = GeomCfg::default();
    let g = Geometry::polyline(&[vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![2.0, 0.0],
        vector![2.0, 1.0],
    ]])
    .unwrap();
    let s = simplify(&g, cfg.tol, &cfg).unwrap();
    assert_eq!(s.kind(), GeomKind::Polyline);
    assert_eq!(s.point_n(), 3);

    let wobbly = Geometry::path(&[
        vector![0.0, 0.0],
        vector![1.0, 0.05],
        vector![2.0, 0.0],
    ])
    .unwrap();
    assert_eq!(simplify(&wobbly, 0.1, &cfg).unwrap().point_n(), 2);
    assert_eq!(simplify(&wobbly, 0.01, &cfg).unwrap().point_n(), 3);
}

#[test]
fn simplify_keeps_polygon_holes() {
    let cfg = GeomCfg::default();
    let g = Geometry::polygon(&square(0.0, 0.0, 10.0), &[square(2.0, 2.0, 2.0)]).unwrap();
    let s = simplify_preserve(&g, cfg.tol, &cfg).unwrap();
    assert_eq!(s.kind(), GeomKind::Polygon);
    assert_eq!(s.sub_n(), 2);
    assert!((area(&s, &cfg).unwrap() - 96.0).abs() < 1e-9);
}

#[test]
fn boundary_by_dimension() {
    let cfg = GeomCfg::default();
    let poly = Geometry::polygon(&square(0.0, 0.0, 4.0), &[square(1.0, 1.0, 1.0)]).unwrap();
    let b = boundary(&poly, &cfg).unwrap();
    assert_eq!(b.kind(), GeomKind::Polyline);
    assert_eq!(b.sub_n(), 2);

    let open = Geometry::path(&[vector![0.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0]]).unwrap();
    let b = boundary(&open, &cfg).unwrap();
    assert_eq!(b.kind(), GeomKind::MultiPoint);
    assert_eq!(b.all_xy(&cfg), vec![vector![0.0, 0.0], vector![1.0, 1.0]]);

    let pts: Vec<_> = square(0.0, 0.0, 1.0)
        .into_iter()
        .chain([vector![0.0, 0.0]])
        .collect();
    let closed = Geometry::path(&pts).unwrap();
    assert!(boundary(&closed, &cfg).unwrap().is_empty());
    let pts = Geometry::multi_point(&[vector![0.0, 0.0]]).unwrap();
    assert_eq!(boundary(&pts, &cfg).unwrap().kind(), GeomKind::Collection);
}

#[test]
fn repeated_points_removed_with_measures_kept() {
    let buf = CoordBuffer::from_slice(
        CoordDim::Xym,
        &[0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 5.0, 0.0, 3.0, 5.0, 1e-12, 4.0],
    )
    .unwrap();
    let g = Geometry::single(GeomKind::Path, buf).unwrap();
    let out = remove_repeated(&g, 1e-9).unwrap();
    let s = out.as_simple().unwrap();
    assert_eq!(s.coords().len(), 2);
    assert_eq!(s.coords().dim(), CoordDim::Xym);
    assert_eq!(s.coords().ordinates(), &[0.0, 0.0, 1.0, 5.0, 0.0, 3.0]);
}

#[test]
fn ring_stays_closed_after_removal() {
    let mut pts = square(0.0, 0.0, 1.0);
    pts.insert(1, vector![0.0, 0.0]);
    let g = Geometry::ring(&pts).unwrap();
    assert_eq!(g.point_n(), 6);
    let out = remove_repeated(&g, 1e-9).unwrap();
    let xy = out.all_xy(&GeomCfg::default());
    assert_eq!(xy.len(), 5);
    assert_eq!(xy.first(), xy.last());
}

#[test]
fn reverse_keeps_envelopes() {
    let g = Geometry::collection(vec![
        Geometry::path(&[vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 3.0]]).unwrap(),
        Geometry::envelope(vector![0.0, 0.0], vector![1.0, 1.0]).unwrap(),
    ])
    .unwrap();
    let r = reverse(&g).unwrap();
    let path = r.sub_at(0).unwrap().as_simple().unwrap();
    assert_eq!(path.coords().xy(0), vector![2.0, 3.0]);
    let env = r.sub_at(1).unwrap().as_simple().unwrap();
    assert_eq!(env.coords().xy(0), vector![0.0, 0.0]);
    // input untouched
    assert_eq!(g.sub_at(0).unwrap().as_simple().unwrap().coords().xy(0), vector![0.0, 0.0]);
}
