//! Validity checks: single-answer modes and the combined bitmask check.

use bitflags::bitflags;
use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::combine::covers_point;
use crate::construct::primitives::{segments_cross, segments_overlap, segments_touch, signed_area};
use crate::mode::CheckMode;
use crate::model::{Components, Geometry};

bitflags! {
    /// Findings reported together by [`check2`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CheckFlags: u32 {
        /// Consecutive (or, for point sets, any two) coincident points.
        const REPEAT_POINT = 0x01;
        /// A point member off every curve and area, or a curve of zero length.
        const ISOLATE_POINT = 0x02;
        /// An endpoint shared by exactly two distinct open curves.
        const PSEUDO_ENDPOINT = 0x04;
    }
}

fn same(a: Vector2<f64>, b: Vector2<f64>, cfg: &GeomCfg) -> bool {
    (a - b).norm() <= cfg.tol
}

fn is_closed(pts: &[Vector2<f64>], cfg: &GeomCfg) -> bool {
    match pts {
        [a, .., b] => same(*a, *b, cfg),
        _ => false,
    }
}

/// Curves and rings, each as one vertex sequence.
fn chains(comps: &Components) -> Vec<&[Vector2<f64>]> {
    comps
        .curves
        .iter()
        .map(Vec::as_slice)
        .chain(comps.areas.iter().flat_map(|a| a.rings().map(Vec::as_slice)))
        .collect()
}

fn has_repeat(comps: &Components, cfg: &GeomCfg) -> bool {
    let in_chain = chains(comps)
        .iter()
        .any(|c| c.windows(2).any(|w| same(w[0], w[1], cfg)));
    let pts = &comps.points;
    in_chain
        || pts
            .iter()
            .enumerate()
            .any(|(i, p)| pts[i + 1..].iter().any(|q| same(*p, *q, cfg)))
}

/// Segments `i < j` of one chain are neighbours (share a vertex by construction).
fn adjacent(i: usize, j: usize, nseg: usize, closed: bool) -> bool {
    j == i + 1 || (closed && i == 0 && j == nseg - 1)
}

fn chain_is_simple(pts: &[Vector2<f64>], cfg: &GeomCfg) -> bool {
    let closed = is_closed(pts, cfg);
    let nseg = pts.len().saturating_sub(1);
    for i in 0..nseg {
        let (a, b) = (pts[i], pts[i + 1]);
        if same(a, b, cfg) {
            return false;
        }
        for j in i + 1..nseg {
            let (c, d) = (pts[j], pts[j + 1]);
            let bad = if adjacent(i, j, nseg, closed) {
                segments_overlap(a, b, c, d, cfg)
            } else {
                segments_touch(a, b, c, d, cfg)
            };
            if bad {
                return false;
            }
        }
    }
    true
}

fn chain_self_crosses(pts: &[Vector2<f64>], cfg: &GeomCfg) -> bool {
    let closed = is_closed(pts, cfg);
    let nseg = pts.len().saturating_sub(1);
    (0..nseg).any(|i| {
        (i + 1..nseg).any(|j| {
            !adjacent(i, j, nseg, closed)
                && segments_cross(pts[i], pts[i + 1], pts[j], pts[j + 1], cfg)
        })
    })
}

fn has_lap(comps: &Components, cfg: &GeomCfg) -> bool {
    let segs: Vec<(Vector2<f64>, Vector2<f64>)> = chains(comps)
        .iter()
        .flat_map(|c| c.windows(2).map(|w| (w[0], w[1])))
        .collect();
    segs.iter().enumerate().any(|(i, &(a, b))| {
        segs[i + 1..]
            .iter()
            .any(|&(c, d)| segments_overlap(a, b, c, d, cfg))
    })
}

fn good_direction(g: &Geometry, comps: &Components) -> bool {
    g.dim_g() == 2
        && !comps.areas.is_empty()
        && comps.areas.iter().all(|a| {
            signed_area(&a.exterior) > 0.0 && a.holes.iter().all(|h| signed_area(h) < 0.0)
        })
}

/// Answer one validity question about `g`.
pub fn check(g: &Geometry, mode: CheckMode, cfg: &GeomCfg) -> bool {
    let comps = g.components(cfg);
    match mode {
        CheckMode::Simple => {
            !has_repeat(&comps, cfg) && chains(&comps).iter().all(|c| chain_is_simple(c, cfg))
        }
        CheckMode::Closed => {
            let cs = chains(&comps);
            !cs.is_empty() && cs.iter().all(|c| is_closed(c, cfg))
        }
        CheckMode::GoodDirection => good_direction(g, &comps),
        CheckMode::SelfCross => chains(&comps).iter().any(|c| chain_self_crosses(c, cfg)),
        CheckMode::Repeat => has_repeat(&comps, cfg),
        CheckMode::Lap => has_lap(&comps, cfg),
    }
}

fn has_isolated(comps: &Components, cfg: &GeomCfg) -> bool {
    let degenerate_curve = comps
        .curves
        .iter()
        .any(|c| !c.is_empty() && c.iter().all(|p| same(*p, c[0], cfg)));
    let has_support = !comps.curves.is_empty() || !comps.areas.is_empty();
    let stray_point = has_support
        && comps
            .points
            .iter()
            .any(|p| !covers_point(comps, 1, *p, cfg) && !covers_point(comps, 2, *p, cfg));
    degenerate_curve || stray_point
}

fn has_pseudo_endpoint(comps: &Components, cfg: &GeomCfg) -> bool {
    let open: Vec<(usize, Vector2<f64>)> = comps
        .curves
        .iter()
        .enumerate()
        .filter(|(_, c)| c.len() >= 2 && !is_closed(c, cfg))
        .flat_map(|(k, c)| [(k, c[0]), (k, c[c.len() - 1])])
        .collect();
    open.iter().any(|&(k, p)| {
        let at: Vec<usize> = open
            .iter()
            .filter(|(_, q)| same(p, *q, cfg))
            .map(|(owner, _)| *owner)
            .collect();
        at.len() == 2 && at.iter().any(|&o| o != k)
    })
}

/// Run every check named in `mask`; the result holds the bits that fired.
pub fn check2(g: &Geometry, mask: CheckFlags, cfg: &GeomCfg) -> CheckFlags {
    let comps = g.components(cfg);
    let mut out = CheckFlags::empty();
    if mask.contains(CheckFlags::REPEAT_POINT) && has_repeat(&comps, cfg) {
        out |= CheckFlags::REPEAT_POINT;
    }
    if mask.contains(CheckFlags::ISOLATE_POINT) && has_isolated(&comps, cfg) {
        out |= CheckFlags::ISOLATE_POINT;
    }
    if mask.contains(CheckFlags::PSEUDO_ENDPOINT) && has_pseudo_endpoint(&comps, cfg) {
        out |= CheckFlags::PSEUDO_ENDPOINT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    fn cfg() -> GeomCfg {
        GeomCfg::default()
    }

    fn square(x0: f64, y0: f64, s: f64) -> Vec<Vector2<f64>> {
        vec![
            vector![x0, y0],
            vector![x0 + s, y0],
            vector![x0 + s, y0 + s],
            vector![x0, y0 + s],
        ]
    }

    #[test]
    fn simple_and_closed_ring() {
        let g = Geometry::ring(&square(0.0, 0.0, 1.0)).unwrap();
        assert!(check(&g, CheckMode::Simple, &cfg()));
        assert!(check(&g, CheckMode::Closed, &cfg()));
        assert!(!check(&g, CheckMode::SelfCross, &cfg()));
        assert!(!check(&g, CheckMode::Repeat, &cfg()));
        assert!(!check(&g, CheckMode::Lap, &cfg()));
    }

    #[test]
    fn bow_tie_self_crosses() {
        let g = Geometry::ring(&[
            vector![0.0, 0.0],
            vector![2.0, 2.0],
            vector![2.0, 0.0],
            vector![0.0, 2.0],
        ])
        .unwrap();
        assert!(check(&g, CheckMode::SelfCross, &cfg()));
        assert!(!check(&g, CheckMode::Simple, &cfg()));
    }

    #[test]
    fn open_path_is_not_closed() {
        let g = Geometry::path(&[vector![0.0, 0.0], vector![1.0, 0.0]]).unwrap();
        assert!(!check(&g, CheckMode::Closed, &cfg()));
        assert!(check(&g, CheckMode::Simple, &cfg()));
        let pts = Geometry::multi_point(&[vector![0.0, 0.0]]).unwrap();
        assert!(!check(&pts, CheckMode::Closed, &cfg()));
    }

    #[test]
    fn direction_of_rings() {
        let ccw = Geometry::polygon(&square(0.0, 0.0, 4.0), &[{
            let mut h = square(1.0, 1.0, 1.0);
            h.reverse();
            h
        }])
        .unwrap();
        assert!(check(&ccw, CheckMode::GoodDirection, &cfg()));
        let mut cw = square(0.0, 0.0, 4.0);
        cw.reverse();
        let g = Geometry::ring(&cw).unwrap();
        assert!(!check(&g, CheckMode::GoodDirection, &cfg()));
        let line = Geometry::path(&[vector![0.0, 0.0], vector![1.0, 0.0]]).unwrap();
        assert!(!check(&line, CheckMode::GoodDirection, &cfg()));
    }

    #[test]
    fn backtracking_laps() {
        let g = Geometry::path(&[vector![0.0, 0.0], vector![2.0, 0.0], vector![1.0, 0.0]]).unwrap();
        assert!(check(&g, CheckMode::Lap, &cfg()));
        assert!(!check(&g, CheckMode::Simple, &cfg()));
        assert!(!check(&g, CheckMode::SelfCross, &cfg()));
    }

    #[test]
    fn repeated_points() {
        let g = Geometry::path(&[vector![0.0, 0.0], vector![0.0, 0.0], vector![1.0, 0.0]]).unwrap();
        assert!(check(&g, CheckMode::Repeat, &cfg()));
        let mp =
            Geometry::multi_point(&[vector![3.0, 1.0], vector![0.0, 0.0], vector![3.0, 1.0]])
                .unwrap();
        assert!(check(&mp, CheckMode::Repeat, &cfg()));
        assert!(!check(&mp, CheckMode::Simple, &cfg()));
    }

    #[test]
    fn bitmask_reports_every_finding() {
        let g = Geometry::collection(vec![
            Geometry::path(&[vector![0.0, 0.0], vector![0.0, 0.0], vector![1.0, 0.0]]).unwrap(),
            Geometry::point(vector![5.0, 5.0]).unwrap(),
        ])
        .unwrap();
        let all = CheckFlags::all();
        let got = check2(&g, all, &cfg());
        assert_eq!(got, CheckFlags::REPEAT_POINT | CheckFlags::ISOLATE_POINT);
        assert_eq!(got.bits(), 0x03);
        assert_eq!(check2(&g, CheckFlags::REPEAT_POINT, &cfg()), CheckFlags::REPEAT_POINT);
    }

    #[test]
    fn point_on_line_is_not_isolated() {
        let g = Geometry::collection(vec![
            Geometry::path(&[vector![0.0, 0.0], vector![2.0, 0.0]]).unwrap(),
            Geometry::point(vector![1.0, 0.0]).unwrap(),
        ])
        .unwrap();
        assert!(check2(&g, CheckFlags::all(), &cfg()).is_empty());
    }

    #[test]
    fn pseudo_endpoint_between_two_lines() {
        let g = Geometry::polyline(&[
            vec![vector![0.0, 0.0], vector![1.0, 0.0]],
            vec![vector![1.0, 0.0], vector![2.0, 1.0]],
        ])
        .unwrap();
        assert_eq!(check2(&g, CheckFlags::all(), &cfg()), CheckFlags::PSEUDO_ENDPOINT);

        let junction = Geometry::polyline(&[
            vec![vector![0.0, 0.0], vector![1.0, 0.0]],
            vec![vector![1.0, 0.0], vector![2.0, 1.0]],
            vec![vector![1.0, 0.0], vector![1.0, -1.0]],
        ])
        .unwrap();
        assert!(check2(&junction, CheckFlags::all(), &cfg()).is_empty());
    }

    #[test]
    fn zero_length_curve_is_isolated() {
        let g = Geometry::path(&[vector![2.0, 2.0], vector![2.0, 2.0]]).unwrap();
        assert!(check2(&g, CheckFlags::ISOLATE_POINT, &cfg()).contains(CheckFlags::ISOLATE_POINT));
    }
}
