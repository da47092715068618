//! Random geometries for tests and benchmarks (radial jitter + replay tokens).
//!
//! Model
//! - Star polygons: `n` equally spaced angles on [0, 2π) with bounded angular
//!   and radial jitter; sorting by angle keeps the ring simple.
//! - Convex polygons: the convex hull of a star polygon's vertices.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::GeomCfg;
use crate::derive::convex_hull_points;
use crate::error::GeomResult;
use crate::model::Geometry;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub center: Vector2<f64>,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            center: Vector2::zeros(),
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Counter-clockwise star-shaped vertices (open, no closing point).
pub fn star_points(cfg: RadialCfg, tok: ReplayToken) -> Vec<Vector2<f64>> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.max(0.0);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| {
            let base = (k as f64) * delta;
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            base + jitter
        })
        .collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    angles
        .into_iter()
        .map(|th| {
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u).max(1e-6) * r0;
            let t = th + phase;
            cfg.center + Vector2::new(t.cos() * r, t.sin() * r)
        })
        .collect()
}

/// Simple star-shaped ring.
pub fn draw_star_polygon(cfg: RadialCfg, tok: ReplayToken) -> GeomResult<Geometry> {
    Geometry::ring(&star_points(cfg, tok))
}

/// Convex ring: hull of a star polygon's vertices.
pub fn draw_convex_polygon(cfg: RadialCfg, tok: ReplayToken) -> GeomResult<Geometry> {
    let hull = convex_hull_points(&star_points(cfg, tok), &GeomCfg::default());
    Geometry::ring(&hull)
}

/// `n` points uniform in the square `[-half, half]²`.
pub fn draw_point_cloud(n: usize, half: f64, tok: ReplayToken) -> GeomResult<Geometry> {
    let mut rng = tok.to_std_rng();
    let pts: Vec<Vector2<f64>> = (0..n)
        .map(|_| Vector2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half)))
        .collect();
    Geometry::multi_point(&pts)
}

/// Collection of `parts` star polygons spread along the x axis, each
/// followed by a random two-point path.
pub fn draw_collection(parts: usize, tok: ReplayToken) -> GeomResult<Geometry> {
    let mut rng = tok.to_std_rng();
    let mut children = Vec::with_capacity(2 * parts);
    for k in 0..parts {
        let cfg = RadialCfg {
            center: Vector2::new(3.0 * k as f64, 0.0),
            ..RadialCfg::default()
        };
        children.push(draw_star_polygon(
            cfg,
            ReplayToken {
                seed: tok.seed,
                index: tok.index.wrapping_add(k as u64 + 1),
            },
        )?);
        let a = Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        let b = Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
        children.push(Geometry::path(&[a, b])?);
    }
    Geometry::collection(children)
}
