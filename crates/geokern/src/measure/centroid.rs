//! Centroid accumulation shared by every node of a tree.
//!
//! One accumulator bank per dimension; the whole tree folds into the same
//! state and the bank matching the geometry's own dimension is read out.

use nalgebra::Vector2;

use crate::cfg::GeomCfg;
use crate::construct::primitives::signed_area;
use crate::error::{GeomError, GeomResult};
use crate::model::{AreaPart, Geometry};

/// Running sums for the three dimensions.
#[derive(Clone, Debug)]
pub struct CentroidAcc {
    point_sum: Vector2<f64>,
    point_n: usize,

    length_sum: Vector2<f64>,
    total_length: f64,

    area_sum: Vector2<f64>,
    total_area: f64,
    ring_mean_sum: Vector2<f64>,
    ring_n: usize,
}

impl Default for CentroidAcc {
    fn default() -> Self {
        Self {
            point_sum: Vector2::zeros(),
            point_n: 0,
            length_sum: Vector2::zeros(),
            total_length: 0.0,
            area_sum: Vector2::zeros(),
            total_area: 0.0,
            ring_mean_sum: Vector2::zeros(),
            ring_n: 0,
        }
    }
}

/// Vertex mean of a ring, closing vertex excluded.
fn ring_mean(ring: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    let open = match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    };
    if open.is_empty() {
        return None;
    }
    let sum = open.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    Some(sum / open.len() as f64)
}

impl CentroidAcc {
    pub fn add_point(&mut self, p: Vector2<f64>) {
        self.point_sum += p;
        self.point_n += 1;
    }

    /// Zero-length segments are skipped; a curve with no length at all
    /// contributes its first vertex as a point instead.
    pub fn add_curve(&mut self, pts: &[Vector2<f64>]) {
        let mut len = 0.0;
        for w in pts.windows(2) {
            let seg = (w[1] - w[0]).norm();
            if seg == 0.0 {
                continue;
            }
            len += seg;
            self.length_sum += (w[0] + w[1]) * 0.5 * seg;
        }
        self.total_length += len;
        if len == 0.0 {
            if let Some(&p) = pts.first() {
                self.add_point(p);
            }
        }
    }

    /// Each ring adds its vertex mean weighted by its area; holes subtract.
    pub fn add_area(&mut self, part: &AreaPart) {
        for (k, ring) in part.rings().enumerate() {
            let Some(mean) = ring_mean(ring) else {
                continue;
            };
            let a = signed_area(ring).abs();
            let sign = if k == 0 { 1.0 } else { -1.0 };
            self.total_area += sign * a;
            self.area_sum += mean * (sign * a);
            self.ring_mean_sum += mean;
            self.ring_n += 1;
        }
    }

    /// Fold every component of `g` into this accumulator.
    pub fn fold(&mut self, g: &Geometry, cfg: &GeomCfg) {
        let comps = g.components(cfg);
        for p in &comps.points {
            self.add_point(*p);
        }
        for c in &comps.curves {
            self.add_curve(c);
        }
        for a in &comps.areas {
            self.add_area(a);
        }
    }

    fn point_result(&self) -> GeomResult<Vector2<f64>> {
        if self.point_n == 0 {
            return Err(GeomError::Domain("centroid of zero points"));
        }
        Ok(self.point_sum / self.point_n as f64)
    }

    /// Read out the bank for dimension `dim`.
    pub fn result(&self, dim: u8) -> GeomResult<Vector2<f64>> {
        match dim {
            0 => self.point_result(),
            1 if self.total_length > 0.0 => Ok(self.length_sum / self.total_length),
            1 => self.point_result(),
            _ if self.total_area > 0.0 => Ok(self.area_sum / self.total_area),
            _ if self.ring_n > 0 => Ok(self.ring_mean_sum / self.ring_n as f64),
            _ => Err(GeomError::Domain("centroid of an empty area")),
        }
    }
}

/// Centroid of `g` using only the bank of its own dimension.
pub fn centroid(g: &Geometry, cfg: &GeomCfg) -> GeomResult<Vector2<f64>> {
    let mut acc = CentroidAcc::default();
    acc.fold(g, cfg);
    acc.result(g.dim_g())
}
