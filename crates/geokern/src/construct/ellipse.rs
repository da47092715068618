//! Ellipse record, derived properties and stroking.

use std::f64::consts::{PI, TAU};

use nalgebra::Vector2;

use super::primitives::project;
use crate::error::{GeomError, GeomResult};

/// Ellipse given by centre, semi-axes and the azimuth of the major axis.
///
/// A circle is `major == minor` with azimuth conventionally 0. Plain value
/// type, freely copied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Vector2<f64>,
    pub major: f64,
    pub minor: f64,
    /// Degrees, clockwise from north.
    pub azimuth: f64,
}

impl Ellipse {
    #[inline]
    pub fn new(center: Vector2<f64>, major: f64, minor: f64, azimuth: f64) -> Self {
        Self {
            center,
            major,
            minor,
            azimuth,
        }
    }

    #[inline]
    pub fn circle(center: Vector2<f64>, radius: f64) -> Self {
        Self::new(center, radius, radius, 0.0)
    }

    #[inline]
    pub fn is_circle(&self) -> bool {
        self.major == self.minor
    }

    /// `√(a²−b²)`; clamped at 0 when `minor > major`.
    pub fn focus_distance(&self) -> f64 {
        (self.major * self.major - self.minor * self.minor)
            .max(0.0)
            .sqrt()
    }

    /// Fails with a domain error when the major axis is zero.
    pub fn eccentricity(&self) -> GeomResult<f64> {
        if self.major == 0.0 {
            return Err(GeomError::Domain("eccentricity of a zero major axis"));
        }
        Ok(self.focus_distance() / self.major)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        PI * self.major * self.minor
    }

    /// Exact for circles, Ramanujan's first approximation otherwise.
    pub fn perimeter(&self) -> f64 {
        let (a, b) = (self.major, self.minor);
        if a == b {
            TAU * a
        } else {
            PI * (3.0 * (a + b) - (10.0 * a * b + 3.0 * (a * a + b * b)).sqrt())
        }
    }

    /// The two foci, on the major axis either side of the centre.
    pub fn foci(&self) -> (Vector2<f64>, Vector2<f64>) {
        let dis = self.focus_distance();
        (
            project(self.center, dis, self.azimuth),
            project(self.center, -dis, self.azimuth),
        )
    }

    /// `segments + 1` boundary points, first repeated as last, starting at the
    /// major-axis endpoint. Empty when `segments < 3`; the reservation is fallible.
    pub fn stroke_points(&self, segments: usize) -> GeomResult<Vec<Vector2<f64>>> {
        if segments < 3 {
            tracing::debug!(segments, "stroke refused: fewer than 3 segments");
            return Ok(Vec::new());
        }
        let n = segments.saturating_add(1);
        let mut pts = Vec::new();
        pts.try_reserve_exact(n)
            .map_err(|_| GeomError::OutOfMemory {
                ordinates: n.saturating_mul(2),
            })?;
        let qu = project(self.center, self.major, self.azimuth);
        let az = (qu.y - self.center.y).atan2(qu.x - self.center.x);
        let (saz, caz) = az.sin_cos();
        for i in 0..segments {
            let t = TAU - TAU / segments as f64 * i as f64;
            let (st, ct) = t.sin_cos();
            pts.push(Vector2::new(
                self.center.x + self.major * ct * caz - self.minor * st * saz,
                self.center.y + self.major * ct * saz + self.minor * st * caz,
            ));
        }
        pts.push(pts[0]);
        Ok(pts)
    }
}

/// Packed stroke parameter: leading digit is the geometric dimension
/// (1 outline, 2 filled), the remaining digits the segment count (at least 3).
///
/// `236` → ring of 36 segments; `124` → closed path of 24 segments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeParam {
    pub dim: u8,
    pub segments: usize,
}

impl StrokeParam {
    /// Default used for derived circles.
    pub const AREA_36: StrokeParam = StrokeParam {
        dim: 2,
        segments: 36,
    };

    /// Largest segment count a packed parameter may ask for.
    pub const MAX_SEGMENTS: usize = 1_000_000;

    pub fn parse(param: u32) -> GeomResult<Self> {
        if param == 0 {
            return Err(GeomError::InvalidArgument(
                "stroke parameter must be non-zero".into(),
            ));
        }
        let digits = param.to_string();
        let (lead, rest) = digits.split_at(1);
        let dim = match lead {
            "1" => 1,
            "2" => 2,
            _ => {
                return Err(GeomError::InvalidArgument(format!(
                    "stroke parameter {param}: leading digit must be 1 or 2"
                )))
            }
        };
        let segments = rest.parse::<usize>().unwrap_or(0);
        if segments < 3 {
            return Err(GeomError::InvalidArgument(format!(
                "stroke parameter {param}: need at least 3 segments"
            )));
        }
        if segments > Self::MAX_SEGMENTS {
            return Err(GeomError::InvalidArgument(format!(
                "stroke parameter {param}: at most {} segments",
                Self::MAX_SEGMENTS
            )));
        }
        Ok(Self { dim, segments })
    }
}
