//! Flat coordinate storage owned by a simple geometry.

use nalgebra::Vector2;

use crate::error::{GeomError, GeomResult};

/// Ordinates carried per point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoordDim {
    #[default]
    Xy,
    Xyz,
    Xym,
    Xyzm,
}

impl CoordDim {
    /// Ordinates per point.
    #[inline]
    pub fn stride(self) -> usize {
        match self {
            CoordDim::Xy => 2,
            CoordDim::Xyz | CoordDim::Xym => 3,
            CoordDim::Xyzm => 4,
        }
    }

    #[inline]
    pub fn has_z(self) -> bool {
        matches!(self, CoordDim::Xyz | CoordDim::Xyzm)
    }

    #[inline]
    pub fn has_m(self) -> bool {
        matches!(self, CoordDim::Xym | CoordDim::Xyzm)
    }

    /// Smallest dimensionality holding both `self` and `other`.
    pub fn union(self, other: CoordDim) -> CoordDim {
        match (self.has_z() || other.has_z(), self.has_m() || other.has_m()) {
            (false, false) => CoordDim::Xy,
            (true, false) => CoordDim::Xyz,
            (false, true) => CoordDim::Xym,
            (true, true) => CoordDim::Xyzm,
        }
    }

    /// Dimensionality from a per-point ordinate count; 3 is read as XYZ.
    pub fn from_stride(stride: usize) -> GeomResult<Self> {
        match stride {
            2 => Ok(CoordDim::Xy),
            3 => Ok(CoordDim::Xyz),
            4 => Ok(CoordDim::Xyzm),
            _ => Err(GeomError::InvalidArgument(format!(
                "coordinate dimension must be 2, 3 or 4, got {stride}"
            ))),
        }
    }
}

/// Ordered flat ordinates plus their dimensionality.
///
/// Invariant: `ords.len()` is a multiple of `dim.stride()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoordBuffer {
    ords: Vec<f64>,
    dim: CoordDim,
}

impl CoordBuffer {
    /// Copy `ords` into a fresh buffer; the reservation is fallible.
    pub fn from_slice(dim: CoordDim, ords: &[f64]) -> GeomResult<Self> {
        if ords.len() % dim.stride() != 0 {
            return Err(GeomError::InvalidArgument(format!(
                "{} ordinates is not a multiple of stride {}",
                ords.len(),
                dim.stride()
            )));
        }
        let mut buf = Vec::new();
        buf.try_reserve_exact(ords.len())
            .map_err(|_| GeomError::OutOfMemory {
                ordinates: ords.len(),
            })?;
        buf.extend_from_slice(ords);
        Ok(Self { ords: buf, dim })
    }

    /// Take ownership of an existing ordinate vector.
    pub fn from_vec(dim: CoordDim, ords: Vec<f64>) -> GeomResult<Self> {
        if ords.len() % dim.stride() != 0 {
            return Err(GeomError::InvalidArgument(format!(
                "{} ordinates is not a multiple of stride {}",
                ords.len(),
                dim.stride()
            )));
        }
        Ok(Self { ords, dim })
    }

    /// XY buffer from planar points.
    pub fn from_xy(points: &[Vector2<f64>]) -> GeomResult<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(points.len() * 2)
            .map_err(|_| GeomError::OutOfMemory {
                ordinates: points.len() * 2,
            })?;
        for p in points {
            buf.push(p.x);
            buf.push(p.y);
        }
        Ok(Self {
            ords: buf,
            dim: CoordDim::Xy,
        })
    }

    #[inline]
    pub fn dim(&self) -> CoordDim {
        self.dim
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ords.len() / self.dim.stride()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ords.is_empty()
    }

    #[inline]
    pub fn ordinates(&self) -> &[f64] {
        &self.ords
    }

    /// All ordinates of point `i`.
    #[inline]
    pub fn point_ords(&self, i: usize) -> &[f64] {
        let s = self.dim.stride();
        &self.ords[i * s..(i + 1) * s]
    }

    /// Planar position of point `i`.
    #[inline]
    pub fn xy(&self, i: usize) -> Vector2<f64> {
        let s = self.dim.stride();
        Vector2::new(self.ords[i * s], self.ords[i * s + 1])
    }

    pub fn iter_xy(&self) -> impl ExactSizeIterator<Item = Vector2<f64>> + '_ {
        self.ords
            .chunks_exact(self.dim.stride())
            .map(|c| Vector2::new(c[0], c[1]))
    }

    /// New buffer with points in reverse order (all ordinates kept).
    pub fn reversed(&self) -> Self {
        let mut out = Vec::with_capacity(self.ords.len());
        for c in self.ords.chunks_exact(self.dim.stride()).rev() {
            out.extend_from_slice(c);
        }
        Self {
            ords: out,
            dim: self.dim,
        }
    }

    /// New buffer keeping only the points whose index passes `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(usize) -> bool) -> Self {
        let mut out = Vec::with_capacity(self.ords.len());
        for (i, c) in self.ords.chunks_exact(self.dim.stride()).enumerate() {
            if keep(i) {
                out.extend_from_slice(c);
            }
        }
        Self {
            ords: out,
            dim: self.dim,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_mismatch_is_rejected() {
        assert!(CoordBuffer::from_slice(CoordDim::Xyz, &[1.0, 2.0]).is_err());
        let b = CoordBuffer::from_slice(CoordDim::Xyz, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(b.len(), 2);
        assert_eq!(b.xy(1), Vector2::new(4.0, 5.0));
    }

    #[test]
    fn reverse_keeps_extra_ordinates() {
        let b = CoordBuffer::from_slice(CoordDim::Xym, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let r = b.reversed();
        assert_eq!(r.ordinates(), &[4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);
        assert_eq!(r.dim(), CoordDim::Xym);
    }

    #[test]
    fn dim_union() {
        assert_eq!(CoordDim::Xyz.union(CoordDim::Xym), CoordDim::Xyzm);
        assert_eq!(CoordDim::Xy.union(CoordDim::Xy), CoordDim::Xy);
    }
}
