//! Tolerance configuration.
//!
//! Policy
//! - Algorithms take a `GeomCfg` explicitly; nothing reads the global behind
//!   the caller's back.
//! - `set_tolerance`/`tolerance` keep the process-wide setting of the numeric
//!   facade. It is one `RwLock`, meant to be set once at startup or swapped in
//!   a scoped override (`set_tolerance` returns the previous value).

use std::sync::RwLock;

use crate::error::{GeomError, GeomResult};

/// Default distance/equality tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

static TOLERANCE: RwLock<f64> = RwLock::new(DEFAULT_TOLERANCE);

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Distances at or below `tol` count as zero; coordinates closer than
    /// `tol` count as equal.
    pub tol: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOLERANCE,
        }
    }
}

impl GeomCfg {
    pub fn new(tol: f64) -> GeomResult<Self> {
        check_tolerance(tol)?;
        Ok(Self { tol })
    }

    /// Snapshot of the process-wide tolerance.
    pub fn global() -> Self {
        Self { tol: tolerance() }
    }

    #[inline]
    pub fn near_zero(&self, v: f64) -> bool {
        v.abs() <= self.tol
    }

    #[inline]
    pub fn near(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.tol
    }
}

fn check_tolerance(tol: f64) -> GeomResult<()> {
    if !tol.is_finite() || tol < 0.0 {
        return Err(GeomError::InvalidArgument(format!(
            "tolerance must be finite and non-negative, got {tol}"
        )));
    }
    Ok(())
}

/// Current process-wide tolerance.
pub fn tolerance() -> f64 {
    *TOLERANCE.read().unwrap_or_else(|e| e.into_inner())
}

/// Replace the process-wide tolerance, returning the previous value.
pub fn set_tolerance(tol: f64) -> GeomResult<f64> {
    check_tolerance(tol)?;
    let mut guard = TOLERANCE.write().unwrap_or_else(|e| e.into_inner());
    let prev = *guard;
    *guard = tol;
    tracing::debug!(prev, tol, "tolerance changed");
    Ok(prev)
}
