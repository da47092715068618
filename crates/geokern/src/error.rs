//! Defines [`GeomError`], representing all errors returned by this crate.
//!
//! Degenerate inputs (collinear points, parallel tangents, too few stroke
//! segments) are not errors; those report empty results through the normal
//! return value.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeomError {
    /// Result is mathematically undefined (centroid of nothing, zero major axis).
    #[error("undefined result: {0}")]
    Domain(&'static str),

    /// Child index outside `[0, count)`.
    #[error("child index {index} out of range for {count} children")]
    Index { index: usize, count: usize },

    /// Integer mode code that maps to no algorithm.
    #[error("unrecognized mode code {0}")]
    UnknownMode(i32),

    /// Malformed argument (stroke parameter, flat arrays, point counts).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation is not defined for the given geometry kind(s).
    #[error("incorrect geometry kind for operation: {0}")]
    IncorrectGeometryKind(String),

    /// The host refused a buffer reservation.
    #[error("out of memory: could not reserve {ordinates} ordinates")]
    OutOfMemory { ordinates: usize },

    /// [polylabel::errors::PolylabelError]
    #[error(transparent)]
    Polylabel(#[from] polylabel::errors::PolylabelError),
}

/// Crate-specific result type.
pub type GeomResult<T> = std::result::Result<T, GeomError>;
