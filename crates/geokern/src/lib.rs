//! 2D geometry kernel: a recursive geometry tree plus a mode-dispatched
//! algorithm engine.
//!
//! Layout
//! - `model`: coordinate buffers and the simple/composite geometry tree.
//! - `measure`: length, area, extents and the shared-accumulator centroid.
//! - `construct`: circle/ellipse fitting, stroking and segment primitives.
//! - `derive`, `combine`, `relate`, `check`: derived geometries, overlay,
//!   relation predicates and validity checks.
//! - `ops`: the numeric-mode facade over all of the above (`mode` holds the codes).
//! - `io`: flat-array interchange and record buffering.
//!
//! Every algorithm takes a [`GeomCfg`]; the process-wide tolerance in [`cfg`]
//! only seeds `GeomCfg::global()`.

pub mod cfg;
pub mod check;
pub mod combine;
pub mod construct;
pub mod convert;
pub mod derive;
pub mod error;
pub mod io;
pub mod measure;
pub mod mode;
pub mod model;
pub mod ops;
pub mod relate;
pub mod sample;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{set_tolerance, tolerance, GeomCfg, DEFAULT_TOLERANCE};
pub use error::{GeomError, GeomResult};
pub use model::{CoordBuffer, CoordDim, GeomKind, Geometry};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::GeomCfg;
    pub use crate::check::CheckFlags;
    pub use crate::construct::{CircleMethod, Ellipse, StrokeParam, TangentPick};
    pub use crate::error::{GeomError, GeomResult};
    pub use crate::io::{OraArrays, Record, RecordBuffer};
    pub use crate::mode::{
        CheckMode, CombineMode, GeoMode, Mode, ModifyMode, RelationMode, ValueMode,
    };
    pub use crate::model::{CoordBuffer, CoordDim, GeomKind, Geometry};
    pub use crate::relate::Relation;
    pub use nalgebra::Vector2 as Vec2;
}
