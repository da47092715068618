//! Construction algorithms on raw points.
//!
//! - `circle`: two-point, three-point and three-tangent circle fitting, arcs.
//! - `ellipse`: the `Ellipse` record, its derived properties and stroking.
//! - `primitives`: segment intersection, angle bisector, projection and the
//!   small predicates shared with derivation and validity checks.
//!
//! Nothing here depends on the geometry object model; results are plain
//! values (`Ellipse`, `Vec<Vector2<f64>>`).

mod circle;
mod ellipse;
pub mod primitives;

pub use circle::{
    arc_points, circle_2p, circle_3p, circle_tangents, construct_circle, CircleMethod, Tangent,
    TangentPick,
};
pub use ellipse::{Ellipse, StrokeParam};
