//! Geometry object model.
//!
//! - `CoordBuffer`/`CoordDim`: flat ordinates owned by one simple node.
//! - `Geometry`: the tagged tree (`Simple` leaves, `Composite` interior nodes).
//! - `Components`: the tree flattened by dimension for the algorithms.

mod components;
mod coords;
mod geometry;

pub use components::{group_rings, hole_flags, AreaPart, Components};
pub use coords::{CoordBuffer, CoordDim};
pub use geometry::{Composite, GeomKind, Geometry, Simple};

#[cfg(test)]
mod tests;
