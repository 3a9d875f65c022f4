//! Collaborators of the tile codec: space-filling curves and the Web Mercator projection.

mod curve;
pub use curve::*;

pub mod projection;
