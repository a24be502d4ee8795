pub mod coord;
pub mod filter;
pub mod region;

pub use coord::Coordinate;
pub use filter::{CircleFilter, GeoFilter, LatticeBounds};
pub use region::{BoundingBox, Circle, Region};
