//! Geometry module for integer IC layout data
//!
//! Bounded points, strict rectangles, polygons, region outlines and the
//! Manhattan orientation group used to place cells.
//!
//! # Submodules
//! - `orientation` - The 8 Manhattan orientations and their composition
//! - `point` - Range-checked integer points
//! - `rectangle` - Axis-aligned rectangles with positive area
//! - `polygon` - Closed vertex rings
//! - `shapes` - Region outlines, union of tiles, maximal vertex query

mod orientation;
mod point;
mod rectangle;
mod polygon;
pub mod shapes;

pub use orientation::{Matrix, Orientation};
pub use point::{Point, MAX_COORD};
pub use rectangle::Rectangle;
pub use polygon::Polygon;
pub use shapes::{PathSegment, Region};
