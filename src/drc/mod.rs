//! Minimum-area Design Rule Check (DRC)
//!
//! Flattens a cell hierarchy, compresses the rectangle edges into a dense
//! grid, and flood-fills the grid's occupancy bitmap to find every connected
//! region whose area is below the rule minimum.
//!
//! # Submodules
//! - `types` - Violations, the sink contract, parameters and typed config
//! - `grid` - Coordinate compression
//! - `bitmap` - Bit-packed cell occupancy
//! - `extract` - Reverse-lexicographic flood fill and violation emission
//! - `checker` - Checker trait and the bitmap implementation

mod types;
mod grid;
mod bitmap;
mod extract;
mod checker;

// Re-export public types
pub use types::{
    CheckerConfig, ParamValue, Parameters, Violation, ViolationSink,
    NUM_THREADS, RECTS_PER_STRIPE, REPORT_TILES,
};

pub use grid::Grid;
pub use bitmap::Bitmap;
pub use extract::{ExtractStats, RegionExtractor};

pub use checker::{
    BitmapMinAreaChecker,
    MinAreaChecker,
};
