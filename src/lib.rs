//! Minimum-area design rule checking for hierarchical IC layouts
//!
//! A layout is a tree of cells, each holding rectangles and oriented
//! placements of other cells. [`BitmapMinAreaChecker`] flattens the tree,
//! finds every maximal 4-connected region of covered area and reports the
//! regions smaller than a minimum area through a [`ViolationSink`].
//!
//! # Example
//! ```
//! use min_area_drc::{BitmapMinAreaChecker, MinAreaChecker, Violation};
//! use min_area_drc::layout::{CellDef, LayoutLibrary};
//!
//! let mut library = LayoutLibrary::new();
//! library.add_cell(CellDef::new("TOP").with_rect(0, 0, 1, 2).with_rect(1, 0, 2, 1))?;
//!
//! let checker = BitmapMinAreaChecker;
//! let mut violations: Vec<Violation> = Vec::new();
//! checker.check(&library.cell("TOP")?, 4, &checker.default_parameters(), &mut violations)?;
//!
//! assert_eq!((violations[0].area, violations[0].x, violations[0].y), (3, 2, 1));
//! # Ok::<(), min_area_drc::DrcError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod drc;

pub use error::{DrcError, Result};

pub use drc::{
    BitmapMinAreaChecker, CheckerConfig, MinAreaChecker, ParamValue, Parameters,
    Violation, ViolationSink,
};
