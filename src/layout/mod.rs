//! Hierarchical layout access
//!
//! # Submodules
//! - `cell` - The read-only cell capability consumed by the checker
//! - `library` - JSON-loadable in-memory cell library
//! - `flatten` - Hierarchy walk producing absolute rectangles

mod cell;
mod library;
mod flatten;

pub use cell::LayoutCell;

pub use library::{
    CellDef,
    CellRef,
    InstanceDef,
    LayoutLibrary,
};

pub use flatten::{
    flatten,
    flatten_to_vec,
    FlattenStats,
    MAX_HIERARCHY_DEPTH,
};
