//! Read-only view of one cell in a layout hierarchy

use crate::error::Result;
use crate::geometry::Orientation;

/// Capabilities the checker needs from a layout database cell.
///
/// Coordinates are in the cell's local frame. Callbacks return `Result` so
/// that a failure deep in a traversal stops the walk; implementations must
/// forward any callback error unchanged.
pub trait LayoutCell {
    fn name(&self) -> &str;

    /// Visit every rectangle owned by this cell as `(min_x, min_y, max_x, max_y)`
    fn traverse_rectangles(
        &self,
        f: &mut dyn FnMut(i32, i32, i32, i32) -> Result<()>,
    ) -> Result<()>;

    /// Visit every placed sub-cell as `(cell, anchor_x, anchor_y, orientation)`
    fn traverse_subcell_instances(
        &self,
        f: &mut dyn FnMut(&dyn LayoutCell, i32, i32, Orientation) -> Result<()>,
    ) -> Result<()>;
}
