//! Hierarchy flattening
//!
//! Depth-first walk over a cell tree that carries the accumulated placement
//! (offset + orientation) by value and emits every instantiated rectangle in
//! top-level coordinates. Work is proportional to the number of instantiated
//! rectangles, which hierarchy reuse can make much larger than the number of
//! rectangles actually stored in the cells.

use super::cell::LayoutCell;
use crate::error::{DrcError, Result};
use crate::geometry::{Orientation, Point, Rectangle};

/// Nesting deeper than this is treated as a cyclic hierarchy
pub const MAX_HIERARCHY_DEPTH: usize = 256;

/// Counters gathered while flattening
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenStats {
    /// Rectangles emitted in top-level coordinates
    pub rectangles: usize,
    /// Cell instances visited, the top cell included
    pub instances: usize,
    /// Deepest instance nesting (the top cell is depth 0)
    pub max_depth: usize,
}

/// Accumulated placement of the cell currently being walked
#[derive(Debug, Clone, Copy)]
struct Placement {
    offset: Point,
    orientation: Orientation,
    depth: usize,
}

/// Flatten `top` and hand each absolute rectangle to `sink`
pub fn flatten(top: &dyn LayoutCell, sink: &mut dyn FnMut(Rectangle)) -> Result<FlattenStats> {
    let mut stats = FlattenStats::default();
    let root = Placement {
        offset: Point::ORIGIN,
        orientation: Orientation::R0,
        depth: 0,
    };
    walk(top, root, sink, &mut stats)?;
    Ok(stats)
}

/// Flatten `top` into a freshly allocated rectangle list
pub fn flatten_to_vec(top: &dyn LayoutCell) -> Result<(Vec<Rectangle>, FlattenStats)> {
    let mut rects = Vec::new();
    let stats = flatten(top, &mut |r| rects.push(r))?;
    Ok((rects, stats))
}

fn walk(
    cell: &dyn LayoutCell,
    at: Placement,
    sink: &mut dyn FnMut(Rectangle),
    stats: &mut FlattenStats,
) -> Result<()> {
    if at.depth > MAX_HIERARCHY_DEPTH {
        return Err(DrcError::CyclicHierarchy(cell.name().to_string()));
    }
    stats.instances += 1;
    stats.max_depth = stats.max_depth.max(at.depth);

    cell.traverse_rectangles(&mut |min_x, min_y, max_x, max_y| {
        let local = Rectangle::from_coords(min_x, min_y, max_x, max_y)?;
        let placed = local.transform(at.orientation).translate(at.offset)?;
        stats.rectangles += 1;
        sink(placed);
        Ok(())
    })?;

    cell.traverse_subcell_instances(&mut |child, anchor_x, anchor_y, sub_orientation| {
        let anchor = Point::new(anchor_x, anchor_y)?;
        let child_at = Placement {
            offset: at.offset.add(anchor.transform(at.orientation))?,
            orientation: at.orientation.concatenate(sub_orientation),
            depth: at.depth + 1,
        };
        walk(child, child_at, &mut *sink, &mut *stats)
    })
}
