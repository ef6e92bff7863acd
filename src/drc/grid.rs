//! Coordinate compression of flattened rectangles
//!
//! Every distinct rectangle edge coordinate becomes one grid line; cell
//! `(i, j)` covers `[xa[i], xa[i+1]) x [ya[j], ya[j+1])`.

use rayon::prelude::*;
use std::collections::HashMap;
use std::ops::Range;

use crate::error::{invalid, Result};
use crate::geometry::Rectangle;

#[derive(Debug, Clone, Default)]
pub struct Grid {
    xa: Vec<i32>,
    ya: Vec<i32>,
    x_index: HashMap<i32, usize>,
    y_index: HashMap<i32, usize>,
}

fn compress(mut coords: Vec<i32>) -> (Vec<i32>, HashMap<i32, usize>) {
    coords.par_sort_unstable();
    coords.dedup();
    let index = coords.iter().enumerate().map(|(i, &c)| (c, i)).collect();
    (coords, index)
}

impl Grid {
    /// Build the grid lines of `rects`; no rectangles gives an empty grid
    pub fn build(rects: &[Rectangle]) -> Result<Grid> {
        let xs = rects.iter().flat_map(|r| [r.min_x(), r.max_x()]).collect();
        let ys = rects.iter().flat_map(|r| [r.min_y(), r.max_y()]).collect();
        let (xa, x_index) = compress(xs);
        let (ya, y_index) = compress(ys);
        let grid = Grid { xa, ya, x_index, y_index };
        if grid.xsize().checked_mul(grid.ysize()).is_none() {
            return Err(invalid(format!(
                "grid of {} x {} cells is too large",
                grid.xsize(),
                grid.ysize()
            )));
        }
        Ok(grid)
    }

    /// Number of cell columns
    pub fn xsize(&self) -> usize {
        self.xa.len().saturating_sub(1)
    }

    /// Number of cell rows
    pub fn ysize(&self) -> usize {
        self.ya.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.xsize() == 0 || self.ysize() == 0
    }

    pub fn xa(&self) -> &[i32] {
        &self.xa
    }

    pub fn ya(&self) -> &[i32] {
        &self.ya
    }

    pub fn x_index_of(&self, x: i32) -> Option<usize> {
        self.x_index.get(&x).copied()
    }

    pub fn y_index_of(&self, y: i32) -> Option<usize> {
        self.y_index.get(&y).copied()
    }

    pub fn tile_width(&self, x: usize) -> i64 {
        self.xa[x + 1] as i64 - self.xa[x] as i64
    }

    pub fn tile_height(&self, y: usize) -> i64 {
        self.ya[y + 1] as i64 - self.ya[y] as i64
    }

    pub fn tile_area(&self, x: usize, y: usize) -> i64 {
        self.tile_width(x) * self.tile_height(y)
    }

    /// Real-coordinate rectangle of cell `(x, y)`
    pub fn tile(&self, x: usize, y: usize) -> Rectangle {
        Rectangle::from_trusted(self.xa[x], self.ya[y], self.xa[x + 1], self.ya[y + 1])
    }

    /// Cell index ranges covered by `rect`
    pub fn cell_range(&self, rect: &Rectangle) -> Result<(Range<usize>, Range<usize>)> {
        let lookup = |found: Option<usize>, c: i32| {
            found.ok_or_else(|| invalid(format!("coordinate {} is not a grid line", c)))
        };
        let x0 = lookup(self.x_index_of(rect.min_x()), rect.min_x())?;
        let x1 = lookup(self.x_index_of(rect.max_x()), rect.max_x())?;
        let y0 = lookup(self.y_index_of(rect.min_y()), rect.min_y())?;
        let y1 = lookup(self.y_index_of(rect.max_y()), rect.max_y())?;
        Ok((x0..x1, y0..y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: i32, y0: i32, x1: i32, y1: i32) -> Rectangle {
        Rectangle::from_coords(x0, y0, x1, y1).unwrap()
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::build(&[]).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.xsize(), 0);
        assert_eq!(grid.ysize(), 0);
    }

    #[test]
    fn test_axes_are_sorted_and_deduplicated() {
        let grid = Grid::build(&[rect(5, 0, 10, 3), rect(-2, 1, 5, 3), rect(0, 0, 10, 1)]).unwrap();
        assert_eq!(grid.xa(), &[-2, 0, 5, 10]);
        assert_eq!(grid.ya(), &[0, 1, 3]);
        assert_eq!(grid.xsize(), 3);
        assert_eq!(grid.ysize(), 2);
        assert_eq!(grid.x_index_of(5), Some(2));
        assert_eq!(grid.x_index_of(4), None);
    }

    #[test]
    fn test_cell_range_and_tiles() {
        let rects = [rect(0, 0, 1, 2), rect(1, 0, 2, 1)];
        let grid = Grid::build(&rects).unwrap();
        let (xr, yr) = grid.cell_range(&rects[0]).unwrap();
        assert_eq!((xr, yr), (0..1, 0..2));
        assert_eq!(grid.tile(1, 0), rect(1, 0, 2, 1));
        assert_eq!(grid.tile_area(0, 1), 1);
    }

    #[test]
    fn test_foreign_rectangle_has_no_cell_range() {
        let grid = Grid::build(&[rect(0, 0, 4, 4)]).unwrap();
        assert!(grid.cell_range(&rect(1, 0, 4, 4)).is_err());
    }
}
