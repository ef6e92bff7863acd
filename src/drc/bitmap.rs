//! Dense occupancy bitmap over grid cells
//!
//! One bit per cell, column-major (`x * ysize + y`), in a single allocation.

use rayon::prelude::*;

use super::grid::Grid;
use crate::error::Result;
use crate::geometry::Rectangle;

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Debug, Clone)]
pub struct Bitmap {
    xsize: usize,
    ysize: usize,
    words: Vec<u64>,
}

impl Bitmap {
    pub fn new(xsize: usize, ysize: usize) -> Self {
        let cells = xsize * ysize;
        Self {
            xsize,
            ysize,
            words: vec![0; cells.div_ceil(WORD_BITS)],
        }
    }

    /// Mark every cell covered by any of `rects` (union semantics)
    pub fn from_rectangles(grid: &Grid, rects: &[Rectangle]) -> Result<Self> {
        let mut bitmap = Self::new(grid.xsize(), grid.ysize());
        for rect in rects {
            let (xs, ys) = grid.cell_range(rect)?;
            for x in xs {
                for y in ys.clone() {
                    bitmap.set(x, y);
                }
            }
        }
        Ok(bitmap)
    }

    pub fn xsize(&self) -> usize {
        self.xsize
    }

    pub fn ysize(&self) -> usize {
        self.ysize
    }

    fn bit(&self, x: usize, y: usize) -> (usize, u64) {
        debug_assert!(x < self.xsize && y < self.ysize);
        let i = x * self.ysize + y;
        (i / WORD_BITS, 1u64 << (i % WORD_BITS))
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        let (w, mask) = self.bit(x, y);
        self.words[w] & mask != 0
    }

    pub fn set(&mut self, x: usize, y: usize) {
        let (w, mask) = self.bit(x, y);
        self.words[w] |= mask;
    }

    pub fn clear(&mut self, x: usize, y: usize) {
        let (w, mask) = self.bit(x, y);
        self.words[w] &= !mask;
    }

    /// Number of occupied cells
    pub fn count_occupied(&self) -> usize {
        self.words.par_iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_clear(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Total real area of the occupied cells
    pub fn occupied_area(&self, grid: &Grid) -> i64 {
        (0..self.xsize)
            .into_par_iter()
            .map(|x| {
                let column: i64 = (0..self.ysize)
                    .filter(|&y| self.get(x, y))
                    .map(|y| grid.tile_height(y))
                    .sum();
                column * grid.tile_width(x)
            })
            .sum()
    }
}
