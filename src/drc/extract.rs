//! Region extraction and violation reporting
//!
//! Cells are scanned in strictly decreasing lexicographic order of
//! (x index, y index). The first occupied cell met starts a 4-connected
//! flood fill driven by an explicit stack; every cell is cleared when pushed,
//! so each occupied cell is visited exactly once over the whole scan.
//!
//! Because of the scan order the seed is the lexicographically largest cell
//! of its region, so the upper-right corner of the seed tile is the region's
//! maximal vertex and needs no second pass.

use super::bitmap::Bitmap;
use super::grid::Grid;
use super::types::ViolationSink;
use crate::error::Result;
use crate::geometry::shapes::from_tiles;
use crate::geometry::Rectangle;

/// Counters from one extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Connected regions found, compliant ones included
    pub regions: usize,
    /// Regions reported as violations
    pub violations: usize,
    /// Sum of all region areas
    pub total_area: i64,
}

/// One connected region, after its flood fill
#[derive(Debug)]
struct Extracted {
    area: i64,
    tiles: Vec<Rectangle>,
}

pub struct RegionExtractor<'a> {
    grid: &'a Grid,
    bitmap: &'a mut Bitmap,
    report_tiles: bool,
    stack: Vec<(usize, usize)>,
}

impl<'a> RegionExtractor<'a> {
    pub fn new(grid: &'a Grid, bitmap: &'a mut Bitmap, report_tiles: bool) -> Self {
        debug_assert_eq!((grid.xsize(), grid.ysize()), (bitmap.xsize(), bitmap.ysize()));
        Self {
            grid,
            bitmap,
            report_tiles,
            stack: Vec::new(),
        }
    }

    /// Drain the bitmap, reporting every region with `area < min_area`
    pub fn run(&mut self, min_area: i64, sink: &mut dyn ViolationSink) -> Result<ExtractStats> {
        let mut stats = ExtractStats::default();
        let (xsize, ysize) = (self.grid.xsize(), self.grid.ysize());

        for x0 in (0..xsize).rev() {
            for y0 in (0..ysize).rev() {
                if !self.bitmap.get(x0, y0) {
                    continue;
                }
                let region = self.extract_region(x0, y0);
                stats.regions += 1;
                stats.total_area += region.area;

                if region.area < min_area {
                    let x = self.grid.xa()[x0 + 1];
                    let y = self.grid.ya()[y0 + 1];
                    let shape = if self.report_tiles {
                        Some(from_tiles(&region.tiles)?)
                    } else {
                        None
                    };
                    sink.report_violation(region.area, x, y, shape);
                    stats.violations += 1;
                }
            }
        }

        debug_assert!(self.bitmap.is_clear());
        Ok(stats)
    }

    fn extract_region(&mut self, x0: usize, y0: usize) -> Extracted {
        let mut region = Extracted {
            area: 0,
            tiles: Vec::new(),
        };
        self.stack.clear();
        self.push(x0, y0, &mut region);

        while let Some(&(x, y)) = self.stack.last() {
            match self.occupied_neighbor(x, y) {
                Some((nx, ny)) => self.push(nx, ny, &mut region),
                None => {
                    self.stack.pop();
                }
            }
        }
        region
    }

    fn push(&mut self, x: usize, y: usize, region: &mut Extracted) {
        self.bitmap.clear(x, y);
        region.area += self.grid.tile_area(x, y);
        if self.report_tiles {
            region.tiles.push(self.grid.tile(x, y));
        }
        self.stack.push((x, y));
    }

    /// Any still-occupied 4-neighbour, checked left, right, down, up
    fn occupied_neighbor(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        if x > 0 && self.bitmap.get(x - 1, y) {
            return Some((x - 1, y));
        }
        if x + 1 < self.grid.xsize() && self.bitmap.get(x + 1, y) {
            return Some((x + 1, y));
        }
        if y > 0 && self.bitmap.get(x, y - 1) {
            return Some((x, y - 1));
        }
        if y + 1 < self.grid.ysize() && self.bitmap.get(x, y + 1) {
            return Some((x, y + 1));
        }
        None
    }
}
