//! Min-area checker entry points

use std::time::Instant;

use super::bitmap::Bitmap;
use super::extract::RegionExtractor;
use super::grid::Grid;
use super::types::{CheckerConfig, Parameters, ViolationSink};
use crate::error::Result;
use crate::layout::{flatten, LayoutCell};

/// A minimum-area design-rule checking algorithm
pub trait MinAreaChecker {
    fn algorithm_name(&self) -> &str;

    /// Every recognized parameter with its default value
    fn default_parameters(&self) -> Parameters;

    /// Report every connected region of `top` whose area is below `min_area`
    fn check(
        &self,
        top: &dyn LayoutCell,
        min_area: i64,
        parameters: &Parameters,
        sink: &mut dyn ViolationSink,
    ) -> Result<()>;
}

/// Flatten, compress to a grid, flood-fill the occupancy bitmap.
///
/// Single-threaded and synchronous. `NumThreads` and `RectsPerStripe` are
/// accepted for compatibility with a striped variant and otherwise ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapMinAreaChecker;

impl MinAreaChecker for BitmapMinAreaChecker {
    fn algorithm_name(&self) -> &str {
        "BitMapMinAreaChecker"
    }

    fn default_parameters(&self) -> Parameters {
        CheckerConfig::default().to_parameters()
    }

    fn check(
        &self,
        top: &dyn LayoutCell,
        min_area: i64,
        parameters: &Parameters,
        sink: &mut dyn ViolationSink,
    ) -> Result<()> {
        let start = Instant::now();
        let config = CheckerConfig::from_parameters(parameters)?;
        if config.num_threads > 1 {
            tracing::debug!(
                num_threads = config.num_threads,
                rects_per_stripe = config.rects_per_stripe,
                "[MinArea] Striped options ignored, running single-threaded"
            );
        }

        let mut rects = Vec::new();
        let flat = flatten(top, &mut |r| rects.push(r))?;
        tracing::debug!(
            "[MinArea] Flattened '{}': {} rectangles from {} instances (depth {}) in {:?}",
            top.name(),
            flat.rectangles,
            flat.instances,
            flat.max_depth,
            start.elapsed()
        );

        let grid = Grid::build(&rects)?;
        let mut bitmap = Bitmap::from_rectangles(&grid, &rects)?;
        drop(rects);
        tracing::debug!(
            "[MinArea] Grid {} x {} with {} occupied cells in {:?}",
            grid.xsize(),
            grid.ysize(),
            bitmap.count_occupied(),
            start.elapsed()
        );

        let occupied_area = tracing::enabled!(tracing::Level::DEBUG).then(|| bitmap.occupied_area(&grid));

        let stats = RegionExtractor::new(&grid, &mut bitmap, config.report_tiles).run(min_area, sink)?;

        if let Some(expected) = occupied_area {
            debug_assert_eq!(expected, stats.total_area);
            tracing::debug!(
                "[MinArea] Occupied area {} vs extracted region area {}",
                expected,
                stats.total_area
            );
        }
        tracing::info!(
            "[MinArea] Check of '{}' completed: {} regions, {} violations below {} in {:?}",
            top.name(),
            stats.regions,
            stats.violations,
            min_area,
            start.elapsed()
        );
        Ok(())
    }
}
