//! Bounded integer points

use serde::Serialize;
use std::fmt;

use super::orientation::Orientation;
use crate::error::{invalid, Result};

/// Largest absolute coordinate accepted anywhere in a layout
///
/// Differences of two in-range coordinates fit in `i32`, and the product of
/// two differences fits in `i64`.
pub const MAX_COORD: i32 = 0x3FFF_FFFF;

/// An immutable layout point, ordered lexicographically by (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Point {
    x: i32,
    y: i32,
}

fn check_coord(value: i64, axis: &str) -> Result<i32> {
    if value < -(MAX_COORD as i64) || value > MAX_COORD as i64 {
        return Err(invalid(format!(
            "{} coordinate {} outside [-{}, {}]",
            axis, value, MAX_COORD, MAX_COORD
        )));
    }
    Ok(value as i32)
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Result<Point> {
        Self::from_wide(x as i64, y as i64)
    }

    fn from_wide(x: i64, y: i64) -> Result<Point> {
        Ok(Point {
            x: check_coord(x, "x")?,
            y: check_coord(y, "y")?,
        })
    }

    /// Build a point from coordinates already known to be in range
    pub(crate) fn from_trusted(x: i32, y: i32) -> Point {
        debug_assert!((-MAX_COORD..=MAX_COORD).contains(&x));
        debug_assert!((-MAX_COORD..=MAX_COORD).contains(&y));
        Point { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Result<Point> {
        Self::from_wide(self.x as i64 + dx as i64, self.y as i64 + dy as i64)
    }

    /// Vector sum, used to compose placement offsets
    pub fn add(&self, other: Point) -> Result<Point> {
        self.translate(other.x, other.y)
    }

    pub fn scale(&self, factor: i32) -> Result<Point> {
        Self::from_wide(self.x as i64 * factor as i64, self.y as i64 * factor as i64)
    }

    /// Reflect across the x axis (negates y)
    pub fn mirror_x(&self) -> Point {
        Point { x: self.x, y: -self.y }
    }

    /// Reflect across the y axis (negates x)
    pub fn mirror_y(&self) -> Point {
        Point { x: -self.x, y: self.y }
    }

    pub fn transform(&self, orientation: Orientation) -> Point {
        let (x, y) = orientation.transform_xy(self.x, self.y);
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
