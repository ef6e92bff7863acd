//! Axis-aligned rectangles with strictly positive width and height

use serde::Serialize;
use std::fmt;

use super::orientation::Orientation;
use super::point::Point;
use crate::error::{invalid, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rectangle {
    min: Point,
    max: Point,
}

impl Rectangle {
    /// Fails unless `min` is strictly below and left of `max`
    pub fn new(min: Point, max: Point) -> Result<Rectangle> {
        if min.x() >= max.x() || min.y() >= max.y() {
            return Err(invalid(format!(
                "degenerate rectangle {} - {}: min must be strictly less than max",
                min, max
            )));
        }
        Ok(Rectangle { min, max })
    }

    pub fn from_coords(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Result<Rectangle> {
        Self::new(Point::new(min_x, min_y)?, Point::new(max_x, max_y)?)
    }

    /// Corners already known to satisfy the invariant (grid tiles)
    pub(crate) fn from_trusted(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Rectangle {
        debug_assert!(min_x < max_x && min_y < max_y);
        Rectangle {
            min: Point::from_trusted(min_x, min_y),
            max: Point::from_trusted(max_x, max_y),
        }
    }

    pub fn min(&self) -> Point {
        self.min
    }

    pub fn max(&self) -> Point {
        self.max
    }

    pub fn min_x(&self) -> i32 {
        self.min.x()
    }

    pub fn min_y(&self) -> i32 {
        self.min.y()
    }

    pub fn max_x(&self) -> i32 {
        self.max.x()
    }

    pub fn max_y(&self) -> i32 {
        self.max.y()
    }

    pub fn width(&self) -> i64 {
        self.max_x() as i64 - self.min_x() as i64
    }

    pub fn height(&self) -> i64 {
        self.max_y() as i64 - self.min_y() as i64
    }

    pub fn area(&self) -> i64 {
        self.width() * self.height()
    }

    pub fn translate(&self, offset: Point) -> Result<Rectangle> {
        Ok(Rectangle {
            min: self.min.add(offset)?,
            max: self.max.add(offset)?,
        })
    }

    /// Transform both corners, then take the componentwise min and max.
    /// A Manhattan transform keeps the rectangle axis-aligned and non-degenerate.
    pub fn transform(&self, orientation: Orientation) -> Rectangle {
        let a = self.min.transform(orientation);
        let b = self.max.transform(orientation);
        Rectangle {
            min: Point::from_trusted(a.x().min(b.x()), a.y().min(b.y())),
            max: Point::from_trusted(a.x().max(b.x()), a.y().max(b.y())),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.min, self.max)
    }
}
