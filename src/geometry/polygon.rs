//! Closed polygons used for violation-shape reporting

use serde::Serialize;

use super::point::Point;
use crate::error::{invalid, Result};

/// Ordered, non-empty vertex list; the last vertex connects back to the first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Polygon> {
        if points.is_empty() {
            return Err(invalid("polygon needs at least one point"));
        }
        Ok(Polygon { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: construction rejects empty vertex lists
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Twice the signed area (shoelace); positive for counter-clockwise rings
    pub fn twice_signed_area(&self) -> i128 {
        let n = self.points.len();
        (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x() as i128 * b.y() as i128 - b.x() as i128 * a.y() as i128
            })
            .sum()
    }

    /// Vertex with the greatest x, ties broken by greatest y
    pub fn max_vertex(&self) -> Point {
        self.points
            .iter()
            .copied()
            .max()
            .unwrap_or(Point::ORIGIN)
    }
}
