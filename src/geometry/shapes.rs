//! Region values built from tiles
//!
//! A [`Region`] is a closed path made of path segments, like a general 2D
//! shape outline. Regions built by [`from_tiles`] only ever contain straight
//! segments; curved segments can still be represented so that shapes coming
//! from elsewhere are rejected explicitly by [`max_vertex`].

use serde::Serialize;
use std::collections::HashMap;

use super::point::Point;
use super::polygon::Polygon;
use super::rectangle::Rectangle;
use crate::drc::{Bitmap, Grid};
use crate::error::{invalid, DrcError, Result};

/// One step of a region outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic curve: control point, end point
    QuadTo(Point, Point),
    /// Cubic curve: two control points, end point
    CubicTo(Point, Point, Point),
    /// Close the current contour back to its `MoveTo`
    Close,
}

/// A closed outline, possibly made of several contours (outer loops and holes)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Region {
    segments: Vec<PathSegment>,
}

impl Region {
    pub fn from_segments(segments: Vec<PathSegment>) -> Region {
        Region { segments }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append `polygon` as one closed contour
    pub fn push_polygon(&mut self, polygon: &Polygon) {
        let mut points = polygon.points().iter().copied();
        if let Some(first) = points.next() {
            self.segments.push(PathSegment::MoveTo(first));
            self.segments.extend(points.map(PathSegment::LineTo));
            self.segments.push(PathSegment::Close);
        }
    }

    /// Split a straight-edged region into one polygon per contour
    pub fn polygons(&self) -> Result<Vec<Polygon>> {
        let mut polygons = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    if !current.is_empty() {
                        polygons.push(Polygon::new(std::mem::take(&mut current))?);
                    }
                    current.push(p);
                }
                PathSegment::LineTo(p) => current.push(p),
                PathSegment::Close => {
                    if !current.is_empty() {
                        polygons.push(Polygon::new(std::mem::take(&mut current))?);
                    }
                }
                PathSegment::QuadTo(..) | PathSegment::CubicTo(..) => {
                    return Err(curved_segment());
                }
            }
        }
        if !current.is_empty() {
            polygons.push(Polygon::new(current)?);
        }
        Ok(polygons)
    }

    /// Enclosed area: outer loops count positive, holes negative
    pub fn area(&self) -> Result<i128> {
        let twice: i128 = self.polygons()?.iter().map(Polygon::twice_signed_area).sum();
        Ok(twice / 2)
    }
}

fn curved_segment() -> DrcError {
    DrcError::UnsupportedOperation("region contains curved segments; only polygonal outlines are supported".into())
}

/// Lexicographically maximal vertex of a polygonal region
///
/// Returns the vertex `(x, y)` such that no other vertex has a greater x, or
/// the same x and a greater y.
pub fn max_vertex(region: &Region) -> Result<Point> {
    let mut best: Option<Point> = None;
    for segment in region.segments() {
        let vertex = match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
            PathSegment::Close => continue,
            PathSegment::QuadTo(..) | PathSegment::CubicTo(..) => return Err(curved_segment()),
        };
        best = Some(best.map_or(vertex, |b| b.max(vertex)));
    }
    best.ok_or_else(|| invalid("region has no vertices"))
}

/// Directed boundary edge in compressed index space, interior on its left
#[derive(Clone, Copy)]
struct Edge {
    from: (usize, usize),
    to: (usize, usize),
}

impl Edge {
    fn direction(&self) -> (isize, isize) {
        step(self.from, self.to)
    }
}

fn step(from: (usize, usize), to: (usize, usize)) -> (isize, isize) {
    (
        (to.0 as isize - from.0 as isize).signum(),
        (to.1 as isize - from.1 as isize).signum(),
    )
}

/// Union of `tiles` as a region outline
///
/// Every boundary loop becomes one `MoveTo .. Close` contour with collinear
/// vertices removed. Outer loops run counter-clockwise and holes clockwise.
/// Tiles that only touch at a corner end up in separate loops.
pub fn from_tiles(tiles: &[Rectangle]) -> Result<Region> {
    let grid = Grid::build(tiles)?;
    if grid.is_empty() {
        return Ok(Region::default());
    }
    let bitmap = Bitmap::from_rectangles(&grid, tiles)?;
    let (w, h) = (grid.xsize(), grid.ysize());
    let occupied = |x: isize, y: isize| {
        x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h && bitmap.get(x as usize, y as usize)
    };

    let mut edges: Vec<Edge> = Vec::new();
    for x in 0..w {
        for y in 0..h {
            if !bitmap.get(x, y) {
                continue;
            }
            let (xi, yi) = (x as isize, y as isize);
            if !occupied(xi, yi - 1) {
                edges.push(Edge { from: (x, y), to: (x + 1, y) });
            }
            if !occupied(xi + 1, yi) {
                edges.push(Edge { from: (x + 1, y), to: (x + 1, y + 1) });
            }
            if !occupied(xi, yi + 1) {
                edges.push(Edge { from: (x + 1, y + 1), to: (x, y + 1) });
            }
            if !occupied(xi - 1, yi) {
                edges.push(Edge { from: (x, y + 1), to: (x, y) });
            }
        }
    }

    let mut outgoing: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (i, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.from).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut segments = Vec::new();
    for start in 0..edges.len() {
        if used[start] {
            continue;
        }
        let mut ring = Vec::new();
        let mut current = start;
        loop {
            used[current] = true;
            let edge = edges[current];
            ring.push(edge.from);
            let next = outgoing
                .get(&edge.to)
                .and_then(|candidates| next_edge(&edges, candidates, edge.direction()));
            match next {
                Some(n) if n != start && !used[n] => current = n,
                _ => break,
            }
        }

        let corners = drop_collinear(&ring);
        let mut points = corners
            .iter()
            .map(|&(x, y)| Point::from_trusted(grid.xa()[x], grid.ya()[y]));
        if let Some(first) = points.next() {
            segments.push(PathSegment::MoveTo(first));
            segments.extend(points.map(PathSegment::LineTo));
            segments.push(PathSegment::Close);
        }
    }

    Ok(Region { segments })
}

/// Successor of an edge arriving with `incoming` direction.
///
/// At a vertex shared by two diagonal tiles there are two candidates; taking
/// the left turn keeps each tile's loop separate.
fn next_edge(edges: &[Edge], candidates: &[usize], incoming: (isize, isize)) -> Option<usize> {
    if candidates.len() == 1 {
        return candidates.first().copied();
    }
    let left = (-incoming.1, incoming.0);
    candidates
        .iter()
        .copied()
        .find(|&c| edges[c].direction() == left)
        .or_else(|| candidates.first().copied())
}

fn drop_collinear(ring: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let n = ring.len();
    (0..n)
        .filter(|&i| {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            step(prev, ring[i]) != step(ring[i], next)
        })
        .map(|i| ring[i])
        .collect()
}
