//! Manhattan orientations (EDIF naming)
//!
//! The 8 rotations/reflections that map axis-aligned rectangles onto
//! axis-aligned rectangles. Each one is a 2x2 signed permutation matrix and
//! composition is ordinary matrix multiplication; the composition and
//! inverse tables below are computed from the matrices at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::point::Point;
use super::rectangle::Rectangle;
use crate::error::{invalid, DrcError};

/// Row-major 2x2 integer matrix `[[a, b], [c, d]]`
pub type Matrix = [[i32; 2]; 2];

/// One of the 8 Manhattan orientations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    R0,
    R90,
    R180,
    R270,
    MY,
    MYR90,
    MX,
    MXR90,
}

/// Matrices indexed by `Orientation as usize`
const MATRICES: [Matrix; 8] = [
    [[1, 0], [0, 1]],   // R0
    [[0, -1], [1, 0]],  // R90
    [[-1, 0], [0, -1]], // R180
    [[0, 1], [-1, 0]],  // R270
    [[-1, 0], [0, 1]],  // MY
    [[0, -1], [-1, 0]], // MYR90
    [[1, 0], [0, -1]],  // MX
    [[0, 1], [1, 0]],   // MXR90
];

const fn mat_mul(a: Matrix, b: Matrix) -> Matrix {
    [
        [
            a[0][0] * b[0][0] + a[0][1] * b[1][0],
            a[0][0] * b[0][1] + a[0][1] * b[1][1],
        ],
        [
            a[1][0] * b[0][0] + a[1][1] * b[1][0],
            a[1][0] * b[0][1] + a[1][1] * b[1][1],
        ],
    ]
}

const fn mat_transpose(m: Matrix) -> Matrix {
    [[m[0][0], m[1][0]], [m[0][1], m[1][1]]]
}

const fn mat_eq(a: Matrix, b: Matrix) -> bool {
    a[0][0] == b[0][0] && a[0][1] == b[0][1] && a[1][0] == b[1][0] && a[1][1] == b[1][1]
}

/// Position of `m` in [`MATRICES`]; fails the build if `m` is not in the group
const fn index_of(m: Matrix) -> usize {
    let mut i = 0;
    while i < MATRICES.len() {
        if mat_eq(MATRICES[i], m) {
            return i;
        }
        i += 1;
    }
    panic!("matrix is not a Manhattan orientation");
}

const fn build_concat_table() -> [[Orientation; 8]; 8] {
    let mut table = [[Orientation::R0; 8]; 8];
    let mut a = 0;
    while a < 8 {
        let mut b = 0;
        while b < 8 {
            table[a][b] = Orientation::ALL[index_of(mat_mul(MATRICES[a], MATRICES[b]))];
            b += 1;
        }
        a += 1;
    }
    table
}

// Signed permutation matrices are orthogonal: the inverse is the transpose.
const fn build_inverse_table() -> [Orientation; 8] {
    let mut table = [Orientation::R0; 8];
    let mut a = 0;
    while a < 8 {
        table[a] = Orientation::ALL[index_of(mat_transpose(MATRICES[a]))];
        a += 1;
    }
    table
}

const CONCAT: [[Orientation; 8]; 8] = build_concat_table();
const INVERSE: [Orientation; 8] = build_inverse_table();

impl Orientation {
    /// All orientations, in matrix-table order
    pub const ALL: [Orientation; 8] = [
        Orientation::R0,
        Orientation::R90,
        Orientation::R180,
        Orientation::R270,
        Orientation::MY,
        Orientation::MYR90,
        Orientation::MX,
        Orientation::MXR90,
    ];

    pub fn matrix(self) -> Matrix {
        MATRICES[self as usize]
    }

    /// Orientation with exactly this matrix, if any
    pub fn from_matrix(m: Matrix) -> Option<Orientation> {
        Self::ALL.into_iter().find(|o| mat_eq(o.matrix(), m))
    }

    /// EDIF name of the orientation
    pub fn name(self) -> &'static str {
        match self {
            Orientation::R0 => "R0",
            Orientation::R90 => "R90",
            Orientation::R180 => "R180",
            Orientation::R270 => "R270",
            Orientation::MY => "MY",
            Orientation::MYR90 => "MYR90",
            Orientation::MX => "MX",
            Orientation::MXR90 => "MXR90",
        }
    }

    /// Orientation whose matrix is `self.matrix() * other.matrix()`
    ///
    /// Applying the result to a point is the same as applying `other` first
    /// and then `self`.
    pub fn concatenate(self, other: Orientation) -> Orientation {
        CONCAT[self as usize][other as usize]
    }

    pub fn inverse(self) -> Orientation {
        INVERSE[self as usize]
    }

    /// Apply the matrix to a raw coordinate pair
    ///
    /// Callers keep `x` and `y` inside the symmetric coordinate range, where
    /// negation cannot overflow.
    pub(crate) fn transform_xy(self, x: i32, y: i32) -> (i32, i32) {
        let m = self.matrix();
        (m[0][0] * x + m[0][1] * y, m[1][0] * x + m[1][1] * y)
    }

    pub fn transform_point(self, p: Point) -> Point {
        p.transform(self)
    }

    /// Transform both corners and re-normalize to (min, max)
    pub fn transform_rect(self, r: &Rectangle) -> Rectangle {
        r.transform(self)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Orientation {
    type Err = DrcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|o| o.name() == upper)
            .ok_or_else(|| invalid(format!("unknown orientation '{}'", s)))
    }
}
