use std::ops::{Add, Sub, Mul, Index, IndexMut};

use super::Vector2D;

/// A 2x2 square matrix type.
///
/// `Matrix2` implements multiplication with a vector, a scalar or another
/// matrix. The data is stored row by row: `matrix[i][j]` is the element on
/// row `i` and column `j`. Lattices are described with one primitive vector
/// per *column*, use [`Matrix2::from_columns`] and [`Matrix2::column`] to work
/// with them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2([[f64; 2]; 2]);

impl Matrix2 {
    /// Create a new `Matrix2` from the given rows
    pub const fn new(rows: [[f64; 2]; 2]) -> Matrix2 {
        Matrix2(rows)
    }

    /// Create a new `Matrix2` using `first` and `second` as the two columns
    pub fn from_columns(first: Vector2D, second: Vector2D) -> Matrix2 {
        Matrix2([
            [first[0], second[0]],
            [first[1], second[1]],
        ])
    }

    /// Create a new `Matrix2` with all elements set to 0
    pub const fn zero() -> Matrix2 {
        Matrix2([[0.0, 0.0], [0.0, 0.0]])
    }

    /// Create a new `Matrix2` set to the identity matrix
    pub const fn one() -> Matrix2 {
        Matrix2([[1.0, 0.0], [0.0, 1.0]])
    }

    /// Create the rotation matrix for a counter-clockwise rotation of `angle`
    /// radians
    pub fn rotation(angle: f64) -> Matrix2 {
        let (sin, cos) = angle.sin_cos();
        Matrix2([[cos, -sin], [sin, cos]])
    }

    /// Get the column `i` of this matrix as a vector
    #[inline]
    pub fn column(&self, i: usize) -> Vector2D {
        Vector2D::new(self.0[0][i], self.0[1][i])
    }

    /// Get the determinant of this matrix
    #[inline]
    pub fn determinant(&self) -> f64 {
        self[0][0] * self[1][1] - self[0][1] * self[1][0]
    }

    /// Get the transpose of this matrix
    pub fn transposed(&self) -> Matrix2 {
        Matrix2([
            [self[0][0], self[1][0]],
            [self[0][1], self[1][1]],
        ])
    }

    /// Get the adjugate (transposed cofactor matrix) of this matrix. For an
    /// invertible matrix, `adjugate = determinant * inverse`.
    pub fn adjugate(&self) -> Matrix2 {
        Matrix2([
            [self[1][1], -self[0][1]],
            [-self[1][0], self[0][0]],
        ])
    }

    /// Check that all the elements of this matrix are finite
    pub fn is_finite(&self) -> bool {
        self.0.iter().flatten().all(|v| v.is_finite())
    }
}

impl From<[[f64; 2]; 2]> for Matrix2 {
    fn from(rows: [[f64; 2]; 2]) -> Matrix2 {
        Matrix2(rows)
    }
}

impl Index<usize> for Matrix2 {
    type Output = [f64; 2];
    #[inline]
    fn index(&self, index: usize) -> &[f64; 2] {
        &self.0[index]
    }
}

impl IndexMut<usize> for Matrix2 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut [f64; 2] {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Matrix2, Matrix2, Add, add, Matrix2,
    self, other,
    Matrix2([
        [self[0][0] + other[0][0], self[0][1] + other[0][1]],
        [self[1][0] + other[1][0], self[1][1] + other[1][1]],
    ])
);

impl_arithmetic!(
    Matrix2, Matrix2, Sub, sub, Matrix2,
    self, other,
    Matrix2([
        [self[0][0] - other[0][0], self[0][1] - other[0][1]],
        [self[1][0] - other[1][0], self[1][1] - other[1][1]],
    ])
);

impl_arithmetic!(
    Matrix2, Matrix2, Mul, mul, Matrix2,
    self, other,
    Matrix2([
        [
            self[0][0] * other[0][0] + self[0][1] * other[1][0],
            self[0][0] * other[0][1] + self[0][1] * other[1][1],
        ],
        [
            self[1][0] * other[0][0] + self[1][1] * other[1][0],
            self[1][0] * other[0][1] + self[1][1] * other[1][1],
        ],
    ])
);

impl_arithmetic!(
    Matrix2, Vector2D, Mul, mul, Vector2D,
    self, other,
    Vector2D::new(
        self[0][0] * other[0] + self[0][1] * other[1],
        self[1][0] * other[0] + self[1][1] * other[1],
    )
);

lsh_scal_arithmetic!(
    Matrix2, Mul, mul, Matrix2,
    self, other,
    Matrix2([
        [self[0][0] * other, self[0][1] * other],
        [self[1][0] * other, self[1][1] * other],
    ])
);

rhs_scal_arithmetic!(
    Matrix2, Mul, mul, Matrix2,
    self, other,
    Matrix2([
        [self * other[0][0], self * other[0][1]],
        [self * other[1][0], self * other[1][1]],
    ])
);
