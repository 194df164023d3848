//! The `Lattice2D` type represents the periodicity of a single layer, together
//! with the corresponding reciprocal lattice.
use crate::{Error, Matrix2, Vector2D};

/// Compute the reciprocal lattice matrix of the real-space lattice `matrix`,
/// where both lattices store one vector per column.
///
/// For `matrix = [[a, c], [b, d]]` this is `2π / det * [[d, -b], [-c, a]]`,
/// such that `B^T R = 2π I`.
fn reciprocal_matrix(matrix: &Matrix2) -> Result<Matrix2, Error> {
    let determinant = matrix.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return Err(Error::DegenerateLattice(format!(
            "the primitive vectors {:?} and {:?} are linearly dependent (determinant = {})",
            <[f64; 2]>::from(matrix.column(0)), <[f64; 2]>::from(matrix.column(1)), determinant
        )));
    }

    let factor = 2.0 * std::f64::consts::PI / determinant;
    return Ok(factor * matrix.adjugate().transposed());
}

/// Compute the reciprocal lattices of the two layers, given their real-space
/// primitive vectors as the columns of `r1` and `r2`.
///
/// This fails with [`Error::DegenerateLattice`] if any of the two matrices has
/// a zero determinant.
pub fn reciprocal(r1: &Matrix2, r2: &Matrix2) -> Result<(Matrix2, Matrix2), Error> {
    let b1 = reciprocal_matrix(r1)?;
    let b2 = reciprocal_matrix(r2)?;
    return Ok((b1, b2));
}

/// Area of the parallelogram spanned by `a` and `b`, computed from the Gram
/// determinant as `sqrt(|a|^2 |b|^2 - (a.b)^2)`.
pub(crate) fn parallelogram_area(a: Vector2D, b: Vector2D) -> f64 {
    let gram = a.norm2() * b.norm2() - a.dot(b) * a.dot(b);
    // rounding errors can make this slightly negative for (almost)
    // degenerate lattices
    return f64::sqrt(f64::max(gram, 0.0));
}

/// A two-dimensional Bravais lattice.
///
/// The primitive vectors are stored as the columns of the lattice matrix, and
/// the reciprocal lattice is computed once on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lattice2D {
    /// Real-space lattice matrix, one primitive vector per column
    matrix: Matrix2,
    /// Reciprocal lattice matrix, one reciprocal vector per column
    reciprocal: Matrix2,
}

impl Lattice2D {
    /// Create a new lattice from the given matrix, containing the primitive
    /// vectors as columns.
    pub fn new(matrix: Matrix2) -> Result<Lattice2D, Error> {
        if !matrix.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "lattice matrix must only contain finite values, got {:?}", matrix
            )));
        }

        let reciprocal = reciprocal_matrix(&matrix)?;
        return Ok(Lattice2D { matrix, reciprocal });
    }

    /// Create a new lattice from its two primitive vectors
    pub fn from_vectors(a1: Vector2D, a2: Vector2D) -> Result<Lattice2D, Error> {
        Lattice2D::new(Matrix2::from_columns(a1, a2))
    }

    /// Create a square lattice with lattice constant `a`
    pub fn square(a: f64) -> Result<Lattice2D, Error> {
        Lattice2D::from_vectors(Vector2D::new(a, 0.0), Vector2D::new(0.0, a))
    }

    /// Create a hexagonal (triangular) lattice with lattice constant `a`,
    /// with the primitive vectors separated by 60°
    pub fn hexagonal(a: f64) -> Result<Lattice2D, Error> {
        Lattice2D::from_vectors(
            Vector2D::new(a, 0.0),
            Vector2D::new(0.5 * a, 0.5 * f64::sqrt(3.0) * a),
        )
    }

    /// Get a copy of this lattice where both primitive vectors are rotated
    /// counter-clockwise by `angle` radians.
    pub fn rotated(&self, angle: f64) -> Result<Lattice2D, Error> {
        if !angle.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "rotation angle must be finite, got {}", angle
            )));
        }
        Lattice2D::new(Matrix2::rotation(angle) * self.matrix)
    }

    /// Get the real-space lattice matrix, with one primitive vector per column
    pub fn matrix(&self) -> Matrix2 {
        self.matrix
    }

    /// Get the reciprocal lattice matrix, with one reciprocal vector per column
    pub fn reciprocal(&self) -> Matrix2 {
        self.reciprocal
    }

    /// Get the primitive vector `i` (0 or 1)
    pub fn vector(&self, i: usize) -> Vector2D {
        self.matrix.column(i)
    }

    /// Get the reciprocal vector `i` (0 or 1)
    pub fn reciprocal_vector(&self, i: usize) -> Vector2D {
        self.reciprocal.column(i)
    }

    /// Get the area of the primitive cell
    pub fn area(&self) -> f64 {
        parallelogram_area(self.vector(0), self.vector(1))
    }

    /// Get the area of the reciprocal primitive cell
    pub fn reciprocal_area(&self) -> f64 {
        parallelogram_area(self.reciprocal_vector(0), self.reciprocal_vector(1))
    }
}
