use std::ops::{Add, Sub, Mul, Div, Neg, Index, IndexMut};
use std::ops::{AddAssign, SubAssign, MulAssign, DivAssign};

/// A 2-dimensional vector type, used for real-space and reciprocal-space
/// vectors of a single layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(transparent)]
pub struct Vector2D([f64; 2]);

impl Vector2D {
    /// Create a new `Vector2D` with components `x` and `y`
    pub const fn new(x: f64, y: f64) -> Vector2D {
        Vector2D([x, y])
    }

    /// Create a new `Vector2D` with all components set to 0
    pub const fn zero() -> Vector2D {
        Vector2D([0.0, 0.0])
    }

    /// Get the squared euclidean norm of the vector
    #[inline]
    pub fn norm2(&self) -> f64 {
        self * self
    }

    /// Get the euclidean norm of the vector
    #[inline]
    pub fn norm(&self) -> f64 {
        f64::sqrt(self.norm2())
    }

    /// Get the scalar product of this vector with `other`
    #[inline]
    pub fn dot(&self, other: Vector2D) -> f64 {
        self[0] * other[0] + self[1] * other[1]
    }

    /// Get the z component of the cross product of this vector with `other`
    #[inline]
    pub fn cross(&self, other: Vector2D) -> f64 {
        self[0] * other[1] - self[1] * other[0]
    }

    /// Rotate this vector counter-clockwise by `angle` (in radians)
    pub fn rotated(&self, angle: f64) -> Vector2D {
        let (sin, cos) = angle.sin_cos();
        Vector2D::new(
            cos * self[0] - sin * self[1],
            sin * self[0] + cos * self[1],
        )
    }

    /// Check that all the components of this vector are finite
    pub fn is_finite(&self) -> bool {
        self[0].is_finite() && self[1].is_finite()
    }
}

impl From<[f64; 2]> for Vector2D {
    fn from(array: [f64; 2]) -> Vector2D {
        Vector2D(array)
    }
}

impl From<Vector2D> for [f64; 2] {
    fn from(vector: Vector2D) -> [f64; 2] {
        vector.0
    }
}

impl Index<usize> for Vector2D {
    type Output = f64;
    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector2D {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl_arithmetic!(
    Vector2D, Vector2D, Add, add, Vector2D,
    self, other,
    Vector2D::new(self[0] + other[0], self[1] + other[1])
);

impl_inplace_arithmetic!(
    Vector2D, Vector2D, AddAssign, add_assign,
    self, other,
    {self[0] += other[0]; self[1] += other[1];}
);

impl_arithmetic!(
    Vector2D, Vector2D, Sub, sub, Vector2D,
    self, other,
    Vector2D::new(self[0] - other[0], self[1] - other[1])
);

impl_inplace_arithmetic!(
    Vector2D, Vector2D, SubAssign, sub_assign,
    self, other,
    {self[0] -= other[0]; self[1] -= other[1];}
);

// Dot product
impl_arithmetic!(
    Vector2D, Vector2D, Mul, mul, f64,
    self, other,
    self[0] * other[0] + self[1] * other[1]
);

lsh_scal_arithmetic!(
    Vector2D, Mul, mul, Vector2D,
    self, other,
    Vector2D::new(self[0] * other, self[1] * other)
);

rhs_scal_arithmetic!(
    Vector2D, Mul, mul, Vector2D,
    self, other,
    Vector2D::new(self * other[0], self * other[1])
);

impl MulAssign<f64> for Vector2D {
    #[inline]
    fn mul_assign(&mut self, other: f64) {
        self[0] *= other;
        self[1] *= other;
    }
}

lsh_scal_arithmetic!(
    Vector2D, Div, div, Vector2D,
    self, other,
    Vector2D::new(self[0] / other, self[1] / other)
);

impl DivAssign<f64> for Vector2D {
    #[inline]
    fn div_assign(&mut self, other: f64) {
        self[0] /= other;
        self[1] /= other;
    }
}

impl Neg for Vector2D {
    type Output = Vector2D;
    #[inline]
    fn neg(self) -> Vector2D {
        Vector2D::new(-self[0], -self[1])
    }
}

impl<'a> Neg for &'a Vector2D {
    type Output = Vector2D;
    #[inline]
    fn neg(self) -> Vector2D {
        Vector2D::new(-self[0], -self[1])
    }
}
