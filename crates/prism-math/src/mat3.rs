//! 3x3 matrix type for linear color transforms.
//!
//! [`Mat3`] holds the literal conversion matrices of the YIQ, YUV and LMS
//! spaces.
//!
//! # Convention
//!
//! Matrices are given in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```

use glam::{DMat3, DVec3};
use std::ops::Mul;

/// A 3x3 double-precision matrix.
///
/// Construct with [`Mat3::from_rows`]; internally stored as a column-major
/// [`DMat3`].
///
/// # Example
///
/// ```rust
/// use prism_math::Mat3;
///
/// let v = [1.0, 2.0, 3.0];
/// assert_eq!(Mat3::IDENTITY.transform(v), v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    inner: DMat3,
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        inner: DMat3::IDENTITY,
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self {
            inner: DMat3::from_cols_array_2d(&rows).transpose(),
        }
    }

    /// Returns row `i` as an array.
    #[inline]
    pub fn row(&self, i: usize) -> [f64; 3] {
        self.inner.row(i).to_array()
    }

    /// Multiplies a column vector.
    #[inline]
    pub fn transform(&self, v: [f64; 3]) -> [f64; 3] {
        (self.inner * DVec3::from_array(v)).to_array()
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.inner.determinant()
    }

    /// Computes the inverse of this matrix.
    ///
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        if self.determinant().abs() < 1e-12 {
            return None;
        }
        Some(Self {
            inner: self.inner.inverse(),
        })
    }

    /// Element-wise comparison with tolerance.
    pub fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.inner.abs_diff_eq(other.inner, epsilon)
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            inner: self.inner * rhs.inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_rows_layout() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        assert_eq!(m.row(0), [1.0, 2.0, 3.0]);
        assert_eq!(m.row(2), [7.0, 8.0, 10.0]);

        let v = m.transform([1.0, 0.0, 0.0]);
        assert_eq!(v, [1.0, 4.0, 7.0]);
    }

    #[test]
    fn test_inverse() {
        let m = Mat3::from_rows([[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 8.0]]);
        let inv = m.inverse().unwrap();
        let v = inv.transform([2.0, 4.0, 8.0]);
        assert_abs_diff_eq!(v[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[2], 1.0, epsilon = 1e-12);
        assert!((m * inv).abs_diff_eq(&Mat3::IDENTITY, 1e-12));
    }

    #[test]
    fn test_singular() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]]);
        assert!(m.inverse().is_none());
    }
}
