//! Stack-allocated 2×2 linear algebra for the bivariate residual model.
//!
//! Index 0 is Tmax, index 1 is Tmin. Matrices act on column vectors.

use std::ops::Index;

/// Two-component column vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    data: [f64; 2],
}

impl Vec2 {
    /// Creates a vector from its two components.
    pub const fn new(x0: f64, x1: f64) -> Self {
        Self { data: [x0, x1] }
    }

    /// Returns the zero vector.
    pub const fn zeros() -> Self {
        Self { data: [0.0; 2] }
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; 2] {
        self.data
    }

    /// Returns `true` if both components are finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Vec2) -> Vec2 {
        Vec2::new(self.data[0] + other.data[0], self.data[1] + other.data[1])
    }

    /// Clamps each component to `[-limit, limit]`.
    pub fn clamp_abs(&self, limit: f64) -> Vec2 {
        Vec2::new(
            self.data[0].clamp(-limit, limit),
            self.data[1].clamp(-limit, limit),
        )
    }
}

impl Index<usize> for Vec2 {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.data[i]
    }
}

/// 2×2 matrix stored row-major: `rows[r][c]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat2 {
    rows: [[f64; 2]; 2],
}

impl Mat2 {
    /// Creates a matrix from its rows.
    pub const fn new(rows: [[f64; 2]; 2]) -> Self {
        Self { rows }
    }

    /// Returns the zero matrix.
    pub const fn zeros() -> Self {
        Self {
            rows: [[0.0; 2]; 2],
        }
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self {
            rows: [[1.0, 0.0], [0.0, 1.0]],
        }
    }

    /// Returns the element at `(row, col)`.
    #[inline(always)]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Returns the rows as an array.
    pub fn to_rows(self) -> [[f64; 2]; 2] {
        self.rows
    }

    /// Computes the matrix-vector product `self * v`.
    #[inline(always)]
    pub fn mul_vec(&self, v: &Vec2) -> Vec2 {
        Vec2::new(
            self.rows[0][0] * v[0] + self.rows[0][1] * v[1],
            self.rows[1][0] * v[0] + self.rows[1][1] * v[1],
        )
    }

    /// Computes the matrix product `self * other`.
    pub fn mul(&self, other: &Mat2) -> Mat2 {
        let mut out = [[0.0; 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[i][0] * other.rows[0][j] + self.rows[i][1] * other.rows[1][j];
            }
        }
        Mat2::new(out)
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Mat2 {
        Mat2::new([
            [self.rows[0][0], self.rows[1][0]],
            [self.rows[0][1], self.rows[1][1]],
        ])
    }

    /// Element-wise sum.
    pub fn add(&self, other: &Mat2) -> Mat2 {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise difference.
    pub fn sub(&self, other: &Mat2) -> Mat2 {
        self.zip_with(other, |a, b| a - b)
    }

    /// Determinant.
    pub fn det(&self) -> f64 {
        self.rows[0][0] * self.rows[1][1] - self.rows[0][1] * self.rows[1][0]
    }

    /// Inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Mat2> {
        let det = self.det();
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return None;
        }
        let [[a, b], [c, d]] = self.rows;
        Some(Mat2::new([[d / det, -b / det], [-c / det, a / det]]))
    }

    /// Lower-triangular Cholesky factor `L` with `L * Lᵀ = self`.
    ///
    /// Returns `None` unless the matrix is symmetric positive-definite.
    pub fn cholesky(&self) -> Option<Mat2> {
        if !self.is_symmetric(1e-9) {
            return None;
        }
        let [[a, b], [_, d]] = self.rows;
        if !(a > 0.0) {
            return None;
        }
        let l00 = a.sqrt();
        let l10 = b / l00;
        let rem = d - l10 * l10;
        if !(rem > 0.0) {
            return None;
        }
        Some(Mat2::new([[l00, 0.0], [l10, rem.sqrt()]]))
    }

    /// Largest absolute element-wise difference.
    pub fn max_abs_diff(&self, other: &Mat2) -> f64 {
        let d = self.sub(other);
        d.rows
            .iter()
            .flatten()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Returns `true` if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }

    /// Returns `true` if the off-diagonal elements agree within `tol`.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        (self.rows[0][1] - self.rows[1][0]).abs() <= tol
    }

    fn zip_with(&self, other: &Mat2, f: impl Fn(f64, f64) -> f64) -> Mat2 {
        let mut out = [[0.0; 2]; 2];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = f(self.rows[i][j], other.rows[i][j]);
            }
        }
        Mat2::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_mat_eq(a: &Mat2, b: &Mat2) {
        assert!(a.max_abs_diff(b) < 1e-12, "{a:?} != {b:?}");
    }

    #[test]
    fn mul_vec_known() {
        let m = Mat2::new([[1.0, 2.0], [3.0, 4.0]]);
        let v = m.mul_vec(&Vec2::new(1.0, 1.0));
        assert_eq!(v.to_array(), [3.0, 7.0]);
    }

    #[test]
    fn mul_known() {
        let a = Mat2::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Mat2::new([[0.0, 1.0], [1.0, 0.0]]);
        assert_mat_eq(&a.mul(&b), &Mat2::new([[2.0, 1.0], [4.0, 3.0]]));
        assert_mat_eq(&a.mul(&Mat2::identity()), &a);
    }

    #[test]
    fn transpose_swaps_off_diagonal() {
        let a = Mat2::new([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(a.transpose().get(0, 1), 3.0);
        assert_eq!(a.transpose().get(1, 0), 2.0);
    }

    #[test]
    fn inverse_round_trip() {
        let a = Mat2::new([[4.0, 1.0], [2.0, 3.0]]);
        let inv = a.inverse().unwrap();
        assert_mat_eq(&a.mul(&inv), &Mat2::identity());
    }

    #[test]
    fn singular_has_no_inverse() {
        assert!(Mat2::new([[1.0, 2.0], [2.0, 4.0]]).inverse().is_none());
    }

    #[test]
    fn cholesky_reconstructs() {
        let m = Mat2::new([[4.0, 2.0], [2.0, 3.0]]);
        let l = m.cholesky().unwrap();
        assert_eq!(l.get(0, 1), 0.0);
        assert_mat_eq(&l.mul(&l.transpose()), &m);
    }

    #[test]
    fn cholesky_rejects_indefinite() {
        assert!(Mat2::new([[1.0, 2.0], [2.0, 1.0]]).cholesky().is_none());
        assert!(Mat2::new([[1.0, 0.5], [0.2, 1.0]]).cholesky().is_none());
        assert!(Mat2::new([[0.0, 0.0], [0.0, 1.0]]).cholesky().is_none());
    }

    #[test]
    fn clamp_abs() {
        let v = Vec2::new(5.0, -6.0).clamp_abs(4.0);
        assert_abs_diff_eq!(v[0], 4.0);
        assert_abs_diff_eq!(v[1], -4.0);
    }
}
