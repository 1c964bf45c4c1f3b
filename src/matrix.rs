//! Dense matrix algebra for network training.
//!
//! This module provides the small set of dense 2-D operations the training
//! loop is built from: dot product, elementwise arithmetic, transposition and
//! scalar maps. Matrices are rectangular `f64` grids; every operation returns
//! a fresh matrix and leaves its operands untouched, so callers that want an
//! in-place update reassign explicitly.
//!
//! # Examples
//!
//! ```
//! use lorikeet::matrix::Matrix;
//!
//! let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let b = Matrix::identity(2);
//!
//! assert_eq!(a.dot(&b).unwrap(), a);
//! assert_eq!(a.transpose().transpose(), a);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LorikeetError, Result};

/// A rectangular matrix of `f64` values.
///
/// The rectangular invariant (all rows share the same length) holds for
/// every matrix this type hands out; [`Matrix::from_rows`] rejects ragged
/// input and the arithmetic operations only ever produce rectangular
/// results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix {
    data: Vec<Vec<f64>>,
}

impl Matrix {
    /// Create a matrix of the given size filled with zeros.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Matrix {
            data: vec![vec![0.0; columns]; rows],
        }
    }

    /// Create the `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut matrix = Matrix::zeros(n, n);
        for i in 0..n {
            matrix.data[i][i] = 1.0;
        }
        matrix
    }

    /// Create a matrix with independent uniform random values in `[-1, 1]`.
    ///
    /// Uses the thread-local generator; see [`Matrix::random_with`] for a
    /// caller-supplied source of randomness.
    pub fn random(rows: usize, columns: usize) -> Self {
        Self::random_with(rows, columns, &mut rand::rng())
    }

    /// Create a uniformly random matrix in `[-1, 1]` from the given generator.
    pub fn random_with<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let data = (0..rows)
            .map(|_| (0..columns).map(|_| rng.random_range(-1.0..=1.0)).collect())
            .collect();
        Matrix { data }
    }

    /// Build a matrix from explicit rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(first) = rows.first() {
            let columns = first.len();
            for (i, row) in rows.iter().enumerate() {
                if row.len() != columns {
                    return Err(LorikeetError::shape_mismatch(format!(
                        "row {} has {} columns, expected {}",
                        i,
                        row.len(),
                        columns
                    )));
                }
            }
        }
        Ok(Matrix { data: rows })
    }

    /// Consume the matrix and return its rows.
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.data
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.data.len()
    }

    /// Number of columns (0 for an empty matrix).
    pub fn columns(&self) -> usize {
        self.data.first().map_or(0, |row| row.len())
    }

    /// The value at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i][j]
    }

    /// The row at index `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.iter().map(|row| row.as_slice())
    }

    /// Arithmetic mean over all cells (0.0 for an empty matrix).
    pub fn mean(&self) -> f64 {
        let count = self.rows() * self.columns();
        if count == 0 {
            return 0.0;
        }
        let sum: f64 = self.data.iter().flatten().sum();
        sum / count as f64
    }

    /// Standard matrix product.
    ///
    /// Requires `columns(self) == rows(other)`; the result is
    /// `rows(self) × columns(other)`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        if self.columns() != other.rows() {
            return Err(LorikeetError::shape_mismatch(format!(
                "cannot multiply {}x{} by {}x{}",
                self.rows(),
                self.columns(),
                other.rows(),
                other.columns()
            )));
        }

        let inner = self.columns();
        Ok(Matrix::zeros(self.rows(), other.columns()).map_indexed(|i, j, _| {
            (0..inner).map(|k| self.data[i][k] * other.data[k][j]).sum()
        }))
    }

    /// Elementwise sum.
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Elementwise difference (`self - other`).
    pub fn sub(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "subtract", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.zip_with(other, "multiply", |a, b| a * b)
    }

    /// The transposed matrix; `transpose` is an involution.
    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::zeros(self.columns(), self.rows());
        for i in 0..self.rows() {
            for j in 0..self.columns() {
                result.data[j][i] = self.data[i][j];
            }
        }
        result
    }

    /// Apply a function to every cell, returning a new matrix of the same
    /// shape.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        self.map_indexed(|_, _, x| f(x))
    }

    /// Apply an index-aware function to every cell, returning a new matrix
    /// of the same shape.
    pub fn map_indexed<F: Fn(usize, usize, f64) -> f64>(&self, f: F) -> Matrix {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, &x)| f(i, j, x))
                    .collect()
            })
            .collect();
        Matrix { data }
    }

    /// Multiply every cell by the scalar `k`.
    pub fn scale(&self, k: f64) -> Matrix {
        self.map(|x| k * x)
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Matrix, op: &str, f: F) -> Result<Matrix> {
        if self.rows() != other.rows() || self.columns() != other.columns() {
            return Err(LorikeetError::dimension_mismatch(format!(
                "cannot {} {}x{} and {}x{}",
                op,
                self.rows(),
                self.columns(),
                other.rows(),
                other.columns()
            )));
        }
        Ok(self.map_indexed(|i, j, x| f(x, other.data[i][j])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Matrix {
        Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(LorikeetError::ShapeMismatch(_))));
    }

    #[test]
    fn test_dot_product_shape() {
        let a = sample(); // 2x3
        let b = Matrix::from_rows(vec![
            vec![7.0, 8.0],
            vec![9.0, 10.0],
            vec![11.0, 12.0],
        ])
        .unwrap(); // 3x2

        let product = a.dot(&b).unwrap();
        assert_eq!(product.rows(), 2);
        assert_eq!(product.columns(), 2);
        assert_eq!(product.get(0, 0), 58.0);
        assert_eq!(product.get(1, 1), 154.0);
    }

    #[test]
    fn test_dot_product_identity() {
        let a = sample();
        let product = a.dot(&Matrix::identity(3)).unwrap();
        assert_eq!(product, a);
    }

    #[test]
    fn test_dot_product_shape_mismatch() {
        let a = sample(); // 2x3
        let b = Matrix::zeros(2, 2);
        assert!(matches!(a.dot(&b), Err(LorikeetError::ShapeMismatch(_))));
    }

    #[test]
    fn test_elementwise_operations() {
        let a = sample();
        let b = a.scale(2.0);

        let sum = a.add(&b).unwrap();
        assert_eq!(sum.get(0, 0), 3.0);

        let difference = b.sub(&a).unwrap();
        assert_eq!(difference, a);

        let product = a.hadamard(&a).unwrap();
        assert_eq!(product.get(1, 2), 36.0);
    }

    #[test]
    fn test_elementwise_dimension_mismatch() {
        let a = sample(); // 2x3
        let b = Matrix::zeros(3, 3);

        assert!(matches!(a.add(&b), Err(LorikeetError::DimensionMismatch(_))));
        assert!(matches!(a.sub(&b), Err(LorikeetError::DimensionMismatch(_))));
        assert!(matches!(
            a.hadamard(&b),
            Err(LorikeetError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_operands_are_not_mutated() {
        let a = sample();
        let b = sample();
        let before = a.clone();

        a.add(&b).unwrap();
        a.dot(&b.transpose()).unwrap();
        a.map(|x| x * 10.0);

        assert_eq!(a, before);
    }

    #[test]
    fn test_transpose_involution() {
        let a = sample();
        let transposed = a.transpose();

        assert_eq!(transposed.rows(), a.columns());
        assert_eq!(transposed.columns(), a.rows());
        assert_eq!(transposed.transpose(), a);
    }

    #[test]
    fn test_map_indexed() {
        let a = Matrix::zeros(2, 2).map_indexed(|i, j, _| (i * 10 + j) as f64);
        assert_eq!(a.get(0, 1), 1.0);
        assert_eq!(a.get(1, 0), 10.0);
    }

    #[test]
    fn test_random_range() {
        let a = Matrix::random(10, 10);
        assert!(a.iter_rows().flatten().all(|&x| (-1.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_mean() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(a.mean(), 2.5);
        assert_eq!(Matrix::zeros(0, 0).mean(), 0.0);
    }
}
