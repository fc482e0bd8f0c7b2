//! Dense rank-2 matrices
//!
//! [`Matrix`] owns an [`NdArray`] whose shape is always `[rows, cols]` with
//! both dimensions positive. Every operation allocates a fresh result; the
//! algorithms in the submodules work on private copies of the cells.

mod arith;
mod eigen;
mod elimination;
mod lu;
mod qr;

pub use eigen::{EigenApprox, EigenDecomposition};
pub use elimination::DeterminantMethod;
pub use lu::LuAlgorithm;
pub use qr::QrAlgorithm;

use crate::fill::FillPolicy;
use crate::literal::Literal;
use crate::primes::PrimeSequence;
use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::storage::NdArray;
use crate::vector::Vector;
use crate::{LinalgError, Result};
use rand::Rng;
use std::ops::Index;

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    storage: NdArray,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Ok(Self {
            storage: NdArray::zeros(Shape::matrix(rows, cols)?),
        })
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m.storage.as_mut_slice()[i * n + i] = Scalar::Real(1.0);
        }
        Ok(m)
    }

    pub fn with_fill<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        policy: &FillPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        Ok(Self {
            storage: NdArray::with_fill(Shape::matrix(rows, cols)?, policy, rng),
        })
    }

    /// Like [`with_fill`](Self::with_fill), drawing from the thread-local generator
    pub fn random(rows: usize, cols: usize, policy: &FillPolicy) -> Result<Self> {
        Self::with_fill(rows, cols, policy, &mut rand::rng())
    }

    /// Fill in row-major order with the next primes of `primes`
    pub fn with_primes(rows: usize, cols: usize, primes: &mut PrimeSequence) -> Result<Self> {
        let shape = Shape::matrix(rows, cols)?;
        let data = primes
            .next_n(shape.size())
            .into_iter()
            .map(|p| Scalar::Real(p as f64))
            .collect();
        Self::from_storage(NdArray::from_vec(shape, data)?)
    }

    pub fn from_rows<I, R, T>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        let rows: Vec<Vec<Scalar>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().position(|row| row.len() != cols) {
            return Err(LinalgError::invalid_construction(
                "from_rows",
                format!("row {bad} has {} entries, expected {cols}", rows[bad].len()),
            ));
        }
        let n_rows = rows.len();
        Self::from_parts(n_rows, cols, rows.into_iter().flatten().collect())
    }

    pub fn from_literal(literal: impl Into<Literal>) -> Result<Self> {
        Self::from_storage(NdArray::from_literal(literal)?)
    }

    /// Adopt rank-2 storage
    pub fn from_storage(storage: NdArray) -> Result<Self> {
        if !storage.shape().is_matrix() {
            return Err(LinalgError::invalid_construction(
                "matrix",
                format!("expected a rank-2 shape, got {}", storage.shape()),
            ));
        }
        Ok(Self { storage })
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<Scalar>) -> Result<Self> {
        Ok(Self {
            storage: NdArray::from_vec(Shape::matrix(rows, cols)?, data)?,
        })
    }

    pub fn rows(&self) -> usize {
        self.storage.dims()[0]
    }

    pub fn cols(&self) -> usize {
        self.storage.dims()[1]
    }

    pub fn shape(&self) -> &Shape {
        self.storage.shape()
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Scalar> {
        self.storage.get(&[row, col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: impl Into<Scalar>) -> Result<()> {
        self.storage.set(&[row, col], value)
    }

    pub fn row(&self, row: usize) -> Result<Vector> {
        if row >= self.rows() {
            return Err(LinalgError::index_out_of_bounds(
                "row",
                &[row],
                self.storage.dims(),
            ));
        }
        let cols = self.cols();
        Vector::from_scalars(self.data()[row * cols..(row + 1) * cols].to_vec())
    }

    pub fn column(&self, col: usize) -> Result<Vector> {
        if col >= self.cols() {
            return Err(LinalgError::index_out_of_bounds(
                "column",
                &[0, col],
                self.storage.dims(),
            ));
        }
        Vector::from_scalars((0..self.rows()).map(|i| self.at(i, col)).collect())
    }

    pub fn set_column(&mut self, col: usize, values: &Vector) -> Result<()> {
        if values.len() != self.rows() {
            return Err(LinalgError::dimension_mismatch(
                "set_column",
                format!("{} entries", self.rows()),
                format!("{} entries", values.len()),
            ));
        }
        for (i, value) in values.iter().enumerate() {
            self.set(i, col, *value)?;
        }
        Ok(())
    }

    pub fn storage(&self) -> &NdArray {
        &self.storage
    }

    pub fn into_storage(self) -> NdArray {
        self.storage
    }

    /// Same shape and every cell within `tolerance`
    pub fn approx_eq(&self, other: &Matrix, tolerance: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data()
                .iter()
                .zip(other.data())
                .all(|(a, b)| a.approx_eq(b, tolerance))
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map(&self, f: impl FnMut(&Scalar) -> Scalar) -> Matrix {
        Self {
            storage: self.storage.map(f),
        }
    }

    pub(crate) fn data(&self) -> &[Scalar] {
        self.storage.as_slice()
    }

    // Unchecked read for loops already bounded by rows()/cols()
    pub(crate) fn at(&self, row: usize, col: usize) -> Scalar {
        self.data()[row * self.cols() + col]
    }

    pub(crate) fn require_square(&self, operation: &str) -> Result<usize> {
        if !self.is_square() {
            return Err(LinalgError::dimension_mismatch(
                operation,
                "square matrix",
                format!("{}x{}", self.rows(), self.cols()),
            ));
        }
        Ok(self.rows())
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Scalar;

    fn index(&self, (row, col): (usize, usize)) -> &Scalar {
        assert!(
            row < self.rows() && col < self.cols(),
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows(),
            self.cols()
        );
        &self.data()[row * self.cols() + col]
    }
}

impl TryFrom<NdArray> for Matrix {
    type Error = LinalgError;

    fn try_from(storage: NdArray) -> Result<Self> {
        Self::from_storage(storage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            Matrix::zeros(0, 3),
            Err(LinalgError::InvalidConstruction { .. })
        ));
        let rank3 = NdArray::zeros(Shape::new(vec![2, 2, 2]).unwrap());
        assert!(matches!(
            Matrix::from_storage(rank3),
            Err(LinalgError::InvalidConstruction { .. })
        ));
    }

    #[test]
    fn test_from_rows_and_access() {
        let m = Matrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m[(1, 2)], Scalar::real(6.0));
        assert_eq!(m.get(0, 1).unwrap(), Scalar::real(2.0));
        assert!(m.get(2, 0).is_err());
        let column = m.column(1).unwrap();
        assert_eq!(column, Vector::new([2.0, 5.0]).unwrap());
    }

    #[test]
    fn test_jagged_rows_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            Matrix::from_rows(rows),
            Err(LinalgError::InvalidConstruction { .. })
        ));
    }

    #[test]
    fn test_identity() {
        let id = Matrix::identity(3).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(id[(i, j)], Scalar::real(expected));
            }
        }
    }

    #[test]
    fn test_with_primes_row_major() {
        let mut primes = PrimeSequence::new();
        let m = Matrix::with_primes(2, 3, &mut primes).unwrap();
        assert_eq!(m, Matrix::from_rows([[2, 3, 5], [7, 11, 13]]).unwrap());
        let next = Matrix::with_primes(1, 2, &mut primes).unwrap();
        assert_eq!(next, Matrix::from_rows([[17, 19]]).unwrap());
    }

    #[test]
    fn test_set_column() {
        let mut m = Matrix::zeros(2, 2).unwrap();
        m.set_column(1, &Vector::new([5.0, 6.0]).unwrap()).unwrap();
        assert_eq!(m, Matrix::from_rows([[0.0, 5.0], [0.0, 6.0]]).unwrap());
        assert!(m.set_column(0, &Vector::new([1.0]).unwrap()).is_err());
    }

    #[test]
    fn test_seeded_random_fill() {
        let policy = FillPolicy::RandomComplex {
            integer_imaginary: false,
        };
        let a = Matrix::with_fill(2, 2, &policy, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = Matrix::with_fill(2, 2, &policy, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
        assert!(a.data().iter().all(Scalar::is_complex));
    }
}
