use super::Matrix;
use crate::scalar::Scalar;
use crate::storage::NdArray;
use crate::{LinalgError, Result};
use num_traits::Zero;

impl Matrix {
    fn require_same_shape(&self, other: &Matrix, operation: &str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(LinalgError::dimension_mismatch(
                operation,
                self.shape().to_string(),
                other.shape().to_string(),
            ));
        }
        Ok(())
    }

    fn zip_with(&self, other: &Matrix, f: impl Fn(Scalar, Scalar) -> Scalar) -> Result<Matrix> {
        let data = self
            .data()
            .iter()
            .zip(other.data())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }

    /// Elementwise sum
    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.require_same_shape(other, "add")?;
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference
    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.require_same_shape(other, "subtract")?;
        self.zip_with(other, |a, b| a - b)
    }

    /// Matrix product. Each cell's sum starts real and is promoted as soon
    /// as a complex term appears.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(LinalgError::dimension_mismatch(
                "multiply",
                format!("{} rows in right operand", self.cols()),
                format!("{} rows", other.rows()),
            ));
        }

        let (m, n, k) = (self.rows(), other.cols(), self.cols());
        let mut data = Vec::with_capacity(m * n);
        for i in 0..m {
            for j in 0..n {
                let sum = (0..k).fold(Scalar::zero(), |acc, p| {
                    acc + self.at(i, p) * other.at(p, j)
                });
                data.push(sum);
            }
        }
        Matrix::from_parts(m, n, data)
    }

    /// Scale every cell; the result is complex throughout
    pub fn multiply_by_scalar(&self, factor: impl Into<Scalar>) -> Matrix {
        let factor = factor.into().to_complex();
        self.map(|cell| Scalar::Complex(cell.to_complex() * factor))
    }

    pub fn transpose(&self) -> Matrix {
        self.transpose_map(|s| s)
    }

    /// Transpose with every cell conjugated (`Aᴴ`)
    pub fn conjugate_transpose(&self) -> Matrix {
        self.transpose_map(|s| s.conjugate())
    }

    fn transpose_map(&self, f: impl Fn(Scalar) -> Scalar) -> Matrix {
        let (m, n) = (self.rows(), self.cols());
        let mut data = Vec::with_capacity(m * n);
        for j in 0..n {
            for i in 0..m {
                data.push(f(self.at(i, j)));
            }
        }
        Matrix {
            storage: NdArray::from_raw(self.shape().reversed(), data),
        }
    }

    /// Sum of products of corresponding cells, without conjugation
    pub fn dot_product(&self, other: &Matrix) -> Result<Scalar> {
        self.require_same_shape(other, "dot_product")?;
        Ok(self
            .data()
            .iter()
            .zip(other.data())
            .map(|(&a, &b)| a * b)
            .sum())
    }
}
