//! Gaussian elimination with partial pivoting
//!
//! Solve, determinant and inverse share one pivot rule ([`select_pivot`]):
//! take the row with the largest `|cell|` in the pivot column and report
//! [`LinalgError::SingularMatrix`] when that magnitude is within
//! `singular_tolerance` of zero. Rank and row reduction use the same rule
//! with `rank_tolerance`, but skip empty columns instead of failing.

use super::Matrix;
use crate::config::LinalgConfig;
use crate::scalar::Scalar;
use crate::vector::Vector;
use crate::{LinalgError, Result};
use log::{debug, trace};
use num_traits::{One, Zero};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named determinant strategies. Both run the same pivoted elimination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DeterminantMethod {
    #[default]
    Gaussian,
    Lu,
}

impl DeterminantMethod {
    pub const NAMES: [&'static str; 2] = ["gaussian", "lu"];
}

impl FromStr for DeterminantMethod {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gaussian" => Ok(DeterminantMethod::Gaussian),
            "lu" => Ok(DeterminantMethod::Lu),
            other => Err(LinalgError::invalid_selector("determinant", other, &Self::NAMES)),
        }
    }
}

/// Matrix in reduced row echelon form plus the columns that hold pivots
#[derive(Debug, Clone)]
pub(crate) struct RowEchelon {
    pub data: Vec<Scalar>,
    pub cols: usize,
    pub pivots: Vec<usize>,
}

impl RowEchelon {
    pub fn at(&self, row: usize, col: usize) -> Scalar {
        self.data[row * self.cols + col]
    }

    pub fn rank(&self) -> usize {
        self.pivots.len()
    }
}

fn swap_rows(a: &mut [Scalar], width: usize, r1: usize, r2: usize) {
    for j in 0..width {
        a.swap(r1 * width + j, r2 * width + j);
    }
}

/// Index of the row in `from..rows` with the largest magnitude in `col`
fn max_magnitude_row(a: &[Scalar], width: usize, rows: usize, col: usize, from: usize) -> usize {
    let mut max_row = from;
    for k in (from + 1)..rows {
        if a[k * width + col].magnitude() > a[max_row * width + col].magnitude() {
            max_row = k;
        }
    }
    max_row
}

/// Move the largest-magnitude candidate into row `from`.
///
/// Returns whether rows were swapped.
fn select_pivot(
    a: &mut [Scalar],
    width: usize,
    rows: usize,
    col: usize,
    from: usize,
    tolerance: f64,
    operation: &str,
) -> Result<bool> {
    let max_row = max_magnitude_row(a, width, rows, col, from);
    let magnitude = a[max_row * width + col].magnitude();
    if magnitude <= tolerance {
        debug!("{operation}: zero pivot in column {col} (|pivot| = {magnitude:e})");
        return Err(LinalgError::singular_matrix(operation, col));
    }
    if max_row != from {
        trace!("{operation}: swap rows {from} and {max_row} for column {col}");
        swap_rows(a, width, from, max_row);
        return Ok(true);
    }
    Ok(false)
}

/// Forward elimination on an `n × width` block, pivoting over the first `n`
/// columns. Returns the number of row swaps.
fn forward_eliminate(
    a: &mut [Scalar],
    n: usize,
    width: usize,
    tolerance: f64,
    operation: &str,
) -> Result<usize> {
    let mut swaps = 0;
    for i in 0..n {
        if select_pivot(a, width, n, i, i, tolerance, operation)? {
            swaps += 1;
        }
        let pivot = a[i * width + i];
        for k in (i + 1)..n {
            let factor = a[k * width + i]
                .checked_div(&pivot)
                .map_err(|e| e.in_operation(operation))?;
            a[k * width + i] = Scalar::zero();
            for j in (i + 1)..width {
                a[k * width + j] = a[k * width + j] - factor * a[i * width + j];
            }
        }
    }
    Ok(swaps)
}

impl Matrix {
    /// Solve `A·x = b` for square, non-singular `A`
    pub fn solve_linear_system(&self, b: &Vector) -> Result<Vector> {
        self.solve_linear_system_with(b, &LinalgConfig::default())
    }

    pub fn solve_linear_system_with(&self, b: &Vector, config: &LinalgConfig) -> Result<Vector> {
        const OP: &str = "solve_linear_system";
        let n = self.require_square(OP)?;
        if b.len() != n {
            return Err(LinalgError::dimension_mismatch(
                OP,
                format!("right-hand side of length {n}"),
                format!("length {}", b.len()),
            ));
        }

        // [A | b]
        let width = n + 1;
        let mut a = Vec::with_capacity(n * width);
        for (i, rhs) in b.iter().enumerate() {
            a.extend_from_slice(&self.data()[i * n..(i + 1) * n]);
            a.push(*rhs);
        }

        forward_eliminate(&mut a, n, width, config.singular_tolerance, OP)?;

        // Back substitution
        let mut x = vec![Scalar::zero(); n];
        for i in (0..n).rev() {
            let sum: Scalar = ((i + 1)..n).map(|j| a[i * width + j] * x[j]).sum();
            x[i] = (a[i * width + n] - sum)
                .checked_div(&a[i * width + i])
                .map_err(|e| e.in_operation(OP))?;
        }
        Vector::from_scalars(x)
    }

    /// Determinant by pivoted elimination; 0 for a singular matrix
    pub fn determinant(&self, method: DeterminantMethod) -> Result<Scalar> {
        self.determinant_with(method, &LinalgConfig::default())
    }

    pub fn determinant_with(&self, method: DeterminantMethod, config: &LinalgConfig) -> Result<Scalar> {
        const OP: &str = "determinant";
        let n = self.require_square(OP)?;
        trace!("{OP}: {method:?} on {n}x{n} matrix");

        let mut a = self.data().to_vec();
        let swaps = match forward_eliminate(&mut a, n, n, config.singular_tolerance, OP) {
            Ok(swaps) => swaps,
            Err(e) if e.is_singular() => return Ok(Scalar::zero()),
            Err(e) => return Err(e),
        };

        let det = (0..n).fold(Scalar::one(), |det, i| det * a[i * n + i]);
        Ok(if swaps % 2 == 1 { -det } else { det })
    }

    /// Inverse by Gauss-Jordan elimination on `[A | I]`
    pub fn inverse(&self) -> Result<Matrix> {
        self.inverse_with(&LinalgConfig::default())
    }

    pub fn inverse_with(&self, config: &LinalgConfig) -> Result<Matrix> {
        const OP: &str = "inverse";
        let n = self.require_square(OP)?;
        let width = 2 * n;

        let mut a = Vec::with_capacity(n * width);
        for i in 0..n {
            a.extend_from_slice(&self.data()[i * n..(i + 1) * n]);
            a.extend((0..n).map(|j| if i == j { Scalar::one() } else { Scalar::zero() }));
        }

        for i in 0..n {
            select_pivot(&mut a, width, n, i, i, config.singular_tolerance, OP)?;

            // Normalize the pivot row
            let pivot = a[i * width + i];
            for j in 0..width {
                a[i * width + j] = a[i * width + j]
                    .checked_div(&pivot)
                    .map_err(|e| e.in_operation(OP))?;
            }

            // Clear the pivot column in every other row
            for k in (0..n).filter(|&k| k != i) {
                let factor = a[k * width + i];
                if factor.is_zero() {
                    continue;
                }
                for j in 0..width {
                    a[k * width + j] = a[k * width + j] - factor * a[i * width + j];
                }
            }
        }

        let inverse = (0..n)
            .flat_map(|i| a[i * width + n..(i + 1) * width].to_vec())
            .collect();
        Matrix::from_parts(n, n, inverse)
    }

    /// Number of linearly independent rows
    pub fn rank(&self) -> Result<usize> {
        self.rank_with(&LinalgConfig::default())
    }

    pub fn rank_with(&self, config: &LinalgConfig) -> Result<usize> {
        let rank = self.row_reduce(config.rank_tolerance)?.rank();
        debug!("rank of {}x{} matrix: {rank}", self.rows(), self.cols());
        Ok(rank)
    }

    /// Reduced row echelon form. Columns whose best pivot is within
    /// `tolerance` of zero are skipped.
    pub(crate) fn row_reduce(&self, tolerance: f64) -> Result<RowEchelon> {
        const OP: &str = "row_reduce";
        let (rows, cols) = (self.rows(), self.cols());
        let mut a = self.data().to_vec();
        let mut pivots = Vec::new();

        for col in 0..cols {
            let r = pivots.len();
            if r == rows {
                break;
            }
            match select_pivot(&mut a, cols, rows, col, r, tolerance, OP) {
                Ok(_) => {}
                Err(e) if e.is_singular() => continue,
                Err(e) => return Err(e),
            }

            let pivot = a[r * cols + col];
            for j in col..cols {
                a[r * cols + j] = a[r * cols + j]
                    .checked_div(&pivot)
                    .map_err(|e| e.in_operation(OP))?;
            }
            for k in (0..rows).filter(|&k| k != r) {
                let factor = a[k * cols + col];
                if factor.is_zero() {
                    continue;
                }
                for j in col..cols {
                    a[k * cols + j] = a[k * cols + j] - factor * a[r * cols + j];
                }
            }
            pivots.push(col);
        }

        Ok(RowEchelon {
            data: a,
            cols,
            pivots,
        })
    }

    /// Least-squares solution `x = (AᵗA)⁻¹·Aᵗ·b`
    pub fn least_squares(&self, b: &Vector) -> Result<Vector> {
        self.least_squares_with(b, &LinalgConfig::default())
    }

    pub fn least_squares_with(&self, b: &Vector, config: &LinalgConfig) -> Result<Vector> {
        const OP: &str = "least_squares";
        let at = self.transpose();
        let ata = at.multiply(self)?;
        let atb = at
            .multiply(&b.as_matrix().transpose())
            .map_err(|e| e.in_operation(OP))?;
        let x = ata
            .inverse_with(config)
            .map_err(|e| e.in_operation(OP))?
            .multiply(&atb)?;
        Vector::try_from(x.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn m(rows: &[&[f64]]) -> Matrix {
        Matrix::from_rows(rows.iter().map(|r| r.to_vec())).unwrap()
    }

    #[test]
    fn test_determinant_methods_agree() {
        let a = m(&[&[2.0, -1.0, 0.0], &[-1.0, 2.0, -1.0], &[0.0, -1.0, 2.0]]);
        let g = a.determinant(DeterminantMethod::Gaussian).unwrap();
        let l = a.determinant(DeterminantMethod::Lu).unwrap();
        assert_relative_eq!(g.re(), 4.0, epsilon = 1e-12);
        assert_eq!(g, l);
    }

    #[test]
    fn test_determinant_with_row_swap() {
        let a = m(&[&[4.0, 3.0], &[6.0, 3.0]]);
        let det = a.determinant(DeterminantMethod::Gaussian).unwrap();
        assert_relative_eq!(det.re(), -6.0, epsilon = 1e-12);
        assert!(det.is_real());
    }

    #[test]
    fn test_determinant_of_singular_is_zero() {
        let a = m(&[&[1.0, 2.0], &[0.0, 0.0]]);
        assert_eq!(a.determinant(DeterminantMethod::Gaussian).unwrap(), Scalar::zero());
        let b = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        assert_eq!(b.determinant(DeterminantMethod::Lu).unwrap(), Scalar::zero());
    }

    #[test]
    fn test_non_square_is_dimension_mismatch() {
        let a = m(&[&[1.0, 2.0, 3.0]]);
        assert!(matches!(
            a.determinant(DeterminantMethod::Gaussian),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        assert!(matches!(a.inverse(), Err(LinalgError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_selector_names() {
        assert_eq!("lu".parse::<DeterminantMethod>().unwrap(), DeterminantMethod::Lu);
        assert!(matches!(
            "laplace".parse::<DeterminantMethod>(),
            Err(LinalgError::InvalidAlgorithmSelector { .. })
        ));
    }

    #[test]
    fn test_solve_needs_pivoting() {
        let a = m(&[&[0.0, 1.0], &[1.0, 1.0]]);
        let b = Vector::new([2.0, 3.0]).unwrap();
        let x = a.solve_linear_system(&b).unwrap();
        assert_relative_eq!(x.get(0).unwrap().re(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(x.get(1).unwrap().re(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_signal_is_shared() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        let b = Vector::new([1.0, 1.0]).unwrap();
        assert!(a.solve_linear_system(&b).unwrap_err().is_singular());
        assert!(a.inverse().unwrap_err().is_singular());
    }

    #[test]
    fn test_singular_tolerance() {
        let a = m(&[&[1.0, 1.0], &[1.0, 1.0 + 1e-14]]);
        assert!(a.inverse().is_ok());
        let loose = LinalgConfig::default().with_singular_tolerance(1e-12);
        assert!(a.inverse_with(&loose).unwrap_err().is_singular());
    }

    #[test]
    fn test_inverse_complex() {
        let a = Matrix::from_rows([
            [Scalar::complex(1.0, 1.0), Scalar::real(2.0)],
            [Scalar::real(0.0), Scalar::complex(0.0, -1.0)],
        ])
        .unwrap();
        let product = a.inverse().unwrap().multiply(&a).unwrap();
        assert!(product.approx_eq(&Matrix::identity(2).unwrap(), 1e-12));
    }

    #[test]
    fn test_rank() {
        assert_eq!(m(&[&[1.0, 2.0], &[2.0, 4.0]]).rank().unwrap(), 1);
        assert_eq!(m(&[&[1.0, 0.0, 2.0], &[0.0, 1.0, 3.0]]).rank().unwrap(), 2);
        assert_eq!(m(&[&[0.0, 0.0], &[0.0, 0.0]]).rank().unwrap(), 0);
        assert_eq!(Matrix::identity(4).unwrap().rank().unwrap(), 4);
    }

    #[test]
    fn test_row_reduce_pivots() {
        let echelon = m(&[&[1.0, 2.0, 3.0], &[2.0, 4.0, 7.0]]).row_reduce(1e-10).unwrap();
        assert_eq!(echelon.pivots, vec![0, 2]);
        assert!(echelon.at(0, 1).approx_eq(&Scalar::real(2.0), 1e-12));
        assert!(echelon.at(1, 2).approx_eq(&Scalar::real(1.0), 1e-12));
    }

    #[test]
    fn test_least_squares_line_fit() {
        // y = 1 + 2t sampled exactly at t = 0, 1, 2
        let a = m(&[&[1.0, 0.0], &[1.0, 1.0], &[1.0, 2.0]]);
        let b = Vector::new([1.0, 3.0, 5.0]).unwrap();
        let x = a.least_squares(&b).unwrap();
        assert_eq!(x.len(), 2);
        assert_relative_eq!(x.get(0).unwrap().re(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(x.get(1).unwrap().re(), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_least_squares_rank_deficient() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0], &[3.0, 6.0]]);
        let b = Vector::new([1.0, 2.0, 3.0]).unwrap();
        assert!(a.least_squares(&b).unwrap_err().is_singular());
    }
}
