//! Row vectors and linear-map probing
//!
//! A [`Vector`] is a `1 × n` [`Matrix`] addressed with a single index.
//! Linear maps are plain closures from `&Vector` to anything convertible
//! into a `Matrix`; [`Vector::kernel_of_transformation`] and
//! [`Vector::image_of_transformation`] recover their structure by feeding
//! them the standard basis.

use crate::config::LinalgConfig;
use crate::literal::Literal;
use crate::matrix::Matrix;
use crate::scalar::Scalar;
use crate::storage::NdArray;
use crate::{LinalgError, Result};
use log::debug;
use num_traits::{One, Zero};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::str::FromStr;

/// A boxed linear map, as produced by [`Vector::compose_transformations`]
pub type Transformation = Box<dyn Fn(&Vector) -> Result<Vector>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    matrix: Matrix,
}

/// How [`Vector::angle_with_vector`] measures the angle.
///
/// `Manhattan` and `Minkowski` use per-element minima normalised by the
/// distance between the vectors. They are not the textbook angles and can
/// produce NaN when the ratio leaves `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum AngleMetric {
    #[default]
    Euclidean,
    Manhattan,
    Minkowski(f64),
}

impl AngleMetric {
    pub const NAMES: [&'static str; 4] = ["euclidean", "manhattan", "minkowski", "minkowski:<p>"];
}

impl FromStr for AngleMetric {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "euclidean" => Ok(AngleMetric::Euclidean),
            "manhattan" => Ok(AngleMetric::Manhattan),
            "minkowski" => Ok(AngleMetric::Minkowski(2.0)),
            other => other
                .strip_prefix("minkowski:")
                .and_then(|p| p.parse::<f64>().ok())
                .filter(|p| *p > 0.0)
                .map(AngleMetric::Minkowski)
                .ok_or_else(|| LinalgError::invalid_selector("angle_with_vector", other, &Self::NAMES)),
        }
    }
}

impl Vector {
    pub fn new<I, T>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Scalar>,
    {
        Self::from_scalars(values.into_iter().map(Into::into).collect())
    }

    pub fn from_scalars(values: Vec<Scalar>) -> Result<Self> {
        Ok(Self {
            matrix: Matrix::from_parts(1, values.len(), values)?,
        })
    }

    pub fn zeros(n: usize) -> Result<Self> {
        Ok(Self {
            matrix: Matrix::zeros(1, n)?,
        })
    }

    /// Standard basis vector `e_i` of length `n`
    pub fn basis(n: usize, i: usize) -> Result<Self> {
        let mut v = Self::zeros(n)?;
        v.set(i, Scalar::one())?;
        Ok(v)
    }

    /// From a flat literal list, or a nested list holding a single row
    pub fn from_literal(literal: impl Into<Literal>) -> Result<Self> {
        let storage = NdArray::from_literal(literal)?;
        let dims = storage.dims().to_vec();
        match dims.as_slice() {
            [_] | [1, _] => Self::from_scalars(storage.into_vec()),
            dims => Err(LinalgError::invalid_construction(
                "vector",
                format!("expected a single row, got shape {dims:?}"),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.matrix.cols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, i: usize) -> Result<Scalar> {
        self.matrix.get(0, i)
    }

    pub fn set(&mut self, i: usize, value: impl Into<Scalar>) -> Result<()> {
        self.matrix.set(0, i, value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.matrix.data().iter()
    }

    pub fn as_slice(&self) -> &[Scalar] {
        self.matrix.data()
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    pub fn add(&self, other: &Vector) -> Result<Vector> {
        Vector::try_from(self.matrix.add(&other.matrix)?)
    }

    pub fn subtract(&self, other: &Vector) -> Result<Vector> {
        Vector::try_from(self.matrix.subtract(&other.matrix)?)
    }

    /// Multiply every element, following the promotion rule per element
    pub fn scale(&self, factor: impl Into<Scalar>) -> Vector {
        let factor = factor.into();
        Vector {
            matrix: self.matrix.map(|x| *x * factor),
        }
    }

    /// Bilinear `Σ a_i·b_i` (no conjugation)
    pub fn dot_product(&self, other: &Vector) -> Result<Scalar> {
        self.matrix.dot_product(&other.matrix)
    }

    /// Hermitian `Σ conj(a_i)·b_i`; real and non-negative for `self` with itself
    pub fn inner_product(&self, other: &Vector) -> Result<Scalar> {
        self.require_same_len(other, "inner_product")?;
        Ok(self
            .iter()
            .zip(other.iter())
            .map(|(a, b)| a.conjugate() * *b)
            .sum())
    }

    /// p-norm. For `p = 2` this is `√Re(self·self)` over the bilinear dot
    /// product, which for complex entries is not the Hermitian length;
    /// every other `p` uses `(Σ|x_i|^p)^(1/p)`.
    pub fn norm(&self, p: f64) -> f64 {
        if p == 2.0 {
            let self_dot: Scalar = self.iter().map(|x| *x * *x).sum();
            self_dot.re().sqrt()
        } else {
            self.iter()
                .map(|x| x.magnitude().powf(p))
                .sum::<f64>()
                .powf(1.0 / p)
        }
    }

    /// Divide every element by a real or complex scalar (text is parsed)
    pub fn divide(&self, divisor: impl Into<Literal>) -> Result<Vector> {
        const OP: &str = "vector_divide";
        let divisor = divisor.into().to_scalar().ok_or_else(|| {
            LinalgError::unsupported_operand(OP, "divisor must be a real or complex scalar, got a list")
        })?;
        let values = self
            .iter()
            .map(|x| x.checked_div(&divisor))
            .collect::<Result<Vec<_>>>()
            .map_err(|e| e.in_operation(OP))?;
        Vector::from_scalars(values)
    }

    /// Angle between two vectors of equal length, in radians
    pub fn angle_with_vector(&self, other: &Vector, metric: AngleMetric) -> Result<f64> {
        const OP: &str = "angle_with_vector";
        self.require_same_len(other, OP)?;

        match metric {
            AngleMetric::Euclidean => {
                let denominator = self.norm(2.0) * other.norm(2.0);
                if denominator == 0.0 || denominator.is_nan() {
                    return Err(LinalgError::divide_by_zero(OP));
                }
                let cosine = self.dot_product(other)?.re() / denominator;
                Ok(cosine.clamp(-1.0, 1.0).acos())
            }
            AngleMetric::Manhattan => {
                let distance: f64 = self
                    .iter()
                    .zip(other.iter())
                    .map(|(a, b)| (*a - *b).magnitude())
                    .sum();
                if distance == 0.0 {
                    return Ok(0.0);
                }
                let overlap: f64 = self
                    .iter()
                    .zip(other.iter())
                    .map(|(a, b)| a.magnitude().min(b.magnitude()))
                    .sum();
                Ok((overlap / distance).acos())
            }
            AngleMetric::Minkowski(p) => {
                let distance = self
                    .iter()
                    .zip(other.iter())
                    .map(|(a, b)| (*a - *b).magnitude().powf(p))
                    .sum::<f64>()
                    .powf(1.0 / p);
                if distance == 0.0 {
                    return Ok(0.0);
                }
                let overlap: f64 = self
                    .iter()
                    .zip(other.iter())
                    .map(|(a, b)| a.magnitude().powf(p).min(b.magnitude().powf(p)))
                    .sum();
                Ok((overlap / distance).acos())
            }
        }
    }

    /// Chain maps left to right: the result applies `transforms[0]` first
    pub fn compose_transformations(transforms: Vec<Transformation>) -> Transformation {
        Box::new(move |v: &Vector| {
            transforms
                .iter()
                .try_fold(v.clone(), |acc, transform| transform(&acc))
        })
    }

    /// Basis of the null space of `transform`, taken as a map on vectors of
    /// `self.len()` entries
    pub fn kernel_of_transformation<F, M>(&self, transform: F) -> Result<Vec<Vector>>
    where
        F: Fn(&Vector) -> Result<M>,
        M: Into<Matrix>,
    {
        self.kernel_of_transformation_with(transform, &LinalgConfig::default())
    }

    pub fn kernel_of_transformation_with<F, M>(
        &self,
        transform: F,
        config: &LinalgConfig,
    ) -> Result<Vec<Vector>>
    where
        F: Fn(&Vector) -> Result<M>,
        M: Into<Matrix>,
    {
        const OP: &str = "kernel_of_transformation";
        let dim = self.len();
        let images = sample_images(dim, &transform, OP)?;

        // Images are the columns of the map's matrix
        let rows: Vec<&[Scalar]> = images.iter().map(Vector::as_slice).collect();
        let coefficients = Matrix::from_rows(rows.iter().map(|r| r.iter().copied()))?.transpose();
        let echelon = coefficients.row_reduce(config.rank_tolerance)?;

        let mut basis = Vec::new();
        for free in (0..dim).filter(|c| !echelon.pivots.contains(c)) {
            let mut x = vec![Scalar::zero(); dim];
            x[free] = Scalar::one();
            for (row, &pivot) in echelon.pivots.iter().enumerate() {
                x[pivot] = -echelon.at(row, free);
            }
            basis.push(Vector::from_scalars(x)?);
        }
        debug!("{OP}: rank {}, kernel dimension {}", echelon.rank(), basis.len());
        Ok(basis)
    }

    /// A maximal linearly independent subset of the images of the
    /// standard basis under `transform`
    pub fn image_of_transformation<F, M>(&self, transform: F) -> Result<Vec<Vector>>
    where
        F: Fn(&Vector) -> Result<M>,
        M: Into<Matrix>,
    {
        self.image_of_transformation_with(transform, &LinalgConfig::default())
    }

    pub fn image_of_transformation_with<F, M>(
        &self,
        transform: F,
        config: &LinalgConfig,
    ) -> Result<Vec<Vector>>
    where
        F: Fn(&Vector) -> Result<M>,
        M: Into<Matrix>,
    {
        const OP: &str = "image_of_transformation";
        let images = sample_images(self.len(), &transform, OP)?;

        let mut selected: Vec<Vector> = Vec::new();
        let mut rank = 0;
        for image in images {
            let candidate = Matrix::from_rows(
                selected
                    .iter()
                    .chain(std::iter::once(&image))
                    .map(|v| v.iter().copied()),
            )?;
            let candidate_rank = candidate.rank_with(config)?;
            if candidate_rank > rank {
                rank = candidate_rank;
                selected.push(image);
            }
        }
        debug!("{OP}: image dimension {rank}");
        Ok(selected)
    }

    fn require_same_len(&self, other: &Vector, operation: &str) -> Result<()> {
        if self.len() != other.len() {
            return Err(LinalgError::dimension_mismatch(
                operation,
                format!("length {}", self.len()),
                format!("length {}", other.len()),
            ));
        }
        Ok(())
    }
}

/// Apply `transform` to each standard basis vector of length `dim`
fn sample_images<F, M>(dim: usize, transform: &F, operation: &str) -> Result<Vec<Vector>>
where
    F: Fn(&Vector) -> Result<M>,
    M: Into<Matrix>,
{
    let mut images: Vec<Vector> = Vec::with_capacity(dim);
    for i in 0..dim {
        let image: Matrix = transform(&Vector::basis(dim, i)?)?.into();
        let image = Vector::try_from(image).map_err(|e| e.in_operation(operation))?;
        if let Some(first) = images.first() {
            if first.len() != image.len() {
                return Err(LinalgError::dimension_mismatch(
                    operation,
                    format!("images of length {}", first.len()),
                    format!("length {} for basis vector {i}", image.len()),
                ));
            }
        }
        images.push(image);
    }
    Ok(images)
}

impl TryFrom<Matrix> for Vector {
    type Error = LinalgError;

    fn try_from(matrix: Matrix) -> Result<Self> {
        if matrix.rows() != 1 {
            return Err(LinalgError::unsupported_operand(
                "vector",
                format!("expected a 1xn matrix, got {}x{}", matrix.rows(), matrix.cols()),
            ));
        }
        Ok(Self { matrix })
    }
}

impl From<Vector> for Matrix {
    fn from(vector: Vector) -> Self {
        vector.matrix
    }
}

impl Index<usize> for Vector {
    type Output = Scalar;

    fn index(&self, index: usize) -> &Scalar {
        &self.as_slice()[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn v(values: &[f64]) -> Vector {
        Vector::new(values.iter().copied()).unwrap()
    }

    #[test]
    fn test_construction() {
        assert!(matches!(
            Vector::new(Vec::<f64>::new()),
            Err(LinalgError::InvalidConstruction { .. })
        ));
        let from_text = Vector::from_literal(vec!["1", "2i", "3:1"]).unwrap();
        assert_eq!(from_text.len(), 3);
        assert_eq!(from_text[1], Scalar::complex(0.0, 2.0));
        assert!(Vector::from_literal(vec![vec![1, 2], vec![3, 4]]).is_err());
        assert!(Vector::basis(2, 2).is_err());
    }

    #[test]
    fn test_try_from_matrix() {
        let column = Matrix::from_rows([[1.0], [2.0]]).unwrap();
        assert!(matches!(
            Vector::try_from(column),
            Err(LinalgError::UnsupportedOperandType { .. })
        ));
    }

    #[test]
    fn test_norms() {
        assert_relative_eq!(v(&[3.0, 4.0]).norm(2.0), 5.0);
        assert_relative_eq!(v(&[3.0, -4.0]).norm(1.0), 7.0);
        assert_relative_eq!(v(&[1.0, 2.0, 2.0]).norm(3.0), 17.0_f64.powf(1.0 / 3.0));
    }

    #[test]
    fn test_bilinear_norm_caveat() {
        let z = Vector::new([Scalar::complex(0.0, 1.0)]).unwrap();
        // i·i = -1, so the bilinear 2-norm is NaN while the Hermitian length is 1
        assert!(z.norm(2.0).is_nan());
        assert_eq!(z.inner_product(&z).unwrap(), Scalar::real(1.0));
    }

    #[test]
    fn test_divide() {
        let x = v(&[2.0, 4.0]);
        assert_eq!(x.divide(2.0).unwrap(), v(&[1.0, 2.0]));
        let by_i = x.divide(Scalar::i()).unwrap();
        assert!(by_i[0].approx_eq(&Scalar::complex(0.0, -2.0), 1e-12));
        assert!(matches!(
            x.divide(vec![1.0]),
            Err(LinalgError::UnsupportedOperandType { .. })
        ));
        assert!(matches!(
            x.divide(0.0),
            Err(LinalgError::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_euclidean_angle() {
        let angle = v(&[1.0, 0.0])
            .angle_with_vector(&v(&[0.0, 1.0]), AngleMetric::Euclidean)
            .unwrap();
        assert_relative_eq!(angle, FRAC_PI_2);

        let same = v(&[0.1, 0.2, 0.3]);
        assert!(same.angle_with_vector(&same, AngleMetric::Euclidean).unwrap() < 1e-7);

        assert!(matches!(
            v(&[0.0, 0.0]).angle_with_vector(&v(&[1.0, 0.0]), AngleMetric::Euclidean),
            Err(LinalgError::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_manhattan_and_minkowski_angles() {
        let a = v(&[1.0, 0.0]);
        let b = v(&[0.0, 1.0]);
        // overlap 0, distance 2
        assert_relative_eq!(a.angle_with_vector(&b, AngleMetric::Manhattan).unwrap(), FRAC_PI_2);
        assert_eq!(a.angle_with_vector(&a, AngleMetric::Manhattan).unwrap(), 0.0);
        // overlap 0, distance √2
        assert_relative_eq!(
            a.angle_with_vector(&b, AngleMetric::Minkowski(2.0)).unwrap(),
            FRAC_PI_2
        );
        let c = v(&[2.0, 2.0]);
        let d = v(&[1.0, 2.0]);
        // overlap 3, distance 1: outside acos's domain
        assert!(c.angle_with_vector(&d, AngleMetric::Manhattan).unwrap().is_nan());
    }

    #[test]
    fn test_angle_metric_names() {
        assert_eq!("manhattan".parse::<AngleMetric>().unwrap(), AngleMetric::Manhattan);
        assert_eq!("minkowski".parse::<AngleMetric>().unwrap(), AngleMetric::Minkowski(2.0));
        assert_eq!("minkowski:3".parse::<AngleMetric>().unwrap(), AngleMetric::Minkowski(3.0));
        assert!(matches!(
            "chebyshev".parse::<AngleMetric>(),
            Err(LinalgError::InvalidAlgorithmSelector { .. })
        ));
        assert!("minkowski:-1".parse::<AngleMetric>().is_err());
    }

    #[test]
    fn test_compose_applies_in_order() {
        let double: Transformation = Box::new(|x: &Vector| -> Result<Vector> { Ok(x.scale(2.0)) });
        let shift: Transformation = Box::new(|x: &Vector| x.add(&v(&[1.0, 1.0])));
        let composed = Vector::compose_transformations(vec![double, shift]);
        assert_eq!(composed(&v(&[1.0, 2.0])).unwrap(), v(&[3.0, 5.0]));
    }

    #[test]
    fn test_kernel_identity_and_zero() {
        let domain = Vector::zeros(2).unwrap();
        let identity = |x: &Vector| -> Result<Vector> { Ok(x.clone()) };
        assert!(domain.kernel_of_transformation(identity).unwrap().is_empty());

        let zero = |x: &Vector| Vector::zeros(x.len());
        let kernel = domain.kernel_of_transformation(zero).unwrap();
        assert_eq!(kernel, vec![Vector::basis(2, 0).unwrap(), Vector::basis(2, 1).unwrap()]);
    }

    #[test]
    fn test_kernel_of_projection() {
        // (x, y, z) -> (x + y, z): kernel spanned by (1, -1, 0)
        let domain = Vector::zeros(3).unwrap();
        let kernel = domain
            .kernel_of_transformation(|x: &Vector| Vector::new([x[0] + x[1], x[2]]))
            .unwrap();
        assert_eq!(kernel.len(), 1);
        assert!(kernel[0].as_matrix().approx_eq(v(&[-1.0, 1.0, 0.0]).as_matrix(), 1e-12));
    }

    #[test]
    fn test_kernel_rejects_non_row_images() {
        let domain = Vector::zeros(2).unwrap();
        let column = |x: &Vector| -> Result<Matrix> { Ok(x.as_matrix().transpose()) };
        assert!(matches!(
            domain.kernel_of_transformation(column),
            Err(LinalgError::UnsupportedOperandType { .. })
        ));
        let ragged = |x: &Vector| Vector::zeros(1 + (x[1].re() as usize));
        assert!(matches!(
            domain.kernel_of_transformation(ragged),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_image_greedy_selection() {
        // (x, y, z) -> (x + z, y + z, x + y + 2z): rank 2
        let domain = Vector::zeros(3).unwrap();
        let image = domain
            .image_of_transformation(|x: &Vector| {
                Vector::new([x[0] + x[2], x[1] + x[2], x[0] + x[1] + x[2] + x[2]])
            })
            .unwrap();
        assert_eq!(image, vec![v(&[1.0, 0.0, 1.0]), v(&[0.0, 1.0, 1.0])]);

        let zero = |x: &Vector| Vector::zeros(x.len());
        assert!(domain.image_of_transformation(zero).unwrap().is_empty());
    }
}
