#![allow(clippy::result_large_err)]

pub mod complex;
pub mod config;
pub mod error;
pub mod fill;
pub mod literal;
pub mod matrix;
pub mod primes;
pub mod scalar;
pub mod shape;
pub mod storage;
pub mod vector;

pub use complex::Complex64;
pub use config::LinalgConfig;
pub use error::{LinalgError, Result};
pub use fill::FillPolicy;
pub use literal::{parse_scalar, Literal};
pub use matrix::{
    DeterminantMethod, EigenApprox, EigenDecomposition, LuAlgorithm, Matrix, QrAlgorithm,
};
pub use primes::PrimeSequence;
pub use scalar::{Promoted, Scalar};
pub use shape::Shape;
pub use storage::NdArray;
pub use vector::{AngleMetric, Transformation, Vector};
