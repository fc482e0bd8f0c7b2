//! # linplex - Dense real/complex linear algebra
//!
//! linplex works on small dense matrices whose cells are either real or
//! complex. Mixed operands are promoted per cell, so a real matrix times a
//! complex one needs no conversion step.
//!
//! ## Quick Start
//!
//! ```rust
//! use linplex::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a = Matrix::from_rows([[2.0, 1.0], [1.0, 1.0]])?;
//! let b = Vector::new([3.0, 2.0])?;
//!
//! let x = a.solve_linear_system(&b)?;
//! assert_eq!(x, Vector::new([1.0, 1.0])?);
//!
//! let det = a.determinant(DeterminantMethod::Gaussian)?;
//! assert_eq!(det, Scalar::real(1.0));
//! # Ok(())
//! # }
//! ```
//!
//! ### Factorizations
//!
//! ```rust
//! use linplex::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let a = Matrix::from_rows([[4.0, 2.0], [2.0, 3.0]])?;
//! let (l, u) = a.lu_factorization(LuAlgorithm::Cholesky, false)?;
//! assert!(l.multiply(&u)?.approx_eq(&a, 1e-12));
//!
//! let (q, r) = a.qr_factorization(QrAlgorithm::Givens)?;
//! assert!(q.multiply(&r)?.approx_eq(&a, 1e-12));
//! # Ok(())
//! # }
//! ```
//!
//! ### Linear maps
//!
//! ```rust
//! use linplex::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // (x, y) -> (x + y, 2x + 2y) collapses the line y = -x
//! let domain = Vector::zeros(2)?;
//! let map = |v: &Vector| Vector::new([v[0] + v[1], (v[0] + v[1]) * Scalar::real(2.0)]);
//! assert_eq!(domain.kernel_of_transformation(map)?.len(), 1);
//! assert_eq!(domain.image_of_transformation(map)?.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: scalars, N-dimensional storage, matrices and vectors
//! - [`render`]: plain-text and HTML output built on the public accessors
//!
//! ## Feature Flags
//!
//! - `serialize`: serde derives on shapes, scalars, configuration and
//!   algorithm selectors

#![deny(missing_docs)]
#![warn(clippy::all)]

pub use linplex_core as core;

pub mod render;

/// Prelude module for convenient imports
///
/// ```rust
/// use linplex::prelude::*;
/// ```
pub mod prelude {
    // Values
    pub use crate::core::{Complex64, Literal, Scalar};

    // Containers
    pub use crate::core::{Matrix, NdArray, Shape, Vector};

    // Algorithm selectors
    pub use crate::core::{AngleMetric, DeterminantMethod, FillPolicy, LuAlgorithm, QrAlgorithm};

    // Configuration and errors
    pub use crate::core::{LinalgConfig, LinalgError};

    pub use crate::render::{html_table, styled_html_table, text_dump, TableStyle};
}

/// The version of linplex
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version string of linplex
pub fn version() -> &'static str {
    VERSION
}
