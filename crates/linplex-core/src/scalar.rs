//! Real/complex scalar field
//!
//! Every storage cell holds a [`Scalar`]. Mixed operands follow one
//! promotion rule, implemented once in [`Scalar::promote`]:
//!
//! - real ⊗ real → real
//! - complex ⊗ complex → complex
//! - real ⊗ complex, complex ⊗ real → the real operand becomes `complex(x, 0)`

use crate::complex::Complex64;
use crate::{LinalgError, Result};
use num_traits::{One, Zero};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

/// A real or complex number.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Scalar {
    Real(f64),
    Complex(Complex64),
}

/// A pair of operands brought to a common representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Promoted {
    Real(f64, f64),
    Complex(Complex64, Complex64),
}

impl Scalar {
    pub fn real(value: f64) -> Self {
        Scalar::Real(value)
    }

    pub fn complex(real: f64, imag: f64) -> Self {
        Scalar::Complex(Complex64::new(real, imag))
    }

    /// The imaginary unit
    pub fn i() -> Self {
        Scalar::complex(0.0, 1.0)
    }

    /// Bring two operands to a common representation.
    pub fn promote(self, other: Scalar) -> Promoted {
        match (self, other) {
            (Scalar::Real(a), Scalar::Real(b)) => Promoted::Real(a, b),
            (a, b) => Promoted::Complex(a.to_complex(), b.to_complex()),
        }
    }

    pub fn re(&self) -> f64 {
        match self {
            Scalar::Real(x) => *x,
            Scalar::Complex(c) => c.real,
        }
    }

    pub fn im(&self) -> f64 {
        match self {
            Scalar::Real(_) => 0.0,
            Scalar::Complex(c) => c.imag,
        }
    }

    /// True for the `Real` variant (a complex value with zero imaginary part is still complex)
    pub fn is_real(&self) -> bool {
        matches!(self, Scalar::Real(_))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Scalar::Complex(_))
    }

    /// Coerce to complex form
    pub fn to_complex(&self) -> Complex64 {
        match self {
            Scalar::Real(x) => Complex64::from_real(*x),
            Scalar::Complex(c) => *c,
        }
    }

    /// `re² + im²`
    pub fn norm_sqr(&self) -> f64 {
        match self {
            Scalar::Real(x) => x * x,
            Scalar::Complex(c) => c.norm_sqr(),
        }
    }

    /// `√(re² + im²)`
    pub fn magnitude(&self) -> f64 {
        match self {
            Scalar::Real(x) => x.abs(),
            Scalar::Complex(c) => c.magnitude(),
        }
    }

    /// `atan2(im, re)`
    pub fn argument(&self) -> f64 {
        self.im().atan2(self.re())
    }

    pub fn conjugate(&self) -> Self {
        match self {
            Scalar::Real(x) => Scalar::Real(*x),
            Scalar::Complex(c) => Scalar::Complex(c.conjugate()),
        }
    }

    /// Raise to a real power via polar form (De Moivre: `r^n`, `n·φ`).
    ///
    /// Non-negative reals stay real; a negative real base is promoted.
    pub fn power(&self, n: f64) -> Self {
        match self {
            Scalar::Real(x) if *x >= 0.0 => Scalar::Real(x.powf(n)),
            other => Scalar::Complex(other.to_complex().powf(n)),
        }
    }

    /// Build from polar coordinates, with the angle given in degrees
    pub fn from_polar(magnitude: f64, angle_degrees: f64) -> Self {
        Scalar::Complex(Complex64::from_polar(magnitude, angle_degrees.to_radians()))
    }

    /// Principal square root; a negative real yields a complex root
    pub fn sqrt(&self) -> Self {
        match self {
            Scalar::Real(x) if *x >= 0.0 => Scalar::Real(x.sqrt()),
            other => Scalar::Complex(other.to_complex().sqrt()),
        }
    }

    /// Divide, failing with `DivideByZero` when `re² + im²` of the divisor is 0
    pub fn checked_div(&self, divisor: &Scalar) -> Result<Scalar> {
        match self.promote(*divisor) {
            Promoted::Real(a, b) => {
                if b == 0.0 {
                    return Err(LinalgError::divide_by_zero("scalar_divide"));
                }
                Ok(Scalar::Real(a / b))
            }
            Promoted::Complex(a, b) => a
                .checked_div(&b)
                .map(Scalar::Complex)
                .map_err(|e| e.in_operation("scalar_divide")),
        }
    }

    /// Values within `tolerance` of each other in the complex plane
    pub fn approx_eq(&self, other: &Scalar, tolerance: f64) -> bool {
        (*self - *other).magnitude() <= tolerance
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        match self.promote(rhs) {
            Promoted::Real(a, b) => Scalar::Real(a + b),
            Promoted::Complex(a, b) => Scalar::Complex(a + b),
        }
    }
}

impl Sub for Scalar {
    type Output = Scalar;

    fn sub(self, rhs: Scalar) -> Scalar {
        match self.promote(rhs) {
            Promoted::Real(a, b) => Scalar::Real(a - b),
            Promoted::Complex(a, b) => Scalar::Complex(a - b),
        }
    }
}

impl Mul for Scalar {
    type Output = Scalar;

    fn mul(self, rhs: Scalar) -> Scalar {
        match self.promote(rhs) {
            Promoted::Real(a, b) => Scalar::Real(a * b),
            Promoted::Complex(a, b) => Scalar::Complex(a * b),
        }
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        match self {
            Scalar::Real(x) => Scalar::Real(-x),
            Scalar::Complex(c) => Scalar::Complex(-c),
        }
    }
}

impl Sum for Scalar {
    fn sum<I: Iterator<Item = Scalar>>(iter: I) -> Self {
        iter.fold(Scalar::zero(), |acc, x| acc + x)
    }
}

impl Zero for Scalar {
    fn zero() -> Self {
        Scalar::Real(0.0)
    }

    fn is_zero(&self) -> bool {
        self.norm_sqr() == 0.0
    }
}

impl One for Scalar {
    fn one() -> Self {
        Scalar::Real(1.0)
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::zero()
    }
}

// Numeric equality across variants: Real(x) == Complex(x, 0)
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match self.promote(*other) {
            Promoted::Real(a, b) => a == b,
            Promoted::Complex(a, b) => a == b,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Real(x) => write!(f, "{x}"),
            Scalar::Complex(c) => write!(f, "{c}"),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Real(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Real(value as f64)
    }
}

impl From<Complex64> for Scalar {
    fn from(value: Complex64) -> Self {
        Scalar::Complex(value)
    }
}
