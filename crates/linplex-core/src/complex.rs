//! Double-precision complex numbers
//!
//! `Complex64` is the native representation behind [`Scalar::Complex`](crate::Scalar).
//! Arithmetic is pure: every operation returns a fresh value.

use crate::{LinalgError, Result};
use num_traits::{One, Zero};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// 64-bit complex number (f64 real and imaginary parts)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Complex64 {
    pub real: f64,
    pub imag: f64,
}

impl Complex64 {
    /// Create a new complex number
    pub fn new(real: f64, imag: f64) -> Self {
        Self { real, imag }
    }

    /// Create a complex number from a real number
    pub fn from_real(real: f64) -> Self {
        Self { real, imag: 0.0 }
    }

    /// Squared magnitude, `re² + im²`
    pub fn norm_sqr(&self) -> f64 {
        self.real * self.real + self.imag * self.imag
    }

    /// Get the magnitude (absolute value) of the complex number
    pub fn magnitude(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Get the phase (argument) of the complex number
    pub fn phase(&self) -> f64 {
        self.imag.atan2(self.real)
    }

    /// Get the complex conjugate
    pub fn conjugate(&self) -> Self {
        Self {
            real: self.real,
            imag: -self.imag,
        }
    }

    /// Create from polar form (magnitude, phase in radians)
    pub fn from_polar(magnitude: f64, phase: f64) -> Self {
        Self {
            real: magnitude * phase.cos(),
            imag: magnitude * phase.sin(),
        }
    }

    /// Raise to a real power using De Moivre's formula: `r^n (cos nφ + i sin nφ)`
    pub fn powf(&self, n: f64) -> Self {
        Self::from_polar(self.magnitude().powf(n), self.phase() * n)
    }

    /// Principal square root
    pub fn sqrt(&self) -> Self {
        Self::from_polar(self.magnitude().sqrt(), self.phase() / 2.0)
    }

    /// Divide, failing when the divisor has zero magnitude
    pub fn checked_div(&self, other: &Self) -> Result<Self> {
        let denom = other.norm_sqr();
        if denom == 0.0 {
            return Err(LinalgError::divide_by_zero("complex_divide"));
        }
        Ok(Self {
            real: (self.real * other.real + self.imag * other.imag) / denom,
            imag: (self.imag * other.real - self.real * other.imag) / denom,
        })
    }
}

impl Add for Complex64 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            real: self.real + other.real,
            imag: self.imag + other.imag,
        }
    }
}

impl Sub for Complex64 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            real: self.real - other.real,
            imag: self.imag - other.imag,
        }
    }
}

impl Mul for Complex64 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            real: self.real * other.real - self.imag * other.imag,
            imag: self.real * other.imag + self.imag * other.real,
        }
    }
}

impl Neg for Complex64 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            real: -self.real,
            imag: -self.imag,
        }
    }
}

impl Zero for Complex64 {
    fn zero() -> Self {
        Self {
            real: 0.0,
            imag: 0.0,
        }
    }

    fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imag == 0.0
    }
}

impl One for Complex64 {
    fn one() -> Self {
        Self {
            real: 1.0,
            imag: 0.0,
        }
    }
}

impl Default for Complex64 {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Complex64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.imag.is_sign_negative() {
            write!(f, "{}+{}i", self.real, self.imag)
        } else {
            write!(f, "{}{}i", self.real, self.imag)
        }
    }
}

impl From<f64> for Complex64 {
    fn from(real: f64) -> Self {
        Self::from_real(real)
    }
}

impl From<(f64, f64)> for Complex64 {
    fn from((real, imag): (f64, f64)) -> Self {
        Self::new(real, imag)
    }
}
