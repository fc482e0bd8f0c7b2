//! Literal input data and the lenient scalar grammar
//!
//! Leaves of nested literal data may be ready-made scalars, plain numbers
//! or text. Text is read with [`parse_scalar`], which never fails:
//!
//! | form            | value              |
//! |-----------------|--------------------|
//! | `a:b`           | `a + bi`           |
//! | `bi`, `-bi`     | `0 ± bi`           |
//! | `i`, `-i`       | `0 ± 1i`           |
//! | `a+bi`, `a-bi`  | `a ± bi`           |
//! | `a`             | real `a`           |
//! | anything else   | real `0`           |

use crate::complex::Complex64;
use crate::scalar::Scalar;
use once_cell::sync::Lazy;
use regex::Regex;
use std::convert::Infallible;
use std::str::FromStr;

const NUMBER: &str = r"(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

static REAL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(&format!(r"^[+-]?{NUMBER}$")).ok());

static LEADING_REAL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(&format!(r"^[+-]?{NUMBER}")).ok());

static IMAGINARY: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(&format!(r"^([+-]?)({NUMBER})?i$")).ok());

static RECTANGULAR: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(&format!(r"^([+-]?{NUMBER})([+-])({NUMBER})?i$")).ok());

/// Nested literal data accepted by the storage constructors.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Scalar(Scalar),
    Number(f64),
    Text(String),
    List(Vec<Literal>),
}

impl Literal {
    /// The leaf value, or `None` for a list
    pub fn to_scalar(&self) -> Option<Scalar> {
        match self {
            Literal::Scalar(s) => Some(*s),
            Literal::Number(x) => Some(Scalar::Real(*x)),
            Literal::Text(t) => Some(parse_scalar(t)),
            Literal::List(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Literal::List(_))
    }
}

/// Read a scalar from text. Unrecognised input yields real 0.
pub fn parse_scalar(text: &str) -> Scalar {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some((re, im)) = compact.split_once(':') {
        return Scalar::complex(leading_float(re), leading_float(im));
    }

    if let Some(caps) = RECTANGULAR.as_ref().and_then(|r| r.captures(&compact)) {
        let re = caps[1].parse::<f64>().unwrap_or(0.0);
        let magnitude = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(1.0);
        let im = if &caps[2] == "-" { -magnitude } else { magnitude };
        return Scalar::complex(re, im);
    }

    if let Some(caps) = IMAGINARY.as_ref().and_then(|r| r.captures(&compact)) {
        let magnitude = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(1.0);
        let im = if &caps[1] == "-" { -magnitude } else { magnitude };
        return Scalar::complex(0.0, im);
    }

    if REAL.as_ref().is_some_and(|r| r.is_match(&compact)) {
        return Scalar::Real(compact.parse::<f64>().unwrap_or(0.0));
    }

    Scalar::Real(0.0)
}

// Numeric prefix of `text`, 0 when there is none
fn leading_float(text: &str) -> f64 {
    LEADING_REAL
        .as_ref()
        .and_then(|r| r.find(text))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

impl FromStr for Scalar {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_scalar(s))
    }
}

impl From<Scalar> for Literal {
    fn from(value: Scalar) -> Self {
        Literal::Scalar(value)
    }
}

impl From<Complex64> for Literal {
    fn from(value: Complex64) -> Self {
        Literal::Scalar(Scalar::Complex(value))
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value as f64)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(values: Vec<T>) -> Self {
        Literal::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Literal>, const N: usize> From<[T; N]> for Literal {
    fn from(values: [T; N]) -> Self {
        Literal::List(values.into_iter().map(Into::into).collect())
    }
}
