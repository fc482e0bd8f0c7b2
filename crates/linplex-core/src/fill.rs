//! Fill policies for freshly allocated storage

use crate::scalar::Scalar;
use crate::{LinalgError, Result};
use rand::Rng;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a newly allocated cell is populated.
///
/// Random reals are uniform in `[-1, 1]`. Integer draws are uniform in
/// `[0, i32::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum FillPolicy {
    #[default]
    Zero,
    Random,
    /// Real part in `[-1, 1]`, imaginary part in `[-1, 1]` or integer-valued
    RandomComplex { integer_imaginary: bool },
    /// Integer real part, imaginary part as for `RandomComplex`
    RandomComplexInt { integer_imaginary: bool },
}

impl FillPolicy {
    pub const NAMES: [&'static str; 4] = ["zero", "random", "random_complex", "random_complex_int"];

    /// Set the integer-imaginary flag; a no-op for real policies
    pub fn with_integer_imaginary(self, flag: bool) -> Self {
        match self {
            FillPolicy::RandomComplex { .. } => FillPolicy::RandomComplex {
                integer_imaginary: flag,
            },
            FillPolicy::RandomComplexInt { .. } => FillPolicy::RandomComplexInt {
                integer_imaginary: flag,
            },
            other => other,
        }
    }

    pub fn is_random(&self) -> bool {
        !matches!(self, FillPolicy::Zero)
    }

    /// Draw one cell value
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Scalar {
        match *self {
            FillPolicy::Zero => Scalar::Real(0.0),
            FillPolicy::Random => Scalar::Real(unit(rng)),
            FillPolicy::RandomComplex { integer_imaginary } => {
                Scalar::complex(unit(rng), imaginary(rng, integer_imaginary))
            }
            FillPolicy::RandomComplexInt { integer_imaginary } => {
                Scalar::complex(integer(rng), imaginary(rng, integer_imaginary))
            }
        }
    }
}

fn unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range(-1.0..=1.0)
}

fn integer<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random_range(0..=i32::MAX) as f64
}

fn imaginary<R: Rng + ?Sized>(rng: &mut R, integer_valued: bool) -> f64 {
    if integer_valued {
        integer(rng)
    } else {
        unit(rng)
    }
}

impl FromStr for FillPolicy {
    type Err = LinalgError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "zero" => Ok(FillPolicy::Zero),
            "random" => Ok(FillPolicy::Random),
            "random_complex" => Ok(FillPolicy::RandomComplex {
                integer_imaginary: false,
            }),
            "random_complex_int" => Ok(FillPolicy::RandomComplexInt {
                integer_imaginary: false,
            }),
            other => Err(LinalgError::invalid_selector("fill_policy", other, &Self::NAMES)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_names() {
        assert_eq!("zero".parse::<FillPolicy>().unwrap(), FillPolicy::Zero);
        assert_eq!(
            "random_complex".parse::<FillPolicy>().unwrap(),
            FillPolicy::RandomComplex {
                integer_imaginary: false
            }
        );
        assert!(matches!(
            "gaussian".parse::<FillPolicy>(),
            Err(LinalgError::InvalidAlgorithmSelector { .. })
        ));
    }

    #[test]
    fn test_random_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let v = FillPolicy::Random.sample(&mut rng);
            assert!(v.is_real());
            assert!((-1.0..=1.0).contains(&v.re()));
        }
    }

    #[test]
    fn test_integer_imaginary_flag() {
        let mut rng = StdRng::seed_from_u64(11);
        let policy: FillPolicy = "random_complex_int".parse().unwrap();
        let policy = policy.with_integer_imaginary(true);
        for _ in 0..50 {
            let v = policy.sample(&mut rng);
            assert_eq!(v.re().fract(), 0.0);
            assert_eq!(v.im().fract(), 0.0);
            assert!(v.re() >= 0.0 && v.im() >= 0.0);
        }
    }

    #[test]
    fn test_seeded_draws_repeat() {
        let policy = FillPolicy::RandomComplex {
            integer_imaginary: false,
        };
        let a: Vec<Scalar> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..8).map(|_| policy.sample(&mut rng)).collect()
        };
        let b: Vec<Scalar> = {
            let mut rng = StdRng::seed_from_u64(42);
            (0..8).map(|_| policy.sample(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }
}
