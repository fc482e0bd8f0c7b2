//! Rank-N scalar storage
//!
//! An [`NdArray`] is a flat row-major buffer of [`Scalar`] cells described
//! by a [`Shape`]. Indexed access goes through [`Shape::linear_index`], so
//! bounds are checked in one place and the buffer never grows or shrinks
//! after construction.

use crate::complex::Complex64;
use crate::fill::FillPolicy;
use crate::literal::Literal;
use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::{LinalgError, Result};
use rand::Rng;

#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Shape,
    data: Vec<Scalar>,
}

impl NdArray {
    /// All cells set to real 0
    pub fn zeros(shape: Shape) -> Self {
        let data = vec![Scalar::Real(0.0); shape.size()];
        Self { shape, data }
    }

    /// Allocate cells in row-major order, drawing each from `policy`
    pub fn with_fill<R: Rng + ?Sized>(shape: Shape, policy: &FillPolicy, rng: &mut R) -> Self {
        let data = (0..shape.size()).map(|_| policy.sample(rng)).collect();
        Self { shape, data }
    }

    /// Wrap an existing row-major buffer
    pub fn from_vec(shape: Shape, data: Vec<Scalar>) -> Result<Self> {
        if data.len() != shape.size() {
            return Err(LinalgError::invalid_construction(
                "from_vec",
                format!(
                    "shape {} needs {} cells, got {}",
                    shape,
                    shape.size(),
                    data.len()
                ),
            ));
        }
        Ok(Self { shape, data })
    }

    pub(crate) fn from_raw(shape: Shape, data: Vec<Scalar>) -> Self {
        debug_assert_eq!(shape.size(), data.len());
        Self { shape, data }
    }

    /// Build from nested literal data, inferring the shape from the nesting.
    ///
    /// Every level must have the same length as its siblings; jagged input
    /// and a bare top-level value are rejected.
    pub fn from_literal(literal: impl Into<Literal>) -> Result<Self> {
        let literal = literal.into();
        let dims = infer_dims(&literal)?;
        let shape = Shape::new(dims)?;
        let mut data = Vec::with_capacity(shape.size());
        flatten(&literal, shape.dims(), 0, &mut data)?;
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, indices: &[usize]) -> Result<Scalar> {
        let offset = self.shape.linear_index(indices)?;
        Ok(self.data[offset])
    }

    /// Read a cell coerced to complex form
    pub fn get_complex(&self, indices: &[usize]) -> Result<Complex64> {
        self.get(indices).map(|s| s.to_complex())
    }

    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut Scalar> {
        let offset = self.shape.linear_index(indices)?;
        Ok(&mut self.data[offset])
    }

    pub fn set(&mut self, indices: &[usize], value: impl Into<Scalar>) -> Result<()> {
        *self.get_mut(indices)? = value.into();
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Scalar> {
        self.data.iter()
    }

    /// Cells in row-major order paired with their multi-index
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Vec<usize>, Scalar)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(offset, value)| (self.shape.multi_index(offset), *value))
    }

    pub fn as_slice(&self) -> &[Scalar] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<Scalar> {
        self.data
    }

    /// Rebuild the nested literal form of the data
    pub fn to_nested(&self) -> Literal {
        nest(self.shape.dims(), &self.data)
    }

    /// Replace every cell from nested literal data of the same shape
    pub fn set_data(&mut self, literal: impl Into<Literal>) -> Result<()> {
        let incoming = NdArray::from_literal(literal)?;
        if incoming.shape != self.shape {
            return Err(LinalgError::dimension_mismatch(
                "set_data",
                self.shape.to_string(),
                incoming.shape.to_string(),
            ));
        }
        self.data = incoming.data;
        Ok(())
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map(&self, f: impl FnMut(&Scalar) -> Scalar) -> Self {
        Self {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }
}

fn infer_dims(literal: &Literal) -> Result<Vec<usize>> {
    let mut dims = Vec::new();
    let mut node = literal;
    while let Literal::List(items) = node {
        dims.push(items.len());
        match items.first() {
            Some(first) => node = first,
            None => break,
        }
    }
    if dims.is_empty() {
        return Err(LinalgError::invalid_construction(
            "from_literal",
            "literal data must be a list, got a single value",
        ));
    }
    Ok(dims)
}

fn flatten(node: &Literal, dims: &[usize], depth: usize, out: &mut Vec<Scalar>) -> Result<()> {
    match node {
        Literal::List(items) => {
            if depth >= dims.len() || items.len() != dims[depth] {
                return Err(jagged(dims, depth, items.len()));
            }
            for item in items {
                flatten(item, dims, depth + 1, out)?;
            }
            Ok(())
        }
        leaf => match leaf.to_scalar() {
            Some(value) if depth == dims.len() => {
                out.push(value);
                Ok(())
            }
            _ => Err(LinalgError::invalid_construction(
                "from_literal",
                format!("value found at depth {depth}, expected nesting depth {}", dims.len()),
            )),
        },
    }
}

fn jagged(dims: &[usize], depth: usize, got: usize) -> LinalgError {
    let expected = dims
        .get(depth)
        .map_or_else(|| "a value".to_string(), |d| format!("{d} entries"));
    LinalgError::invalid_construction(
        "from_literal",
        format!("jagged data at depth {depth}: expected {expected}, got a list of {got}"),
    )
}

fn nest(dims: &[usize], data: &[Scalar]) -> Literal {
    match dims.split_first() {
        Some((_, [])) | None => Literal::List(data.iter().map(|s| Literal::Scalar(*s)).collect()),
        Some((_, rest)) => {
            let chunk: usize = rest.iter().product();
            Literal::List(data.chunks(chunk).map(|c| nest(rest, c)).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_from_literal_infers_shape() {
        let array = NdArray::from_literal(vec![
            vec![vec!["1", "2"], vec!["3", "4"], vec!["5", "6"]],
            vec![vec!["i", "0"], vec!["1:1", "2-i"], vec!["0", "0"]],
        ])
        .unwrap();
        assert_eq!(array.dims(), &[2, 3, 2]);
        assert_eq!(array.get(&[0, 1, 1]).unwrap(), Scalar::real(4.0));
        assert_eq!(array.get(&[1, 1, 0]).unwrap(), Scalar::complex(1.0, 1.0));
        assert_eq!(array.get(&[1, 0, 0]).unwrap(), Scalar::i());
    }

    #[test]
    fn test_jagged_literal_rejected() {
        let result = NdArray::from_literal(vec![vec![1, 2], vec![3]]);
        assert!(matches!(result, Err(LinalgError::InvalidConstruction { .. })));

        let mixed = Literal::List(vec![Literal::from(vec![1, 2]), Literal::from(3)]);
        assert!(matches!(
            NdArray::from_literal(mixed),
            Err(LinalgError::InvalidConstruction { .. })
        ));
    }

    #[test]
    fn test_empty_or_bare_literal_rejected() {
        assert!(NdArray::from_literal(Vec::<f64>::new()).is_err());
        assert!(NdArray::from_literal(5.0).is_err());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut array = NdArray::zeros(Shape::new(vec![2, 2]).unwrap());
        array.set(&[1, 0], 7.0).unwrap();
        assert_eq!(array.get(&[1, 0]).unwrap(), Scalar::real(7.0));
        assert_eq!(array.get_complex(&[1, 0]).unwrap(), Complex64::new(7.0, 0.0));
        assert!(matches!(
            array.set(&[2, 0], 1.0),
            Err(LinalgError::IndexOutOfBounds { .. })
        ));
        assert_eq!(array.len(), 4);
    }

    #[test]
    fn test_to_nested_roundtrip() {
        let literal = Literal::from(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        let array = NdArray::from_literal(literal).unwrap();
        let rebuilt = NdArray::from_literal(array.to_nested()).unwrap();
        assert_eq!(rebuilt, array);
    }

    #[test]
    fn test_set_data_checks_shape() {
        let mut array = NdArray::zeros(Shape::new(vec![2]).unwrap());
        array.set_data(vec!["1+i", "2"]).unwrap();
        assert_eq!(array.get(&[0]).unwrap(), Scalar::complex(1.0, 1.0));
        assert!(matches!(
            array.set_data(vec![1, 2, 3]),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_indexed_iter_row_major() {
        let array = NdArray::from_literal(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let indices: Vec<Vec<usize>> = array.indexed_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    }

    #[test]
    fn test_seeded_fill_is_reproducible() {
        let shape = Shape::new(vec![3, 3]).unwrap();
        let a = NdArray::with_fill(shape.clone(), &FillPolicy::Random, &mut StdRng::seed_from_u64(3));
        let b = NdArray::with_fill(shape, &FillPolicy::Random, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert!(a.iter().all(|v| v.is_real() && v.re().abs() <= 1.0));
    }
}
