use crate::{LinalgError, Result};
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Dimension sizes of an [`NdArray`](crate::NdArray) plus their row-major strides.
///
/// Every dimension is positive and there is at least one of them; the
/// constructor enforces this, so any `Shape` in circulation is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Shape {
    dims: Vec<usize>,
    strides: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Result<Self> {
        if dims.is_empty() {
            return Err(LinalgError::invalid_construction(
                "shape",
                "shape must have at least one dimension",
            ));
        }
        if let Some(axis) = dims.iter().position(|&d| d == 0) {
            return Err(LinalgError::invalid_construction(
                "shape",
                format!("dimension {axis} of {dims:?} is not positive"),
            ));
        }
        let strides = Self::compute_strides(&dims);
        Ok(Self { dims, strides })
    }

    pub fn from_slice(dims: &[usize]) -> Result<Self> {
        Self::new(dims.to_vec())
    }

    /// Shape of a `rows × cols` matrix
    pub fn matrix(rows: usize, cols: usize) -> Result<Self> {
        Self::new(vec![rows, cols])
    }

    /// Row-major (C-contiguous) strides
    fn compute_strides(dims: &[usize]) -> Vec<usize> {
        let mut strides = vec![1; dims.len()];
        for i in (0..dims.len().saturating_sub(1)).rev() {
            strides[i] = strides[i + 1] * dims[i + 1];
        }
        strides
    }

    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Same dimensions in reverse order
    pub fn reversed(&self) -> Shape {
        let dims: Vec<usize> = self.dims.iter().rev().copied().collect();
        let strides = Self::compute_strides(&dims);
        Shape { dims, strides }
    }

    pub fn is_matrix(&self) -> bool {
        self.rank() == 2
    }

    /// Map a multi-index onto the flat buffer offset.
    ///
    /// This is the only place indices are bounds-checked.
    pub fn linear_index(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.rank()
            || indices.iter().zip(&self.dims).any(|(&i, &d)| i >= d)
        {
            return Err(LinalgError::index_out_of_bounds(
                "linear_index",
                indices,
                &self.dims,
            ));
        }
        Ok(indices
            .iter()
            .zip(&self.strides)
            .map(|(i, s)| i * s)
            .sum())
    }

    /// Inverse of [`linear_index`](Self::linear_index) for offsets below `size()`
    pub fn multi_index(&self, mut offset: usize) -> Vec<usize> {
        self.strides
            .iter()
            .map(|&stride| {
                let i = offset / stride;
                offset %= stride;
                i
            })
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.dims.iter()
    }

    pub fn to_vec(&self) -> Vec<usize> {
        self.dims.clone()
    }
}

impl Index<usize> for Shape {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.dims[index]
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, dim) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dim}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_and_zero_dims() {
        assert!(matches!(
            Shape::new(vec![]),
            Err(LinalgError::InvalidConstruction { .. })
        ));
        assert!(matches!(
            Shape::new(vec![2, 0, 3]),
            Err(LinalgError::InvalidConstruction { .. })
        ));
    }

    #[test]
    fn test_row_major_strides() {
        let shape = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(shape.strides(), &[12, 4, 1]);
        assert_eq!(shape.size(), 24);
        assert_eq!(shape.to_string(), "[2, 3, 4]");
    }

    #[test]
    fn test_linear_index_roundtrip() {
        let shape = Shape::new(vec![2, 3, 4]).unwrap();
        for offset in 0..shape.size() {
            let idx = shape.multi_index(offset);
            assert_eq!(shape.linear_index(&idx).unwrap(), offset);
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let shape = Shape::matrix(2, 2).unwrap();
        assert!(matches!(
            shape.linear_index(&[2, 0]),
            Err(LinalgError::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            shape.linear_index(&[0]),
            Err(LinalgError::IndexOutOfBounds { .. })
        ));
    }
}
