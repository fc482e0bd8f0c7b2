use thiserror::Error;

/// Failures raised by storage, scalar arithmetic and the dense algorithms.
///
/// Every variant records the operation that failed so callers can report
/// where an elimination or factorization gave up.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("Invalid construction in operation '{operation}': {reason}")]
    InvalidConstruction { operation: String, reason: String },

    #[error("Index {index:?} out of bounds for shape {shape:?} in operation '{operation}'")]
    IndexOutOfBounds {
        operation: String,
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Dimension mismatch in operation '{operation}': expected {expected}, got {got}")]
    DimensionMismatch {
        operation: String,
        expected: String,
        got: String,
    },

    #[error("Singular matrix in operation '{operation}': zero pivot in column {column}")]
    SingularMatrix { operation: String, column: usize },

    #[error("Matrix is not positive definite in operation '{operation}': {reason}")]
    NotPositiveDefinite { operation: String, reason: String },

    #[error("Unsupported operand type in operation '{operation}': {details}")]
    UnsupportedOperandType { operation: String, details: String },

    #[error("Invalid algorithm selector '{selector}' for operation '{operation}', expected one of: {}", .expected.join(", "))]
    InvalidAlgorithmSelector {
        operation: String,
        selector: String,
        expected: Vec<String>,
    },

    #[error("Division by zero in operation '{operation}'")]
    DivideByZero { operation: String },
}

impl LinalgError {
    /// Create an invalid construction error
    pub fn invalid_construction(operation: &str, reason: impl Into<String>) -> Self {
        Self::InvalidConstruction {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    /// Create an out-of-bounds error for a multi-index against a shape
    pub fn index_out_of_bounds(operation: &str, index: &[usize], shape: &[usize]) -> Self {
        Self::IndexOutOfBounds {
            operation: operation.to_string(),
            index: index.to_vec(),
            shape: shape.to_vec(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(operation: &str, expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            operation: operation.to_string(),
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create a singular matrix error for the pivot column that vanished
    pub fn singular_matrix(operation: &str, column: usize) -> Self {
        Self::SingularMatrix {
            operation: operation.to_string(),
            column,
        }
    }

    pub fn not_positive_definite(operation: &str, reason: impl Into<String>) -> Self {
        Self::NotPositiveDefinite {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_operand(operation: &str, details: impl Into<String>) -> Self {
        Self::UnsupportedOperandType {
            operation: operation.to_string(),
            details: details.into(),
        }
    }

    /// Create an invalid selector error listing the accepted names
    pub fn invalid_selector(operation: &str, selector: &str, expected: &[&str]) -> Self {
        Self::InvalidAlgorithmSelector {
            operation: operation.to_string(),
            selector: selector.to_string(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn divide_by_zero(operation: &str) -> Self {
        Self::DivideByZero {
            operation: operation.to_string(),
        }
    }

    /// Get the operation name for this error
    pub fn operation(&self) -> &str {
        match self {
            Self::InvalidConstruction { operation, .. } => operation,
            Self::IndexOutOfBounds { operation, .. } => operation,
            Self::DimensionMismatch { operation, .. } => operation,
            Self::SingularMatrix { operation, .. } => operation,
            Self::NotPositiveDefinite { operation, .. } => operation,
            Self::UnsupportedOperandType { operation, .. } => operation,
            Self::InvalidAlgorithmSelector { operation, .. } => operation,
            Self::DivideByZero { operation } => operation,
        }
    }

    /// Re-label the failing operation, keeping every other detail.
    ///
    /// Used when a low-level failure (e.g. a scalar division) surfaces
    /// through a higher-level algorithm.
    pub fn in_operation(mut self, name: &str) -> Self {
        match &mut self {
            Self::InvalidConstruction { operation, .. }
            | Self::IndexOutOfBounds { operation, .. }
            | Self::DimensionMismatch { operation, .. }
            | Self::SingularMatrix { operation, .. }
            | Self::NotPositiveDefinite { operation, .. }
            | Self::UnsupportedOperandType { operation, .. }
            | Self::InvalidAlgorithmSelector { operation, .. }
            | Self::DivideByZero { operation } => *operation = name.to_string(),
        }
        self
    }

    /// True for the unified "no unique solution / no inverse" outcome
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularMatrix { .. })
    }
}

pub type Result<T> = std::result::Result<T, LinalgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_operation() {
        let err = LinalgError::singular_matrix("inverse", 2);
        assert_eq!(err.operation(), "inverse");
        assert!(err.is_singular());
        assert_eq!(
            err.to_string(),
            "Singular matrix in operation 'inverse': zero pivot in column 2"
        );
    }

    #[test]
    fn test_selector_lists_expected_names() {
        let err = LinalgError::invalid_selector("lu_factorization", "qr", &["crout", "doolittle"]);
        assert!(err.to_string().contains("crout, doolittle"));
    }

    #[test]
    fn test_in_operation_relabels() {
        let err = LinalgError::divide_by_zero("scalar_divide").in_operation("solve_linear_system");
        assert_eq!(err.operation(), "solve_linear_system");
        assert!(matches!(err, LinalgError::DivideByZero { .. }));
    }
}
