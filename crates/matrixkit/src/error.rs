use thiserror::Error;

/// Failures raised by [`Matrix`](crate::math::Matrix) construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// Two operands have incompatible shapes for `op`.
    #[error("cannot {op} a {}x{} matrix with a {}x{} matrix", .left.0, .left.1, .right.0, .right.1)]
    Mismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A literal handed to the constructor is not rectangular.
    #[error("row {row} has {found} elements, expected {expected}")]
    InvalidMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl MatrixError {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, MatrixError::Mismatch { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, MatrixError::InvalidMatrix { .. })
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_message_names_both_shapes() {
        let err = MatrixError::Mismatch {
            op: "add",
            left: (2, 3),
            right: (3, 2),
        };
        assert_eq!(err.to_string(), "cannot add a 2x3 matrix with a 3x2 matrix");
        assert!(err.is_mismatch());
        assert!(!err.is_invalid());
    }

    #[test]
    fn invalid_message_names_row() {
        let err = MatrixError::InvalidMatrix {
            row: 3,
            expected: 3,
            found: 4,
        };
        assert_eq!(err.to_string(), "row 3 has 4 elements, expected 3");
        assert!(err.is_invalid());
    }
}
