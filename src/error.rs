use crate::shape::Shape;
use thiserror::Error;

pub type MatResult<T> = Result<T, MatError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatError {
    #[error("shape mismatch in {op}: {lhs} vs {rhs}")]
    ShapeMismatch {
        op: &'static str,
        lhs: Shape,
        rhs: Shape,
    },
    #[error("index ({row}, {col}) out of bounds for {shape} matrix")]
    IndexOutOfBounds { row: usize, col: usize, shape: Shape },
    #[error("buffer of {got} elements does not fill {expected}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("row {row} has {got} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("cursors do not traverse the same row or column")]
    CursorMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let e = MatError::ShapeMismatch {
            op: "add",
            lhs: Shape::new(2, 3),
            rhs: Shape::new(3, 2),
        };
        assert_eq!(e.to_string(), "shape mismatch in add: 2x3 vs 3x2");

        let e = MatError::IndexOutOfBounds {
            row: 4,
            col: 0,
            shape: Shape::new(2, 2),
        };
        assert_eq!(e.to_string(), "index (4, 0) out of bounds for 2x2 matrix");
        assert_eq!(
            MatError::CursorMismatch.to_string(),
            "cursors do not traverse the same row or column"
        );
    }
}
