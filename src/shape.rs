use super::error::{MatError, MatResult};
use super::raw::capacity_overflow;
use std::fmt;

/// Rows and columns of a row-major matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
}

impl Shape {
    /// A shape with a zero dimension collapses to `0x0`. Panics with
    /// "capacity overflow" if `rows * cols` does not fit in a `usize`.
    pub fn new(rows: usize, cols: usize) -> Shape {
        match Shape::checked(rows, cols) {
            Some(s) => s,
            None => capacity_overflow(),
        }
    }

    /// Like [`Shape::new`], but `None` when the element count overflows.
    pub fn checked(rows: usize, cols: usize) -> Option<Shape> {
        if rows == 0 || cols == 0 {
            return Some(Shape::default());
        }
        rows.checked_mul(cols)?;
        Some(Shape { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dims2(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    // `new` has already checked the product.
    pub fn elem_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.elem_count() == 0
    }

    /// Distance in elements between vertically adjacent entries.
    pub fn row_stride(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride() + col
    }

    #[inline]
    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub(crate) fn checked_offset(&self, row: usize, col: usize) -> MatResult<usize> {
        if self.contains(row, col) {
            Ok(self.offset(row, col))
        } else {
            Err(MatError::IndexOutOfBounds {
                row,
                col,
                shape: *self,
            })
        }
    }

    /// Elementwise operations need both operands to have the same shape.
    pub(crate) fn same_as(&self, other: &Shape, op: &'static str) -> MatResult<()> {
        if self == other {
            Ok(())
        } else {
            Err(MatError::ShapeMismatch {
                op,
                lhs: *self,
                rhs: *other,
            })
        }
    }

    /// Shape of `self * other`, if the inner dimensions agree.
    pub(crate) fn product(&self, other: &Shape) -> MatResult<Shape> {
        if self.cols == other.rows {
            Ok(Shape::new(self.rows, other.cols))
        } else {
            Err(MatError::ShapeMismatch {
                op: "matmul",
                lhs: *self,
                rhs: *other,
            })
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Shape::new(rows, cols)
    }
}
