mod cursor;
mod error;
mod iter;
mod numeric;
mod op;
mod raw;
mod shape;

pub use cursor::{ColCursor, ColCursorMut, RandomAccessCursor, RowCursor};
pub use error::{MatError, MatResult};
pub use iter::{ColIterMut, CursorIter};
pub use numeric::{accumulate, inner_product};
pub use shape::Shape;

use num_traits::{One, Zero};
use raw::RawBuf;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Builds a [`Matrix`] from a literal grid, one bracketed list per row.
///
/// ```
/// let m = rowmajor::matrix![[1, 2, 3], [4, 5, 6]];
/// assert_eq!(m.shape().dims2(), (2, 3));
/// assert_eq!(m[(1, 0)], 4);
/// ```
#[macro_export]
macro_rules! matrix {
    () => {{
        $crate::Matrix::new()
    }};
    ($([$($x:expr),* $(,)*]),+ $(,)*) => {{
        $crate::Matrix::from([$([$($x,)*],)*])
    }};
}

/// Dense, row-major, two-dimensional container.
///
/// Element `(r, c)` lives at linear offset `r * cols + c`. A matrix with no
/// elements is always `0x0` and owns no allocation.
pub struct Matrix<T> {
    data: RawBuf<T>,
    shape: Shape,
}

impl<T> Matrix<T> {
    /// The empty `0x0` matrix.
    pub fn new() -> Self {
        Self {
            data: RawBuf::new(),
            shape: Shape::default(),
        }
    }

    pub fn from_elem(rows: usize, cols: usize, elem: T) -> Self
    where
        T: Clone,
    {
        let shape = Shape::new(rows, cols);
        Self {
            data: RawBuf::from_elem(elem, shape.elem_count()),
            shape,
        }
    }

    /// `rows x cols` matrix of zeros. Either dimension being 0 gives `0x0`.
    pub fn zeros(rows: usize, cols: usize) -> Self
    where
        T: Clone + Zero,
    {
        Self::from_elem(rows, cols, T::zero())
    }

    pub fn identity(n: usize) -> Self
    where
        T: Clone + Zero + One,
    {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Takes ownership of a row-major buffer. Panics with "capacity
    /// overflow" if `rows * cols` does not fit in a `usize`.
    pub fn from_vec(rows: usize, cols: usize, v: Vec<T>) -> MatResult<Self> {
        let shape = Shape::new(rows, cols);
        let expected = rows * cols;
        if v.len() != expected {
            return Err(MatError::LengthMismatch {
                expected,
                got: v.len(),
            });
        }
        if shape.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self {
            data: RawBuf::from_vec(v),
            shape,
        })
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> MatResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(MatError::RaggedRows {
                row,
                expected: cols,
                got: r.len(),
            });
        }
        let n = rows.len();
        Self::from_vec(n, cols, rows.into_iter().flatten().collect())
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rows(&self) -> usize {
        self.shape.rows()
    }

    pub fn cols(&self) -> usize {
        self.shape.cols()
    }

    /// Number of elements, `rows * cols`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exchanges contents with `other` without touching any element.
    pub fn swap(&mut self, other: &mut Matrix<T>) {
        std::mem::swap(&mut self.data, &mut other.data);
        std::mem::swap(&mut self.shape, &mut other.shape);
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.at(row, col).ok()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        self.at_mut(row, col).ok()
    }

    pub fn at(&self, row: usize, col: usize) -> MatResult<&T> {
        let i = self.shape.checked_offset(row, col)?;
        Ok(&self.data.as_slice()[i])
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> MatResult<&mut T> {
        let i = self.shape.checked_offset(row, col)?;
        Ok(&mut self.data.as_mut_slice()[i])
    }

    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_mut_slice()
    }

    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// All elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    pub fn into_vec(mut self) -> Vec<T> {
        self.data.take_as_vec()
    }

    #[inline]
    fn check_row(&self, row: usize) {
        assert!(
            row < self.rows(),
            "row {} out of bounds for {} matrix",
            row,
            self.shape
        );
    }

    #[inline]
    fn check_col(&self, col: usize) {
        assert!(
            col < self.cols(),
            "column {} out of bounds for {} matrix",
            col,
            self.shape
        );
    }

    pub fn row(&self, row: usize) -> &[T] {
        self.check_row(row);
        let start = self.shape.offset(row, 0);
        &self.as_slice()[start..start + self.cols()]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [T] {
        self.check_row(row);
        let start = self.shape.offset(row, 0);
        let cols = self.cols();
        &mut self.as_mut_slice()[start..start + cols]
    }

    /// Cursor on the first element of row `row`. It only sees that row.
    pub fn row_begin(&self, row: usize) -> RowCursor<'_, T> {
        RowCursor::new(self.row(row), 0)
    }

    /// Cursor one past the last element of row `row`.
    pub fn row_end(&self, row: usize) -> RowCursor<'_, T> {
        RowCursor::new(self.row(row), self.cols())
    }

    pub fn row_iter(&self, row: usize) -> CursorIter<'_, RowCursor<'_, T>> {
        CursorIter::new(self.row_begin(row), self.row_end(row))
    }

    /// Cursor on the first element of column `col`.
    pub fn col_begin(&self, col: usize) -> ColCursor<'_, T> {
        self.check_col(col);
        ColCursor::new(self.as_slice(), 0, col, self.cols())
    }

    /// Cursor one row past the last element of column `col`.
    pub fn col_end(&self, col: usize) -> ColCursor<'_, T> {
        self.check_col(col);
        ColCursor::new(self.as_slice(), self.rows(), col, self.cols())
    }

    pub fn col_cursor_mut(&mut self, col: usize) -> ColCursorMut<'_, T> {
        self.check_col(col);
        let cols = self.cols();
        ColCursorMut::new(self.as_mut_slice(), 0, col, cols)
    }

    pub fn col_iter(&self, col: usize) -> CursorIter<'_, ColCursor<'_, T>> {
        CursorIter::new(self.col_begin(col), self.col_end(col))
    }

    pub fn col_iter_mut(&mut self, col: usize) -> ColIterMut<'_, T> {
        self.check_col(col);
        let cols = self.cols();
        ColIterMut::new(self.as_mut_slice(), col, cols)
    }
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            shape: self.shape,
        }
    }

    /// Copy-and-swap: `self` is only replaced once the full copy exists.
    fn clone_from(&mut self, source: &Self) {
        let mut tmp = source.clone();
        self.swap(&mut tmp);
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(grid: [[T; C]; R]) -> Self {
        let shape = Shape::new(R, C);
        if shape.is_empty() {
            return Self::new();
        }
        let mut v = Vec::with_capacity(shape.elem_count());
        for row in grid {
            v.extend(row);
        }
        Self {
            data: RawBuf::from_vec(v),
            shape,
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.at(row, col) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match self.at_mut(row, col) {
            Ok(x) => x,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Matrix<T>) -> bool {
        self.shape == other.shape && self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Matrix<T> {}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("[]");
        }
        f.write_str("[")?;
        for r in 0..self.rows() {
            if r > 0 {
                f.write_str(",\n ")?;
            }
            f.debug_list().entries(self.row(r)).finish()?;
        }
        f.write_str("]")
    }
}
