//! Random-access cursors over the rows and columns of a row-major buffer.
//!
//! A row is contiguous, so [`RowCursor`] steps by one element. A column is
//! strided by the row length, so [`ColCursor`] steps by `cols` elements and
//! reads the element `col` places past the start of the current row.
//! Both implement [`RandomAccessCursor`], which is all the accumulation
//! algorithms in [`crate::numeric`] rely on.

use crate::error::{MatError, MatResult};
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign};

/// A position in a sequence that can move any number of steps in O(1).
pub trait RandomAccessCursor<'a>: Copy + PartialEq {
    type Item: 'a;

    /// Element under the cursor. Panics if the cursor is out of range.
    fn get(&self) -> &'a Self::Item;

    /// Element `n` steps away, without moving the cursor.
    fn at(&self, n: isize) -> &'a Self::Item;

    fn advance(&mut self, n: isize);

    /// Signed number of steps from `origin` to `self`.
    fn distance(&self, origin: &Self) -> MatResult<isize>;
}

/// Read-only cursor walking one row with stride 1.
pub struct RowCursor<'a, T> {
    data: &'a [T],
    pos: isize,
}

impl<'a, T> RowCursor<'a, T> {
    pub(crate) fn new(data: &'a [T], pos: usize) -> Self {
        RowCursor {
            data,
            pos: pos as isize,
        }
    }

    pub fn position(&self) -> isize {
        self.pos
    }

    pub fn try_get(&self) -> Option<&'a T> {
        self.try_at(0)
    }

    pub fn try_at(&self, n: isize) -> Option<&'a T> {
        let p = self.pos + n;
        if p < 0 {
            return None;
        }
        self.data.get(p as usize)
    }
}

impl<T> Clone for RowCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RowCursor<'_, T> {}

impl<T> PartialEq for RowCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        same_slice(self.data, other.data) && self.pos == other.pos
    }
}

impl<T> fmt::Debug for RowCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowCursor").field("pos", &self.pos).finish()
    }
}

impl<'a, T> RandomAccessCursor<'a> for RowCursor<'a, T> {
    type Item = T;

    fn get(&self) -> &'a T {
        self.at(0)
    }

    fn at(&self, n: isize) -> &'a T {
        match self.try_at(n) {
            Some(x) => x,
            None => panic!(
                "row cursor out of range: position {} of {}",
                self.pos + n,
                self.data.len()
            ),
        }
    }

    fn advance(&mut self, n: isize) {
        self.pos += n;
    }

    fn distance(&self, origin: &Self) -> MatResult<isize> {
        if same_slice(self.data, origin.data) {
            Ok(self.pos - origin.pos)
        } else {
            Err(MatError::CursorMismatch)
        }
    }
}

/// Read-only cursor walking down one column.
///
/// The position is the index of the current row; the element it refers to
/// lives at `row * stride + col` in the buffer. A cursor may sit anywhere,
/// including one past the last row (the end position) or before the first,
/// but only positions in `[0, rows)` can be dereferenced.
///
/// Distance and ordering only make sense between cursors over the same
/// buffer, column and stride. [`Sub`] asserts that, [`ColCursor::distance`]
/// reports it, and [`PartialOrd`] answers `None`.
pub struct ColCursor<'a, T> {
    data: &'a [T],
    row: isize,
    col: usize,
    stride: usize,
}

impl<'a, T> ColCursor<'a, T> {
    pub(crate) fn new(data: &'a [T], row: usize, col: usize, stride: usize) -> Self {
        debug_assert!(stride > 0 && col < stride && data.len() % stride == 0);
        ColCursor {
            data,
            row: row as isize,
            col,
            stride,
        }
    }

    pub fn row(&self) -> isize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    fn rows(&self) -> usize {
        self.data.len() / self.stride
    }

    pub fn try_get(&self) -> Option<&'a T> {
        self.try_at(0)
    }

    pub fn try_at(&self, n: isize) -> Option<&'a T> {
        let data = self.data;
        strided_offset(self.row + n, self.col, self.stride, self.rows()).map(|i| &data[i])
    }

    /// Element under the cursor.
    pub fn get(&self) -> &'a T {
        self.at(0)
    }

    /// Element `n` rows below the cursor.
    pub fn at(&self, n: isize) -> &'a T {
        match self.try_at(n) {
            Some(x) => x,
            None => out_of_range(self.row + n, self.rows()),
        }
    }

    pub fn inc(&mut self) -> &mut Self {
        self.row += 1;
        self
    }

    pub fn dec(&mut self) -> &mut Self {
        self.row -= 1;
        self
    }

    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        self.inc();
        old
    }

    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        self.dec();
        old
    }

    pub fn same_column(&self, other: &Self) -> bool {
        same_slice(self.data, other.data) && self.col == other.col && self.stride == other.stride
    }

    /// Number of rows from `origin` to `self`.
    pub fn distance(&self, origin: &Self) -> MatResult<isize> {
        if self.same_column(origin) {
            Ok(self.row - origin.row)
        } else {
            Err(MatError::CursorMismatch)
        }
    }
}

/// Same view: start address and length both match.
#[inline]
fn same_slice<T>(a: &[T], b: &[T]) -> bool {
    a.as_ptr() == b.as_ptr() && a.len() == b.len()
}

#[inline]
fn strided_offset(row: isize, col: usize, stride: usize, rows: usize) -> Option<usize> {
    if row < 0 || row as usize >= rows {
        None
    } else {
        Some(row as usize * stride + col)
    }
}

#[cold]
fn out_of_range(row: isize, rows: usize) -> ! {
    panic!("column cursor out of range: row {} of {}", row, rows)
}

impl<T> Clone for ColCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ColCursor<'_, T> {}

impl<T> fmt::Debug for ColCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColCursor")
            .field("row", &self.row)
            .field("col", &self.col)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<T> PartialEq for ColCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.same_column(other) && self.row == other.row
    }
}

impl<T> PartialOrd for ColCursor<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.same_column(other) {
            Some(self.row.cmp(&other.row))
        } else {
            None
        }
    }
}

impl<T> AddAssign<isize> for ColCursor<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.row += n;
    }
}

impl<T> SubAssign<isize> for ColCursor<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.row -= n;
    }
}

impl<'a, T> Add<isize> for ColCursor<'a, T> {
    type Output = ColCursor<'a, T>;

    fn add(mut self, n: isize) -> Self::Output {
        self += n;
        self
    }
}

impl<'a, T> Add<ColCursor<'a, T>> for isize {
    type Output = ColCursor<'a, T>;

    fn add(self, cursor: ColCursor<'a, T>) -> Self::Output {
        cursor + self
    }
}

impl<'a, T> Sub<isize> for ColCursor<'a, T> {
    type Output = ColCursor<'a, T>;

    fn sub(mut self, n: isize) -> Self::Output {
        self -= n;
        self
    }
}

impl<'a, T> Sub for ColCursor<'a, T> {
    type Output = isize;

    fn sub(self, origin: ColCursor<'a, T>) -> isize {
        assert!(
            self.same_column(&origin),
            "subtracting cursors of different columns"
        );
        self.row - origin.row
    }
}

impl<T> Index<isize> for ColCursor<'_, T> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        self.at(n)
    }
}

impl<'a, T> RandomAccessCursor<'a> for ColCursor<'a, T> {
    type Item = T;

    fn get(&self) -> &'a T {
        ColCursor::get(self)
    }

    fn at(&self, n: isize) -> &'a T {
        ColCursor::at(self, n)
    }

    fn advance(&mut self, n: isize) {
        *self += n;
    }

    fn distance(&self, origin: &Self) -> MatResult<isize> {
        ColCursor::distance(self, origin)
    }
}

/// Writable cursor walking down one column.
///
/// It holds the matrix exclusively, so it cannot be copied; use
/// [`ColCursorMut::reborrow`] for a temporary second handle and
/// [`ColCursorMut::as_const`] or `ColCursor::from` for a read-only one.
pub struct ColCursorMut<'a, T> {
    data: &'a mut [T],
    row: isize,
    col: usize,
    stride: usize,
}

impl<'a, T> ColCursorMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], row: usize, col: usize, stride: usize) -> Self {
        debug_assert!(stride > 0 && col < stride && data.len() % stride == 0);
        ColCursorMut {
            data,
            row: row as isize,
            col,
            stride,
        }
    }

    pub fn row(&self) -> isize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    fn rows(&self) -> usize {
        self.data.len() / self.stride
    }

    /// True once the cursor has walked past the last row.
    pub fn is_end(&self) -> bool {
        self.row >= self.rows() as isize
    }

    pub fn try_get(&self) -> Option<&T> {
        self.try_at(0)
    }

    pub fn try_at(&self, n: isize) -> Option<&T> {
        strided_offset(self.row + n, self.col, self.stride, self.rows()).map(|i| &self.data[i])
    }

    pub fn try_get_mut(&mut self) -> Option<&mut T> {
        self.try_at_mut(0)
    }

    pub fn try_at_mut(&mut self, n: isize) -> Option<&mut T> {
        let rows = self.rows();
        match strided_offset(self.row + n, self.col, self.stride, rows) {
            Some(i) => Some(&mut self.data[i]),
            None => None,
        }
    }

    pub fn get(&self) -> &T {
        self.at(0)
    }

    pub fn at(&self, n: isize) -> &T {
        match self.try_at(n) {
            Some(x) => x,
            None => out_of_range(self.row + n, self.rows()),
        }
    }

    pub fn get_mut(&mut self) -> &mut T {
        self.at_mut(0)
    }

    pub fn at_mut(&mut self, n: isize) -> &mut T {
        let row = self.row + n;
        let rows = self.rows();
        match strided_offset(row, self.col, self.stride, rows) {
            Some(i) => &mut self.data[i],
            None => out_of_range(row, rows),
        }
    }

    pub fn inc(&mut self) -> &mut Self {
        self.row += 1;
        self
    }

    pub fn dec(&mut self) -> &mut Self {
        self.row -= 1;
        self
    }

    /// Moves down one row and returns a handle to where the cursor was.
    pub fn post_inc(&mut self) -> ColCursorMut<'_, T> {
        let row = self.row;
        self.row += 1;
        ColCursorMut {
            data: &mut *self.data,
            row,
            col: self.col,
            stride: self.stride,
        }
    }

    /// Moves up one row and returns a handle to where the cursor was.
    pub fn post_dec(&mut self) -> ColCursorMut<'_, T> {
        let row = self.row;
        self.row -= 1;
        ColCursorMut {
            data: &mut *self.data,
            row,
            col: self.col,
            stride: self.stride,
        }
    }

    pub fn reborrow(&mut self) -> ColCursorMut<'_, T> {
        ColCursorMut {
            data: &mut *self.data,
            row: self.row,
            col: self.col,
            stride: self.stride,
        }
    }

    pub fn as_const(&self) -> ColCursor<'_, T> {
        ColCursor {
            data: &*self.data,
            row: self.row,
            col: self.col,
            stride: self.stride,
        }
    }

    pub fn into_const(self) -> ColCursor<'a, T> {
        ColCursor {
            data: self.data,
            row: self.row,
            col: self.col,
            stride: self.stride,
        }
    }
}

impl<'a, T> From<ColCursorMut<'a, T>> for ColCursor<'a, T> {
    fn from(cursor: ColCursorMut<'a, T>) -> Self {
        cursor.into_const()
    }
}

impl<T> fmt::Debug for ColCursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColCursorMut")
            .field("row", &self.row)
            .field("col", &self.col)
            .field("stride", &self.stride)
            .finish()
    }
}

impl<T> AddAssign<isize> for ColCursorMut<'_, T> {
    fn add_assign(&mut self, n: isize) {
        self.row += n;
    }
}

impl<T> SubAssign<isize> for ColCursorMut<'_, T> {
    fn sub_assign(&mut self, n: isize) {
        self.row -= n;
    }
}

impl<'a, T> Add<isize> for ColCursorMut<'a, T> {
    type Output = ColCursorMut<'a, T>;

    fn add(mut self, n: isize) -> Self::Output {
        self += n;
        self
    }
}

impl<'a, T> Add<ColCursorMut<'a, T>> for isize {
    type Output = ColCursorMut<'a, T>;

    fn add(self, cursor: ColCursorMut<'a, T>) -> Self::Output {
        cursor + self
    }
}

impl<'a, T> Sub<isize> for ColCursorMut<'a, T> {
    type Output = ColCursorMut<'a, T>;

    fn sub(mut self, n: isize) -> Self::Output {
        self -= n;
        self
    }
}

impl<T> Index<isize> for ColCursorMut<'_, T> {
    type Output = T;

    fn index(&self, n: isize) -> &T {
        self.at(n)
    }
}

impl<T> IndexMut<isize> for ColCursorMut<'_, T> {
    fn index_mut(&mut self, n: isize) -> &mut T {
        self.at_mut(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 3x2:
    // [1, 2]
    // [3, 4]
    // [5, 6]
    const DATA: [i32; 6] = [1, 2, 3, 4, 5, 6];

    fn col(data: &[i32], row: usize, col: usize) -> ColCursor<'_, i32> {
        ColCursor::new(data, row, col, 2)
    }

    #[test]
    fn test_deref_and_step() {
        let mut c = col(&DATA, 0, 1);
        assert_eq!(*c.get(), 2);
        c.inc();
        assert_eq!(*c.get(), 4);
        c.inc();
        assert_eq!(*c.get(), 6);
        c.dec();
        assert_eq!(*c.get(), 4);
    }

    #[test]
    fn test_post_forms_snapshot() {
        let mut c = col(&DATA, 0, 0);
        let old = c.post_inc();
        assert_eq!(*old.get(), 1);
        assert_eq!(*c.get(), 3);
        let old = c.post_dec();
        assert_eq!(*old.get(), 3);
        assert_eq!(*c.get(), 1);
    }

    #[test]
    fn test_indexed_access_does_not_move() {
        let c = col(&DATA, 0, 0);
        assert_eq!(*c.at(2), 5);
        assert_eq!(c[1], 3);
        assert_eq!(c.row(), 0);
        let mid = col(&DATA, 1, 1);
        assert_eq!(mid[-1], 2);
        assert_eq!(mid.try_at(2), None);
        assert_eq!(mid.try_at(-2), None);
    }

    #[test]
    fn test_offset_arithmetic() {
        let b = col(&DATA, 0, 1);
        let c = b + 2;
        assert_eq!(*c.get(), 6);
        assert_eq!(2isize + b, c);
        assert_eq!(c - 2isize, b);
        let mut d = b;
        d += 1;
        assert_eq!(*d.get(), 4);
        d -= 1;
        assert_eq!(d, b);
    }

    #[test]
    fn test_distance() {
        let b = col(&DATA, 0, 1);
        let e = col(&DATA, 3, 1);
        assert_eq!(e - b, 3);
        assert_eq!(b - e, -3);
        assert_eq!(e.distance(&b), Ok(3));
        let other = col(&DATA, 0, 0);
        assert_eq!(e.distance(&other), Err(MatError::CursorMismatch));
    }

    #[test]
    #[should_panic(expected = "different columns")]
    fn test_distance_across_columns_panics() {
        let _ = col(&DATA, 3, 1) - col(&DATA, 0, 0);
    }

    #[test]
    fn test_ordering() {
        let b = col(&DATA, 0, 0);
        let e = col(&DATA, 3, 0);
        assert!(b < e);
        assert!(b <= b);
        assert!(e > b);
        assert!(e >= e);
        let other = col(&DATA, 1, 1);
        assert_eq!(b.partial_cmp(&other), None);
        assert!(!(b < other) && !(b > other));
    }

    #[test]
    fn test_equality_needs_same_column() {
        assert_eq!(col(&DATA, 1, 0), col(&DATA, 1, 0));
        assert_ne!(col(&DATA, 1, 0), col(&DATA, 1, 1));
        let copy = DATA;
        assert_ne!(col(&DATA, 1, 0), col(&copy, 1, 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_deref_end_panics() {
        col(&DATA, 3, 0).get();
    }

    #[test]
    fn test_mut_cursor_writes() {
        let mut data = DATA;
        let mut c = ColCursorMut::new(&mut data, 0, 1, 2);
        *c.get_mut() = 20;
        *c.post_inc().get_mut() += 0;
        *c.get_mut() = 40;
        c[1] = 60;
        assert_eq!(c.at(-1), &20);
        c += 2;
        assert!(c.is_end());
        assert_eq!(c.try_get(), None);
        assert_eq!(data, [1, 20, 3, 40, 5, 60]);
    }

    #[test]
    fn test_mut_post_inc_writes_old_position() {
        let mut data = DATA;
        let mut c = ColCursorMut::new(&mut data, 0, 0, 2);
        *c.post_inc().get_mut() = 10;
        *c.post_inc().get_mut() = 30;
        assert_eq!(c.row(), 2);
        drop(c);
        assert_eq!(data, [10, 2, 30, 4, 5, 6]);
    }

    #[test]
    fn test_mut_to_const_conversion() {
        let mut data = DATA;
        let c = ColCursorMut::new(&mut data, 1, 1, 2);
        let view = c.as_const();
        assert_eq!(*view.get(), 4);
        assert_eq!(view.col(), 1);
        assert_eq!(view.stride(), 2);
        let owned: ColCursor<'_, i32> = ColCursor::from(c + 1);
        assert_eq!(*owned.get(), 6);
        assert_eq!(owned.row(), 2);
    }

    #[test]
    fn test_row_cursor() {
        let mut r = RowCursor::new(&DATA, 2);
        assert_eq!(*r.get(), 3);
        assert_eq!(*r.at(1), 4);
        r.advance(2);
        assert_eq!(*r.get(), 5);
        let origin = RowCursor::new(&DATA, 0);
        assert_eq!(r.distance(&origin), Ok(4));
        assert_eq!(r.try_at(-5), None);
    }

    #[test]
    fn test_cursor_identity_includes_length() {
        let a = RowCursor::new(&DATA[..2], 0);
        let b = RowCursor::new(&DATA[..4], 0);
        assert_ne!(a, b);
        assert_eq!(b.distance(&a), Err(MatError::CursorMismatch));
        assert_eq!(a, RowCursor::new(&DATA[..2], 0));
        let c = ColCursor::new(&DATA[..4], 0, 0, 2);
        let d = ColCursor::new(&DATA, 0, 0, 2);
        assert!(!c.same_column(&d));
    }
}
