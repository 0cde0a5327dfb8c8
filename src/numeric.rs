use crate::cursor::RandomAccessCursor;
use crate::iter::CursorIter;
use core::ops::{Add, Mul};

/// `init + Σ first[k] * other[k]` for every `k` in `[first, last)`.
///
/// Rows and columns both go through here; the second sequence only needs to
/// be at least as long as the first.
pub fn inner_product<'a, A, B, T>(first: A, last: A, other: B, init: T) -> T
where
    A: RandomAccessCursor<'a, Item = T>,
    B: RandomAccessCursor<'a, Item = T>,
    T: Clone + Add<Output = T> + Mul<Output = T> + 'a,
{
    let mut acc = init;
    let mut other = other;
    for x in CursorIter::new(first, last) {
        acc = acc + x.clone() * other.get().clone();
        other.advance(1);
    }
    acc
}

/// `init + Σ x` over `[first, last)`.
pub fn accumulate<'a, C, T>(first: C, last: C, init: T) -> T
where
    C: RandomAccessCursor<'a, Item = T>,
    T: Clone + Add<Output = T> + 'a,
{
    CursorIter::new(first, last).fold(init, |acc, x| acc + x.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::{ColCursor, RowCursor};

    // [1, 2, 3]
    // [4, 5, 6]
    // [7, 8, 9]
    const DATA: [i64; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

    #[test]
    fn test_row_times_col() {
        let row = RowCursor::new(&DATA, 3);
        let row_end = RowCursor::new(&DATA, 6);
        let col = ColCursor::new(&DATA, 0, 2, 3);
        // 4*3 + 5*6 + 6*9
        assert_eq!(inner_product(row, row_end, col, 0), 96);
    }

    #[test]
    fn test_col_times_row() {
        let col = ColCursor::new(&DATA, 0, 0, 3);
        let col_end = ColCursor::new(&DATA, 3, 0, 3);
        let row = RowCursor::new(&DATA, 0);
        // 1*1 + 4*2 + 7*3
        assert_eq!(inner_product(col, col_end, row, 10), 40);
    }

    #[test]
    fn test_empty_range_is_init() {
        let b = ColCursor::new(&DATA, 1, 1, 3);
        assert_eq!(inner_product(b, b, b, 7), 7);
    }

    #[test]
    fn test_accumulate() {
        let col = ColCursor::new(&DATA, 0, 1, 3);
        let col_end = ColCursor::new(&DATA, 3, 1, 3);
        assert_eq!(accumulate(col, col_end, 0), 15);
        assert_eq!(
            accumulate(RowCursor::new(&DATA, 0), RowCursor::new(&DATA, 9), 0),
            45
        );
    }
}
