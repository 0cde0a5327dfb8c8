use crate::cursor::RandomAccessCursor;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use rawpointer::PointerExt;

/// Iterator over the half-open range `[front, back)` of two cursors.
///
/// A reversed or mismatched pair is an empty range.
pub struct CursorIter<'a, C> {
    front: C,
    back: C,
    life: PhantomData<&'a ()>,
}

impl<'a, C> CursorIter<'a, C>
where
    C: RandomAccessCursor<'a>,
{
    pub fn new(front: C, back: C) -> Self {
        Self {
            front,
            back,
            life: PhantomData,
        }
    }

    fn remaining(&self) -> usize {
        match self.back.distance(&self.front) {
            Ok(n) if n > 0 => n as usize,
            _ => 0,
        }
    }
}

impl<'a, C> Iterator for CursorIter<'a, C>
where
    C: RandomAccessCursor<'a>,
{
    type Item = &'a C::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        let x = self.front.get();
        self.front.advance(1);
        Some(x)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.remaining() {
            self.front = self.back;
            return None;
        }
        self.front.advance(n as isize);
        self.next()
    }
}

impl<'a, C> DoubleEndedIterator for CursorIter<'a, C>
where
    C: RandomAccessCursor<'a>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        self.back.advance(-1);
        Some(self.back.get())
    }
}

impl<'a, C> ExactSizeIterator for CursorIter<'a, C> where C: RandomAccessCursor<'a> {}

impl<'a, C> FusedIterator for CursorIter<'a, C> where C: RandomAccessCursor<'a> {}

/// Mutable iterator down one column, yielding each element once.
pub struct ColIterMut<'a, T> {
    ptr: *mut T,
    remaining: usize,
    stride: usize,
    life: PhantomData<&'a mut T>,
}

unsafe impl<T: Send> Send for ColIterMut<'_, T> {}
unsafe impl<T: Sync> Sync for ColIterMut<'_, T> {}

impl<'a, T> ColIterMut<'a, T> {
    pub(crate) fn new(data: &'a mut [T], col: usize, stride: usize) -> Self {
        assert!(col < stride, "column {} out of bounds for stride {}", col, stride);
        let remaining = data.len() / stride;
        let ptr = if remaining == 0 {
            data.as_mut_ptr()
        } else {
            unsafe { data.as_mut_ptr().add(col) }
        };
        Self {
            ptr,
            remaining,
            stride,
            life: PhantomData,
        }
    }
}

impl<'a, T> Iterator for ColIterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let elem = self.ptr;
        self.remaining -= 1;
        if self.remaining > 0 {
            // stays inside the buffer: at least one more row follows
            self.ptr = unsafe { self.ptr.stride_offset(self.stride as isize, 1) };
        }
        Some(unsafe { &mut *elem })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for ColIterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let elem = unsafe { self.ptr.stride_offset(self.stride as isize, self.remaining) };
        Some(unsafe { &mut *elem })
    }
}

impl<T> ExactSizeIterator for ColIterMut<'_, T> {}

impl<T> FusedIterator for ColIterMut<'_, T> {}
