use core::ptr::{self, NonNull};
use log::trace;
use rawpointer::PointerExt;
use std::mem::ManuallyDrop;

#[cold]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}

pub(crate) struct SetLenOnDrop<'a> {
    len: &'a mut usize,
    local_len: usize,
}

impl<'a> SetLenOnDrop<'a> {
    #[inline]
    pub(crate) fn new(len: &'a mut usize) -> Self {
        SetLenOnDrop {
            local_len: *len,
            len,
        }
    }

    #[inline]
    pub(crate) fn increment_len(&mut self, increment: usize) {
        self.local_len += increment;
    }
}

impl Drop for SetLenOnDrop<'_> {
    #[inline]
    fn drop(&mut self) {
        *self.len = self.local_len;
    }
}

/// Owned, contiguous element buffer backing a matrix.
///
/// The allocation always comes from the global allocator with
/// `Layout::array::<P>(cap)`, so it can be handed back as a `Vec`.
pub(crate) struct RawBuf<P> {
    ptr: NonNull<P>,
    len: usize,
    cap: usize,
}

unsafe impl<P: Send> Send for RawBuf<P> {}
unsafe impl<P: Sync> Sync for RawBuf<P> {}

impl<P> RawBuf<P> {
    pub(crate) fn new() -> Self {
        Self {
            ptr: NonNull::<P>::dangling(),
            len: 0,
            cap: 0,
        }
    }

    fn with_capacity(capacity: usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        use std::alloc::{alloc, handle_alloc_error, Layout};
        let layout = match Layout::array::<P>(capacity) {
            Ok(layout) => layout,
            Err(_) => capacity_overflow(),
        };
        let ptr = if layout.size() == 0 {
            NonNull::<P>::dangling()
        } else {
            trace!("allocating {} bytes for {} elements", layout.size(), capacity);
            let ptr = unsafe { alloc(layout) } as *mut P;
            if ptr.is_null() {
                handle_alloc_error(layout)
            } else {
                unsafe { NonNull::<P>::new_unchecked(ptr) }
            }
        };
        Self {
            ptr,
            len: 0,
            cap: capacity,
        }
    }

    /// `n` clones of `elem`.
    pub(crate) fn from_elem(elem: P, n: usize) -> Self
    where
        P: Clone,
    {
        let mut buf = Self::with_capacity(n);
        buf.fill(elem, n);
        buf
    }

    /// Deep copy of `src`.
    pub(crate) fn from_slice(src: &[P]) -> Self
    where
        P: Clone,
    {
        let mut buf = Self::with_capacity(src.len());
        buf.extend_from_slice(src);
        buf
    }

    pub(crate) fn from_vec(v: Vec<P>) -> Self {
        let mut v = ManuallyDrop::new(v);
        let len = v.len();
        let cap = v.capacity();
        let ptr = unsafe { NonNull::new_unchecked(v.as_mut_ptr()) };
        Self { ptr, len, cap }
    }

    pub(crate) fn as_slice(&self) -> &[P] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr() as *const P, self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [P] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    pub(crate) fn as_ptr(&self) -> *const P {
        self.ptr.as_ptr()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Gives the allocation away; `self` is left empty.
    pub(crate) fn take_as_vec(&mut self) -> Vec<P> {
        let capacity = self.cap;
        let len = self.len;
        let ptr = self.ptr;
        self.ptr = NonNull::dangling();
        self.len = 0;
        self.cap = 0;
        unsafe { Vec::from_raw_parts(ptr.as_ptr(), len, capacity) }
    }

    fn fill(&mut self, elem: P, n: usize)
    where
        P: Clone,
    {
        debug_assert!(self.len + n <= self.cap);
        unsafe {
            let mut ptr = self.ptr.as_ptr().add(self.len);
            let mut local_len = SetLenOnDrop::new(&mut self.len);

            for _ in 1..n {
                ptr::write(ptr.post_inc(), elem.clone());
                // clone() may panic; keep len in step with what was written
                local_len.increment_len(1);
            }

            if n > 0 {
                ptr::write(ptr, elem);
                local_len.increment_len(1);
            }
        }
    }

    fn extend_from_slice(&mut self, src: &[P])
    where
        P: Clone,
    {
        debug_assert!(self.len + src.len() <= self.cap);
        unsafe {
            let mut ptr = self.ptr.as_ptr().add(self.len);
            let mut local_len = SetLenOnDrop::new(&mut self.len);
            for elem in src {
                ptr::write(ptr.post_inc(), elem.clone());
                local_len.increment_len(1);
            }
        }
    }
}

impl<P: Clone> Clone for RawBuf<P> {
    fn clone(&self) -> Self {
        RawBuf::from_slice(self.as_slice())
    }
}

impl<P> Drop for RawBuf<P> {
    fn drop(&mut self) {
        drop(self.take_as_vec());
    }
}
