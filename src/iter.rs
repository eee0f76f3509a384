use core::fmt;
use core::iter::FusedIterator;
use core::mem::MaybeUninit;
use core::slice;

use crate::raw::{occupied, occupied_mut, Block};
use crate::Deque;

// Both borrowing iterators are flattened walks over the block map: `front` is the rest of the
// block at the front, `back` the rest of the block at the back, and `blocks` the fully occupied
// blocks in between. `len` counts what is left across all three.
macro_rules! _impl {
    (fw, $entry:path, $slots:ident, $init:ident) => {
        #[inline]
        fn next(&mut self) -> Option<Self::Item> {
            loop {
                if let Some(slot) = self.front.next() {
                    self.len -= 1;
                    // every slot between the two ends of the iterator is initialized
                    return Some(unsafe { slot.$init() });
                }
                match self.blocks.next() {
                    Some(entry) => self.front = $entry(entry).$slots(),
                    None => {
                        let slot = self.back.next()?;
                        self.len -= 1;
                        return Some(unsafe { slot.$init() });
                    }
                }
            }
        }

        #[inline]
        fn size_hint(&self) -> (usize, Option<usize>) {
            (self.len, Some(self.len))
        }

        #[inline]
        fn count(self) -> usize {
            self.len
        }

        #[inline]
        fn last(mut self) -> Option<Self::Item> {
            self.next_back()
        }
    };

    (bw, $entry:path, $slots:ident, $init:ident) => {
        #[inline]
        fn next_back(&mut self) -> Option<Self::Item> {
            loop {
                if let Some(slot) = self.back.next_back() {
                    self.len -= 1;
                    return Some(unsafe { slot.$init() });
                }
                match self.blocks.next_back() {
                    Some(entry) => self.back = $entry(entry).$slots(),
                    None => {
                        let slot = self.front.next_back()?;
                        self.len -= 1;
                        return Some(unsafe { slot.$init() });
                    }
                }
            }
        }
    };
}

/// An iterator over the elements of a `Deque`.
///
/// This `struct` is created by the [`iter`] and [`range`] methods on [`Deque`]. See their
/// documentation for more.
///
/// [`iter`]: Deque::iter
/// [`range`]: Deque::range
pub struct Iter<'a, T> {
    pub(crate) front: slice::Iter<'a, MaybeUninit<T>>,
    pub(crate) blocks: slice::Iter<'a, Option<Block<T>>>,
    pub(crate) back: slice::Iter<'a, MaybeUninit<T>>,
    pub(crate) len: usize,
}

impl<'a, T> Default for Iter<'a, T> {
    fn default() -> Self {
        Self {
            front: Default::default(),
            blocks: Default::default(),
            back: Default::default(),
            len: 0,
        }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            blocks: self.blocks.clone(),
            back: self.back.clone(),
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    _impl!(fw, occupied, iter, assume_init_ref);
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    _impl!(bw, occupied, iter, assume_init_ref);
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// A mutable iterator over the elements of a `Deque`.
///
/// This `struct` is created by the [`iter_mut`] and [`range_mut`] methods on [`Deque`]. See
/// their documentation for more.
///
/// [`iter_mut`]: Deque::iter_mut
/// [`range_mut`]: Deque::range_mut
pub struct IterMut<'a, T> {
    pub(crate) front: slice::IterMut<'a, MaybeUninit<T>>,
    pub(crate) blocks: slice::IterMut<'a, Option<Block<T>>>,
    pub(crate) back: slice::IterMut<'a, MaybeUninit<T>>,
    pub(crate) len: usize,
}

impl<'a, T> Default for IterMut<'a, T> {
    fn default() -> Self {
        Self {
            front: Default::default(),
            blocks: Default::default(),
            back: Default::default(),
            len: 0,
        }
    }
}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.len).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    _impl!(fw, occupied_mut, iter_mut, assume_init_mut);
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    _impl!(bw, occupied_mut, iter_mut, assume_init_mut);
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// An owning iterator over the elements of a `Deque`.
///
/// This `struct` is created by the [`into_iter`] method on [`Deque`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: Deque::into_iter
#[derive(Clone)]
pub struct IntoIter<T, const B: usize> {
    pub(crate) inner: Deque<T, B>,
}

impl<T: fmt::Debug, const B: usize> fmt::Debug for IntoIter<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

impl<T, const B: usize> Iterator for IntoIter<T, B> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }

    #[inline]
    fn count(self) -> usize {
        self.inner.len()
    }
}

impl<T, const B: usize> DoubleEndedIterator for IntoIter<T, B> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop_back()
    }
}

impl<T, const B: usize> ExactSizeIterator for IntoIter<T, B> {}

impl<T, const B: usize> FusedIterator for IntoIter<T, B> {}
