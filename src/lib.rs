//! A double-ended queue with O(1) random access, backed by a map of fixed-size blocks.
//!
//! [`Deque`] keeps its elements in equally sized heap blocks of `B` slots each. A separate
//! *block map* holds the block handles in logical order, so that element `i` lives in block
//! `(head + i) / B` at offset `(head + i) % B`, where `head` is the physical position of the
//! front element:
//!
//! ```text
//!   map:   [ -- | b0 | b1 | b2 | -- | -- ]
//!                 |    |    |
//!                 v    v    v
//!   b0:  [ _ _ 0 1 ]           head = 1 * 4 + 2
//!   b1:  [ 2 3 4 5 ]
//!   b2:  [ 6 7 _ _ ]
//! ```
//!
//! Pushing at either end fills the outermost block and allocates a new one when it is full.
//! When the map itself runs out of entries on one side, the block handles (not the elements)
//! are copied into the middle of a larger map, which leaves room at *both* ends. This is what
//! keeps pushes at the front and at the back amortized O(1) while indexing stays a division and
//! two loads.
//!
//! Compared to `VecDeque`, which is a single ring buffer:
//!
//!  - Growing never moves elements, only block handles. A push that triggers growth copies
//!    `len / B` pointers instead of `len` elements.
//!  - Memory is released block by block as elements are popped from either end.
//!  - The elements are not contiguous, so there is no `as_slices`.
//!  - Every access goes through the map, which makes indexing marginally slower.
//!
//! Besides the usual `VecDeque`-like API, the deque hands out random-access [`Cursor`]s and
//! [`CursorMut`]s: positions that support `+`, `-`, `+=`, `-=` and distance, and that can insert
//! and remove in the middle.
//!
//! The block size is a const parameter. It defaults to [`BLOCK`].

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Number of element slots per block unless a deque says otherwise.
#[cfg(any(test, miri))]
pub const BLOCK: usize = 4;
/// Number of element slots per block unless a deque says otherwise.
#[cfg(not(any(test, miri)))]
pub const BLOCK: usize = 16;

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg_attr(test, macro_use)]
extern crate alloc;

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::repeat_with;
use core::mem;
use core::ops::Bound::{Excluded, Included, Unbounded};
use core::ops::{Index, IndexMut, RangeBounds};

use alloc::collections::VecDeque;
use alloc::vec::Vec;

mod cursor;
mod error;
mod external_trait_impls;
mod iter;
mod raw;

pub use cursor::{Cursor, CursorMut};
pub use error::Error;
pub use iter::{IntoIter, Iter, IterMut};

/// Parallel iterator types for [`Deque`], available with the `rayon` feature.
#[cfg(feature = "rayon")]
pub mod rayon {
    pub use crate::external_trait_impls::rayon::{IntoIter, Iter, IterMut};
}

use raw::{locate, BlockMap};

#[cold]
#[inline(never)]
fn alloc_failed(err: Error) -> ! {
    panic!("{}", err);
}

/// A double-ended queue stored in a map of fixed-size blocks.
///
/// See the [crate-level documentation] for details.
///
/// [crate-level documentation]: index.html
pub struct Deque<T, const B: usize = BLOCK> {
    map: BlockMap<T, B>,
    // Physical position of the front element: its map entry times B plus its block offset.
    // Positions head..head + len are live, everything else in the map is vacant.
    head: usize,
    len: usize,
}

impl<T: Clone, const B: usize> Clone for Deque<T, B> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }

    /// Overwrites `self` with a copy of `other`, reusing the elements and blocks `self` already
    /// has.
    fn clone_from(&mut self, other: &Self) {
        self.truncate(other.len());
        let reused = self.len();
        for (dst, src) in self.iter_mut().zip(other.iter()) {
            dst.clone_from(src);
        }
        self.extend(other.range(reused..).cloned());
    }
}

impl<T, const B: usize> Default for Deque<T, B> {
    /// Creates an empty `Deque<T>`.
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, const B: usize> Drop for Deque<T, B> {
    fn drop(&mut self) {
        self.truncate(0);
    }
}

impl<T> Deque<T> {
    /// Creates an empty `Deque`.
    ///
    /// No memory is allocated until the first element is pushed.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::new();
    /// assert!(deque.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::empty()
    }

    /// Creates an empty `Deque` with room for at least `capacity` pushes at the back before
    /// the block map has to grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::with_capacity(10);
    /// assert!(deque.capacity() >= 10);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        let mut deque = Self::empty();
        deque.reserve(capacity);
        deque
    }

    /// Creates a `Deque` holding `n` clones of `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let deque = Deque::from_elem(3, 'x');
    /// assert_eq!(deque, ['x', 'x', 'x']);
    /// ```
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut deque = Self::with_capacity(n);
        deque.resize(n, value);
        deque
    }

    /// Creates a `Deque` holding `n` default values.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let deque: Deque<i32> = Deque::with_len(4);
    /// assert_eq!(deque, [0, 0, 0, 0]);
    /// ```
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        let mut deque = Self::with_capacity(n);
        deque.resize_with(n, T::default);
        deque
    }
}

impl<T, const B: usize> Deque<T, B> {
    const BLOCK_IS_NONZERO: () = assert!(B > 0, "blocks must hold at least one element");

    fn empty() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::BLOCK_IS_NONZERO;
        Self {
            map: BlockMap::new(),
            head: 0,
            len: 0,
        }
    }

    /// The map entry holding the front element, and how many entries the elements span.
    ///
    /// An empty deque whose head sits inside a block still spans that block.
    #[inline]
    fn occupied_blocks(&self) -> (usize, usize) {
        let (first, offset) = locate::<B>(self.head);
        (first, (offset + self.len).div_ceil(B))
    }

    /// Makes room for `additional` pushes at the front without touching the elements.
    fn grow_front(&mut self, additional: usize) -> Result<(), Error> {
        if additional <= self.head {
            return Ok(());
        }
        let (first, used) = self.occupied_blocks();
        let offset = self.head % B;
        let blocks = (additional - offset).div_ceil(B);
        let first = self.map.reallocate(first, used, blocks, true, false)?;
        self.head = first * B + offset;
        Ok(())
    }

    /// Makes room for `additional` pushes at the back without touching the elements.
    fn grow_back(&mut self, additional: usize) -> Result<(), Error> {
        let wanted = (self.head + self.len)
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        if wanted <= self.map.capacity() {
            return Ok(());
        }
        let (first, used) = self.occupied_blocks();
        let offset = self.head % B;
        let span = (offset + self.len)
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        let blocks = span.div_ceil(B) - used;
        let first = self.map.reallocate(first, used, blocks, false, false)?;
        self.head = first * B + offset;
        Ok(())
    }

    /// Provides a reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// assert_eq!(buf.get(1), Some(&4));
    /// assert_eq!(buf.get(3), None);
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            // index < len, so the position holds a live element
            Some(unsafe { self.map.get(self.head + index) })
        } else {
            None
        }
    }

    /// Provides a mutable reference to the element at the given index.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// if let Some(elem) = buf.get_mut(1) {
    ///     *elem = 7;
    /// }
    ///
    /// assert_eq!(buf[1], 7);
    /// ```
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len {
            Some(unsafe { self.map.get_mut(self.head + index) })
        } else {
            None
        }
    }

    /// Checked access to the element at the given index.
    ///
    /// Unlike indexing with `[]`, an index past the end is reported as an error rather than a
    /// panic.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::{Deque, Error};
    ///
    /// let deque = Deque::from_elem(10, 5);
    /// assert_eq!(deque.at(5), Ok(&5));
    /// assert_eq!(deque.at(10), Err(Error::OutOfRange { index: 10, len: 10 }));
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        self.get(index).ok_or(Error::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Checked mutable access to the element at the given index.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut deque = Deque::from_elem(2, 5);
    /// *deque.at_mut(1).unwrap() = 6;
    /// assert_eq!(deque, [5, 6]);
    /// assert!(deque.at_mut(2).is_err());
    /// ```
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;
        self.get_mut(index).ok_or(Error::OutOfRange { index, len })
    }

    /// Swaps elements at indices `i` and `j`.
    ///
    /// `i` and `j` may be equal.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// buf.push_back(5);
    /// assert_eq!(buf, vec![3, 4, 5]);
    /// buf.swap(0, 2);
    /// assert_eq!(buf, vec![5, 4, 3]);
    /// ```
    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len, "swap index (is {}) should be < len (is {})", i, self.len);
        assert!(j < self.len, "swap index (is {}) should be < len (is {})", j, self.len);
        self.map.swap(self.head + i, self.head + j);
    }

    /// Exchanges the whole contents of `self` and `other`.
    ///
    /// Only the block maps change hands; no element is moved or copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut a = Deque::from_elem(3, 1);
    /// let mut b = Deque::new();
    /// a.swap_with(&mut b);
    /// assert!(a.is_empty());
    /// assert_eq!(b, [1, 1, 1]);
    /// ```
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns the number of elements the `Deque` can address without reallocating its block
    /// map.
    ///
    /// Blocks themselves are allocated lazily, so this is an upper bound on the memory the
    /// deque may use before its map grows, not the memory it holds.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let buf: Deque<i32> = Deque::with_capacity(10);
    /// assert!(buf.capacity() >= 10);
    /// ```
    #[inline]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// Reserves room for at least `additional` more elements to be pushed at the back without
    /// growing the block map.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize` or if the allocation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf: Deque<i32> = vec![1].into_iter().collect();
    /// buf.reserve(10);
    /// assert!(buf.capacity() >= 11);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        if let Err(e) = self.try_reserve(additional) {
            alloc_failed(e);
        }
    }

    /// Tries to reserve room for at least `additional` more elements to be pushed at the back.
    ///
    /// On error the deque is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::{Deque, Error};
    ///
    /// let mut buf: Deque<u8> = Deque::new();
    /// assert!(buf.try_reserve(100).is_ok());
    /// assert_eq!(buf.try_reserve(usize::MAX), Err(Error::CapacityOverflow));
    /// ```
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.grow_back(additional)
    }

    /// Shrinks the block map to exactly the blocks that hold elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::with_capacity(1000);
    /// buf.extend(0..4);
    /// buf.shrink_to_fit();
    /// assert!(buf.capacity() >= 4);
    /// assert!(buf.capacity() < 1000);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        let (first, used) = self.occupied_blocks();
        if used == self.map.len() {
            return;
        }
        match self.map.reallocate(first, used, 0, false, true) {
            Ok(first) => {
                log::debug!("shrunk the block map to {} entries", used);
                self.head = first * B + self.head % B;
            }
            // Shrinking is only an optimization; the deque is still intact.
            Err(e) => log::debug!("not shrinking the block map: {}", e),
        }
    }

    /// Shortens the `Deque`, keeping the first `len` elements and dropping
    /// the rest.
    ///
    /// If `len` is greater than the `Deque`'s current length, this has no
    /// effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(10);
    /// buf.push_back(15);
    /// assert_eq!(buf, vec![5, 10, 15]);
    /// buf.truncate(1);
    /// assert_eq!(buf, vec![5]);
    /// ```
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            self.pop_back();
        }
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// let b: &[_] = &[&5, &3, &4];
    /// let c: Vec<&i32> = buf.iter().collect();
    /// assert_eq!(&c[..], b);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.map.range(self.head, self.head + self.len)
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(3);
    /// buf.push_back(4);
    /// for num in buf.iter_mut() {
    ///     *num = *num - 2;
    /// }
    /// let b: &[_] = &[&mut 3, &mut 1, &mut 2];
    /// assert_eq!(&buf.iter_mut().collect::<Vec<&mut i32>>()[..], b);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        self.map.range_mut(self.head, self.head + self.len)
    }

    /// Returns the number of elements in the `Deque`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut v = Deque::new();
    /// assert_eq!(v.len(), 0);
    /// v.push_back(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the `Deque` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut v = Deque::new();
    /// assert!(v.is_empty());
    /// v.push_front(1);
    /// assert!(!v.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn range_start_end<R>(&self, range: R) -> (usize, usize)
    where
        R: RangeBounds<usize>,
    {
        let len = self.len;
        let start = match range.start_bound() {
            Included(&n) => n,
            Excluded(&n) => n + 1,
            Unbounded => 0,
        };
        let end = match range.end_bound() {
            Included(&n) => n + 1,
            Excluded(&n) => n,
            Unbounded => len,
        };
        assert!(start <= end, "lower bound was too large");
        assert!(end <= len, "upper bound was too large");
        (start, end)
    }

    /// Creates an iterator that covers the specified range in the `Deque`.
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let v: Deque<_> = vec![1, 2, 3].into_iter().collect();
    /// let range = v.range(2..).copied().collect::<Deque<_>>();
    /// assert_eq!(range, vec![3]);
    ///
    /// // A full range covers all contents
    /// let all = v.range(..);
    /// assert_eq!(all.len(), 3);
    /// ```
    #[inline]
    pub fn range<R>(&self, range: R) -> Iter<'_, T>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = self.range_start_end(range);
        self.map.range(self.head + start, self.head + end)
    }

    /// Creates an iterator that covers the specified mutable range in the `Deque`.
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut v: Deque<_> = vec![1, 2, 3].into_iter().collect();
    /// for v in v.range_mut(2..) {
    ///   *v *= 2;
    /// }
    /// assert_eq!(v, vec![1, 2, 6]);
    ///
    /// // A full range covers all contents
    /// for v in v.range_mut(..) {
    ///   *v *= 2;
    /// }
    /// assert_eq!(v, vec![2, 4, 12]);
    /// ```
    #[inline]
    pub fn range_mut<R>(&mut self, range: R) -> IterMut<'_, T>
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = self.range_start_end(range);
        self.map.range_mut(self.head + start, self.head + end)
    }

    /// Clears the `Deque`, removing all values and releasing every block.
    ///
    /// The block map itself is kept for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut v = Deque::new();
    /// v.push_back(1);
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert!(v.cursor_front() == v.cursor_end());
    /// ```
    pub fn clear(&mut self) {
        self.truncate(0);
        self.map.release_all();
        self.head = self.map.len() / 2 * B;
    }

    /// Returns `true` if the `Deque` contains an element equal to the
    /// given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut deque: Deque<u32> = Deque::new();
    ///
    /// deque.push_back(0);
    /// deque.push_back(1);
    ///
    /// assert_eq!(deque.contains(&1), true);
    /// assert_eq!(deque.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.iter().any(|e| e == x)
    }

    /// Provides a reference to the front element, or `None` if the `Deque` is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// assert_eq!(d.front(), None);
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// assert_eq!(d.front(), Some(&1));
    /// ```
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Provides a mutable reference to the front element, or `None` if the
    /// `Deque` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// assert_eq!(d.front_mut(), None);
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// match d.front_mut() {
    ///     Some(x) => *x = 9,
    ///     None => (),
    /// }
    /// assert_eq!(d.front(), Some(&9));
    /// ```
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    /// Provides a reference to the back element, or `None` if the `Deque` is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// assert_eq!(d.back(), None);
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// assert_eq!(d.back(), Some(&2));
    /// ```
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Provides a mutable reference to the back element, or `None` if the
    /// `Deque` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// assert_eq!(d.back(), None);
    ///
    /// d.push_back(1);
    /// d.push_back(2);
    /// match d.back_mut() {
    ///     Some(x) => *x = 9,
    ///     None => (),
    /// }
    /// assert_eq!(d.back(), Some(&9));
    /// ```
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        match self.len.checked_sub(1) {
            Some(i) => self.get_mut(i),
            None => None,
        }
    }

    /// Removes the first element and returns it, or `None` if the `Deque` is
    /// empty.
    ///
    /// A block is released as soon as its last element is popped.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.push_back(1);
    /// d.push_back(2);
    ///
    /// assert_eq!(d.pop_front(), Some(1));
    /// assert_eq!(d.pop_front(), Some(2));
    /// assert_eq!(d.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let pos = self.head;
        // pos is the front element, and it stops being live right away
        let value = unsafe { self.map.read(pos) };
        self.head += 1;
        self.len -= 1;
        if self.head % B == 0 {
            self.map.release(pos / B);
        }
        Some(value)
    }

    /// Removes the last element from the `Deque` and returns it, or `None` if
    /// it is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// assert_eq!(buf.pop_back(), None);
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(buf.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let pos = self.head + self.len;
        let value = unsafe { self.map.read(pos) };
        if pos % B == 0 {
            self.map.release(pos / B);
        }
        Some(value)
    }

    /// Prepends an element to the `Deque`.
    ///
    /// # Panics
    ///
    /// Panics if the block map cannot grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut d = Deque::new();
    /// d.push_front(1);
    /// d.push_front(2);
    /// d.push_front(3);
    /// assert_eq!(d, [3, 2, 1]);
    /// ```
    pub fn push_front(&mut self, value: T) {
        if let Err(e) = self.try_push_front(value) {
            alloc_failed(e);
        }
    }

    /// Prepends an element to the `Deque`, reporting allocation failure instead of panicking.
    ///
    /// On error the deque is left as it was and `value` is dropped.
    pub fn try_push_front(&mut self, value: T) -> Result<(), Error> {
        self.grow_front(1)?;
        let pos = self.head - 1;
        self.map.ensure_block(pos / B)?;
        self.map.write(pos, value);
        self.head = pos;
        self.len += 1;
        Ok(())
    }

    /// Appends an element to the back of the `Deque`.
    ///
    /// # Panics
    ///
    /// Panics if the block map cannot grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(1);
    /// buf.push_back(3);
    /// assert_eq!(3, *buf.back().unwrap());
    /// ```
    pub fn push_back(&mut self, value: T) {
        if let Err(e) = self.try_push_back(value) {
            alloc_failed(e);
        }
    }

    /// Appends an element to the back of the `Deque`, reporting allocation failure instead of
    /// panicking.
    ///
    /// On error the deque is left as it was and `value` is dropped.
    pub fn try_push_back(&mut self, value: T) -> Result<(), Error> {
        self.grow_back(1)?;
        let pos = self.head + self.len;
        self.map.ensure_block(pos / B)?;
        self.map.write(pos, value);
        self.len += 1;
        Ok(())
    }

    /// Inserts an element at `index` within the `Deque`.
    ///
    /// Whichever end is closer to the insertion point will be moved to make
    /// room, and all the affected elements will be moved to new positions.
    ///
    /// Element at index 0 is the front of the queue.
    ///
    /// # Panics
    ///
    /// Panics if `index` is greater than `Deque`'s length
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    /// deque.push_back('a');
    /// deque.push_back('b');
    /// deque.push_back('c');
    /// assert_eq!(deque, vec!['a', 'b', 'c']);
    ///
    /// deque.insert(1, 'd');
    /// assert_eq!(deque, vec!['a', 'd', 'b', 'c']);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) {
        #[cold]
        #[inline(never)]
        fn assert_failed(index: usize, len: usize) -> ! {
            panic!("insertion index (is {}) should be <= len (is {})", index, len);
        }

        if index > self.len {
            assert_failed(index, self.len);
        }
        if index < self.len - index {
            self.push_front(value);
            for i in 0..index {
                self.map.swap(self.head + i, self.head + i + 1);
            }
        } else {
            self.push_back(value);
            for i in (index..self.len - 1).rev() {
                self.map.swap(self.head + i, self.head + i + 1);
            }
        }
    }

    /// Removes and returns the element at `index` from the `Deque`, or `None` if `index` is
    /// out of bounds.
    ///
    /// Whichever end is closer to the removal point will be moved to close
    /// the gap, and all the affected elements will be moved to new positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(1);
    /// buf.push_back(2);
    /// buf.push_back(3);
    /// assert_eq!(buf, vec![1, 2, 3]);
    ///
    /// assert_eq!(buf.remove(1), Some(2));
    /// assert_eq!(buf, vec![1, 3]);
    /// assert_eq!(buf.remove(2), None);
    /// ```
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        if index < self.len - 1 - index {
            for i in (0..index).rev() {
                self.map.swap(self.head + i, self.head + i + 1);
            }
            self.pop_front()
        } else {
            for i in index..self.len - 1 {
                self.map.swap(self.head + i, self.head + i + 1);
            }
            self.pop_back()
        }
    }

    /// Moves all the elements of `other` into `self`, leaving `other` empty.
    ///
    /// # Panics
    ///
    /// Panics if the block map cannot grow.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf: Deque<_> = vec![1, 2].into_iter().collect();
    /// let mut buf2: Deque<_> = vec![3, 4].into_iter().collect();
    /// buf.append(&mut buf2);
    /// assert_eq!(buf, vec![1, 2, 3, 4]);
    /// assert!(buf2.is_empty());
    /// ```
    #[inline]
    pub fn append(&mut self, other: &mut Self) {
        self.reserve(other.len());
        while let Some(e) = other.pop_front() {
            self.push_back(e);
        }
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// In other words, remove all elements `e` such that `f(&e)` returns false.
    /// This method operates in place, visiting each element exactly once in the
    /// original order, and preserves the order of the retained elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.extend(1..5);
    /// buf.retain(|&x| x % 2 == 0);
    /// assert_eq!(buf, vec![2, 4]);
    /// ```
    ///
    /// The exact order may be useful for tracking external state, like an index.
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.extend(1..6);
    ///
    /// let keep = [false, true, true, false, true];
    /// let mut i = 0;
    /// buf.retain(|_| (keep[i], i += 1).0);
    /// assert_eq!(buf, vec![2, 3, 5]);
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut kept = 0;
        for i in 0..self.len {
            if f(&self[i]) {
                if i != kept {
                    self.map.swap(self.head + kept, self.head + i);
                }
                kept += 1;
            }
        }
        self.truncate(kept);
    }

    /// Modifies the `Deque` in-place so that `len()` is equal to `new_len`,
    /// either by removing excess elements from the back or by appending
    /// elements generated by calling `generator` to the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(10);
    /// buf.push_back(15);
    /// assert_eq!(buf, vec![5, 10, 15]);
    ///
    /// buf.resize_with(5, Default::default);
    /// assert_eq!(buf, vec![5, 10, 15, 0, 0]);
    ///
    /// buf.resize_with(2, || unreachable!());
    /// assert_eq!(buf, vec![5, 10]);
    ///
    /// let mut state = 100;
    /// buf.resize_with(5, || { state += 1; state });
    /// assert_eq!(buf, vec![5, 10, 101, 102, 103]);
    /// ```
    pub fn resize_with(&mut self, new_len: usize, generator: impl FnMut() -> T) {
        let len = self.len;

        if new_len > len {
            self.extend(repeat_with(generator).take(new_len - len))
        } else {
            self.truncate(new_len);
        }
    }

    /// Modifies the `Deque` in-place so that `len()` is equal to `new_len`, appending default
    /// values or dropping elements from the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::from_elem(2, 7);
    /// buf.resize_default(4);
    /// assert_eq!(buf, [7, 7, 0, 0]);
    /// ```
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// A cursor at the front element (the end position, if the deque is empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let d = Deque::from_elem(2, 9);
    /// let mut c = d.cursor_front();
    /// assert_eq!(c.get(), Some(&9));
    /// c.move_next();
    /// c.move_next();
    /// assert!(c.is_end());
    /// ```
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T, B> {
        Cursor::new(self, 0)
    }

    /// A cursor at the end position, one past the back element.
    #[inline]
    pub fn cursor_end(&self) -> Cursor<'_, T, B> {
        Cursor::new(self, self.len)
    }

    /// A cursor at logical index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[inline]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T, B> {
        Cursor::new(self, index)
    }

    /// A mutable cursor at the front element (the end position, if the deque is empty).
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T, B> {
        CursorMut::new(self, 0)
    }

    /// A mutable cursor at the end position.
    #[inline]
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T, B> {
        let len = self.len;
        CursorMut::new(self, len)
    }

    /// A mutable cursor at logical index `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[inline]
    pub fn cursor_at_mut(&mut self, index: usize) -> CursorMut<'_, T, B> {
        CursorMut::new(self, index)
    }
}

impl<T: Clone, const B: usize> Deque<T, B> {
    /// Modifies the `Deque` in-place so that `len()` is equal to new_len,
    /// either by removing excess elements from the back or by appending clones of `value`
    /// to the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockdeque::Deque;
    ///
    /// let mut buf = Deque::new();
    /// buf.push_back(5);
    /// buf.push_back(10);
    /// buf.push_back(15);
    /// assert_eq!(buf, vec![5, 10, 15]);
    ///
    /// buf.resize(2, 0);
    /// assert_eq!(buf, vec![5, 10]);
    ///
    /// buf.resize(5, 20);
    /// assert_eq!(buf, vec![5, 10, 20, 20, 20]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) {
        self.resize_with(new_len, || value.clone());
    }
}

impl<A: PartialEq, const B: usize> PartialEq for Deque<A, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<A: Eq, const B: usize> Eq for Deque<A, B> {}

macro_rules! __impl_slice_eq {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty) => {
        impl<A, U, const B: usize, $($vars)*> PartialEq<$rhs> for $lhs
        where
            A: PartialEq<U>,
        {
            fn eq(&self, other: &$rhs) -> bool {
                self.len() == other.len() && self.iter().eq(other.iter())
            }
        }

        // For symmetry:
        impl<A, U, const B: usize, $($vars)*> PartialEq<$lhs> for $rhs
        where
            U: PartialEq<A>,
        {
            fn eq(&self, other: &$lhs) -> bool {
                self.len() == other.len() && self.iter().eq(other.iter())
            }
        }
    };
}

__impl_slice_eq! { [] Deque<A, B>, Vec<U> }
__impl_slice_eq! { [] Deque<A, B>, &[U] }
__impl_slice_eq! { [] Deque<A, B>, &mut [U] }
__impl_slice_eq! { [const N: usize] Deque<A, B>, [U; N] }

impl<A: PartialOrd, const B: usize> PartialOrd for Deque<A, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<A: Ord, const B: usize> Ord for Deque<A, B> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<A: Hash, const B: usize> Hash for Deque<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.iter().for_each(|elem| elem.hash(state));
    }
}

impl<A, const B: usize> Index<usize> for Deque<A, B> {
    type Output = A;

    #[inline]
    fn index(&self, index: usize) -> &A {
        self.get(index).expect("Out of bounds access")
    }
}

impl<A, const B: usize> IndexMut<usize> for Deque<A, B> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut A {
        self.get_mut(index).expect("Out of bounds access")
    }
}

impl<A, const B: usize> FromIterator<A> for Deque<A, B> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        let mut deq = Self::empty();
        deq.extend(iter);
        deq
    }
}

impl<T, const B: usize> IntoIterator for Deque<T, B> {
    type Item = T;
    type IntoIter = IntoIter<T, B>;

    /// Consumes the `Deque` into a front-to-back iterator yielding elements by value.
    fn into_iter(self) -> IntoIter<T, B> {
        IntoIter { inner: self }
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a Deque<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, const B: usize> IntoIterator for &'a mut Deque<T, B> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<A, const B: usize> Extend<A> for Deque<A, B> {
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        iter.for_each(move |v| self.push_back(v));
    }
}

impl<'a, T: 'a + Copy, const B: usize> Extend<&'a T> for Deque<T, B> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: fmt::Debug, const B: usize> fmt::Debug for Deque<T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}

impl<T, const B: usize> From<Vec<T>> for Deque<T, B> {
    fn from(other: Vec<T>) -> Self {
        other.into_iter().collect()
    }
}

impl<T, const B: usize> From<VecDeque<T>> for Deque<T, B> {
    fn from(other: VecDeque<T>) -> Self {
        other.into_iter().collect()
    }
}

impl<T, const B: usize, const N: usize> From<[T; N]> for Deque<T, B> {
    fn from(other: [T; N]) -> Self {
        other.into_iter().collect()
    }
}

impl<T, const B: usize> From<Deque<T, B>> for Vec<T> {
    fn from(other: Deque<T, B>) -> Self {
        other.into_iter().collect()
    }
}

impl<T, const B: usize> From<Deque<T, B>> for VecDeque<T> {
    fn from(other: Deque<T, B>) -> Self {
        other.into_iter().collect()
    }
}
