//! Random-access positions into a [`Deque`].
//!
//! A cursor is a logical index in `0..=len` bound to one deque. Arithmetic on it is plain index
//! arithmetic; the block map is only consulted when the element under the cursor is read or
//! written. The position `len` is the end position: it is a valid place to stand, but there is
//! no element there.
//!
//! Moving a cursor before the front or past the end panics. Cursors from different deques never
//! compare equal and are unordered with respect to each other.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::ptr;

use crate::{Deque, BLOCK};

#[cold]
#[inline(never)]
fn out_of_bounds(index: usize, delta: usize, forward: bool, len: usize) -> ! {
    panic!(
        "cursor at {} moved {} by {} (len is {})",
        index,
        if forward { "forward" } else { "back" },
        delta,
        len
    );
}

#[inline]
fn advance(index: usize, n: usize, len: usize) -> usize {
    match index.checked_add(n) {
        Some(i) if i <= len => i,
        _ => out_of_bounds(index, n, true, len),
    }
}

#[inline]
fn retreat(index: usize, n: usize, len: usize) -> usize {
    match index.checked_sub(n) {
        Some(i) => i,
        None => out_of_bounds(index, n, false, len),
    }
}

/// A read-only cursor over a [`Deque`].
///
/// Created by [`Deque::cursor_front`], [`Deque::cursor_end`] and [`Deque::cursor_at`].
///
/// # Examples
///
/// ```
/// use blockdeque::Deque;
///
/// let d: Deque<_> = (0..10).collect();
/// let begin = d.cursor_front();
/// let end = d.cursor_end();
/// assert_eq!(end - begin, 10);
///
/// let mut c = begin + 3;
/// assert_eq!(c.get(), Some(&3));
/// c += 7;
/// assert_eq!(c, end);
/// assert_eq!(c.get(), None);
/// ```
pub struct Cursor<'a, T, const B: usize = BLOCK> {
    deque: &'a Deque<T, B>,
    index: usize,
}

impl<'a, T, const B: usize> Cursor<'a, T, B> {
    pub(crate) fn new(deque: &'a Deque<T, B>, index: usize) -> Self {
        if index > deque.len() {
            out_of_bounds(0, index, true, deque.len());
        }
        Self { deque, index }
    }

    /// The logical index the cursor points at.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.deque.get(self.index)
    }

    /// Returns `true` if the cursor is at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.deque.len()
    }

    /// The deque this cursor walks.
    #[inline]
    pub fn deque(&self) -> &'a Deque<T, B> {
        self.deque
    }

    /// Moves one element towards the back.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end position.
    #[inline]
    pub fn move_next(&mut self) {
        *self += 1;
    }

    /// Moves one element towards the front.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the front.
    #[inline]
    pub fn move_prev(&mut self) {
        *self -= 1;
    }
}

impl<T, const B: usize> Clone for Cursor<'_, T, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const B: usize> Copy for Cursor<'_, T, B> {}

impl<T: fmt::Debug, const B: usize> fmt::Debug for Cursor<'_, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("current", &self.get())
            .finish()
    }
}

impl<T, const B: usize> PartialEq for Cursor<'_, T, B> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.deque, other.deque) && self.index == other.index
    }
}

impl<T, const B: usize> Eq for Cursor<'_, T, B> {}

impl<T, const B: usize> PartialOrd for Cursor<'_, T, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if ptr::eq(self.deque, other.deque) {
            Some(self.index.cmp(&other.index))
        } else {
            None
        }
    }
}

impl<T, const B: usize> AddAssign<usize> for Cursor<'_, T, B> {
    #[inline]
    fn add_assign(&mut self, n: usize) {
        self.index = advance(self.index, n, self.deque.len());
    }
}

impl<T, const B: usize> SubAssign<usize> for Cursor<'_, T, B> {
    #[inline]
    fn sub_assign(&mut self, n: usize) {
        self.index = retreat(self.index, n, self.deque.len());
    }
}

impl<T, const B: usize> Add<usize> for Cursor<'_, T, B> {
    type Output = Self;

    #[inline]
    fn add(mut self, n: usize) -> Self {
        self += n;
        self
    }
}

impl<T, const B: usize> Sub<usize> for Cursor<'_, T, B> {
    type Output = Self;

    #[inline]
    fn sub(mut self, n: usize) -> Self {
        self -= n;
        self
    }
}

/// The signed distance between two cursors over the same deque.
///
/// # Panics
///
/// Panics if the cursors belong to different deques.
impl<'a, T, const B: usize> Sub for Cursor<'a, T, B> {
    type Output = isize;

    fn sub(self, rhs: Self) -> isize {
        assert!(
            ptr::eq(self.deque, rhs.deque),
            "distance between cursors of different deques"
        );
        self.index as isize - rhs.index as isize
    }
}

/// A cursor over a [`Deque`] that can change the elements it passes.
///
/// Created by [`Deque::cursor_front_mut`], [`Deque::cursor_end_mut`] and
/// [`Deque::cursor_at_mut`]. Besides writing through [`get_mut`](Self::get_mut), it can insert
/// and remove at its position, shifting whichever side of the deque is shorter.
///
/// # Examples
///
/// ```
/// use blockdeque::Deque;
///
/// let mut d: Deque<_> = (1..=5).collect();
/// let mut c = d.cursor_at_mut(2);
/// *c.get_mut().unwrap() *= 10;
/// c.insert(0);
/// assert_eq!(c.get(), Some(&0));
/// c += 2;
/// assert_eq!(c.remove_current(), Some(4));
/// assert_eq!(c.get(), Some(&5));
/// assert_eq!(d, [1, 2, 0, 30, 5]);
/// ```
pub struct CursorMut<'a, T, const B: usize = BLOCK> {
    deque: &'a mut Deque<T, B>,
    index: usize,
}

impl<'a, T, const B: usize> CursorMut<'a, T, B> {
    pub(crate) fn new(deque: &'a mut Deque<T, B>, index: usize) -> Self {
        if index > deque.len() {
            out_of_bounds(0, index, true, deque.len());
        }
        Self { deque, index }
    }

    /// The logical index the cursor points at.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.deque.get(self.index)
    }

    /// Mutable access to the element under the cursor, or `None` at the end position.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.deque.get_mut(self.index)
    }

    /// Consumes the cursor, returning the element under it for the rest of the borrow.
    pub fn into_mut(self) -> Option<&'a mut T> {
        let CursorMut { deque, index } = self;
        deque.get_mut(index)
    }

    /// Returns `true` if the cursor is at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.deque.len()
    }

    /// The deque this cursor walks.
    #[inline]
    pub fn deque(&self) -> &Deque<T, B> {
        &*self.deque
    }

    /// A read-only cursor at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T, B> {
        Cursor {
            deque: &*self.deque,
            index: self.index,
        }
    }

    /// Moves one element towards the back.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the end position.
    #[inline]
    pub fn move_next(&mut self) {
        *self += 1;
    }

    /// Moves one element towards the front.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already at the front.
    #[inline]
    pub fn move_prev(&mut self) {
        *self -= 1;
    }

    /// Inserts `value` before the element under the cursor (or at the back, at the end
    /// position). The cursor then points at the new element.
    pub fn insert(&mut self, value: T) {
        self.deque.insert(self.index, value);
    }

    /// Removes and returns the element under the cursor. The cursor then points at the element
    /// that followed it, or at the end position.
    ///
    /// At the end position nothing is removed and `None` is returned.
    pub fn remove_current(&mut self) -> Option<T> {
        self.deque.remove(self.index)
    }
}

impl<T: fmt::Debug, const B: usize> fmt::Debug for CursorMut<'_, T, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("current", &self.get())
            .finish()
    }
}

impl<T, const B: usize> AddAssign<usize> for CursorMut<'_, T, B> {
    #[inline]
    fn add_assign(&mut self, n: usize) {
        self.index = advance(self.index, n, self.deque.len());
    }
}

impl<T, const B: usize> SubAssign<usize> for CursorMut<'_, T, B> {
    #[inline]
    fn sub_assign(&mut self, n: usize) {
        self.index = retreat(self.index, n, self.deque.len());
    }
}
