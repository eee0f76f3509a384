//! The block map behind [`Deque`](crate::Deque).
//!
//! Elements live in fixed-size blocks of `B` slots. The map is a `Vec` of optional block
//! handles, and a *physical position* `p` names slot `p % B` of the block at map index `p / B`.
//! The deque itself only remembers the physical position of its front element and its length;
//! everything else is arithmetic done here.
//!
//! When one end of the map runs out of slots, the occupied window of blocks is moved into the
//! middle of a (usually larger) map so that both ends have room again. Only block *handles* are
//! moved, never elements.

use core::mem::{self, MaybeUninit};

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::Error;
use crate::iter::{Iter, IterMut};

/// A fixed-size chunk of element slots. Always exactly `B` long.
pub(crate) type Block<T> = Box<[MaybeUninit<T>]>;

/// Splits a physical position into its map index and its offset within that block.
#[inline]
pub(crate) const fn locate<const B: usize>(pos: usize) -> (usize, usize) {
    (pos / B, pos % B)
}

/// The slots of a map entry that is known to hold a block.
#[inline]
pub(crate) fn occupied<T>(entry: &Option<Block<T>>) -> &[MaybeUninit<T>] {
    debug_assert!(entry.is_some(), "live position in an unallocated block");
    entry
        .as_deref()
        .unwrap_or_else(|| unsafe { core::hint::unreachable_unchecked() })
}

/// Mutable version of [`occupied`].
#[inline]
pub(crate) fn occupied_mut<T>(entry: &mut Option<Block<T>>) -> &mut [MaybeUninit<T>] {
    debug_assert!(entry.is_some(), "live position in an unallocated block");
    entry
        .as_deref_mut()
        .unwrap_or_else(|| unsafe { core::hint::unreachable_unchecked() })
}

fn alloc_block<T>(len: usize) -> Result<Block<T>, Error> {
    let mut block = Vec::new();
    if let Err(e) = block.try_reserve_exact(len) {
        log::warn!("could not allocate a block of {} slots: {}", len, e);
        return Err(Error::Alloc(e));
    }
    block.resize_with(len, MaybeUninit::uninit);
    Ok(block.into_boxed_slice())
}

pub(crate) struct BlockMap<T, const B: usize> {
    entries: Vec<Option<Block<T>>>,
}

impl<T, const B: usize> BlockMap<T, B> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of block handles the map can hold.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of physical positions addressable without reallocating the map.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.entries.len() * B
    }

    /// Makes sure the block at map index `slot` is allocated.
    pub(crate) fn ensure_block(&mut self, slot: usize) -> Result<(), Error> {
        if self.entries[slot].is_none() {
            self.entries[slot] = Some(alloc_block(B)?);
        }
        Ok(())
    }

    /// Frees the block at map index `slot`. It must not hold any live element.
    #[inline]
    pub(crate) fn release(&mut self, slot: usize) {
        self.entries[slot] = None;
    }

    #[cfg(test)]
    pub(crate) fn is_allocated(&self, slot: usize) -> bool {
        self.entries[slot].is_some()
    }

    /// Frees every block. None of them may hold a live element.
    pub(crate) fn release_all(&mut self) {
        self.entries.iter_mut().for_each(|entry| *entry = None);
    }

    /// Stores `value` at `pos`, whose block must be allocated.
    ///
    /// Whatever the slot held before is forgotten, not dropped.
    #[inline]
    pub(crate) fn write(&mut self, pos: usize, value: T) {
        let (slot, offset) = locate::<B>(pos);
        occupied_mut(&mut self.entries[slot])[offset].write(value);
    }

    /// Moves the element out of `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must hold a live element, and the caller must treat the slot as vacant afterwards.
    #[inline]
    pub(crate) unsafe fn read(&mut self, pos: usize) -> T {
        let (slot, offset) = locate::<B>(pos);
        occupied(&self.entries[slot])[offset].assume_init_read()
    }

    /// # Safety
    ///
    /// `pos` must hold a live element.
    #[inline]
    pub(crate) unsafe fn get(&self, pos: usize) -> &T {
        let (slot, offset) = locate::<B>(pos);
        occupied(&self.entries[slot])[offset].assume_init_ref()
    }

    /// # Safety
    ///
    /// `pos` must hold a live element.
    #[inline]
    pub(crate) unsafe fn get_mut(&mut self, pos: usize) -> &mut T {
        let (slot, offset) = locate::<B>(pos);
        occupied_mut(&mut self.entries[slot])[offset].assume_init_mut()
    }

    /// Exchanges the contents of two positions whose blocks are allocated.
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        let (slot_a, offset_a) = locate::<B>(a);
        let (slot_b, offset_b) = locate::<B>(b);
        if slot_a == slot_b {
            occupied_mut(&mut self.entries[slot_a]).swap(offset_a, offset_b);
        } else if slot_a < slot_b {
            let (lo, hi) = self.entries.split_at_mut(slot_b);
            mem::swap(
                &mut occupied_mut(&mut lo[slot_a])[offset_a],
                &mut occupied_mut(&mut hi[0])[offset_b],
            );
        } else {
            self.swap(b, a);
        }
    }

    /// Moves the `used` block handles starting at map index `first` so that `additional` free
    /// map entries follow them (or precede them, if `at_front`), and returns the map index the
    /// first of them ends up at.
    ///
    /// If the map already has plenty of slack the window is recentred in place. Otherwise a new
    /// map is built first, so a failed allocation leaves `self` untouched. With `exact`, the new
    /// map has no slack beyond `additional`.
    pub(crate) fn reallocate(
        &mut self,
        first: usize,
        used: usize,
        additional: usize,
        at_front: bool,
        exact: bool,
    ) -> Result<usize, Error> {
        let needed = used
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        let old = self.entries.len();
        let lead = if at_front { additional } else { 0 };

        if !exact && old / 2 > needed {
            let new_first = (old - needed) / 2 + lead;
            log::trace!(
                "recentring {} blocks of the block map in place ({} entries, {} for the {})",
                used,
                old,
                additional,
                if at_front { "front" } else { "back" },
            );
            self.shift(first, used, new_first);
            return Ok(new_first);
        }

        let size = if exact {
            needed
        } else {
            usize::max(old, needed)
                .checked_mul(2)
                .ok_or(Error::CapacityOverflow)?
        };
        size.checked_mul(B).ok_or(Error::CapacityOverflow)?;

        let mut entries = Vec::new();
        if let Err(e) = entries.try_reserve_exact(size) {
            log::warn!("could not grow the block map to {} entries: {}", size, e);
            return Err(Error::Alloc(e));
        }
        let new_first = (size - needed) / 2 + lead;
        log::trace!(
            "reallocating the block map from {} to {} entries ({} for the {})",
            old,
            size,
            additional,
            if at_front { "front" } else { "back" },
        );
        entries.resize_with(new_first, || None);
        entries.extend(self.entries[first..first + used].iter_mut().map(Option::take));
        entries.resize_with(size, || None);
        // Whatever is left in the old map holds no live element.
        self.entries = entries;
        Ok(new_first)
    }

    fn shift(&mut self, first: usize, used: usize, new_first: usize) {
        if new_first < first {
            self.entries[new_first..first + used].rotate_left(first - new_first);
        } else if new_first > first {
            self.entries[first..new_first + used].rotate_right(new_first - first);
        }
        let (before, rest) = self.entries.split_at_mut(new_first);
        before
            .iter_mut()
            .chain(rest[used..].iter_mut())
            .for_each(|entry| *entry = None);
    }

    /// Iterates over the live elements at physical positions `start..end`.
    pub(crate) fn range(&self, start: usize, end: usize) -> Iter<'_, T> {
        if start == end {
            return Iter::default();
        }
        let (first, head) = locate::<B>(start);
        let (last, tail) = locate::<B>(end - 1);
        if first == last {
            return Iter {
                front: occupied(&self.entries[first])[head..=tail].iter(),
                blocks: Default::default(),
                back: Default::default(),
                len: end - start,
            };
        }
        Iter {
            front: occupied(&self.entries[first])[head..].iter(),
            blocks: self.entries[first + 1..last].iter(),
            back: occupied(&self.entries[last])[..=tail].iter(),
            len: end - start,
        }
    }

    /// Mutable version of [`range`](Self::range).
    pub(crate) fn range_mut(&mut self, start: usize, end: usize) -> IterMut<'_, T> {
        if start == end {
            return IterMut::default();
        }
        let (first, head) = locate::<B>(start);
        let (last, tail) = locate::<B>(end - 1);
        let entries = &mut self.entries[first..=last];
        if first == last {
            return IterMut {
                front: occupied_mut(&mut entries[0])[head..=tail].iter_mut(),
                blocks: Default::default(),
                back: Default::default(),
                len: end - start,
            };
        }
        let (front, rest) = entries.split_at_mut(1);
        let (blocks, back) = rest.split_at_mut(rest.len() - 1);
        IterMut {
            front: occupied_mut(&mut front[0])[head..].iter_mut(),
            blocks: blocks.iter_mut(),
            back: occupied_mut(&mut back[0])[..=tail].iter_mut(),
            len: end - start,
        }
    }
}
