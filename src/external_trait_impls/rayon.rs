//! Parallel iterator types for `Deque<T>`.
//!
//! Shared iteration splits the deque by logical index, so each half walks its own run of blocks
//! through [`Deque::range`]. Owned and mutable iteration hand the elements over to rayon's `Vec`
//! iterators instead.

use crate::{Deque, BLOCK};

use alloc::collections::LinkedList;
use alloc::vec::Vec;
use rayon_::iter::plumbing::*;
use rayon_::iter::*;
use rayon_::vec;

// NOTE: the following macro is lifted from
// https://github.com/rayon-rs/rayon/blob/44b641e7a8b664c47c35109195441a1e54f1c1b9/src/delegate.rs

/// Creates an indexed parallel iterator implementation which simply wraps an
/// inner type and delegates all methods inward.  The actual struct must already
/// be declared with an `inner` field.
macro_rules! delegate_indexed_iterator {
    ($iter:ty => $item:ty ,
     impl $( $args:tt )*
     ) => {
        impl $( $args )* ParallelIterator for $iter {
            type Item = $item;

            fn drive_unindexed<C>(self, consumer: C) -> C::Result
                where C: UnindexedConsumer<Self::Item>
            {
                self.inner.drive_unindexed(consumer)
            }

            fn opt_len(&self) -> Option<usize> {
                self.inner.opt_len()
            }
        }

        impl $( $args )* IndexedParallelIterator for $iter {
            fn drive<C>(self, consumer: C) -> C::Result
                where C: Consumer<Self::Item>
            {
                self.inner.drive(consumer)
            }

            fn len(&self) -> usize {
                self.inner.len()
            }

            fn with_producer<CB>(self, callback: CB) -> CB::Output
                where CB: ProducerCallback<Self::Item>
            {
                self.inner.with_producer(callback)
            }
        }
    }
}

/// Parallel iterator over a `Deque`
#[derive(Debug, Clone)]
pub struct IntoIter<T: Send> {
    inner: vec::IntoIter<T>,
}

impl<T: Send, const B: usize> IntoParallelIterator for Deque<T, B> {
    type Item = T;
    type Iter = IntoIter<T>;

    fn into_par_iter(self) -> Self::Iter {
        IntoIter {
            inner: Vec::from(self).into_par_iter(),
        }
    }
}

delegate_indexed_iterator! {
    IntoIter<T> => T,
    impl<T: Send>
}

/// Parallel iterator over an immutable reference to a `Deque`
#[derive(Debug)]
pub struct Iter<'a, T: Sync, const B: usize = BLOCK> {
    deque: &'a Deque<T, B>,
}

impl<'a, T: Sync, const B: usize> Clone for Iter<'a, T, B> {
    fn clone(&self) -> Self {
        Iter { deque: self.deque }
    }
}

impl<'a, T: Sync, const B: usize> IntoParallelIterator for &'a Deque<T, B> {
    type Item = &'a T;
    type Iter = Iter<'a, T, B>;

    fn into_par_iter(self) -> Self::Iter {
        Iter { deque: self }
    }
}

impl<'a, T: Sync, const B: usize> ParallelIterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        bridge(self, consumer)
    }

    fn opt_len(&self) -> Option<usize> {
        Some(self.deque.len())
    }
}

impl<'a, T: Sync, const B: usize> IndexedParallelIterator for Iter<'a, T, B> {
    fn drive<C>(self, consumer: C) -> C::Result
    where
        C: Consumer<Self::Item>,
    {
        bridge(self, consumer)
    }

    fn len(&self) -> usize {
        self.deque.len()
    }

    fn with_producer<CB>(self, callback: CB) -> CB::Output
    where
        CB: ProducerCallback<Self::Item>,
    {
        callback.callback(RangeProducer {
            deque: self.deque,
            start: 0,
            end: self.deque.len(),
        })
    }
}

/// The logical index range `start..end` of a deque.
struct RangeProducer<'a, T, const B: usize> {
    deque: &'a Deque<T, B>,
    start: usize,
    end: usize,
}

impl<'a, T: Sync, const B: usize> Producer for RangeProducer<'a, T, B> {
    type Item = &'a T;
    type IntoIter = crate::iter::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.deque.range(self.start..self.end)
    }

    fn split_at(self, index: usize) -> (Self, Self) {
        let mid = self.start + index;
        (
            RangeProducer {
                deque: self.deque,
                start: self.start,
                end: mid,
            },
            RangeProducer {
                deque: self.deque,
                start: mid,
                end: self.end,
            },
        )
    }
}

/// Parallel iterator over a mutable reference to a `Deque`
#[derive(Debug)]
pub struct IterMut<'a, T: Send> {
    inner: vec::IntoIter<&'a mut T>,
}

impl<'a, T: Send, const B: usize> IntoParallelIterator for &'a mut Deque<T, B> {
    type Item = &'a mut T;
    type Iter = IterMut<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        IterMut {
            inner: self.iter_mut().collect::<Vec<_>>().into_par_iter(),
        }
    }
}

delegate_indexed_iterator! {
    IterMut<'a, T> => &'a mut T,
    impl<'a, T: Send + 'a>
}

impl<T, const B: usize> FromParallelIterator<T> for Deque<T, B>
where
    T: Send,
{
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = T>,
    {
        Vec::from_par_iter(par_iter).into()
    }
}

// The ParallelExtend impl is basically
// https://github.com/rayon-rs/rayon/blob/f0d2e708216edae7386e5343a27efc3948ee9001/src/iter/extend.rs

impl<T, const B: usize> ParallelExtend<T> for Deque<T, B>
where
    T: Send,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = T>,
    {
        let list = par_iter
            .into_par_iter()
            .fold(Vec::new, |mut v, i| {
                v.push(i);
                v
            })
            .map(|item| {
                let mut list = LinkedList::new();
                list.push_back(item);
                list
            })
            .reduce(LinkedList::new, |mut list1, mut list2| {
                list1.append(&mut list2);
                list1
            });
        self.reserve(list.iter().map(Vec::len).sum());
        for vec in list {
            self.extend(vec);
        }
    }
}

impl<'a, T, const B: usize> ParallelExtend<&'a T> for Deque<T, B>
where
    T: 'a + Copy + Send + Sync,
{
    fn par_extend<I>(&mut self, par_iter: I)
    where
        I: IntoParallelIterator<Item = &'a T>,
    {
        self.par_extend(par_iter.into_par_iter().copied())
    }
}
