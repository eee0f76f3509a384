#![cfg(feature = "rayon")]

#[macro_use]
extern crate lazy_static;

use blockdeque::Deque;
use rayon_::iter::{
    IndexedParallelIterator, IntoParallelIterator, IntoParallelRefIterator,
    IntoParallelRefMutIterator, ParallelExtend, ParallelIterator,
};

macro_rules! assert_eq3 {
    ($e1:expr, $e2:expr, $e3:expr) => {{
        assert_eq!($e1, $e2);
        assert_eq!($e1, $e3);
        assert_eq!($e2, $e3);
    }};
}

lazy_static! {
    static ref DEQUE_EMPTY: Deque<u32> = Deque::new();
    static ref DEQUE: Deque<u32> = {
        let mut deque = Deque::new();
        deque.push_back(30);
        deque.push_front(10);
        deque.push_front(20);
        deque.push_back(50);
        deque.push_back(60);
        deque.push_back(40);
        deque
    };
    static ref DEQUE_LARGE: Deque<u32, 3> = (0..1000).collect();
}

#[test]
fn deque_seq_par_equivalence_iter_empty() {
    let vec_seq = DEQUE_EMPTY.iter().collect::<Vec<_>>();
    let vec_par = DEQUE_EMPTY.par_iter().collect::<Vec<_>>();

    assert_eq3!(vec_seq, vec_par, &[] as &[&u32]);
}

#[test]
fn deque_seq_par_equivalence_iter() {
    let mut vec_seq = DEQUE.iter().collect::<Vec<_>>();
    let mut vec_par = DEQUE.par_iter().collect::<Vec<_>>();

    assert_eq!(vec_seq, vec_par);

    let expected_sorted = [&10, &20, &30, &40, &50, &60];

    vec_seq.sort_unstable();
    vec_par.sort_unstable();

    assert_eq3!(vec_seq, vec_par, expected_sorted);
}

#[test]
fn deque_par_iter_splits_across_blocks() {
    let vec_seq = DEQUE_LARGE.iter().collect::<Vec<_>>();
    let vec_par = DEQUE_LARGE.par_iter().with_min_len(7).collect::<Vec<_>>();
    assert_eq!(vec_seq, vec_par);

    let rev_par = DEQUE_LARGE.par_iter().rev().copied().collect::<Vec<_>>();
    assert!(rev_par.into_iter().eq((0..1000).rev()));

    let sum: u32 = DEQUE_LARGE.par_iter().sum();
    assert_eq!(sum, (0..1000).sum::<u32>());
    assert_eq!(DEQUE_LARGE.par_iter().len(), 1000);
}

#[test]
fn deque_seq_par_equivalence_iter_mut_empty() {
    let mut deque1 = DEQUE_EMPTY.clone();
    let mut deque2 = DEQUE_EMPTY.clone();

    let vec_seq = deque1.iter_mut().collect::<Vec<_>>();
    let vec_par = deque2.par_iter_mut().collect::<Vec<_>>();

    assert_eq3!(vec_seq, vec_par, &[] as &[&u32]);
}

#[test]
fn deque_seq_par_equivalence_iter_mut() {
    let mut deque1 = DEQUE.clone();
    let mut deque2 = DEQUE.clone();

    let mut vec_seq = deque1.iter_mut().collect::<Vec<_>>();
    let mut vec_par = deque2.par_iter_mut().collect::<Vec<_>>();

    assert_eq!(vec_seq, vec_par);

    let expected_sorted = [&mut 10, &mut 20, &mut 30, &mut 40, &mut 50, &mut 60];

    vec_seq.sort_unstable();
    vec_par.sort_unstable();

    assert_eq3!(vec_seq, vec_par, expected_sorted);
}

#[test]
fn deque_par_iter_mut_writes() {
    let mut deque = DEQUE_LARGE.clone();
    deque.par_iter_mut().for_each(|v| *v *= 2);
    assert!(deque.iter().copied().eq((0..1000).map(|v| v * 2)));
}

#[test]
fn deque_seq_par_equivalence_into_iter_empty() {
    let vec_seq = DEQUE_EMPTY.clone().into_iter().collect::<Vec<_>>();
    let vec_par = DEQUE_EMPTY.clone().into_par_iter().collect::<Vec<_>>();

    assert_eq3!(vec_seq, vec_par, []);
}

#[test]
fn deque_seq_par_equivalence_into_iter() {
    let mut vec_seq = DEQUE.clone().into_iter().collect::<Vec<_>>();
    let mut vec_par = DEQUE.clone().into_par_iter().collect::<Vec<_>>();

    assert_eq!(vec_seq, vec_par);

    let expected_sorted = [10, 20, 30, 40, 50, 60];

    vec_seq.sort_unstable();
    vec_par.sort_unstable();

    assert_eq3!(vec_seq, vec_par, expected_sorted);
}

lazy_static! {
    static ref DEQUE_VEC_EMPTY: Vec<u32> = vec![];
    static ref DEQUE_VEC: Vec<u32> = vec![20, 10, 30, 50, 60, 40,];
}

#[test]
fn deque_seq_par_equivalence_collect_empty() {
    let deque_expected = DEQUE_EMPTY.clone();
    let deque_seq = DEQUE_VEC_EMPTY.clone().into_iter().collect::<Deque<_>>();
    let deque_par = DEQUE_VEC_EMPTY.clone().into_par_iter().collect::<Deque<_>>();

    assert_eq!(deque_seq, deque_par);
    assert_eq!(deque_seq, deque_expected);
    assert_eq!(deque_par, deque_expected);
}

#[test]
fn deque_seq_par_equivalence_collect() {
    let deque_expected = DEQUE.clone();
    let deque_seq = DEQUE_VEC.clone().into_iter().collect::<Deque<_>>();
    let deque_par = DEQUE_VEC.clone().into_par_iter().collect::<Deque<_>>();

    assert_eq!(deque_seq, deque_par);
    assert_eq!(deque_seq, deque_expected);
    assert_eq!(deque_par, deque_expected);
}

lazy_static! {
    static ref DEQUE_EXISTING_EMPTY: Deque<u32> = Deque::new();
    static ref DEQUE_EXISTING: Deque<u32> = {
        let mut deque = Deque::new();
        deque.push_back(10);
        deque.push_front(20);
        deque
    };
    static ref DEQUE_EXTENSION_EMPTY: Vec<u32> = vec![];
    static ref DEQUE_EXTENSION: Vec<u32> = vec![30, 50, 60, 40];
}

#[test]
fn deque_seq_par_equivalence_existing_empty_extend_empty() {
    let expected = Deque::new();
    let mut deque_seq = DEQUE_EXISTING_EMPTY.clone();
    let mut deque_par = DEQUE_EXISTING_EMPTY.clone();

    deque_seq.extend(DEQUE_EXTENSION_EMPTY.iter().cloned());
    deque_par.par_extend(DEQUE_EXTENSION_EMPTY.par_iter().cloned());

    assert_eq3!(deque_seq, deque_par, expected);
}

#[test]
fn deque_seq_par_equivalence_existing_empty_extend() {
    let expected = DEQUE_EXTENSION.iter().cloned().collect::<Deque<_>>();
    let mut deque_seq = DEQUE_EXISTING_EMPTY.clone();
    let mut deque_par = DEQUE_EXISTING_EMPTY.clone();

    deque_seq.extend(DEQUE_EXTENSION.iter().cloned());
    deque_par.par_extend(DEQUE_EXTENSION.par_iter().cloned());

    assert_eq3!(deque_seq, deque_par, expected);
}

#[test]
fn deque_seq_par_equivalence_existing_extend_empty() {
    let expected = DEQUE_EXISTING.clone();
    let mut deque_seq = DEQUE_EXISTING.clone();
    let mut deque_par = DEQUE_EXISTING.clone();

    deque_seq.extend(DEQUE_EXTENSION_EMPTY.iter().cloned());
    deque_par.par_extend(DEQUE_EXTENSION_EMPTY.par_iter().cloned());

    assert_eq3!(deque_seq, deque_par, expected);
}

#[test]
fn deque_seq_par_equivalence_existing_extend() {
    let expected = DEQUE.clone();
    let mut deque_seq = DEQUE_EXISTING.clone();
    let mut deque_par = DEQUE_EXISTING.clone();

    deque_seq.extend(DEQUE_EXTENSION.iter().cloned());
    deque_par.par_extend(DEQUE_EXTENSION.par_iter().cloned());

    assert_eq3!(deque_seq, deque_par, expected);
}

#[test]
fn deque_par_extend_by_ref() {
    let mut deque = DEQUE_EXISTING.clone();
    deque.par_extend(DEQUE_EXTENSION.par_iter());
    assert_eq!(deque, *DEQUE);
}
