use blockdeque::Deque;

fn filled(n: usize) -> Deque<usize, 4> {
    (0..n).collect()
}

#[test]
fn step_both_ways() {
    let d = filled(10);
    let mut c = d.cursor_front();
    for i in 0..10 {
        assert_eq!(c.get(), Some(&i));
        assert_eq!(c.index(), i);
        c.move_next();
    }
    assert!(c.is_end());
    assert_eq!(c.get(), None);
    for i in (0..10).rev() {
        c.move_prev();
        assert_eq!(c.get(), Some(&i));
    }
    assert_eq!(c, d.cursor_front());
}

#[test]
fn jump_by_offsets() {
    let d = filled(100);
    let mut c = d.cursor_front();
    c += 37;
    assert_eq!(c.get(), Some(&37));
    c -= 30;
    assert_eq!(c.get(), Some(&7));
    assert_eq!((c + 93).get(), None);
    assert!((c + 93).is_end());
    assert_eq!((d.cursor_end() - 1).get(), Some(&99));
    assert_eq!(d.cursor_at(50).get(), Some(&50));
}

#[test]
fn distance() {
    let d = filled(23);
    let front = d.cursor_front();
    let end = d.cursor_end();
    assert_eq!(end - front, 23);
    assert_eq!(front - end, -23);
    assert_eq!(d.cursor_at(17) - d.cursor_at(5), 12);
    assert_eq!(front - d.cursor_front(), 0);
}

#[test]
fn ordering() {
    let d = filled(8);
    let a = d.cursor_at(2);
    let b = d.cursor_at(6);
    assert!(a < b);
    assert!(b > a);
    assert!(a <= d.cursor_at(2));
    assert!(d.cursor_front() < d.cursor_end());
    assert_eq!(a + 4, b);
    assert_ne!(a, b);
}

#[test]
fn cursors_of_different_deques() {
    let d1 = filled(5);
    let d2 = filled(5);
    let a = d1.cursor_at(2);
    let b = d2.cursor_at(2);
    assert_ne!(a, b);
    assert_eq!(a.partial_cmp(&b), None);
    assert!(!(a < b) && !(a > b));
    // same contents, still different deques
    assert_eq!(a.get(), b.get());
}

#[test]
fn empty_deque_front_is_end() {
    let d: Deque<u8> = Deque::new();
    assert_eq!(d.cursor_front(), d.cursor_end());
    assert!(d.cursor_front().is_end());
    assert_eq!(d.cursor_end() - d.cursor_front(), 0);
}

#[test]
fn copies_are_independent() {
    let d = filled(3);
    let a = d.cursor_front();
    let mut b = a;
    b.move_next();
    assert_eq!(a.get(), Some(&0));
    assert_eq!(b.get(), Some(&1));
    assert_eq!(b.deque().len(), 3);
}

#[test]
#[should_panic]
fn past_the_end_panics() {
    let d = filled(3);
    let mut c = d.cursor_end();
    c.move_next();
}

#[test]
#[should_panic]
fn before_the_front_panics() {
    let d = filled(3);
    let _ = d.cursor_front() - 1;
}

#[test]
#[should_panic]
fn cursor_at_past_len_panics() {
    let d = filled(3);
    d.cursor_at(4);
}

#[test]
#[should_panic]
fn distance_across_deques_panics() {
    let d1 = filled(3);
    let d2 = filled(3);
    let _ = d1.cursor_end() - d2.cursor_front();
}

#[test]
fn write_through_cursor() {
    let mut d = filled(10);
    let mut c = d.cursor_front_mut();
    while let Some(v) = c.get_mut() {
        *v *= 2;
        c.move_next();
    }
    assert!(c.is_end());
    assert!(d.iter().copied().eq((0..10).map(|v| v * 2)));
}

#[test]
fn insert_points_at_new_element() {
    let mut d = filled(10);
    let mut c = d.cursor_at_mut(4);
    c.insert(100);
    assert_eq!(c.get(), Some(&100));
    assert_eq!(c.index(), 4);
    c.move_next();
    assert_eq!(c.get(), Some(&4));

    let mut end = d.cursor_end_mut();
    end.insert(200);
    assert_eq!(end.get(), Some(&200));

    let mut front = d.cursor_front_mut();
    front.insert(300);
    assert_eq!(front.get(), Some(&300));

    assert_eq!(d, [300, 0, 1, 2, 3, 100, 4, 5, 6, 7, 8, 9, 200]);
}

#[test]
fn insert_then_remove_restores() {
    for at in 0..=20 {
        let mut d = filled(20);
        let mut c = d.cursor_at_mut(at);
        c.insert(1000);
        assert_eq!(c.remove_current(), Some(1000));
        assert_eq!(c.index(), at);
        assert_eq!(d, filled(20));
    }
}

#[test]
fn remove_everything_from_the_front() {
    let mut d: Deque<usize> = Deque::new();
    for i in 0..8888 {
        d.push_front(i);
    }
    let mut c = d.cursor_front_mut();
    let mut expected = 8888;
    while let Some(v) = c.remove_current() {
        expected -= 1;
        assert_eq!(v, expected);
    }
    assert_eq!(expected, 0);
    assert!(c.is_end());
    assert!(d.is_empty());
}

#[test]
fn remove_every_other() {
    let mut d = filled(50);
    let mut c = d.cursor_front_mut();
    while !c.is_end() {
        c.remove_current();
        if !c.is_end() {
            c.move_next();
        }
    }
    assert!(d.iter().copied().eq((1..50).step_by(2)));
}

#[test]
fn remove_at_end_is_noop() {
    let mut d = filled(4);
    let mut c = d.cursor_end_mut();
    assert_eq!(c.remove_current(), None);
    assert!(c.is_end());
    assert_eq!(d.len(), 4);
}

#[test]
fn mutable_cursor_views() {
    let mut d = filled(6);
    let mut c = d.cursor_at_mut(3);
    assert_eq!(c.as_cursor().get(), Some(&3));
    assert_eq!(c.as_cursor() - c.deque().cursor_front(), 3);
    c += 2;
    c -= 1;
    assert_eq!(c.get(), Some(&4));
    *c.into_mut().unwrap() = 40;
    assert_eq!(d[4], 40);
}
