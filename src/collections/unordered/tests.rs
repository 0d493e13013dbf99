#![cfg(test)]

use std::iter;

use super::*;
use crate::util::alloc::CountedDrop;
use crate::util::panic::assert_panics;

#[test]
fn test_take_leaves_source_empty() {
    let mut arr: UnorderedArray<i32, 2> = [1, 2].into_iter().collect();
    let moved = arr.take();
    assert_eq!(arr.len(), 0, "The source should be empty after taking.");
    assert_eq!(moved.len(), 2);
    assert_eq!(moved, [1, 2]);
}

#[test]
fn test_remove_swaps_in_last() {
    let mut arr: UnorderedArray<_, 6> = (0..6).collect();

    assert_eq!(arr.remove(1), 1);
    assert_eq!(arr, [0, 5, 2, 3, 4], "Only the removed slot should change.");

    assert_eq!(arr.remove(4), 4, "Removing the last slot shouldn't move anything.");
    assert_eq!(arr, [0, 5, 2, 3]);

    assert_panics!({
        let mut arr = arr.clone();
        arr.remove(4);
    });
}

#[test]
fn test_capacity_contracts() {
    assert_panics!({
        let mut arr = UnorderedArray::<u8, 1>::new();
        arr.push(1);
        arr.push(2);
    });
    assert_panics!({
        let mut arr = UnorderedArray::<u8, 1>::new();
        arr.pop();
    });

    let mut arr = UnorderedArray::<u8, 1>::new();
    assert_eq!(arr.try_pop(), None);
    assert_eq!(arr.try_push(3), Ok(()));
    assert_eq!(arr.try_push(4), Err(4));
    assert_eq!(arr.pop(), 3);
}

#[test]
fn test_len_and_slices() {
    let mut arr = UnorderedArray::<u16, 3>::new();
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), 3);

    arr.push(10);
    arr.push(20);
    assert_eq!((arr.len(), arr.is_full()), (2, false));
    arr.as_mut_slice()[0] += 1;
    assert_eq!(arr.as_slice(), [11, 20]);

    arr.push(30);
    assert!(arr.is_full());
    arr.remove(0);
    assert_eq!(arr.as_slice(), [30, 20]);
}

#[test]
fn test_predicates() {
    let mut arr: UnorderedArray<_, 10> = (0..10).collect();

    assert_eq!(arr.erase_if(|n| n % 3 == 0), 4);
    let mut remaining = arr.as_slice().to_vec();
    remaining.sort();
    assert_eq!(remaining, [1, 2, 4, 5, 7, 8]);

    assert_eq!(arr.erase_first_if(|&n| n > 4), Some(8));
    assert_eq!(arr.erase_first_if(|&n| n > 100), None);
    assert_eq!(arr.len(), 5);

    arr.apply(|n| *n *= 10);
    assert!(arr.iter().all(|n| n % 10 == 0));

    assert_eq!(arr.apply_if(|&n| n >= 40, |n| *n += 1), 3);
    assert!(arr.apply_first_if(|&n| n == 10, |n| *n = 0));
    assert!(!arr.apply_first_if(|&n| n == 10, |n| *n = 0));

    let mut remaining = arr.as_slice().to_vec();
    remaining.sort();
    assert_eq!(remaining, [0, 20, 41, 51, 71]);
}

#[test]
fn test_drop() {
    let counter = CountedDrop::new();
    let mut arr: UnorderedArray<_, 8> = iter::repeat_with(|| counter.clone()).take(8).collect();

    drop(arr.remove(0));
    assert_eq!(counter.drops(), 1);

    let mut flip = false;
    let erased = arr.erase_if(|_| {
        flip = !flip;
        flip
    });
    assert_eq!(counter.drops(), 1 + erased, "Erased elements should be dropped.");

    let left = arr.len();
    arr.clear();
    assert_eq!(counter.drops(), 1 + erased + left);

    arr.push_with(|| counter.clone());
    let mut iter = arr.into_iter();
    drop(iter.next());
    assert_eq!(counter.drops(), 8 + 1);
}

#[test]
fn test_clone_and_eq() {
    let arr: UnorderedArray<String, 3> = ["a", "b"].into_iter().map(String::from).collect();
    let cloned = arr.clone();
    assert_eq!(arr, cloned);
    assert_eq!(format!("{arr:?}"), r#"UnorderedArray { contents: ["a", "b"], len: 2, cap: 3 }"#);
}
