use rand::{Rng, SeedableRng, XorShiftRng};
use redblack_collections::compare::{Natural, Reverse};
use redblack_collections::error::Error;
use redblack_collections::red_black_tree::{RedBlackMap, RedBlackSet};
use simplelog::{Config, LevelFilter, TestLogger};
use std::collections::{BTreeMap, BTreeSet};

const NUM_OF_OPERATIONS: usize = 100_000;

fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Debug, Config::default());
}

fn max_height(len: usize) -> usize {
    (2.0 * ((len + 1) as f64).log2()).floor() as usize
}

#[test]
fn int_test_red_black_map() {
    init_logger();
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = RedBlackMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 10_000u32);
        let val = rng.gen::<u32>();

        if rng.gen_weighted_bool(3) {
            assert_eq!(map.remove(&key), expected.remove(&key));
        } else {
            assert_eq!(map.insert(key, val), expected.insert(key, val));
        }
    }

    assert_eq!(map.len(), expected.len());
    assert!(map.height() <= max_height(map.len()));
    assert_eq!(map.first_key().ok(), expected.keys().next());
    assert_eq!(map.last_key().ok(), expected.keys().next_back());

    for (key, value) in &expected {
        assert!(map.contains_key(key));
        assert_eq!(map.get(key), Some(value));
    }

    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u32)>>(),
        expected.iter().collect::<Vec<(&u32, &u32)>>(),
    );

    for key in expected.keys().cloned().collect::<Vec<u32>>() {
        assert_eq!(map.remove(&key), expected.remove(&key));
    }
    assert!(map.is_empty());
    assert_eq!(map.first_key(), Err(Error::EmptyStructure));
}

#[test]
fn int_test_red_black_set() {
    init_logger();
    let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RedBlackSet::new();
    let mut expected = BTreeSet::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let value = rng.gen_range(0, 10_000u32);
        if rng.gen::<bool>() {
            assert_eq!(set.insert(value), expected.insert(value));
        } else {
            assert_eq!(set.remove(&value), expected.remove(&value));
        }
        assert_eq!(set.len(), expected.len());
    }

    assert!(set.height() <= max_height(set.len()));
    assert_eq!(set.min().ok(), expected.iter().next());
    assert_eq!(set.max().ok(), expected.iter().next_back());
    assert_eq!(
        set.into_iter().collect::<Vec<u32>>(),
        expected.into_iter().collect::<Vec<u32>>(),
    );
}

#[test]
fn int_test_ascending_insert_is_balanced() {
    let set: RedBlackSet<u32> = (1..=1000).collect();
    assert_eq!(set.len(), 1000);
    assert!(set.height() <= max_height(1000));

    let reversed = RedBlackSet::from_values(Reverse(Natural), 1..=1000u32);
    assert!(reversed.height() <= max_height(1000));
    assert_eq!(reversed.min(), Ok(&1000));
}

#[test]
fn int_test_insertion_order_independence() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([2, 3, 5, 7]);
    let mut values: Vec<u32> = (0..500).collect();
    let sorted: RedBlackSet<u32> = values.iter().cloned().collect();

    for _ in 0..10 {
        rng.shuffle(&mut values);
        let shuffled: RedBlackSet<u32> = values.iter().cloned().collect();
        assert_eq!(shuffled.to_vec(), sorted.to_vec());
    }
}

#[test]
fn int_test_duplicate_insert_is_idempotent() {
    let mut set = RedBlackSet::new();
    for value in &[5, 3, 7, 1, 4] {
        set.insert(*value);
    }
    let before = set.to_vec();
    for value in &[5, 3, 7, 1, 4] {
        assert!(!set.insert(*value));
    }
    assert_eq!(set.to_vec(), before);
    assert_eq!(set.len(), 5);
}

#[test]
fn int_test_drain_by_minimum() {
    let mut rng: XorShiftRng = SeedableRng::from_seed([4, 4, 4, 4]);
    let mut set = RedBlackSet::new();
    let mut expected = BTreeSet::new();
    for _ in 0..5_000 {
        let value = rng.next_u32();
        set.insert(value);
        expected.insert(value);
    }

    while let Ok(&min) = set.min() {
        assert_eq!(Some(&min), expected.iter().next());
        assert!(set.remove(&min));
        expected.remove(&min);
        assert!(set.height() <= max_height(set.len()));
    }
    assert!(expected.is_empty());
}
