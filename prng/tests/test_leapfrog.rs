//! Skip-ahead equivalence tests
//!
//! For every algorithm, `raw_next_skip(k)` from state S must return the
//! value and leave the state that `k` sequential `raw_next()` calls would.

use parallel_prng::{DefaultRandom, GeneratorKind, Mcg1Random, Random};
use proptest::prelude::*;

/// Helper: step `rng` sequentially `k` times, returning the last sample
fn step<R: Random + ?Sized>(rng: &mut R, k: i64) -> i64 {
    let mut last = rng.raw_next();
    for _ in 1..k {
        last = rng.raw_next();
    }
    last
}

const SKIPS: [i64; 9] = [1, 2, 3, 5, 8, 13, 64, 999, 1000];

#[test]
fn test_mcg1_seed_one_skip_five() {
    let mut skipped = Mcg1Random::new(1).unwrap();
    let mut stepped = Mcg1Random::new(1).unwrap();

    let expected = step(&mut stepped, 5);
    assert_eq!(skipped.raw_next_skip(5), expected);
    assert_eq!(skipped, stepped);
}

#[test]
fn test_representative_skips_all_kinds() {
    for kind in GeneratorKind::ALL {
        for &k in &SKIPS {
            let mut skipped = kind.build(424242).unwrap();
            let mut stepped = kind.build(424242).unwrap();

            let expected = step(&mut stepped, k);
            assert_eq!(
                skipped.raw_next_skip(k),
                expected,
                "{} skip {} disagrees with sequential steps",
                kind,
                k
            );
            assert_eq!(skipped.state(), stepped.state());
        }
    }
}

#[test]
fn test_skip_then_continue() {
    // Skip-ahead must leave a state that keeps agreeing afterwards
    let mut skipped = Mcg1Random::new(77).unwrap();
    let mut stepped = Mcg1Random::new(77).unwrap();
    skipped.raw_next_skip(13);
    step(&mut stepped, 13);
    for _ in 0..50 {
        assert_eq!(skipped.raw_next(), stepped.raw_next());
    }
}

#[test]
fn test_skips_compose() {
    for kind in GeneratorKind::ALL {
        let mut once = kind.build(5).unwrap();
        let mut twice = kind.build(5).unwrap();
        let a = once.raw_next_skip(1_000_000_007 + 123_456_789);
        twice.raw_next_skip(1_000_000_007);
        let b = twice.raw_next_skip(123_456_789);
        assert_eq!(a, b);
        assert_eq!(once.state(), twice.state());
    }
}

#[test]
fn test_derived_skip_draws_match_sequential() {
    let mut skipped = DefaultRandom::new(3);
    let mut stepped = DefaultRandom::new(3);

    let d = skipped.next_double_skip(4).unwrap();
    stepped.skip_n(3);
    assert_eq!(d.to_bits(), stepped.next_double().to_bits());

    let b = skipped.next_bool_skip(2).unwrap();
    stepped.skip();
    assert_eq!(b, stepped.next_bool());

    let n = skipped.next_int_skip(100, 6).unwrap();
    stepped.skip_n(5);
    assert_eq!(n, stepped.next_int(100).unwrap());

    let f = skipped.next_float_skip(1).unwrap();
    assert_eq!(f.to_bits(), stepped.next_float().to_bits());
}

#[test]
fn test_mcg1_max_skip_agrees_with_split_skips() {
    let mut whole = Mcg1Random::new(9).unwrap();
    let mut halves = Mcg1Random::new(9).unwrap();
    let a = whole.raw_next_skip(i64::MAX);
    halves.raw_next_skip(i64::MAX / 2);
    let b = halves.raw_next_skip(i64::MAX / 2 + 1);
    assert_eq!(a, b);
}

proptest! {
    #[test]
    fn prop_mcg1_skip_equals_steps(seed in 1i64..i64::MAX, k in 1i64..2_000) {
        let mut skipped = Mcg1Random::new(seed).unwrap();
        let mut stepped = skipped.clone();

        let expected = step(&mut stepped, k);
        prop_assert_eq!(skipped.raw_next_skip(k), expected);
        prop_assert_eq!(skipped.state(), stepped.state());
    }

    #[test]
    fn prop_default_skip_equals_steps(seed in any::<i64>(), k in 1i64..2_000) {
        let mut skipped = DefaultRandom::new(seed);
        let mut stepped = skipped.clone();

        let expected = step(&mut stepped, k);
        prop_assert_eq!(skipped.raw_next_skip(k), expected);
        prop_assert_eq!(skipped.state(), stepped.state());
    }

    #[test]
    fn prop_skip_is_additive(seed in 1i64..i64::MAX, a in 1i64..1 << 40, b in 1i64..1 << 40) {
        for kind in GeneratorKind::ALL {
            let mut once = kind.build(seed).unwrap();
            let mut twice = kind.build(seed).unwrap();
            let x = once.raw_next_skip(a + b);
            twice.raw_next_skip(a);
            prop_assert_eq!(twice.raw_next_skip(b), x);
        }
    }

    #[test]
    fn prop_unit_interval(seed in 1i64..i64::MAX, skip in 1i64..1 << 50) {
        for kind in GeneratorKind::ALL {
            let mut rng = kind.build(seed).unwrap();
            let d = rng.next_double_skip(skip).unwrap();
            prop_assert!((0.0..1.0).contains(&d));
            let f = rng.next_float_skip(skip).unwrap();
            prop_assert!((0.0..1.0).contains(&f));
        }
    }
}
