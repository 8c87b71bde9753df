// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Greedy prefix construction end to end: prefixes must shrink the surviving
//! pattern set and respect symmetry.

mod common;

use common::reachable_patterns;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sorter_search::network::pair::Network;
use sorter_search::network::symmetry::mirror;
use sorter_search::prefix::{extend_greedy, prefix_outputs};

#[test]
fn test_symmetric_greedy_prefix_on_six_wires() {
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut prefix = Network::new();
    let span = extend_greedy(6, 12, true, &mut prefix, &mut rng);

    // Symmetric rounds add mirror pairs together, and no canonical pick for
    // n=6 is self-mirror after the first improvement rounds; the result
    // stays mirror-closed and even-sized.
    assert_eq!(prefix.len() % 2, 0, "prefix {:?}", prefix);
    for &p in &prefix {
        assert!(prefix.contains(&mirror(p, 6)));
    }

    // The bank fed from this prefix is strictly smaller than the unfiltered
    // 2^6 - 7 unsorted patterns.
    assert!(span < 57, "span {}", span);
    assert_eq!(prefix_outputs(6, &prefix).len(), span as usize);
}

#[test]
fn test_greedy_prefix_agrees_with_brute_force() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut prefix = Network::new();
    let span = extend_greedy(7, 10, false, &mut prefix, &mut rng);
    assert_eq!(reachable_patterns(7, &prefix).len(), span as usize);
}

#[test]
fn test_greedy_never_worsens_with_larger_target() {
    let mut counts = Vec::new();
    for target in [0usize, 4, 8, 12] {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut prefix = Network::new();
        let span = extend_greedy(6, target, false, &mut prefix, &mut rng);
        assert!(prefix.len() <= target);
        counts.push(span);
    }
    assert!(counts.windows(2).all(|w| w[1] <= w[0]), "counts {:?}", counts);
}
