// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

// Each test binary compiles its own copy; none of them uses every helper.
#![allow(dead_code)]

use sorter_search::bank::is_sorted;
use sorter_search::network::constants::SortWord;
use sorter_search::network::pair::Pair;

/// Apply a comparator network to a single binary pattern.
pub fn apply_to_word(nw: &[Pair], w: SortWord) -> SortWord {
    let mut v = w;
    for p in nw {
        // Only the forbidden "lo=1, hi=0" state changes; it flips to "01".
        if v & p.mask() == (1 as SortWord) << p.lo {
            v ^= p.mask();
        }
    }
    v
}

/// Every distinct output the network can produce over all 2^n binary inputs,
/// sorted ascending.
pub fn reachable_patterns(n: usize, nw: &[Pair]) -> Vec<SortWord> {
    let mut out: Vec<SortWord> = (0..(1 as SortWord) << n)
        .map(|w| apply_to_word(nw, w))
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Brute-force zero-one check: does the network sort every binary input?
pub fn sorts_all_binary_inputs(n: usize, nw: &[Pair]) -> bool {
    (0..(1 as SortWord) << n).all(|w| is_sorted(apply_to_word(nw, w), n))
}

/// A random network over `n` wires, for property-style tests.
pub fn random_network<R: rand::Rng>(n: usize, len: usize, rng: &mut R) -> Vec<Pair> {
    (0..len)
        .map(|_| {
            let a = rng.gen_range(0..n as u8);
            let b = loop {
                let b = rng.gen_range(0..n as u8);
                if b != a {
                    break b;
                }
            };
            Pair::new(a.min(b), a.max(b))
        })
        .collect()
}
