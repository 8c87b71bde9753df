// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Comparator pairs and networks.
//!
//! A comparator connects two wires `(lo, hi)` with `lo < hi` and replaces
//! their values with `(min, max)`. A network is an ordered sequence of
//! comparators, applied left to right.
//!
//! Values read from a configuration file may violate `lo < hi` or name wires
//! outside the network; [`valid_pairs`] filters those out before the pairs
//! reach any other component.

use crate::network::constants::{Channel, SortWord};

/// A single comparator, identified by the two wires it connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    pub lo: Channel,
    pub hi: Channel,
}

impl Pair {
    pub fn new(lo: Channel, hi: Channel) -> Self {
        Self { lo, hi }
    }

    /// Bitmask of the two wires this comparator touches.
    #[inline]
    pub fn mask(&self) -> SortWord {
        ((1 as SortWord) << self.lo) | ((1 as SortWord) << self.hi)
    }

    /// Whether the two comparators touch a common wire.
    #[inline]
    pub fn shares_wire(&self, other: &Pair) -> bool {
        self.lo == other.lo || self.lo == other.hi || self.hi == other.lo || self.hi == other.hi
    }
}

/// An ordered comparator sequence.
pub type Network = Vec<Pair>;

/// Keep only the pairs that name wires inside `[0, n)` in ascending order.
/// Everything else in a configured network is silently dropped.
pub fn valid_pairs(nw: &[Pair], n: usize) -> Network {
    nw.iter()
        .filter(|p| (p.hi as usize) < n && p.lo < p.hi)
        .copied()
        .collect()
}

/// The set of comparators the search may pick from.
///
/// Without symmetry this is every `(i, j)` with `i < j < n`. With symmetry a
/// comparator and its mirror are interchangeable, so only the canonical
/// representative of each mirror class is kept: `(i, j)` survives when its
/// mirror `(n-1-j, n-1-i)` does not sort strictly before it.
pub fn comparator_alphabet(n: usize, symmetric: bool) -> Network {
    let mut alphabet = Network::new();
    for i in 0..n - 1 {
        let jsym = n - 1 - i;
        for j in i + 1..n {
            let isym = n - 1 - j;
            if !symmetric || isym > i || (isym == i && jsym >= j) {
                alphabet.push(Pair::new(i as Channel, j as Channel));
            }
        }
    }
    alphabet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_mask() {
        assert_eq!(Pair::new(0, 1).mask(), 0b11);
        assert_eq!(Pair::new(2, 5).mask(), 0b100100);
    }

    #[test]
    fn test_shares_wire() {
        let p = Pair::new(1, 4);
        assert!(p.shares_wire(&Pair::new(1, 2)));
        assert!(p.shares_wire(&Pair::new(0, 4)));
        assert!(p.shares_wire(&Pair::new(1, 4)));
        assert!(!p.shares_wire(&Pair::new(0, 3)));
    }

    #[test]
    fn test_valid_pairs_filters_bad_entries() {
        let raw = vec![
            Pair::new(0, 1),  // fine
            Pair::new(3, 2),  // reversed
            Pair::new(2, 2),  // degenerate
            Pair::new(1, 7),  // wire out of range for n=4
        ];
        assert_eq!(valid_pairs(&raw, 4), vec![Pair::new(0, 1)]);
    }

    #[test]
    fn test_full_alphabet_size() {
        // n*(n-1)/2 pairs without symmetry.
        for n in 2..=8 {
            assert_eq!(comparator_alphabet(n, false).len(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_symmetric_alphabet_n4() {
        let alphabet = comparator_alphabet(4, true);
        // Mirrors (1,3) of (0,2) and (2,3) of (0,1) are dropped; the two
        // self-mirror pairs (0,3) and (1,2) stay.
        assert_eq!(
            alphabet,
            vec![
                Pair::new(0, 1),
                Pair::new(0, 2),
                Pair::new(0, 3),
                Pair::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_symmetric_alphabet_covers_all_wires() {
        for n in 2..=10 {
            let alphabet = comparator_alphabet(n, true);
            for wire in 0..n as Channel {
                assert!(
                    alphabet.iter().any(|p| p.lo == wire || p.hi == wire),
                    "wire {} missing from symmetric alphabet for n={}",
                    wire,
                    n
                );
            }
        }
    }
}
