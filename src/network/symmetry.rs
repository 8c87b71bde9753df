// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mirror symmetry of networks and patterns.
//!
//! A symmetric network is invariant under simultaneously reversing the wire
//! order and complementing every bit. The search exploits this two ways: the
//! evolving core only stores one representative per mirror class and is
//! expanded before testing, and for even wire counts the test bank drops
//! every pattern whose mirror is a smaller representative.

use crate::network::constants::{Channel, SortWord};
use crate::network::pair::{Network, Pair};

/// Mirror image of a comparator on an `n`-wire network.
#[inline]
pub fn mirror(p: Pair, n: usize) -> Pair {
    Pair::new((n - 1) as Channel - p.hi, (n - 1) as Channel - p.lo)
}

/// A pair whose mirror coincides with itself.
#[inline]
pub fn is_self_mirror(p: Pair, n: usize) -> bool {
    p.lo as usize + p.hi as usize == n - 1
}

/// Interleave each pair with its mirror image, skipping self-mirror pairs.
///
/// For odd `n` the mirror of a pair touching the middle wire lands in a
/// neighbouring layer, which is why symmetry is only exploited for even `n`;
/// the expansion itself is well-defined for any `n`.
pub fn symmetric_expansion(n: usize, input: &[Pair]) -> Network {
    let mut out = Network::with_capacity(2 * input.len());
    for &p in input {
        out.push(p);
        if !is_self_mirror(p, n) {
            out.push(mirror(p, n));
        }
    }
    out
}

/// Whether the reverse of the complement of `w` (within `n` bits) sorts
/// strictly below `w`.
///
/// A symmetric network that sorts a pattern also sorts the reverse of its
/// complement, so the larger of the two is redundant as a test vector.
pub fn has_smaller_mirror(w: SortWord, n: usize) -> bool {
    let mut rw: SortWord = 0;
    let mut tmp = w;
    for _ in 0..n {
        rw = (rw << 1) | (!tmp & 1);
        tmp >>= 1;
    }
    w > rw
}
