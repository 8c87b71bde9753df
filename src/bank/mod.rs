// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Bit-parallel test bank and acceptance oracle.
//!
//! The zero-one principle reduces "does this network sort?" to checking every
//! binary test pattern the prefix can produce. The bank packs those patterns
//! PARWORDSIZE at a time: a group of `n` words holds up to 64 patterns, word
//! k carrying bit k (wire k) of each. One pass of the comparator truth table
//!
//! ```text
//! 00 -> 00    01 -> 01    10 -> 01    11 -> 11
//! ```
//!
//! is `lo &= hi; hi |= old_lo` on whole words, sorting all packed instances
//! at once. A candidate is a sorter iff no packed instance ends with a 1
//! followed by a 0 on a higher wire.
//!
//! On each rejection the steady-state oracle nudges the failing test towards
//! the front of the bank, so future non-sorters tend to be rejected by the
//! first group. The reordering never changes the multiset of tests; accepting
//! a network still requires every group to pass.

use crate::network::constants::{wire_mask, BPWord, SortWord, NMAX, PARWORDSIZE};
use crate::network::pair::Pair;
use crate::network::symmetry::has_smaller_mirror;
use tracing::debug;

/// A pattern already of the sorted shape 1…10…0 cannot exercise any
/// comparator and is useless as a test vector.
#[inline]
pub fn is_sorted(w: SortWord, n: usize) -> bool {
    let unsorted_bits = !w & wire_mask(n);
    unsorted_bits & unsorted_bits.wrapping_add(1) == 0
}

/// Packed test patterns for one prefix, in bit-parallel layout.
#[derive(Debug, Clone)]
pub struct TestBank {
    ninputs: usize,
    /// `groups() * ninputs` words; within a group, word k is wire k.
    words: Vec<BPWord>,
    /// Number of packed test patterns. Unused bit columns of the final group
    /// read as the all-zero pattern, which is sorted and so never fails.
    ntests: usize,
}

impl TestBank {
    /// Pack the given patterns, dropping already-sorted ones and, for
    /// symmetric even-width networks, every pattern dominated by its mirror.
    pub fn from_patterns(n: usize, patterns: &[SortWord], symmetric: bool) -> Self {
        let mirror_filter = symmetric && n % 2 == 0;

        let mut words = Vec::new();
        let mut buffer = [0 as BPWord; NMAX];
        let mut level = 0usize;
        let mut ntests = 0usize;

        for &pattern in patterns {
            if mirror_filter && has_smaller_mirror(pattern, n) {
                continue;
            }
            if is_sorted(pattern, n) {
                continue;
            }

            let mut w = pattern;
            for accum in buffer.iter_mut().take(n) {
                *accum = (*accum << 1) | (w & 1);
                w >>= 1;
            }
            level += 1;
            ntests += 1;

            if level == PARWORDSIZE {
                words.extend_from_slice(&buffer[..n]);
                buffer[..n].fill(0);
                level = 0;
            }
        }
        if level > 0 {
            words.extend_from_slice(&buffer[..n]);
        }

        debug!(
            singles = patterns.len(),
            packed = ntests,
            groups = words.len() / n.max(1),
            symmetric,
            "test bank packed"
        );

        Self {
            ninputs: n,
            words,
            ntests,
        }
    }

    pub fn ninputs(&self) -> usize {
        self.ninputs
    }

    /// Number of packed test patterns (after filtering).
    pub fn len(&self) -> usize {
        self.ntests
    }

    pub fn is_empty(&self) -> bool {
        self.ntests == 0
    }

    /// Number of bit-parallel groups.
    pub fn groups(&self) -> usize {
        if self.ninputs == 0 {
            0
        } else {
            self.words.len() / self.ninputs
        }
    }

    /// Unpack the test pattern at a global bit index (`group * PARWORDSIZE +
    /// bit`). Padding columns unpack as the all-zero pattern.
    pub fn test_pattern(&self, index: usize) -> SortWord {
        let group = index / PARWORDSIZE;
        let bit = index % PARWORDSIZE;
        let base = group * self.ninputs;
        let mut w: SortWord = 0;
        for k in 0..self.ninputs {
            w |= ((self.words[base + k] >> bit) & 1) << k;
        }
        w
    }

    /// Unpack every bit column of every group, padding included.
    pub fn all_columns(&self) -> Vec<SortWord> {
        (0..self.groups() * PARWORDSIZE)
            .map(|i| self.test_pattern(i))
            .collect()
    }

    /// Steady-state acceptance test. On failure, the failing test is bumped
    /// towards the front of the bank before returning.
    pub fn check(&mut self, nw: &[Pair]) -> bool {
        let n = self.ninputs;
        let mut idx = 0;
        let mut base = 0;
        while idx < self.words.len() {
            let mut data = [0 as BPWord; NMAX];
            data[..n].copy_from_slice(&self.words[idx..idx + n]);
            apply_bit_parallel(&mut data[..n], nw);

            let accum = descent_mask(&data[..n]);
            if accum != 0 {
                let failvector = base + accum.trailing_zeros() as usize;
                self.bump_test(failvector);
                return false;
            }
            idx += n;
            base += PARWORDSIZE;
        }
        true
    }

    /// Initial-phase acceptance test: on failure, reconstruct and return one
    /// failing output pattern so the caller can pick a comparator that fixes
    /// one of its inversions. Returns `None` when the network sorts.
    pub fn first_failing_output(&self, nw: &[Pair]) -> Option<SortWord> {
        let n = self.ninputs;
        let mut idx = 0;
        while idx < self.words.len() {
            let mut data = [0 as BPWord; NMAX];
            data[..n].copy_from_slice(&self.words[idx..idx + n]);
            apply_bit_parallel(&mut data[..n], nw);

            let accum = descent_mask(&data[..n]);
            if accum != 0 {
                let shift = accum.trailing_zeros();
                let mut pattern: SortWord = 0;
                for (k, word) in data[..n].iter().enumerate() {
                    pattern |= ((word >> shift) & 1) << k;
                }
                return Some(pattern);
            }
            idx += n;
        }
        None
    }

    /// Move the failing test closer to the front so the next non-sorter is
    /// rejected sooner.
    ///
    /// Tests in the first group compete in a ladder tournament for bit 0;
    /// a failure in the second group swaps into the first group's last bit
    /// position; a failure in a later group moves its whole group roughly an
    /// eighth of the distance to the front.
    fn bump_test(&mut self, failvector: usize) {
        let n = self.ninputs;
        let group = failvector / PARWORDSIZE;
        let idx = n * group;

        if group > 1 {
            let delta = n * group.div_ceil(8);
            for k in 0..n {
                self.words.swap(idx + k - delta, idx + k);
            }
        } else if group == 1 {
            let bit = failvector % PARWORDSIZE;
            let m0: BPWord = 1 << (PARWORDSIZE - 1);
            let m1: BPWord = 1 << bit;
            let shift = (PARWORDSIZE - 1) - bit;
            for k in 0..n {
                let old0 = self.words[k];
                let old1 = self.words[k + n];
                self.words[k] = (old0 & !m0) | ((old1 & m1) << shift);
                self.words[k + n] = (old1 & !m1) | ((old0 & m0) >> shift);
            }
        } else if failvector > 0 {
            let m0: BPWord = 1 << (failvector - 1);
            let m1: BPWord = 1 << failvector;
            for k in 0..n {
                let old = self.words[k];
                self.words[k] = (old & !m0 & !m1) | ((old & m1) >> 1) | ((old & m0) << 1);
            }
        }
    }
}

/// Run the packed patterns through the network.
#[inline]
fn apply_bit_parallel(data: &mut [BPWord], nw: &[Pair]) {
    for p in nw {
        let i = p.lo as usize;
        let j = p.hi as usize;
        let iold = data[i];
        data[i] &= data[j];
        data[j] |= iold;
    }
}

/// Bit b is set iff packed instance b has a 1 -> 0 descent somewhere.
#[inline]
fn descent_mask(data: &[BPWord]) -> BPWord {
    let mut accum: BPWord = 0;
    for k in 0..data.len() - 1 {
        accum |= data[k] & !data[k + 1];
    }
    accum
}
