// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Compile-time constants for the sorting-network data model.
//!
//! The implementation commits to a fixed upper bound on the number of wires
//! (NMAX) and a fixed bit-parallel word size (PARWORDSIZE). Both are 64, which
//! lets a single `u64` carry one binary test pattern (one bit per wire) and a
//! second `u64` carry one bit-column of 64 independent test patterns.
//!
//! Raising NMAX beyond 64 would require a multi-word pattern type; the cluster
//! pattern lists dominate memory well before that point, so 64 is the
//! practical ceiling as well as the convenient one.

/// Maximum number of wires a network may have. `Ninputs` is validated against
/// this bound at configuration time.
pub const NMAX: usize = 64;

/// Number of independent test patterns evaluated per bit-parallel word.
pub const PARWORDSIZE: usize = 64;

/// A single binary pattern; bit k holds the value on wire k.
pub type SortWord = u64;

/// A bit-parallel word; bit b belongs to the b-th packed test instance.
pub type BPWord = u64;

/// Wire index. Configuration files may name wires up to 255; anything outside
/// `[0, Ninputs)` is filtered before use.
pub type Channel = u8;

/// A SortWord must be able to hold one bit per wire.
const _: () = assert!(SortWord::BITS as usize >= NMAX, "SortWord too narrow for NMAX");

/// A BPWord carries exactly PARWORDSIZE test instances.
const _: () = assert!(BPWord::BITS as usize == PARWORDSIZE, "BPWord width must equal PARWORDSIZE");

/// Mask with the lowest `n` bits set.
///
/// # Panics
///
/// Panics if `n` is zero or exceeds the SortWord width.
#[inline]
pub fn wire_mask(n: usize) -> SortWord {
    assert!(n >= 1 && n <= NMAX, "wire count out of range: {}", n);
    SortWord::MAX >> (SortWord::BITS as usize - n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_mask() {
        assert_eq!(wire_mask(1), 0b1);
        assert_eq!(wire_mask(4), 0b1111);
        assert_eq!(wire_mask(64), u64::MAX);
    }

    #[test]
    #[should_panic(expected = "wire count out of range")]
    fn test_wire_mask_out_of_range() {
        wire_mask(NMAX + 1);
    }
}
