// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Linear-time image of a sorted pattern list under one comparator.

use crate::network::constants::SortWord;
use crate::network::pair::Pair;

/// Replace a sorted, deduplicated pattern list by its image under `pair`.
///
/// A comparator only changes patterns whose `{lo, hi}` bits are exactly
/// "lo set, hi clear"; their image flips both bits (an xor with the pair
/// mask). Because all affected patterns agree on those two bits, xor-ing
/// preserves their relative order, so the result is a merge of two already
/// sorted streams: the unchanged patterns and the flipped ones. The merge
/// suppresses duplicates (a flipped pattern may collide with an unchanged
/// one), keeping the output sorted and deduplicated in O(len).
pub(crate) fn apply_comparator_sorted(patterns: &mut Vec<SortWord>, pair: Pair) {
    let swapped_bits: SortWord = (1 as SortWord) << pair.lo;
    let mask = swapped_bits | ((1 as SortWord) << pair.hi);

    let len = patterns.len();
    let next_flipped = |mut i: usize| {
        while i < len && patterns[i] & mask != swapped_bits {
            i += 1;
        }
        i
    };
    let next_unchanged = |mut i: usize| {
        while i < len && patterns[i] & mask == swapped_bits {
            i += 1;
        }
        i
    };

    let mut out = Vec::with_capacity(len);
    let push = |out: &mut Vec<SortWord>, w: SortWord| {
        if out.last() != Some(&w) {
            out.push(w);
        }
    };

    let mut fi = next_flipped(0);
    let mut ui = next_unchanged(0);
    while fi < len && ui < len {
        let a = patterns[fi] ^ mask;
        let b = patterns[ui];
        if a < b {
            push(&mut out, a);
            fi = next_flipped(fi + 1);
        } else {
            push(&mut out, b);
            ui = next_unchanged(ui + 1);
        }
    }
    while ui < len {
        push(&mut out, patterns[ui]);
        ui = next_unchanged(ui + 1);
    }
    while fi < len {
        push(&mut out, patterns[fi] ^ mask);
        fi = next_flipped(fi + 1);
    }

    *patterns = out;
}
