// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The six mutation kinds of the evolution loop.
//!
//! Each kind is designed to preserve enough structure that a useful fraction
//! of mutated candidates remain valid sorters. An attempt may be rejected
//! before touching the network (for example, swapping two comparators whose
//! order cannot matter); rejected attempts do not count as mutations.

use crate::network::pair::{Network, Pair};
use rand::Rng;
use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

/// Mutation kinds, in config-weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCountMacro)]
#[repr(u8)]
pub enum MutationKind {
    /// Delete a random comparator.
    RemovePair,
    /// Swap two order-dependent comparators.
    SwapPairs,
    /// Replace a comparator by a random alphabet pick.
    ReplacePair,
    /// Re-pair the endpoints of two wire-disjoint comparators.
    CrossPairs,
    /// Swap a comparator with the next one sharing a wire.
    SwapIntersectingPairs,
    /// Replace a comparator keeping exactly one endpoint.
    ReplaceHalfPair,
}

/// Expand per-kind weights into a flat selector: each kind appears with
/// multiplicity equal to its weight, so a uniform index pick realises the
/// weighted distribution without per-call arithmetic.
pub fn build_selector(weights: &[u64; MutationKind::COUNT]) -> Vec<MutationKind> {
    const KINDS: [MutationKind; MutationKind::COUNT] = [
        MutationKind::RemovePair,
        MutationKind::SwapPairs,
        MutationKind::ReplacePair,
        MutationKind::CrossPairs,
        MutationKind::SwapIntersectingPairs,
        MutationKind::ReplaceHalfPair,
    ];
    let mut selector = Vec::new();
    for (kind, &weight) in KINDS.iter().zip(weights) {
        for _ in 0..weight {
            selector.push(*kind);
        }
    }
    selector
}

/// Attempt a single mutation on `pairs`. Returns the kind actually applied,
/// or `None` when the sampled kind rejected this attempt.
pub fn attempt_mutation<R: Rng>(
    pairs: &mut Network,
    alphabet: &[Pair],
    selector: &[MutationKind],
    rng: &mut R,
) -> Option<MutationKind> {
    let kind = selector[rng.gen_range(0..selector.len())];
    let len = pairs.len();

    match kind {
        MutationKind::RemovePair => {
            if len > 0 {
                pairs.remove(rng.gen_range(0..len));
                return Some(kind);
            }
        }

        MutationKind::SwapPairs => {
            if len > 1 {
                let mut a = rng.gen_range(0..len);
                let mut b = rng.gen_range(0..len);
                if a > b {
                    std::mem::swap(&mut a, &mut b);
                }
                if pairs[a] != pairs[b] {
                    // The swap only matters if the pairs intersect, or some
                    // pair between them touches a wire of either; otherwise
                    // the two run in parallel and the swap is invisible.
                    let dependent = pairs[a].shares_wire(&pairs[b])
                        || pairs[a + 1..b]
                            .iter()
                            .any(|c| c.shares_wire(&pairs[a]) || c.shares_wire(&pairs[b]));
                    if dependent {
                        pairs.swap(a, b);
                        return Some(kind);
                    }
                }
            }
        }

        MutationKind::ReplacePair => {
            if len > 0 {
                let a = rng.gen_range(0..len);
                let p = alphabet[rng.gen_range(0..alphabet.len())];
                if pairs[a] != p {
                    pairs[a] = p;
                    return Some(kind);
                }
            }
        }

        MutationKind::CrossPairs => {
            if len > 1 {
                let a = rng.gen_range(0..len);
                let b = rng.gen_range(0..len);
                let (pa, pb) = (pairs[a], pairs[b]);
                if !pa.shares_wire(&pb) {
                    let (x, y) = if rng.gen::<bool>() {
                        (pb.hi, pb.lo)
                    } else {
                        (pb.lo, pb.hi)
                    };
                    pairs[a] = Pair::new(pa.lo.min(x), pa.lo.max(x));
                    pairs[b] = Pair::new(pa.hi.min(y), pa.hi.max(y));
                    return Some(kind);
                }
            }
        }

        MutationKind::SwapIntersectingPairs => {
            if len > 1 {
                let a = rng.gen_range(0..len);
                for b in a + 1..len {
                    if pairs[b].shares_wire(&pairs[a]) {
                        if pairs[a] != pairs[b] {
                            pairs.swap(a, b);
                            return Some(kind);
                        }
                        break;
                    }
                }
            }
        }

        MutationKind::ReplaceHalfPair => {
            if len > 0 {
                let a = rng.gen_range(0..len);
                let p = pairs[a];
                let q = loop {
                    let q = alphabet[rng.gen_range(0..alphabet.len())];
                    if q.shares_wire(&p) {
                        break q;
                    }
                };
                if q != p {
                    pairs[a] = q;
                    return Some(kind);
                }
            }
        }
    }

    None
}
