// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Prefix processing: reachable outputs of a partial network, and the greedy
//! prefix builder.
//!
//! The builder grows a prefix by repeatedly appending the comparator that
//! most shrinks the reachable-pattern count reported by the cluster engine.
//! A good prefix collapses the test space from `2^n` patterns to something a
//! bit-parallel oracle can sweep in a handful of words.

use crate::cluster::ClusterSet;
use crate::network::constants::SortWord;
use crate::network::pair::{comparator_alphabet, Network, Pair};
use crate::network::symmetry::{is_self_mirror, mirror};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// All patterns the prefix can leave on the wires.
///
/// `2^n` patterns for an empty prefix, `n + 1` if the prefix happens to be a
/// complete sorter. The prefix comparators are replayed in dependency-safe
/// sweeps: within each sweep, a comparator is applied early only when it is
/// already intra-cluster and no earlier pending comparator touched its wires;
/// everything else waits for the next sweep. Postponing the merges this way
/// keeps intermediate pattern lists small.
pub fn prefix_outputs(n: usize, prefix: &[Pair]) -> Vec<SortWord> {
    let mut cs = ClusterSet::new(n);
    let mut todo: Network = prefix.to_vec();

    while !todo.is_empty() {
        cs.ingest(todo[0]);

        let mut postponed = Network::new();
        let mut visited: SortWord = 0;
        for &el in &todo[1..] {
            if visited & el.mask() == 0 && cs.is_same_cluster(el) {
                cs.ingest(el);
            } else {
                postponed.push(el);
            }
            visited |= el.mask();
        }
        todo = postponed;
    }

    let mut patterns = Vec::new();
    cs.enumerate_outputs(&mut patterns);
    patterns
}

/// Greedily extend `prefix` towards `target` comparators, appending at each
/// round the alphabet comparator (plus its mirror, when symmetric) that most
/// reduces the reachable-pattern count. Stops early when no comparator gives
/// a strict improvement. Returns the final reachable-pattern count.
///
/// Candidates are scanned in a freshly shuffled order each round so that ties
/// do not always resolve to the same comparator.
pub fn extend_greedy<R: Rng>(
    n: usize,
    target: usize,
    symmetric: bool,
    prefix: &mut Network,
    rng: &mut R,
) -> SortWord {
    debug!(
        initial = prefix.len(),
        target, symmetric, "building greedy prefix"
    );

    let alphabet = comparator_alphabet(n, symmetric);
    let mut cs = ClusterSet::new(n);
    for &p in prefix.iter() {
        cs.ingest(p);
    }
    let mut current = cs.output_count();

    // A symmetric round may append two comparators, so leave room for both.
    let limit = if symmetric {
        target.saturating_sub(1)
    } else {
        target
    };

    while prefix.len() < limit {
        let mut shuffled = alphabet.clone();
        shuffled.shuffle(rng);

        let mut best: Option<(Pair, ClusterSet, SortWord)> = None;
        for &candidate in &shuffled {
            let mut trial = cs.clone();
            trial.ingest(candidate);
            if symmetric && !is_self_mirror(candidate, n) {
                trial.ingest(mirror(candidate, n));
            }
            let size = trial.output_count();
            let best_so_far = best.as_ref().map_or(current, |(_, _, s)| *s);
            if size < best_so_far {
                best = Some((candidate, trial, size));
            }
        }

        let Some((chosen, chosen_cs, size)) = best else {
            debug!("greedy prefix: no further improvement");
            break;
        };
        cs = chosen_cs;
        debug!(lo = chosen.lo, hi = chosen.hi, outputs = size, "greedy prefix: adding pair");
        prefix.push(chosen);
        if symmetric && !is_self_mirror(chosen, n) {
            prefix.push(mirror(chosen, n));
        }
        current = size;
    }

    current
}
