// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pattern clusters: the reachable-pattern engine behind prefix processing.
//!
//! The wires of a partial network are grouped into clusters connected by the
//! comparators seen so far. Each cluster carries the sorted list of distinct
//! patterns reachable on its wires; wires in different clusters are still
//! independent, so the full reachable set is the bitwise-OR product over the
//! active clusters' lists, and its size is the product of the list lengths.
//!
//! Ingesting a comparator that spans two clusters merges them (the OR product
//! of their lists becomes one list); an intra-cluster comparator rewrites the
//! cluster's list in place. Clusters only ever merge, never split.
//!
//! A network that fully sorts leaves a single cluster with exactly
//! `n + 1` patterns (the sorted 0…01…1 words); an empty network leaves `n`
//! singleton clusters whose product is `2^n`.

mod swap;

use crate::network::constants::{Channel, SortWord};
use crate::network::pair::Pair;
use swap::apply_comparator_sorted;

/// Partition of the wires into clusters, each with its reachable patterns.
#[derive(Debug, Clone)]
pub struct ClusterSet {
    /// Reachable patterns per cluster slot, sorted ascending, deduplicated.
    /// Slot k starts as wire k's singleton cluster; a merged-away slot holds
    /// an empty list.
    pattern_lists: Vec<Vec<SortWord>>,
    /// Wire mask per cluster slot; 0 marks a merged-away slot.
    masks: Vec<SortWord>,
    /// Owning cluster slot of each wire.
    cluster_of: Vec<Channel>,
    ninputs: usize,
}

impl ClusterSet {
    /// A fresh cluster set with `n` singleton clusters: cluster k can leave
    /// behind the all-zero pattern or a single 1 on wire k.
    ///
    /// # Panics
    ///
    /// Panics if `n` is outside `[1, NMAX]`.
    pub fn new(n: usize) -> Self {
        assert!(n >= 1 && n <= crate::network::constants::NMAX, "wire count out of range: {}", n);
        let mut cs = Self {
            pattern_lists: vec![Vec::new(); n],
            masks: vec![0; n],
            cluster_of: vec![0; n],
            ninputs: n,
        };
        cs.reset();
        cs
    }

    /// Return to the initial singleton-cluster state.
    pub fn reset(&mut self) {
        for k in 0..self.ninputs {
            self.cluster_of[k] = k as Channel;
            self.masks[k] = (1 as SortWord) << k;
            self.pattern_lists[k].clear();
            self.pattern_lists[k].push(0);
            self.pattern_lists[k].push((1 as SortWord) << k);
        }
    }

    pub fn ninputs(&self) -> usize {
        self.ninputs
    }

    /// Append one comparator to the observed network, merging clusters first
    /// if it spans two.
    pub fn ingest(&mut self, p: Pair) {
        let a = self.cluster_of[p.lo as usize] as usize;
        let b = self.cluster_of[p.hi as usize] as usize;
        if a != b {
            self.merge(a, b);
        }
        apply_comparator_sorted(&mut self.pattern_lists[a], p);
    }

    /// Whether both wires of `p` already belong to the same cluster.
    pub fn is_same_cluster(&self, p: Pair) -> bool {
        self.cluster_of[p.lo as usize] == self.cluster_of[p.hi as usize]
    }

    /// Number of patterns [`enumerate_outputs`](Self::enumerate_outputs)
    /// would produce.
    ///
    /// The product is computed with wrapping arithmetic; a wrap to exactly 0
    /// (possible only at extreme sizes) is reported as `SortWord::MAX` so the
    /// value stays a usable "huge but non-empty" quality signal.
    pub fn output_count(&self) -> SortWord {
        let mut prod: SortWord = 1;
        for k in 0..self.ninputs {
            if self.masks[k] != 0 {
                prod = prod.wrapping_mul(self.pattern_lists[k].len() as SortWord);
            }
        }
        if prod == 0 {
            prod = SortWord::MAX;
        }
        prod
    }

    /// Collect every pattern the partial network can leave on its wires, as
    /// the OR of one pattern chosen from each active cluster.
    ///
    /// The result is deduplicated by construction (cluster masks are
    /// disjoint) but in no particular order. Runs a mixed-radix odometer over
    /// the active clusters, extending a running OR from the lower levels.
    pub fn enumerate_outputs(&self, out: &mut Vec<SortWord>) {
        let active: Vec<&Vec<SortWord>> = (0..self.ninputs)
            .filter(|&k| self.masks[k] != 0)
            .map(|k| &self.pattern_lists[k])
            .collect();
        assert!(!active.is_empty(), "cluster set has no active clusters");

        out.clear();
        let levels = active.len();
        let mut indices = vec![0usize; levels];
        let mut acc: Vec<SortWord> = vec![0; levels];
        let mut level = 0usize;

        loop {
            if indices[level] < active[level].len() {
                let contribution = active[level][indices[level]];
                acc[level] = if level == 0 {
                    contribution
                } else {
                    acc[level - 1] | contribution
                };
                indices[level] += 1;
                if level + 1 < levels {
                    level += 1;
                    indices[level] = 0;
                } else {
                    out.push(acc[level]);
                }
            } else if level == 0 {
                break;
            } else {
                level -= 1;
            }
        }
    }

    /// Wire masks of the active clusters, for invariant checks.
    pub fn active_masks(&self) -> Vec<SortWord> {
        self.masks.iter().copied().filter(|&m| m != 0).collect()
    }

    /// Pattern lists of the active clusters, for invariant checks.
    pub fn active_pattern_lists(&self) -> Vec<&[SortWord]> {
        (0..self.ninputs)
            .filter(|&k| self.masks[k] != 0)
            .map(|k| self.pattern_lists[k].as_slice())
            .collect()
    }

    /// Fold cluster `b` into cluster `a`: the merged reachable set is the OR
    /// product of both lists, re-sorted.
    fn merge(&mut self, a: usize, b: usize) {
        for owner in self.cluster_of.iter_mut() {
            if *owner == b as Channel {
                *owner = a as Channel;
            }
        }
        self.masks[a] |= self.masks[b];

        let (list_a, list_b) = (&self.pattern_lists[a], &self.pattern_lists[b]);
        let mut combined = Vec::with_capacity(list_a.len() * list_b.len());
        for &x in list_a {
            for &y in list_b {
                combined.push(x | y);
            }
        }
        // Disjoint masks make every OR distinct, but sorting restores the
        // order the intra-cluster update relies on.
        combined.sort_unstable();
        combined.dedup();

        self.pattern_lists[a] = combined;
        self.masks[b] = 0;
        self.pattern_lists[b].clear();
    }
}
