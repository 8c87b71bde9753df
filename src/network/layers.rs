// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Layer recovery for linear networks.
//!
//! A comparator joins the earliest layer whose occupied-wire mask is disjoint
//! from its own two wires. [`depth`] computes just the layer count with a mask
//! scan; [`linear_to_layers`] materialises the layers for printing.

use crate::network::constants::SortWord;
use crate::network::pair::Pair;
use std::fmt::Write;

/// Number of parallel layers of the network under greedy packing.
pub fn depth(nw: &[Pair]) -> usize {
    let mut layers: Vec<SortWord> = Vec::new();

    for p in nw {
        let mask = p.mask();
        // Scan backwards over the layers while they stay disjoint from the
        // pair; the pair lands in the earliest such layer.
        let mut matchidx = layers.len();
        for idx in (0..layers.len()).rev() {
            if layers[idx] & mask == 0 {
                matchidx = idx;
            } else {
                break;
            }
        }
        if matchidx == layers.len() {
            layers.push(0);
        }
        layers[matchidx] |= mask;
    }

    layers.len()
}

/// Greedy layering of a linear network. Each layer is sorted ascending by
/// wire pair, matching the printed form.
pub fn linear_to_layers(nw: &[Pair]) -> Vec<Vec<Pair>> {
    let mut result: Vec<Vec<Pair>> = Vec::new();
    let mut wire_level: [usize; 256] = [0; 256];

    for &p in nw {
        let k = wire_level[p.lo as usize].max(wire_level[p.hi as usize]);
        if k >= result.len() {
            result.push(Vec::new());
        }
        result[k].push(p);
        wire_level[p.lo as usize] = k + 1;
        wire_level[p.hi as usize] = k + 1;
    }

    for layer in &mut result {
        layer.sort_unstable_by_key(|p| (p.lo, p.hi));
    }
    result
}

/// One `[(a,b),(c,d),…]` line per layer.
pub fn layers_to_string(layers: &[Vec<Pair>]) -> String {
    let mut out = String::new();
    for layer in layers {
        out.push('[');
        for (i, p) in layer.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "({},{})", p.lo, p.hi);
        }
        out.push_str("]\n");
    }
    out
}
