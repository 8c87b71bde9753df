// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Stdout records for frontier improvements.
//!
//! Improvement records are the program's observable output (diagnostics go
//! through `tracing` instead). Each record carries enough context to
//! reproduce and rank the find: problem size, network size and depth, the
//! program version, the escape rate and the prefix/postfix split, followed by
//! the network itself in layered form and the updated frontier.

use crate::frontier::Frontier;
use crate::network::layers::{layers_to_string, linear_to_layers};
use crate::network::pair::Pair;
use std::time::Duration;

/// Program identification included in every record.
pub fn version_tag() -> String {
    format!("{}_{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Print one improvement record.
#[allow(clippy::too_many_arguments)]
pub fn print_improvement(
    n: usize,
    nw: &[Pair],
    depth: usize,
    prefix_size: usize,
    postfix_size: usize,
    escape_rate: u64,
    frontier: &Frontier,
    elapsed: Duration,
) {
    println!(
        "{{'N':{},'L':{},'D':{},'sw':'{}','ESC':{},'Prefix':{},'Postfix':{},'nw':",
        n,
        nw.len(),
        depth,
        version_tag(),
        escape_rate,
        prefix_size,
        postfix_size,
    );
    print!("{}", layers_to_string(&linear_to_layers(nw)));
    println!("Most performant: {}", frontier);
    println!("time: {:.1} s", elapsed.as_secs_f64());
}
