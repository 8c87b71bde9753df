// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! End-to-end searches on small widths with fixed seeds.

mod common;

use common::sorts_all_binary_inputs;
use sorter_search::config::{ConfigFile, Params};
use sorter_search::evolve::statistics::Counters;
use sorter_search::Evolver;

fn params(text: &str) -> Params {
    let cf = ConfigFile::parse_str(text, "test.txt").unwrap();
    Params::from_config(&cf).unwrap()
}

#[test]
fn test_two_wires_is_solved_at_bootstrap() {
    let evolver = Evolver::new(params("Ninputs = 2\nSymmetric = 0\nRandomSeed = 9\n"));
    assert_eq!(evolver.frontier().entries().len(), 1);
    let best = evolver.frontier().entries()[0];
    assert_eq!((best.size, best.depth), (1, 1));
}

#[test]
fn test_empty_prefix_bank_holds_all_unsorted_patterns() {
    let evolver = Evolver::new(params("Ninputs = 4\nSymmetric = 0\nRandomSeed = 9\n"));
    // 2^4 patterns minus the 5 already-sorted ones.
    assert_eq!(evolver.bank().len(), 11);
}

#[test]
fn test_four_wires_reaches_the_known_optimum() {
    let text = "Ninputs = 4\nSymmetric = 0\nRandomSeed = 2024\n\
                MaxMutations = 3\nEscapeRate = 50\n";
    let mut evolver = Evolver::new(params(text));
    evolver.run_for(200_000);

    let entries = evolver.frontier().entries();
    assert!(
        entries.iter().any(|e| e.size == 5 && e.depth == 3),
        "expected the (5,3) optimum, frontier: {:?}",
        entries
    );
    // Nothing below the optimum can ever be recorded.
    assert!(entries.iter().all(|e| e.size >= 5 && e.depth >= 3));
}

#[test]
fn test_eight_wires_with_greedy_symmetric_prefix() {
    let text = "Ninputs = 8\nSymmetric = 1\nRandomSeed = 4711\n\
                PrefixType = 2\nGreedyPrefixSize = 16\n\
                MaxMutations = 2\nEscapeRate = 100\n";
    let mut evolver = Evolver::new(params(text));
    assert!(evolver.core_is_valid());
    assert!(!evolver.prefix().is_empty());

    evolver.run_for(50_000);
    let entries = evolver.frontier().entries();
    assert!(!entries.is_empty());
    let best_size = entries.iter().map(|e| e.size).min().unwrap();
    // The known optimum is 19 comparators; the evolver must at least get
    // into its neighbourhood quickly.
    assert!(best_size <= 30, "best size {} too large", best_size);
}

#[test]
fn test_accepted_candidates_are_always_real_sorters() {
    let text = "Ninputs = 5\nSymmetric = 0\nRandomSeed = 31\nMaxMutations = 2\n";
    let mut evolver = Evolver::new(params(text));
    for _ in 0..50 {
        evolver.run_for(200);
        // The core is only replaced by candidates the oracle accepted, so it
        // must always pass the brute-force zero-one check.
        assert!(sorts_all_binary_inputs(5, &full_network(&evolver)));
    }
    assert!(evolver.statistics().get(Counters::AcceptedCandidates) > 0);
}

#[test]
fn test_sorting_prefix_leaves_nothing_to_do() {
    // A prefix that already sorts empties the bank; the evolver must not
    // report vacuously accepted candidates.
    let text = "Ninputs = 4\nSymmetric = 0\nRandomSeed = 13\nPrefixType = 1\n\
                FixedPrefix = (0,1),(2,3),(0,2),(1,3),(1,2)\n";
    let mut evolver = Evolver::new(params(text));
    assert!(evolver.bank().is_empty());
    evolver.run_for(1_000);
    assert!(evolver.frontier().entries().is_empty());
}

#[test]
fn test_postfix_only_search() {
    // A postfix that finishes any 4-wire partial sort of the outer pairs.
    let text = "Ninputs = 4\nSymmetric = 0\nRandomSeed = 8\n\
                Postfix = (1,2)\n";
    let mut evolver = Evolver::new(params(text));
    assert!(evolver.core_is_valid());
    evolver.run_for(20_000);
    assert!(sorts_all_binary_inputs(4, &full_network(&evolver)));
}

fn full_network(evolver: &Evolver) -> Vec<sorter_search::Pair> {
    // Reconstruct prefix + expanded core + postfix the way the evolver
    // reports it. The evolver exposes the pieces; symmetry is off in the
    // tests that use this helper.
    let mut nw = evolver.prefix().to_vec();
    nw.extend_from_slice(evolver.core());
    nw.extend_from_slice(evolver.postfix());
    nw
}
