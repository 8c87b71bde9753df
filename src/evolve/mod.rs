// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The evolution driver.
//!
//! The evolver owns the whole search state: the fixed (or greedy) prefix and
//! its bit-parallel test bank, the optional postfix, the evolving core
//! network between them, the comparator alphabet, the PRNG and the frontier.
//!
//! One epoch consists of bootstrapping the core into a valid sorter and then
//! mutating it forever: each iteration copies the core, applies one or more
//! weighted random mutations, and adopts the copy iff the expanded candidate
//! (symmetric expansion of the core plus the postfix) still sorts every test
//! in the bank. Valid candidates are reported to the frontier. Occasional
//! escape steps insert a redundant or random comparator to leave local
//! optima, and an optional restart rate abandons the epoch entirely,
//! recomputing a greedy prefix before bootstrapping again.
//!
//! With a fixed `RandomSeed` the whole trajectory is reproducible: the seeded
//! PRNG is the only source of randomness.

pub mod mutation;
pub mod statistics;

use crate::bank::TestBank;
use crate::config::{Params, PrefixType};
use crate::frontier::Frontier;
use crate::network::constants::SortWord;
use crate::network::layers::depth;
use crate::network::pair::{comparator_alphabet, valid_pairs, Network, Pair};
use crate::network::symmetry::symmetric_expansion;
use crate::prefix::{extend_greedy, prefix_outputs};
use crate::report;
use mutation::{attempt_mutation, build_selector, MutationKind};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use statistics::{Counters, Statistics};
use std::time::Instant;
use tracing::{debug, info, trace};

pub struct Evolver {
    params: Params,
    rng: ChaCha8Rng,
    alphabet: Network,
    selector: Vec<MutationKind>,
    frontier: Frontier,
    stats: Statistics,
    prefix: Network,
    postfix: Network,
    /// The evolving core; under symmetry only one representative per mirror
    /// class is stored.
    core: Network,
    bank: TestBank,
    started: Instant,
    next_progress_report: u64,
    last_progress_iters: u64,
    last_progress_time: Instant,
}

impl Evolver {
    /// Build the search state from validated parameters, construct the
    /// prefix and its test bank, and bootstrap the first valid sorter.
    pub fn new(params: Params) -> Self {
        let mut rng = if params.random_seed != 0 {
            ChaCha8Rng::seed_from_u64(params.random_seed)
        } else {
            ChaCha8Rng::from_entropy()
        };

        let alphabet = comparator_alphabet(params.ninputs, params.symmetric);
        let selector = build_selector(&params.mutation_weights);
        assert!(!selector.is_empty(), "no mutation types selected");

        let (prefix, bank) = Self::build_prefix_and_bank(&params, &mut rng);
        let postfix = valid_pairs(&params.postfix, params.ninputs);
        let now = Instant::now();

        let mut evolver = Self {
            params,
            rng,
            alphabet,
            selector,
            frontier: Frontier::new(),
            stats: Statistics::new(),
            prefix,
            postfix,
            core: Network::new(),
            bank,
            started: now,
            next_progress_report: 1,
            last_progress_iters: 0,
            last_progress_time: now,
        };
        evolver.begin_epoch();
        evolver
    }

    /// Run forever; the only exit is external termination.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Bounded driver for tests and experiments.
    pub fn run_for(&mut self, iterations: u64) {
        for _ in 0..iterations {
            self.step();
        }
    }

    /// One iteration of the evolution loop: mutate, test, maybe accept,
    /// maybe escape, maybe restart. Returns true when a restart happened.
    pub fn step(&mut self) -> bool {
        self.stats.increment(Counters::Iterations);
        self.report_progress();

        let nmods = if self.params.max_mutations > 1 {
            1 + self.rng.gen_range(0..self.params.max_mutations)
        } else {
            1
        };

        let mut candidate = self.core.clone();
        let mut applied = 0;
        while applied < nmods {
            if candidate.is_empty() {
                break;
            }
            if attempt_mutation(&mut candidate, &self.alphabet, &self.selector, &mut self.rng)
                .is_some()
            {
                applied += 1;
            }
        }

        let expanded = self.expanded_with_postfix(&candidate);
        if !expanded.is_empty() && self.bank.check(&expanded) {
            self.core = candidate;
            self.stats.increment(Counters::AcceptedCandidates);
            let total = self.full_network(&expanded);
            self.record_if_improved(&total);
        }

        if self.params.escape_rate > 0 && self.rng.gen_range(0..self.params.escape_rate) == 0 {
            self.escape_step();
        }

        if self.params.restart_rate > 0 && self.rng.gen_range(0..self.params.restart_rate) == 0 {
            self.restart();
            return true;
        }
        false
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    pub fn prefix(&self) -> &[Pair] {
        &self.prefix
    }

    pub fn core(&self) -> &[Pair] {
        &self.core
    }

    pub fn postfix(&self) -> &[Pair] {
        &self.postfix
    }

    pub fn bank(&self) -> &TestBank {
        &self.bank
    }

    /// Whether the current core (expanded, with postfix) passes the bank.
    pub fn core_is_valid(&self) -> bool {
        let expanded = self.expanded_with_postfix(&self.core);
        self.bank.first_failing_output(&expanded).is_none()
    }

    /// Build the prefix for the configured prefix type and pack the test
    /// bank from its outputs.
    fn build_prefix_and_bank(params: &Params, rng: &mut ChaCha8Rng) -> (Network, TestBank) {
        let n = params.ninputs;
        let mut prefix = match params.prefix_type {
            PrefixType::None => Network::new(),
            PrefixType::Fixed => valid_pairs(&params.fixed_prefix, n),
            PrefixType::Greedy => Network::new(),
            PrefixType::FixedThenGreedy => valid_pairs(&params.fixed_prefix, n),
        };
        if matches!(
            params.prefix_type,
            PrefixType::Greedy | PrefixType::FixedThenGreedy
        ) {
            let target = params.greedy_prefix_size + prefix.len();
            let span = extend_greedy(n, target, params.symmetric, &mut prefix, rng);
            debug!(size = prefix.len(), outputs = span, "greedy prefix built");
        }
        info!(prefix_size = prefix.len(), "prefix prepared");

        // Shuffling the patterns spreads likely-failing tests across groups,
        // improving the odds of early rejection.
        let mut singles = prefix_outputs(n, &prefix);
        singles.shuffle(rng);
        let bank = TestBank::from_patterns(n, &singles, params.symmetric);
        (prefix, bank)
    }

    /// Reset the core from the configured initial network, then append
    /// comparators until the expanded candidate sorts every bank test.
    ///
    /// With an empty postfix, each appended comparator is sampled until it
    /// fixes an inversion of the first failing output pattern (or, for
    /// symmetric networks, its mirror does) so it contributes to sorting.
    /// With a postfix the failing output no longer identifies a useful
    /// comparator and a uniform sample is appended instead.
    fn begin_epoch(&mut self) {
        self.core = valid_pairs(&self.params.initial_network, self.params.ninputs);

        loop {
            let expanded = self.expanded_with_postfix(&self.core);
            match self.bank.first_failing_output(&expanded) {
                None => {
                    if !expanded.is_empty() {
                        let total = self.full_network(&expanded);
                        debug!(size = total.len(), "initial network found");
                        self.record_if_improved(&total);
                    }
                    return;
                }
                Some(failed) => {
                    let p = self.bootstrap_pair(failed);
                    self.core.push(p);
                }
            }
        }
    }

    fn bootstrap_pair(&mut self, failed_output: SortWord) -> Pair {
        if !self.postfix.is_empty() {
            return self.alphabet[self.rng.gen_range(0..self.alphabet.len())];
        }
        let n = self.params.ninputs;
        loop {
            let p = self.alphabet[self.rng.gen_range(0..self.alphabet.len())];
            let fixes_inversion =
                (failed_output >> p.lo) & 1 == 1 && (failed_output >> p.hi) & 1 == 0;
            let mirror_fixes = self.params.symmetric
                && (failed_output >> (n - 1 - p.hi as usize)) & 1 == 1
                && (failed_output >> (n - 1 - p.lo as usize)) & 1 == 0;
            if fixes_inversion || mirror_fixes {
                return p;
            }
        }
    }

    /// Insert a comparator to escape a local optimum. The insertion may
    /// invalidate the core; later mutations are expected to recover it.
    ///
    /// When the sampled comparator would not sit in the last layer (a later
    /// comparator shares one of its wires) and `ForceValidUphillStep` is on,
    /// a duplicate of the comparator at the insertion point is inserted
    /// instead: a redundant comparator keeps a valid sorter valid.
    fn escape_step(&mut self) {
        self.stats.increment(Counters::EscapeSteps);
        let a = self.rng.gen_range(0..=self.core.len());
        let p = self.alphabet[self.rng.gen_range(0..self.alphabet.len())];

        let hit_successor = self.core[a..].iter().any(|c| c.shares_wire(&p));
        if self.params.force_valid_uphill_step && hit_successor {
            let duplicate = self.core[a];
            self.core.insert(a, duplicate);
        } else {
            self.core.insert(a, p);
        }
    }

    /// Abandon the epoch: recompute the prefix and bank (greedy and hybrid
    /// prefixes only; fixed and empty prefixes keep their test vectors) and
    /// bootstrap a fresh core.
    fn restart(&mut self) {
        self.stats.increment(Counters::Restarts);
        debug!("restart");
        if matches!(
            self.params.prefix_type,
            PrefixType::Greedy | PrefixType::FixedThenGreedy
        ) {
            let (prefix, bank) = Self::build_prefix_and_bank(&self.params, &mut self.rng);
            self.prefix = prefix;
            self.bank = bank;
        }
        self.begin_epoch();
    }

    /// Symmetric expansion of `core` (identity when symmetry is off),
    /// followed by the postfix.
    fn expanded_with_postfix(&self, core: &[Pair]) -> Network {
        let mut expanded = if self.params.symmetric {
            symmetric_expansion(self.params.ninputs, core)
        } else {
            core.to_vec()
        };
        expanded.extend_from_slice(&self.postfix);
        expanded
    }

    fn full_network(&self, expanded: &[Pair]) -> Network {
        let mut total = self.prefix.clone();
        total.extend_from_slice(expanded);
        total
    }

    fn record_if_improved(&mut self, total: &[Pair]) {
        let d = depth(total);
        if self.frontier.improved(total.len(), d) {
            self.stats.increment(Counters::Improvements);
            let n = self.params.ninputs;
            // Skip records that don't at least compete with bubble sort
            // unless the user asked for everything.
            if self.params.verbosity > 1 || total.len() <= n * (n - 1) / 2 {
                report::print_improvement(
                    n,
                    total,
                    d,
                    self.prefix.len(),
                    self.postfix.len(),
                    self.params.escape_rate,
                    &self.frontier,
                    self.started.elapsed(),
                );
            }
        }
    }

    /// Iteration-rate telemetry on a geometric schedule, roughly one line
    /// per 10% growth in iteration count.
    fn report_progress(&mut self) {
        let iters = self.stats.get(Counters::Iterations);
        if iters < self.next_progress_report {
            return;
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last_progress_time).as_secs_f64();
        if dt > 0.0 {
            let rate = (iters - self.last_progress_iters) as f64 / dt;
            trace!(
                iterations = iters,
                elapsed_s = self.started.elapsed().as_secs_f64(),
                per_second = rate,
                "iteration progress"
            );
        }
        self.last_progress_time = now;
        self.last_progress_iters = iters;
        self.next_progress_report += 1 + self.next_progress_report / 10;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFile;

    fn params(text: &str) -> Params {
        let cf = ConfigFile::parse_str(text, "test.txt").unwrap();
        Params::from_config(&cf).unwrap()
    }

    #[test]
    fn test_bootstrap_produces_valid_sorter() {
        for text in [
            "Ninputs = 4\nSymmetric = 0\nRandomSeed = 42\n",
            "Ninputs = 6\nSymmetric = 1\nRandomSeed = 42\n",
        ] {
            let evolver = Evolver::new(params(text));
            assert!(evolver.core_is_valid());
            assert!(!evolver.frontier().entries().is_empty());
        }
    }

    #[test]
    fn test_bootstrap_keeps_configured_initial_network() {
        // An initial network that is already the optimal 4-sorter.
        let text = "Ninputs = 4\nSymmetric = 0\nRandomSeed = 1\n\
                    InitialNetwork = (0,1),(2,3),(0,2),(1,3),(1,2)\n";
        let evolver = Evolver::new(params(text));
        assert_eq!(evolver.core().len(), 5);
        assert_eq!(
            evolver.frontier().entries(),
            &[crate::frontier::FrontierEntry { size: 5, depth: 3 }]
        );
    }

    #[test]
    fn test_malformed_initial_network_is_filtered() {
        let text = "Ninputs = 4\nSymmetric = 0\nRandomSeed = 1\n\
                    InitialNetwork = (3,2),(0,9),(0,1)\n";
        let evolver = Evolver::new(params(text));
        // Only (0,1) survives the filter; the bootstrap then extends it.
        assert_eq!(evolver.core()[0], Pair::new(0, 1));
        assert!(evolver.core_is_valid());
    }

    #[test]
    fn test_steps_count_iterations() {
        let mut evolver = Evolver::new(params("Ninputs = 4\nSymmetric = 0\nRandomSeed = 3\n"));
        evolver.run_for(100);
        assert_eq!(evolver.statistics().get(Counters::Iterations), 100);
    }

    #[test]
    fn test_restart_rate_triggers_restarts() {
        let text = "Ninputs = 4\nSymmetric = 0\nRandomSeed = 5\nRestartRate = 10\n";
        let mut evolver = Evolver::new(params(text));
        evolver.run_for(500);
        assert!(evolver.statistics().get(Counters::Restarts) > 0);
        assert!(evolver.core_is_valid() || evolver.core().is_empty());
    }

    #[test]
    fn test_escape_steps_happen() {
        let text = "Ninputs = 4\nSymmetric = 0\nRandomSeed = 6\nEscapeRate = 5\n";
        let mut evolver = Evolver::new(params(text));
        evolver.run_for(500);
        assert!(evolver.statistics().get(Counters::EscapeSteps) > 0);
    }
}
