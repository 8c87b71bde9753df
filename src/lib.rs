// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Evolutionary search for small and shallow sorting networks.
//!
//! A comparator network is a fixed schedule of two-wire min/max operations.
//! By the zero-one principle, a network sorts every input iff it sorts every
//! binary input, so candidate networks are judged against binary test
//! patterns only. This crate hunts for networks that are good on both size
//! (comparator count) and depth (parallel layers), tracking the Pareto
//! frontier of (size, depth) pairs it finds.
//!
//! # Architecture
//!
//! The search splits a network into three sections: a fixed or greedily
//! constructed **prefix**, an evolving **core**, and an optional fixed
//! **postfix**.
//!
//! - [`cluster`] maintains the set of binary patterns a partial network can
//!   still produce, factored into independent wire clusters so the set stays
//!   far smaller than `2^n`.
//! - [`prefix`] uses the cluster engine to compute the prefix's surviving
//!   patterns and to grow greedy prefixes that minimise their count.
//! - [`bank`] packs the surviving patterns into bit-parallel words and
//!   implements the acceptance oracle: 64 test patterns ride through the
//!   candidate network per machine word.
//! - [`evolve`] owns the loop: mutate the core, test the candidate, adopt it
//!   when it still sorts, occasionally perturb or restart.
//! - [`frontier`] keeps the Pareto-optimal (size, depth) records; [`report`]
//!   prints them.
//! - [`config`] reads the line-based configuration file driving all of the
//!   above.
//!
//! The search runs in a single thread; all bit-level parallelism is
//! SIMD-within-a-register. With a fixed `RandomSeed` the trajectory is fully
//! reproducible.

pub mod bank;
pub mod cluster;
pub mod config;
pub mod evolve;
pub mod frontier;
pub mod network;
pub mod prefix;
pub mod report;

// Re-export commonly used types
pub use bank::TestBank;
pub use cluster::ClusterSet;
pub use config::{ConfigFile, Params};
pub use evolve::Evolver;
pub use frontier::Frontier;
pub use network::{Network, Pair};
