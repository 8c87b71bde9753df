// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Data model for comparator networks: wire constants, pairs, layer recovery
//! and mirror symmetry.

pub mod constants;
pub mod layers;
pub mod pair;
pub mod symmetry;

pub use constants::{wire_mask, BPWord, Channel, SortWord, NMAX, PARWORDSIZE};
pub use pair::{comparator_alphabet, valid_pairs, Network, Pair};
