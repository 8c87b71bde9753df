// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Line-based configuration reader and typed search parameters.
//!
//! The file format is deliberately plain:
//!
//! ```text
//! # comment to end of line
//! Ninputs = 12
//! Symmetric = 1
//! FixedPrefix = (0,1), (2,3), (4,5)
//! ```
//!
//! Keys are either integer-valued or, for `FixedPrefix`, `InitialNetwork` and
//! `Postfix`, network-valued. Duplicate keys are errors; unknown integer keys
//! are retained but never read, so old config files keep working. Typed
//! extraction and range validation happen in [`Params::from_config`].

pub mod errors;

use crate::evolve::mutation::MutationKind;
use crate::network::constants::NMAX;
use crate::network::pair::{Network, Pair};
use errors::ConfigError;
use std::collections::BTreeMap;
use std::path::Path;
use strum::EnumCount;
use tracing::warn;

/// Keys whose value is a comparator list rather than an integer.
const NETWORK_KEYS: [&str; 3] = ["FixedPrefix", "InitialNetwork", "Postfix"];

/// Raw key/value content of a configuration file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    ints: BTreeMap<String, u64>,
    networks: BTreeMap<String, Network>,
}

impl ConfigFile {
    /// Read and parse a configuration file.
    pub fn parse(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        Self::parse_str(&text, &shown)
    }

    /// Parse configuration text; `path` is only used in diagnostics.
    pub fn parse_str(text: &str, path: &str) -> Result<Self, ConfigError> {
        let mut cf = ConfigFile::default();

        for (idx, raw_line) in text.lines().enumerate() {
            let line_nr = idx as u32 + 1;
            let line = strip(raw_line);
            if line.is_empty() {
                continue;
            }

            let Some(eq) = line.find('=') else {
                return Err(ConfigError::Syntax {
                    path: path.to_string(),
                    line: line_nr,
                });
            };
            let key = strip(&line[..eq]);
            let value = strip(&line[eq + 1..]);
            if key.is_empty() {
                return Err(ConfigError::Syntax {
                    path: path.to_string(),
                    line: line_nr,
                });
            }

            if NETWORK_KEYS.contains(&key) {
                if cf.networks.contains_key(key) {
                    return Err(ConfigError::DuplicateKey {
                        key: key.to_string(),
                        line: line_nr,
                    });
                }
                let network = parse_network(value).ok_or(ConfigError::BadNetwork {
                    path: path.to_string(),
                    line: line_nr,
                })?;
                cf.networks.insert(key.to_string(), network);
            } else {
                if cf.ints.contains_key(key) {
                    return Err(ConfigError::DuplicateKey {
                        key: key.to_string(),
                        line: line_nr,
                    });
                }
                let number: u64 = value.parse().map_err(|_| ConfigError::ExpectedInteger {
                    path: path.to_string(),
                    line: line_nr,
                })?;
                cf.ints.insert(key.to_string(), number);
            }
        }

        Ok(cf)
    }

    /// Integer value of `key`, or `default` when absent.
    pub fn int(&self, key: &str, default: u64) -> u64 {
        self.ints.get(key).copied().unwrap_or(default)
    }

    /// Network value of `key`, empty when absent.
    pub fn network(&self, key: &str) -> Network {
        self.networks.get(key).cloned().unwrap_or_default()
    }

    fn require_int_in_range(&self, key: &str, min: u64, max: u64) -> Result<u64, ConfigError> {
        let value = self
            .ints
            .get(key)
            .copied()
            .ok_or_else(|| ConfigError::MissingKey {
                key: key.to_string(),
            })?;
        if value < min || value > max {
            return Err(ConfigError::OutOfRange {
                key: key.to_string(),
                min,
                max,
                actual: value,
            });
        }
        Ok(value)
    }
}

/// Remove commented text and surrounding whitespace.
fn strip(line: &str) -> &str {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    line.trim()
}

/// Parse `(a,b), (c,d), …`. Pair components must be decimal integers;
/// components above 255 are skipped (the pair is dropped), anything else
/// malformed rejects the whole value.
fn parse_network(value: &str) -> Option<Network> {
    #[derive(PartialEq)]
    enum State {
        ExpectOpen,
        InFirst,
        InSecond,
        ExpectComma,
    }

    let mut network = Network::new();
    let mut state = State::ExpectOpen;
    let mut token = String::new();
    let mut first: u64 = 0;

    for c in value.chars() {
        match state {
            State::ExpectOpen => {
                if c == '(' {
                    token.clear();
                    state = State::InFirst;
                } else if !c.is_whitespace() {
                    return None;
                }
            }
            State::InFirst => {
                if c == ',' {
                    first = token.trim().parse().ok()?;
                    token.clear();
                    state = State::InSecond;
                } else {
                    token.push(c);
                }
            }
            State::InSecond => {
                if c == ')' {
                    let second: u64 = token.trim().parse().ok()?;
                    if first <= 255 && second <= 255 {
                        network.push(Pair::new(first as u8, second as u8));
                    }
                    state = State::ExpectComma;
                } else {
                    token.push(c);
                }
            }
            State::ExpectComma => {
                if c == ',' {
                    state = State::ExpectOpen;
                } else if !c.is_whitespace() {
                    return None;
                }
            }
        }
    }

    match state {
        State::ExpectOpen | State::ExpectComma => Some(network),
        _ => None,
    }
}

/// How the prefix ahead of the evolving core is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixType {
    None,
    Fixed,
    Greedy,
    FixedThenGreedy,
}

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    pub ninputs: usize,
    pub symmetric: bool,
    pub random_seed: u64,
    pub escape_rate: u64,
    pub restart_rate: u64,
    pub max_mutations: u64,
    pub force_valid_uphill_step: bool,
    pub prefix_type: PrefixType,
    pub fixed_prefix: Network,
    pub initial_network: Network,
    pub postfix: Network,
    pub greedy_prefix_size: usize,
    pub verbosity: u64,
    pub mutation_weights: [u64; MutationKind::COUNT],
}

impl Params {
    /// Extract and validate typed parameters from a parsed config file.
    pub fn from_config(cf: &ConfigFile) -> Result<Self, ConfigError> {
        let ninputs = cf.require_int_in_range("Ninputs", 2, NMAX as u64)? as usize;
        let mut symmetric = cf.require_int_in_range("Symmetric", 0, 1)? > 0;

        if symmetric && ninputs % 2 == 1 {
            warn!("option 'Symmetric' ignored for odd number of inputs");
            symmetric = false;
        }

        let mutation_weights = [
            cf.int("WeigthRemovePair", 1),
            cf.int("WeigthSwapPairs", 1),
            cf.int("WeigthReplacePair", 1),
            cf.int("WeightCrossPairs", 1),
            cf.int("WeightSwapIntersectingPairs", 1),
            cf.int("WeightReplaceHalfPair", 1),
        ];
        if mutation_weights.iter().all(|&w| w == 0) {
            return Err(ConfigError::NoMutationsEnabled);
        }

        Ok(Params {
            ninputs,
            symmetric,
            random_seed: cf.int("RandomSeed", 0),
            escape_rate: cf.int("EscapeRate", 0),
            restart_rate: cf.int("RestartRate", 0),
            max_mutations: cf.int("MaxMutations", 1),
            force_valid_uphill_step: cf.int("ForceValidUphillStep", 1) > 0,
            prefix_type: match cf.int("PrefixType", 0) {
                1 => PrefixType::Fixed,
                2 => PrefixType::Greedy,
                3 => PrefixType::FixedThenGreedy,
                _ => PrefixType::None,
            },
            fixed_prefix: cf.network("FixedPrefix"),
            initial_network: cf.network("InitialNetwork"),
            postfix: cf.network("Postfix"),
            greedy_prefix_size: cf.int("GreedyPrefixSize", 0) as usize,
            verbosity: cf.int("Verbosity", 1),
            mutation_weights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ConfigFile, ConfigError> {
        ConfigFile::parse_str(text, "test.txt")
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let cf = parse("# header\n\nNinputs = 8 # trailing\nSymmetric=0\n").unwrap();
        assert_eq!(cf.int("Ninputs", 0), 8);
        assert_eq!(cf.int("Symmetric", 9), 0);
    }

    #[test]
    fn test_missing_equals_is_syntax_error() {
        assert_eq!(
            parse("Ninputs 8\n"),
            Err(ConfigError::Syntax {
                path: "test.txt".into(),
                line: 1
            })
        );
    }

    #[test]
    fn test_non_numeric_value() {
        assert!(matches!(
            parse("Ninputs = eight\n"),
            Err(ConfigError::ExpectedInteger { line: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_key() {
        assert!(matches!(
            parse("Ninputs = 4\nNinputs = 8\n"),
            Err(ConfigError::DuplicateKey { line: 2, .. })
        ));
    }

    #[test]
    fn test_network_value() {
        let cf = parse("FixedPrefix = (0,1), (2,3),(1 , 2)\n").unwrap();
        assert_eq!(
            cf.network("FixedPrefix"),
            vec![Pair::new(0, 1), Pair::new(2, 3), Pair::new(1, 2)]
        );
    }

    #[test]
    fn test_network_skips_oversized_components() {
        let cf = parse("Postfix = (0,1), (300,2), (2,3)\n").unwrap();
        assert_eq!(
            cf.network("Postfix"),
            vec![Pair::new(0, 1), Pair::new(2, 3)]
        );
    }

    #[test]
    fn test_malformed_network() {
        assert!(matches!(
            parse("Postfix = (0,1), (2\n"),
            Err(ConfigError::BadNetwork { line: 1, .. })
        ));
        assert!(matches!(
            parse("Postfix = 0,1\n"),
            Err(ConfigError::BadNetwork { line: 1, .. })
        ));
    }

    #[test]
    fn test_empty_network_value() {
        let cf = parse("Postfix =\n").unwrap();
        assert!(cf.network("Postfix").is_empty());
    }

    #[test]
    fn test_unknown_integer_keys_are_retained() {
        let cf = parse("FutureKnob = 17\nNinputs = 4\nSymmetric = 0\n").unwrap();
        assert_eq!(cf.int("FutureKnob", 0), 17);
        assert!(Params::from_config(&cf).is_ok());
    }

    #[test]
    fn test_params_defaults() {
        let cf = parse("Ninputs = 8\nSymmetric = 1\n").unwrap();
        let params = Params::from_config(&cf).unwrap();
        assert!(params.symmetric);
        assert_eq!(params.random_seed, 0);
        assert_eq!(params.escape_rate, 0);
        assert_eq!(params.restart_rate, 0);
        assert_eq!(params.max_mutations, 1);
        assert!(params.force_valid_uphill_step);
        assert_eq!(params.prefix_type, PrefixType::None);
        assert_eq!(params.verbosity, 1);
        assert_eq!(params.mutation_weights, [1; MutationKind::COUNT]);
    }

    #[test]
    fn test_missing_mandatory_key() {
        let cf = parse("Symmetric = 1\n").unwrap();
        assert_eq!(
            Params::from_config(&cf),
            Err(ConfigError::MissingKey {
                key: "Ninputs".into()
            })
        );
    }

    #[test]
    fn test_ninputs_range() {
        for bad in ["Ninputs = 1\nSymmetric = 0\n", "Ninputs = 65\nSymmetric = 0\n"] {
            let cf = parse(bad).unwrap();
            assert!(matches!(
                Params::from_config(&cf),
                Err(ConfigError::OutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_symmetry_ignored_for_odd_n() {
        let cf = parse("Ninputs = 5\nSymmetric = 1\n").unwrap();
        let params = Params::from_config(&cf).unwrap();
        assert!(!params.symmetric);
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let text = "Ninputs = 4\nSymmetric = 0\n\
                    WeigthRemovePair = 0\nWeigthSwapPairs = 0\nWeigthReplacePair = 0\n\
                    WeightCrossPairs = 0\nWeightSwapIntersectingPairs = 0\nWeightReplaceHalfPair = 0\n";
        let cf = parse(text).unwrap();
        assert_eq!(
            Params::from_config(&cf),
            Err(ConfigError::NoMutationsEnabled)
        );
    }
}
