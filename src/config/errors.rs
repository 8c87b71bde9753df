// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for configuration loading.

use std::fmt;

/// Errors detected while reading or validating a configuration file.
/// All of them halt startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The file could not be read at all.
    Unreadable { path: String, message: String },

    /// A non-empty line without a `key = value` shape.
    Syntax { path: String, line: u32 },

    /// The right-hand side of an integer key did not parse as a
    /// non-negative decimal.
    ExpectedInteger { path: String, line: u32 },

    /// The right-hand side of a network key was not a `(a,b), (c,d), …` list.
    BadNetwork { path: String, line: u32 },

    /// The same key appeared twice.
    DuplicateKey { key: String, line: u32 },

    /// A mandatory key is absent.
    MissingKey { key: String },

    /// A numeric key is outside its allowed range.
    OutOfRange {
        key: String,
        min: u64,
        max: u64,
        actual: u64,
    },

    /// Every mutation weight is zero, leaving the evolver nothing to do.
    NoMutationsEnabled,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Unreadable { path, message } => {
                write!(f, "could not read config file '{}': {}", path, message)
            }
            ConfigError::Syntax { path, line } => {
                write!(f, "parse error at {}:{}", path, line)
            }
            ConfigError::ExpectedInteger { path, line } => {
                write!(f, "numeric value expected at {}:{}", path, line)
            }
            ConfigError::BadNetwork { path, line } => {
                write!(f, "malformed network value at {}:{}", path, line)
            }
            ConfigError::DuplicateKey { key, line } => {
                write!(f, "duplicate key '{}' in config file, line {}", key, line)
            }
            ConfigError::MissingKey { key } => {
                write!(f, "missing mandatory key '{}' in config file", key)
            }
            ConfigError::OutOfRange {
                key,
                min,
                max,
                actual,
            } => {
                write!(
                    f,
                    "value for key '{}' should be in range {}..{} (was {})",
                    key, min, max, actual
                )
            }
            ConfigError::NoMutationsEnabled => {
                write!(f, "no mutation types selected: all mutation weights are zero")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
