//! Duration grammar of the rules engine
//!
//! Evaluation intervals and `for` clauses are written as concatenated unit
//! terms (`5m`, `1h30m`, `2d12h`). Units must appear in strictly descending
//! order of magnitude, each at most once; the bare literal `0` denotes the
//! zero duration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Unit factors in milliseconds, largest first.
const UNITS: [(&str, u64); 7] = [
    ("y", 1000 * 60 * 60 * 24 * 365),
    ("w", 1000 * 60 * 60 * 24 * 7),
    ("d", 1000 * 60 * 60 * 24),
    ("h", 1000 * 60 * 60),
    ("m", 1000 * 60),
    ("s", 1000),
    ("ms", 1),
];

/// A duration in the rules engine's own grammar.
///
/// Stored as total milliseconds, so two spellings of the same length
/// (`90m` and `1h30m`) compare equal. `Display` renders the canonical
/// descending-unit form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PromDuration(u64);

impl PromDuration {
    /// The zero duration
    pub const ZERO: Self = Self(0);

    /// Construct a duration from a total number of milliseconds
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Total length in milliseconds
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Whether this is the zero duration
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl FromStr for PromDuration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDuration {
            text: s.to_string(),
        };

        if s == "0" {
            return Ok(Self::ZERO);
        }
        if s.is_empty() {
            return Err(invalid());
        }

        let bytes = s.as_bytes();
        let mut total: u64 = 0;
        let mut last_unit: Option<usize> = None;
        let mut i = 0;

        while i < bytes.len() {
            let digits_start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i == digits_start {
                return Err(invalid());
            }
            let value: u64 = s[digits_start..i].parse().map_err(|_| invalid())?;

            let unit_start = i;
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            let unit = &s[unit_start..i];
            let index = UNITS
                .iter()
                .position(|(name, _)| *name == unit)
                .ok_or_else(invalid)?;

            // Units must strictly descend: 1h30m is valid, 30m1h and 1h1h are not.
            if let Some(prev) = last_unit
                && index <= prev
            {
                return Err(invalid());
            }
            last_unit = Some(index);

            total = value
                .checked_mul(UNITS[index].1)
                .and_then(|ms| total.checked_add(ms))
                .ok_or_else(invalid)?;
        }

        Ok(Self(total))
    }
}

impl fmt::Display for PromDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("0s");
        }
        let mut rest = self.0;
        for (name, factor) in UNITS {
            let count = rest / factor;
            if count > 0 {
                write!(f, "{}{}", count, name)?;
                rest -= count * factor;
            }
        }
        Ok(())
    }
}

impl Serialize for PromDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PromDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
