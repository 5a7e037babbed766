//! Probability values carried together with their printed form.

use std::fmt;

use serde::{Serialize, Serializer};

/// A probability formatted to five fractional digits at construction.
///
/// The printed form is part of the engine's output contract: ranked results
/// order candidates by comparing these strings, and the noisy-channel
/// combiner averages the parsed-back (rounded) values rather than the raw
/// ones. Keeping value and text together means every stage agrees on both.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    value: f64,
    text: String,
}

impl Score {
    pub fn new(value: f64) -> Self {
        Self {
            text: format!("{value:.5}"),
            value,
        }
    }

    /// The raw value as computed, before rounding.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The five-digit printed form used for ranking.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The value after rounding to five digits, i.e. the printed form parsed
    /// back. This is what downstream stages combine.
    pub fn rounded(&self) -> f64 {
        self.text.parse().unwrap_or(self.value)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
