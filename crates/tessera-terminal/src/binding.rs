//! Bound parameters and flags handed to an overload's executor.

use std::collections::HashMap;

use tessera_types::error::{Result, TesseraError};

use crate::value::ParamValue;

/// Parameter values bound by a successful overload match.
///
/// Besides the parsed values, carries the full (substituted) input line and
/// its token sequence so executors can recover exact substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: HashMap<String, ParamValue>,
    raw_text: String,
    tokens: Vec<String>,
}

impl BoundParams {
    pub(crate) fn new(
        values: HashMap<String, ParamValue>,
        raw_text: &str,
        tokens: &[String],
    ) -> Self {
        Self {
            values,
            raw_text: raw_text.to_string(),
            tokens: tokens.to_vec(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ParamValue::as_text)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(ParamValue::as_list)
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(ParamValue::as_integer)
    }

    pub fn json(&self, name: &str) -> Option<&serde_json::Value> {
        self.get(name).and_then(ParamValue::as_json)
    }

    /// Like [`text`](Self::text), but a missing value is an error.
    pub fn require_text(&self, name: &str) -> Result<&str> {
        self.text(name)
            .ok_or_else(|| TesseraError::MissingParam(name.to_string()))
    }

    /// The full input line the command was invoked with.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// The full token sequence, command name included.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Flags declared by the matched overload, each bound to its presence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundFlags {
    flags: HashMap<String, bool>,
}

impl BoundFlags {
    /// `true` only for a declared flag that was present in the input.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// `None` for flags the overload does not declare.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

impl FromIterator<(String, bool)> for BoundFlags {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
