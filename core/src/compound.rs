//! Compound keys: one key press, two codepoints.
//!
//! Lisu tone letters are frequently combined (e.g. MYA TI followed by
//! MYA NA). A compound key commits both components in order as a single
//! insertion, so the host's cursor and undo treat them as one edit.

use crate::config::CompoundEntry;
use crate::error::ConfigError;
use std::collections::HashMap;

/// Static lookup from compound trigger code to its component pair.
#[derive(Debug, Clone, Default)]
pub struct CompoundComposer {
    pairs: HashMap<i32, (i32, i32)>,
}

impl CompoundComposer {
    /// Build the composer from configured entries.
    ///
    /// Entries missing a component are rejected. A trigger listed twice is
    /// rejected as well, since the second definition would silently win.
    pub fn from_entries(entries: &[CompoundEntry]) -> Result<Self, ConfigError> {
        let mut pairs = HashMap::with_capacity(entries.len());
        for entry in entries {
            let (Some(first), Some(second)) = (entry.first, entry.second) else {
                return Err(ConfigError::IncompleteCompound { code: entry.code });
            };
            if pairs.insert(entry.code, (first, second)).is_some() {
                return Err(ConfigError::DuplicateKeyCode {
                    code: entry.code,
                    first: "compound".to_string(),
                    second: "compound".to_string(),
                });
            }
        }
        Ok(Self { pairs })
    }

    /// Component codepoints for a trigger, first component first.
    pub fn resolve(&self, code: i32) -> Option<(i32, i32)> {
        self.pairs.get(&code).copied()
    }

    /// Trigger code committing `first` then `second`, if one is configured.
    /// The lowest code wins when several keys commit the same pair.
    pub fn trigger_for(&self, first: i32, second: i32) -> Option<i32> {
        self.pairs
            .iter()
            .filter(|(_, pair)| **pair == (first, second))
            .map(|(code, _)| *code)
            .min()
    }

    pub fn contains(&self, code: i32) -> bool {
        self.pairs.contains_key(&code)
    }

    /// Registered trigger codes, unordered.
    pub fn triggers(&self) -> impl Iterator<Item = i32> + '_ {
        self.pairs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
