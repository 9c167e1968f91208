//! Language catalog with cyclic navigation.
//!
//! The catalog is loaded all-or-nothing from the configured language
//! groups. The language list itself is shared read-only (`Arc`); only the
//! active index changes during a session, and it is kept in range by
//! modulo arithmetic.

use crate::config::LanguageEntry;
use crate::error::ConfigError;
use crate::page::KeyboardPage;
use crate::router::Direction;
use std::sync::Arc;
use tracing::warn;

/// A selectable script with its three layouts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    name: String,
    normal_layout: String,
    shift_layout: String,
    symbol_layout: String,
}

impl Language {
    pub fn new(
        name: impl Into<String>,
        normal_layout: impl Into<String>,
        shift_layout: impl Into<String>,
        symbol_layout: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            normal_layout: normal_layout.into(),
            shift_layout: shift_layout.into(),
            symbol_layout: symbol_layout.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Layout identifier for the given page.
    pub fn layout(&self, page: KeyboardPage) -> &str {
        match page {
            KeyboardPage::Normal => &self.normal_layout,
            KeyboardPage::Shift => &self.shift_layout,
            KeyboardPage::Symbol => &self.symbol_layout,
        }
    }

    fn from_entry(index: usize, entry: &LanguageEntry) -> Result<Self, ConfigError> {
        let name = match entry.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(ConfigError::MissingName { index }),
        };
        let layout = |value: &Option<String>, page| match value.as_deref() {
            Some(id) if !id.is_empty() => Ok(id.to_string()),
            _ => Err(ConfigError::MissingLayout {
                language: name.to_string(),
                page,
            }),
        };
        Ok(Self {
            name: name.to_string(),
            normal_layout: layout(&entry.normal, KeyboardPage::Normal)?,
            shift_layout: layout(&entry.shift, KeyboardPage::Shift)?,
            symbol_layout: layout(&entry.symbol, KeyboardPage::Symbol)?,
        })
    }
}

/// Ordered, non-empty list of languages plus the active index.
#[derive(Debug, Clone)]
pub struct LanguageCatalog {
    languages: Arc<[Language]>,
    active: usize,
}

impl LanguageCatalog {
    /// Build a catalog from configured entries.
    ///
    /// Fails on the first incomplete entry; nothing is returned in that case.
    pub fn load(entries: &[LanguageEntry]) -> Result<Self, ConfigError> {
        let languages = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Language::from_entry(index, entry))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_languages(languages)
    }

    pub fn from_languages(languages: Vec<Language>) -> Result<Self, ConfigError> {
        if languages.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self {
            languages: languages.into(),
            active: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Always false for a loaded catalog; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn current(&self) -> &Language {
        &self.languages[self.active]
    }

    pub fn get(&self, index: usize) -> Option<&Language> {
        self.languages.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.languages.iter().map(Language::name).collect()
    }

    /// Move one step in `direction`, wrapping at both ends.
    pub fn next(&mut self, direction: Direction) -> usize {
        let len = self.languages.len() as isize;
        let index = (self.active as isize + direction.offset() + len).rem_euclid(len);
        self.active = index as usize;
        self.active
    }

    /// Jump straight to `index`. Out-of-range indices leave the catalog as is.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        if index < self.languages.len() {
            self.active = index;
            Some(index)
        } else {
            None
        }
    }

    /// Restore a persisted index; anything out of range falls back to 0.
    pub fn restore(&mut self, stored: i64) -> usize {
        self.active = match usize::try_from(stored) {
            Ok(index) if index < self.languages.len() => index,
            _ => {
                warn!(
                    "stored language index {} out of range (0..{}), using 0",
                    stored,
                    self.languages.len()
                );
                0
            }
        };
        self.active
    }
}
