//! Configuration errors.
//!
//! Every variant is fatal to initialization: the engine is never handed a
//! partially built catalog, key-code table or compound composer.

use crate::page::KeyboardPage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration lists no languages at all.
    #[error("language catalog is empty")]
    EmptyCatalog,

    /// A language entry has no (or an empty) name.
    #[error("language entry #{index} has no name")]
    MissingName { index: usize },

    /// A language entry lacks one of its three layout references.
    #[error("language '{language}' has no {page} layout")]
    MissingLayout { language: String, page: KeyboardPage },

    /// A compound trigger code without both component codepoints.
    #[error("compound key {code} is missing a component codepoint")]
    IncompleteCompound { code: i32 },

    /// Two key roles were configured with the same code.
    #[error("key code {code} is assigned to both {first} and {second}")]
    DuplicateKeyCode {
        code: i32,
        first: String,
        second: String,
    },
}
