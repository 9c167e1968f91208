//! lisu-keyboard-core
//!
//! Input logic of a multi-script soft keyboard, independent of any UI
//! toolkit: key classification, keyboard page state, language switching
//! and compound (two-codepoint) keys. Rendering, audio output, text fields
//! and storage are supplied by the host through small traits.
//!
//! Public API:
//! - `KeyboardEngine` - host-facing entry point (initialize / activate / handle_key)
//! - `KeyboardSession` - mutable session state with explicit redraw instructions
//! - `KeyEventRouter` / `KeyAction` - key event classification
//! - `PageStateMachine` - normal / shift / symbol page rules
//! - `LanguageCatalog` - ordered languages with cyclic navigation
//! - `KeyCodeTable` / `CompoundComposer` - configured key codes
//! - `KeyboardConfig` - TOML configuration
//! - `TextSink` / `AudioSink` / `Preferences` - host collaborators

pub mod catalog;
pub use catalog::{Language, LanguageCatalog};

pub mod compound;
pub use compound::CompoundComposer;

pub mod config;
pub use config::{CompoundEntry, KeyCodeConfig, KeyboardConfig, LanguageEntry};

pub mod context;
pub use context::{apply_action, AudioSink, SelectionState, TextBuffer, TextSink};

pub mod engine;
pub use engine::KeyboardEngine;

pub mod error;
pub use error::ConfigError;

pub mod feedback;
pub use feedback::{classify, FeedbackCategory};

pub mod keycodes;
pub use keycodes::{KeyCodeTable, KeyRole};

pub mod page;
pub use page::{KeyboardPage, PageStateMachine, PageTransition};

pub mod prefs;
pub use prefs::{MemoryPreferences, Preferences, TomlPreferences, CURRENT_LANGUAGE_KEY};

pub mod router;
pub use router::{Direction, KeyAction, KeyEvent, KeyEventRouter};

pub mod session;
pub use session::{KeyOutcome, KeyboardSession, Redraw, RenderState};
