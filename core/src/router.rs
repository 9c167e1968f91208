//! Key event classification.
//!
//! The router turns one raw key event into exactly one `KeyAction`. It is
//! pure: it reads the key-code table and the compound composer and never
//! touches session state, so it can be shared freely.

use crate::compound::CompoundComposer;
use crate::context::SelectionState;
use crate::keycodes::{KeyCodeTable, KeyRole};
use crate::page::KeyboardPage;
use std::sync::Arc;
use tracing::debug;

/// Direction of a language switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    Backward,
    #[default]
    Forward,
}

impl Direction {
    /// Signed step applied to the active language index.
    pub fn offset(self) -> isize {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }

    /// Map a signed swipe value to a direction; zero means no swipe.
    pub fn from_offset(offset: i32) -> Option<Self> {
        match offset.signum() {
            -1 => Some(Self::Backward),
            1 => Some(Self::Forward),
            _ => None,
        }
    }
}

/// What the host should do for a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Remove the selection, or one unit before the cursor.
    Delete,
    ChangePage(KeyboardPage),
    SwitchLanguage(Direction),
    /// Show the system input method picker.
    InvokeSystemPicker,
    /// Send a hardware-equivalent Enter key.
    SendEnter,
    /// Commit the key code as a codepoint.
    CommitLiteral(i32),
    /// Commit two codepoints as one insertion.
    CommitCompound(i32, i32),
}

impl KeyAction {
    /// Whether this action produces text (and so consumes a one-shot shift).
    pub fn is_commit(&self) -> bool {
        matches!(self, Self::CommitLiteral(_) | Self::CommitCompound(_, _))
    }

    /// Text to insert for commit actions.
    ///
    /// Returns `None` for non-commit actions and for codes that are not
    /// Unicode scalar values.
    pub fn commit_text(&self) -> Option<String> {
        match *self {
            Self::CommitLiteral(code) => codepoint(code).map(String::from),
            Self::CommitCompound(first, second) => {
                let mut text = String::with_capacity(8);
                text.push(codepoint(first)?);
                text.push(codepoint(second)?);
                Some(text)
            }
            _ => None,
        }
    }
}

fn codepoint(code: i32) -> Option<char> {
    u32::try_from(code).ok().and_then(char::from_u32)
}

/// A key press as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Primary key code.
    pub code: i32,
    /// Alternate codes reported by the key (unused for classification).
    pub alt_codes: Vec<i32>,
    /// Selection state of the text field at the time of the press.
    pub selection: SelectionState,
    /// Direction of an accompanying swipe gesture, if any.
    pub swipe: Option<Direction>,
}

impl KeyEvent {
    pub fn new(code: i32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: SelectionState) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_swipe(mut self, direction: Direction) -> Self {
        self.swipe = Some(direction);
        self
    }

    pub fn with_alt_codes(mut self, alt_codes: Vec<i32>) -> Self {
        self.alt_codes = alt_codes;
        self
    }
}

/// Classifies key events against the session's key-code table.
#[derive(Debug, Clone)]
pub struct KeyEventRouter {
    codes: Arc<KeyCodeTable>,
    composer: Arc<CompoundComposer>,
}

impl KeyEventRouter {
    pub fn new(codes: Arc<KeyCodeTable>, composer: Arc<CompoundComposer>) -> Self {
        Self { codes, composer }
    }

    pub fn codes(&self) -> &KeyCodeTable {
        &self.codes
    }

    pub fn composer(&self) -> &CompoundComposer {
        &self.composer
    }

    /// Classify a key event. Total: unknown codes commit themselves.
    pub fn route(&self, event: &KeyEvent) -> KeyAction {
        let action = self.classify(event);
        debug!(code = event.code, ?action, "routed key");
        action
    }

    fn classify(&self, event: &KeyEvent) -> KeyAction {
        let role = self.codes.role(event.code);

        // 1. delete
        if role == Some(KeyRole::Delete) {
            return KeyAction::Delete;
        }

        // 2. page control
        if let Some(page) = role.and_then(KeyRole::page) {
            return KeyAction::ChangePage(page);
        }

        // 3. compound triggers
        if role == Some(KeyRole::Compound) {
            if let Some((first, second)) = self.composer.resolve(event.code) {
                return KeyAction::CommitCompound(first, second);
            }
        }

        // 4. language / input method switching
        match role {
            Some(KeyRole::SwitchLanguage) => {
                return KeyAction::SwitchLanguage(event.swipe.unwrap_or_default());
            }
            Some(KeyRole::SwitchInputMethod) => return KeyAction::InvokeSystemPicker,
            _ => {}
        }

        // 5. enter
        if role == Some(KeyRole::Done) {
            return KeyAction::SendEnter;
        }

        // 6. literal
        KeyAction::CommitLiteral(event.code)
    }
}
