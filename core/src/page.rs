//! Keyboard page state machine.
//!
//! Each language has three layouts (pages). Shift is one-shot: the first
//! character-producing commit consumes it and the keyboard falls back to
//! the normal page. Symbol is sticky and only an explicit page change
//! leaves it. Control keys (delete, enter, language switch, picker) never
//! touch the page.

use crate::router::KeyAction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three keyboard pages every language provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardPage {
    #[default]
    Normal,
    Shift,
    Symbol,
}

impl KeyboardPage {
    pub const ALL: [KeyboardPage; 3] = [Self::Normal, Self::Shift, Self::Symbol];

    /// Pages that persist across character commits.
    pub fn is_sticky(self) -> bool {
        !matches!(self, Self::Shift)
    }
}

impl fmt::Display for KeyboardPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Normal => "normal",
            Self::Shift => "shift",
            Self::Symbol => "symbol",
        };
        f.write_str(name)
    }
}

/// Result of feeding one action to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTransition {
    pub from: KeyboardPage,
    pub to: KeyboardPage,
}

impl PageTransition {
    /// Whether the host has to swap the displayed layout.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Tracks the active page for the active language.
#[derive(Debug, Clone, Default)]
pub struct PageStateMachine {
    page: KeyboardPage,
}

impl PageStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> KeyboardPage {
        self.page
    }

    /// Apply the page rules for a routed action and report the transition.
    pub fn apply(&mut self, action: &KeyAction) -> PageTransition {
        let from = self.page;
        let to = match action {
            KeyAction::ChangePage(target) => *target,
            KeyAction::CommitLiteral(_) | KeyAction::CommitCompound(_, _) => {
                if from.is_sticky() {
                    from
                } else {
                    KeyboardPage::Normal
                }
            }
            KeyAction::Delete
            | KeyAction::SendEnter
            | KeyAction::InvokeSystemPicker
            | KeyAction::SwitchLanguage(_) => from,
        };
        self.page = to;
        PageTransition { from, to }
    }

    /// Force the normal page, e.g. after the language changed.
    pub fn reset(&mut self) -> PageTransition {
        let from = self.page;
        self.page = KeyboardPage::Normal;
        PageTransition {
            from,
            to: KeyboardPage::Normal,
        }
    }
}
