//! Keyboard session state.
//!
//! `KeyboardSession` owns the mutable part of an input session: the active
//! language index and the page state machine. Every operation returns the
//! new render state together with an explicit redraw instruction, so the
//! host decides when and what to redraw instead of reacting to setters.

use crate::catalog::LanguageCatalog;
use crate::page::{KeyboardPage, PageStateMachine};
use crate::router::{Direction, KeyAction, KeyEvent, KeyEventRouter};

/// What the host needs to draw the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub language_index: usize,
    pub language_name: String,
    pub page: KeyboardPage,
    /// Layout identifier for `page` of the active language.
    pub layout: String,
}

/// Redraw instruction accompanying every outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing visible changed.
    None,
    /// Same language, different page.
    Page,
    /// Language (and with it the whole layout set) changed.
    Keyboard,
}

/// Result of one key event (or gesture).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub action: KeyAction,
    pub state: RenderState,
    pub redraw: Redraw,
    /// Whether the active language index moved.
    pub language_changed: bool,
}

#[derive(Debug, Clone)]
pub struct KeyboardSession {
    router: KeyEventRouter,
    catalog: LanguageCatalog,
    pages: PageStateMachine,
    active: bool,
}

impl KeyboardSession {
    pub fn new(router: KeyEventRouter, catalog: LanguageCatalog) -> Self {
        Self {
            router,
            catalog,
            pages: PageStateMachine::new(),
            active: false,
        }
    }

    pub fn router(&self) -> &KeyEventRouter {
        &self.router
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn page(&self) -> KeyboardPage {
        self.pages.page()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a session on the persisted language, normal page.
    pub fn activate(&mut self, stored_language: i64) -> RenderState {
        self.catalog.restore(stored_language);
        self.pages.reset();
        self.active = true;
        self.render_state()
    }

    /// End the session. Page state does not outlive it.
    pub fn deactivate(&mut self) {
        self.pages.reset();
        self.active = false;
    }

    pub fn render_state(&self) -> RenderState {
        let language = self.catalog.current();
        let page = self.pages.page();
        RenderState {
            language_index: self.catalog.active_index(),
            language_name: language.name().to_string(),
            page,
            layout: language.layout(page).to_string(),
        }
    }

    /// Route a key event and apply it to the session state.
    pub fn process(&mut self, event: &KeyEvent) -> KeyOutcome {
        let action = self.router.route(event);
        if let KeyAction::SwitchLanguage(direction) = action {
            return self.switch_language(direction);
        }

        let transition = self.pages.apply(&action);
        KeyOutcome {
            action,
            state: self.render_state(),
            redraw: if transition.changed() {
                Redraw::Page
            } else {
                Redraw::None
            },
            language_changed: false,
        }
    }

    /// Cycle the language (swipe gesture or language key). Always resets
    /// the page to normal.
    pub fn switch_language(&mut self, direction: Direction) -> KeyOutcome {
        let before = self.catalog.active_index();
        let after = self.catalog.next(direction);
        self.pages.reset();
        KeyOutcome {
            action: KeyAction::SwitchLanguage(direction),
            state: self.render_state(),
            redraw: Redraw::Keyboard,
            language_changed: before != after,
        }
    }

    /// Pick a language from the language list. `None` if out of range.
    pub fn select_language(&mut self, index: usize) -> Option<RenderState> {
        self.catalog.select(index)?;
        self.pages.reset();
        Some(self.render_state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compound::CompoundComposer;
    use crate::config::{CompoundEntry, KeyCodeConfig, LanguageEntry};
    use crate::keycodes::KeyCodeTable;
    use std::sync::Arc;

    const SHIFT: i32 = -1;
    const SYMBOL: i32 = -2;
    const DELETE: i32 = -5;
    const ABC: i32 = -11;
    const SWITCH_LANGUAGE: i32 = -13;
    const COMPOUND_1: i32 = -20;

    fn session() -> KeyboardSession {
        let composer =
            CompoundComposer::from_entries(&[CompoundEntry::new(COMPOUND_1, 0x1001, 0x1002)])
                .unwrap();
        let codes = KeyCodeConfig {
            switch_language: Some(SWITCH_LANGUAGE),
            ..KeyCodeConfig::default()
        };
        let table = KeyCodeTable::new(&codes, &composer).unwrap();
        let router = KeyEventRouter::new(Arc::new(table), Arc::new(composer));
        let catalog = LanguageCatalog::load(&[
            LanguageEntry::new("Lisu", "lisu_n", "lisu_s", "lisu_y"),
            LanguageEntry::new("English", "en_n", "en_s", "en_y"),
        ])
        .unwrap();
        KeyboardSession::new(router, catalog)
    }

    fn press(session: &mut KeyboardSession, code: i32) -> KeyOutcome {
        session.process(&KeyEvent::new(code))
    }

    #[test]
    fn test_activate_restores_language() {
        let mut session = session();
        assert!(!session.is_active());
        let state = session.activate(1);
        assert!(session.is_active());
        assert_eq!(state.language_name, "English");
        assert_eq!(state.page, KeyboardPage::Normal);
        assert_eq!(state.layout, "en_n");

        assert_eq!(session.activate(9).language_index, 0);
    }

    #[test]
    fn test_shift_then_letter() {
        let mut session = session();
        session.activate(0);

        let outcome = press(&mut session, SHIFT);
        assert_eq!(outcome.action, KeyAction::ChangePage(KeyboardPage::Shift));
        assert_eq!(outcome.redraw, Redraw::Page);
        assert_eq!(outcome.state.layout, "lisu_s");

        let outcome = press(&mut session, 0x41);
        assert_eq!(outcome.action, KeyAction::CommitLiteral(0x41));
        assert_eq!(outcome.redraw, Redraw::Page);
        assert_eq!(outcome.state.page, KeyboardPage::Normal);

        let outcome = press(&mut session, 0x42);
        assert_eq!(outcome.redraw, Redraw::None);
    }

    #[test]
    fn test_delete_keeps_shift() {
        let mut session = session();
        session.activate(0);
        press(&mut session, SHIFT);
        let outcome = press(&mut session, DELETE);
        assert_eq!(outcome.action, KeyAction::Delete);
        assert_eq!(outcome.redraw, Redraw::None);
        assert_eq!(session.page(), KeyboardPage::Shift);
    }

    #[test]
    fn test_language_key_switches_and_resets_page() {
        let mut session = session();
        session.activate(0);
        press(&mut session, SYMBOL);

        let outcome = press(&mut session, SWITCH_LANGUAGE);
        assert_eq!(
            outcome.action,
            KeyAction::SwitchLanguage(Direction::Forward)
        );
        assert!(outcome.language_changed);
        assert_eq!(outcome.redraw, Redraw::Keyboard);
        assert_eq!(outcome.state.language_name, "English");
        assert_eq!(outcome.state.page, KeyboardPage::Normal);

        let outcome =
            session.process(&KeyEvent::new(SWITCH_LANGUAGE).with_swipe(Direction::Backward));
        assert_eq!(outcome.state.language_name, "Lisu");
    }

    #[test]
    fn test_compound_key_consumes_shift() {
        let mut session = session();
        session.activate(0);
        press(&mut session, SHIFT);
        let outcome = press(&mut session, COMPOUND_1);
        assert_eq!(outcome.action, KeyAction::CommitCompound(0x1001, 0x1002));
        assert_eq!(outcome.state.page, KeyboardPage::Normal);
    }

    #[test]
    fn test_select_language() {
        let mut session = session();
        session.activate(0);
        press(&mut session, SYMBOL);
        let state = session.select_language(1).unwrap();
        assert_eq!(state.language_name, "English");
        assert_eq!(state.page, KeyboardPage::Normal);
        assert!(session.select_language(2).is_none());
        assert_eq!(session.catalog().active_index(), 1);
    }

    #[test]
    fn test_deactivate_resets_page() {
        let mut session = session();
        session.activate(0);
        press(&mut session, SYMBOL);
        press(&mut session, ABC);
        press(&mut session, SYMBOL);
        session.deactivate();
        assert!(!session.is_active());
        assert_eq!(session.page(), KeyboardPage::Normal);
    }
}
