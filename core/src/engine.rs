//! Keyboard engine: the entry point used by a host input method service.
//!
//! `KeyboardEngine` validates the configuration, owns the session and wires
//! the external collaborators (preferences, audio) around it:
//!
//! ```no_run
//! use lisu_keyboard_core::{
//!     apply_action, KeyEvent, KeyboardConfig, KeyboardEngine, MemoryPreferences, TextBuffer,
//! };
//!
//! let config = KeyboardConfig::load_toml("keyboard.toml").unwrap();
//! let mut engine = KeyboardEngine::initialize(&config, Box::new(MemoryPreferences::new()))
//!     .expect("valid keyboard configuration");
//! let state = engine.activate();
//! println!("showing {} ({})", state.language_name, state.layout);
//!
//! let mut field = TextBuffer::new();
//! let outcome = engine.handle_key(&KeyEvent::new(0xA4F8));
//! apply_action(&outcome.action, &mut field);
//! ```

use crate::catalog::LanguageCatalog;
use crate::compound::CompoundComposer;
use crate::config::KeyboardConfig;
use crate::context::AudioSink;
use crate::error::ConfigError;
use crate::feedback::{classify, FeedbackCategory};
use crate::keycodes::KeyCodeTable;
use crate::prefs::{Preferences, CURRENT_LANGUAGE_KEY};
use crate::router::{Direction, KeyEvent, KeyEventRouter};
use crate::session::{KeyOutcome, KeyboardSession, RenderState};
use std::sync::Arc;
use tracing::{debug, info};

/// Collaborators are `Send` so a host may hand the engine to another
/// thread (behind its own lock).
pub struct KeyboardEngine {
    session: KeyboardSession,
    preferences: Box<dyn Preferences + Send>,
    audio: Option<Box<dyn AudioSink + Send>>,
}

impl KeyboardEngine {
    /// Build the engine from configuration.
    ///
    /// Any configuration error aborts construction; no keyboard should be
    /// shown in that case.
    pub fn initialize(
        config: &KeyboardConfig,
        preferences: Box<dyn Preferences + Send>,
    ) -> Result<Self, ConfigError> {
        let composer = CompoundComposer::from_entries(&config.compounds)?;
        let codes = KeyCodeTable::new(&config.key_codes, &composer)?;
        let catalog = LanguageCatalog::load(&config.languages)?;
        info!(
            "keyboard initialized: {} languages ({}), {} compound keys",
            catalog.len(),
            catalog.names().join(", "),
            composer.len()
        );

        let router = KeyEventRouter::new(Arc::new(codes), Arc::new(composer));
        Ok(Self {
            session: KeyboardSession::new(router, catalog),
            preferences,
            audio: None,
        })
    }

    /// Attach a sink for key click sounds.
    pub fn with_audio(mut self, audio: Box<dyn AudioSink + Send>) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn session(&self) -> &KeyboardSession {
        &self.session
    }

    pub fn render_state(&self) -> RenderState {
        self.session.render_state()
    }

    /// Start an input session on the last used language.
    pub fn activate(&mut self) -> RenderState {
        let stored = self.preferences.get_int(CURRENT_LANGUAGE_KEY, 0);
        let state = self.session.activate(stored);
        info!(
            "session started on '{}' (index {})",
            state.language_name, state.language_index
        );
        state
    }

    pub fn deactivate(&mut self) {
        self.session.deactivate();
    }

    /// Click category for a key code.
    pub fn feedback(&self, code: i32) -> FeedbackCategory {
        classify(code, self.session.router().codes())
    }

    /// Handle one key press: click, route, update state.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let category = self.feedback(event.code);
        if let Some(audio) = self.audio.as_mut() {
            audio.play(category);
        }

        let outcome = self.session.process(event);
        if outcome.language_changed {
            self.remember_language(outcome.state.language_index);
        }
        outcome
    }

    /// Horizontal swipe over the keyboard: cycle the language.
    pub fn swipe(&mut self, direction: Direction) -> KeyOutcome {
        let outcome = self.session.switch_language(direction);
        if outcome.language_changed {
            self.remember_language(outcome.state.language_index);
        }
        outcome
    }

    /// Pick a language from the language list.
    pub fn select_language(&mut self, index: usize) -> Option<RenderState> {
        let before = self.session.catalog().active_index();
        let state = self.session.select_language(index)?;
        if state.language_index != before {
            self.remember_language(state.language_index);
        }
        Some(state)
    }

    fn remember_language(&mut self, index: usize) {
        debug!(index, "storing active language");
        self.preferences.put_int(CURRENT_LANGUAGE_KEY, index as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompoundEntry, KeyCodeConfig, LanguageEntry};
    use crate::page::KeyboardPage;
    use crate::prefs::MemoryPreferences;
    use crate::router::KeyAction;
    use std::sync::Mutex;

    const SWITCH_LANGUAGE: i32 = -13;

    /// Preferences the test keeps a handle on after moving a clone into
    /// the engine. `writes` counts `put_int` calls.
    #[derive(Clone, Default)]
    struct SharedPrefs {
        store: Arc<Mutex<MemoryPreferences>>,
        writes: Arc<Mutex<usize>>,
    }

    impl SharedPrefs {
        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }
    }

    impl Preferences for SharedPrefs {
        fn get_int(&self, key: &str, default: i64) -> i64 {
            self.store.lock().unwrap().get_int(key, default)
        }

        fn put_int(&mut self, key: &str, value: i64) {
            *self.writes.lock().unwrap() += 1;
            self.store.lock().unwrap().put_int(key, value);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingAudio(Arc<Mutex<Vec<FeedbackCategory>>>);

    impl AudioSink for RecordingAudio {
        fn play(&mut self, category: FeedbackCategory) {
            self.0.lock().unwrap().push(category);
        }
    }

    fn config() -> KeyboardConfig {
        KeyboardConfig {
            key_codes: KeyCodeConfig {
                switch_language: Some(SWITCH_LANGUAGE),
                ..KeyCodeConfig::default()
            },
            languages: vec![
                LanguageEntry::new("Lisu", "lisu_n", "lisu_s", "lisu_y"),
                LanguageEntry::new("English", "en_n", "en_s", "en_y"),
            ],
            compounds: vec![CompoundEntry::new(-20, 0xA4F8, 0xA4FC)],
        }
    }

    fn assert_send<T: Send>() {}

    #[test]
    fn test_engine_is_send() {
        assert_send::<KeyboardEngine>();
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let mut bad = config();
        bad.languages[0].symbol = None;
        assert!(matches!(
            KeyboardEngine::initialize(&bad, Box::new(MemoryPreferences::new())),
            Err(ConfigError::MissingLayout { .. })
        ));

        let mut bad = config();
        bad.compounds[0].second = None;
        assert!(matches!(
            KeyboardEngine::initialize(&bad, Box::new(MemoryPreferences::new())),
            Err(ConfigError::IncompleteCompound { code: -20 })
        ));
    }

    #[test]
    fn test_activate_reads_stored_language() {
        let prefs = SharedPrefs::default();
        prefs.store.lock().unwrap().put_int(CURRENT_LANGUAGE_KEY, 1);
        let mut engine = KeyboardEngine::initialize(&config(), Box::new(prefs)).unwrap();
        assert_eq!(engine.activate().language_name, "English");
    }

    #[test]
    fn test_swipe_persists_language() {
        let prefs = SharedPrefs::default();
        let mut engine = KeyboardEngine::initialize(&config(), Box::new(prefs.clone())).unwrap();
        engine.activate();

        let outcome = engine.swipe(Direction::Backward);
        assert_eq!(outcome.state.language_index, 1);
        assert_eq!(prefs.get_int(CURRENT_LANGUAGE_KEY, 0), 1);

        engine.select_language(0).unwrap();
        assert_eq!(prefs.get_int(CURRENT_LANGUAGE_KEY, 9), 0);
        assert_eq!(prefs.writes(), 2);

        // re-picking the active language stores nothing
        engine.select_language(0).unwrap();
        assert_eq!(prefs.writes(), 2);

        assert!(engine.select_language(2).is_none());
        assert_eq!(engine.render_state().language_index, 0);
        assert_eq!(prefs.writes(), 2);
    }

    #[test]
    fn test_language_key_persists_language() {
        let prefs = SharedPrefs::default();
        let mut engine = KeyboardEngine::initialize(&config(), Box::new(prefs.clone())).unwrap();
        engine.activate();

        let outcome = engine.handle_key(&KeyEvent::new(SWITCH_LANGUAGE));
        assert!(outcome.language_changed);
        assert_eq!(outcome.state.language_index, 1);
        assert_eq!(prefs.get_int(CURRENT_LANGUAGE_KEY, -1), 1);

        let event = KeyEvent::new(SWITCH_LANGUAGE).with_swipe(Direction::Backward);
        engine.handle_key(&event);
        assert_eq!(prefs.get_int(CURRENT_LANGUAGE_KEY, -1), 0);
        assert_eq!(prefs.writes(), 2);

        // keys that do not switch language never touch preferences
        for code in [0x41, -1, -5, -4, -20] {
            engine.handle_key(&KeyEvent::new(code));
        }
        assert_eq!(prefs.writes(), 2);
    }

    #[test]
    fn test_single_language_switch_stores_nothing() {
        let mut single = config();
        single.languages.truncate(1);
        let prefs = SharedPrefs::default();
        let mut engine = KeyboardEngine::initialize(&single, Box::new(prefs.clone())).unwrap();
        engine.activate();
        engine.handle_key(&KeyEvent::new(-2));

        let outcome = engine.handle_key(&KeyEvent::new(SWITCH_LANGUAGE));
        assert!(!outcome.language_changed);
        assert_eq!(outcome.state.language_index, 0);
        assert_eq!(outcome.state.page, KeyboardPage::Normal);

        engine.swipe(Direction::Backward);
        assert_eq!(prefs.writes(), 0);
        assert_eq!(prefs.get_int(CURRENT_LANGUAGE_KEY, -1), -1);
    }

    #[test]
    fn test_handle_key_plays_feedback() {
        let audio = RecordingAudio::default();
        let mut engine = KeyboardEngine::initialize(&config(), Box::new(MemoryPreferences::new()))
            .unwrap()
            .with_audio(Box::new(audio.clone()));
        engine.activate();

        for code in [32, -4, -5, 0xA4F8, -1] {
            engine.handle_key(&KeyEvent::new(code));
        }
        assert_eq!(
            *audio.0.lock().unwrap(),
            vec![
                FeedbackCategory::Space,
                FeedbackCategory::Return,
                FeedbackCategory::Delete,
                FeedbackCategory::Standard,
                FeedbackCategory::Standard,
            ]
        );
        assert_eq!(engine.render_state().page, KeyboardPage::Shift);

        let outcome = engine.handle_key(&KeyEvent::new(-20));
        assert_eq!(outcome.action, KeyAction::CommitCompound(0xA4F8, 0xA4FC));
        assert_eq!(outcome.state.page, KeyboardPage::Normal);
    }
}
