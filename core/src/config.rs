//! Keyboard configuration document.
//!
//! The configuration is the already-resolved form of the layout resources:
//! language groups with their three layout identifiers, the named key codes
//! and the compound key definitions. It is plain serde data loaded from TOML;
//! validation happens when the engine is built from it (see `ConfigError`).
//!
//! ```toml
//! [key_codes]
//! unshift = -10
//! abc = -11
//! switch_input_method = -12
//!
//! [[languages]]
//! name = "Lisu"
//! normal = "lisu_normal"
//! shift = "lisu_shift"
//! symbol = "lisu_symbol"
//!
//! [[compounds]]
//! code = -20
//! first = 0xA4F8
//! second = 0xA4FC
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Android `Keyboard.KEYCODE_SHIFT`.
pub const DEFAULT_SHIFT_CODE: i32 = -1;
/// Android `Keyboard.KEYCODE_MODE_CHANGE`.
pub const DEFAULT_SYMBOL_CODE: i32 = -2;
/// Android `Keyboard.KEYCODE_DONE`.
pub const DEFAULT_DONE_CODE: i32 = -4;
/// Android `Keyboard.KEYCODE_DELETE`.
pub const DEFAULT_DELETE_CODE: i32 = -5;
pub const DEFAULT_UNSHIFT_CODE: i32 = -10;
pub const DEFAULT_ABC_CODE: i32 = -11;
pub const DEFAULT_SWITCH_INPUT_METHOD_CODE: i32 = -12;
pub const DEFAULT_SPACE_CODE: i32 = 32;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct KeyboardConfig {
    /// Named key codes.
    #[serde(default)]
    pub key_codes: KeyCodeConfig,

    /// Language groups in catalog order.
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,

    /// Compound keys committing two codepoints at once.
    #[serde(default)]
    pub compounds: Vec<CompoundEntry>,
}

/// One language group as found in the layout resources.
///
/// Every field is optional at the serde level so that an incomplete entry
/// is reported as a `ConfigError` naming the missing piece rather than as
/// a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl LanguageEntry {
    /// Complete entry with all three layouts.
    pub fn new(
        name: impl Into<String>,
        normal: impl Into<String>,
        shift: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            normal: Some(normal.into()),
            shift: Some(shift.into()),
            symbol: Some(symbol.into()),
        }
    }
}

/// Named key codes.
///
/// Framework keys default to the Android soft keyboard constants; the
/// custom keys default to codes in the negative range no glyph can use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyCodeConfig {
    pub delete: i32,
    pub done: i32,
    pub shift: i32,
    pub unshift: i32,
    pub symbol: i32,
    pub abc: i32,
    pub space: i32,
    pub switch_input_method: i32,
    /// Optional in-keyboard language switch key. Without it languages are
    /// only switched by swipe or from the language list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_language: Option<i32>,
}

impl Default for KeyCodeConfig {
    fn default() -> Self {
        Self {
            delete: DEFAULT_DELETE_CODE,
            done: DEFAULT_DONE_CODE,
            shift: DEFAULT_SHIFT_CODE,
            unshift: DEFAULT_UNSHIFT_CODE,
            symbol: DEFAULT_SYMBOL_CODE,
            abc: DEFAULT_ABC_CODE,
            space: DEFAULT_SPACE_CODE,
            switch_input_method: DEFAULT_SWITCH_INPUT_METHOD_CODE,
            switch_language: None,
        }
    }
}

/// A compound key: one trigger code, two component codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompoundEntry {
    pub code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<i32>,
}

impl CompoundEntry {
    pub fn new(code: i32, first: i32, second: i32) -> Self {
        Self {
            code,
            first: Some(first),
            second: Some(second),
        }
    }
}

impl KeyboardConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading keyboard config {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("parsing keyboard config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("writing keyboard config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
