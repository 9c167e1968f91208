//! Bundled Lisu keyboard configuration.
//!
//! The Lisu script (Fraser alphabet) marks tone with six tone letters that
//! follow the syllable. Two tone combinations are common enough to get
//! their own keys; each commits both tone letters as one insertion.
//!
//! | key | commits |
//! |---|---|
//! | `KEYCODE_MYA_TI_MYA_NA` | ꓸ (MYA TI) + ꓼ (MYA NA) |
//! | `KEYCODE_NA_PO_MYA_NA` | ꓹ (NA PO) + ꓼ (MYA NA) |

use anyhow::Context;
use lisu_keyboard_core::{KeyboardConfig, KeyboardEngine, Preferences};

/// LISU LETTER TONE MYA TI (U+A4F8)
pub const MYA_TI: char = '\u{A4F8}';
/// LISU LETTER TONE NA PO (U+A4F9)
pub const NA_PO: char = '\u{A4F9}';
/// LISU LETTER TONE MYA CYA (U+A4FA)
pub const MYA_CYA: char = '\u{A4FA}';
/// LISU LETTER TONE MYA BO (U+A4FB)
pub const MYA_BO: char = '\u{A4FB}';
/// LISU LETTER TONE MYA NA (U+A4FC)
pub const MYA_NA: char = '\u{A4FC}';
/// LISU LETTER TONE MYA JEU (U+A4FD)
pub const MYA_JEU: char = '\u{A4FD}';

pub const KEYCODE_MYA_TI_MYA_NA: i32 = -21;
pub const KEYCODE_NA_PO_MYA_NA: i32 = -22;

/// The configuration shipped with the keyboard.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../data/lisu.toml");

/// Parse the bundled configuration.
pub fn default_config() -> anyhow::Result<KeyboardConfig> {
    KeyboardConfig::from_toml_str(DEFAULT_CONFIG_TOML).context("parsing bundled lisu.toml")
}

/// Engine for the bundled Lisu + English keyboard.
pub fn create_engine(
    preferences: Box<dyn Preferences + Send>,
) -> anyhow::Result<KeyboardEngine> {
    let config = default_config()?;
    create_engine_from(&config, preferences)
}

/// Engine for a custom configuration, e.g. one loaded from disk.
pub fn create_engine_from(
    config: &KeyboardConfig,
    preferences: Box<dyn Preferences + Send>,
) -> anyhow::Result<KeyboardEngine> {
    let engine = KeyboardEngine::initialize(config, preferences)
        .context("invalid keyboard configuration")?;
    Ok(engine)
}
