//! # lisu-keyboard
//!
//! Lisu + English soft keyboard built on lisu-keyboard-core.

pub mod commands;
pub mod presets;

// Re-export the keyboard core
pub use lisu_keyboard_core::*;

pub use commands::{parse_line, Command};
pub use presets::{
    create_engine, create_engine_from, default_config, DEFAULT_CONFIG_TOML,
    KEYCODE_MYA_TI_MYA_NA, KEYCODE_NA_PO_MYA_NA, MYA_NA, MYA_TI, NA_PO,
};
