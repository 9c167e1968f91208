//! Key-code table.
//!
//! Built once per session from `KeyCodeConfig` and the compound triggers,
//! then only read. Lookup is a single hash probe from code to role; the
//! table refuses configurations where one code would belong to two roles,
//! which keeps the router's classification unambiguous.

use crate::compound::CompoundComposer;
use crate::config::KeyCodeConfig;
use crate::error::ConfigError;
use crate::page::KeyboardPage;
use std::collections::HashMap;
use std::fmt;

/// Line feed; some layouts emit it instead of the done key.
pub const LINE_FEED: i32 = 10;

/// What a registered key code does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Delete,
    Done,
    Shift,
    Unshift,
    Symbol,
    Abc,
    Space,
    SwitchLanguage,
    SwitchInputMethod,
    Compound,
}

impl KeyRole {
    /// Target page for page-control roles.
    pub fn page(self) -> Option<KeyboardPage> {
        match self {
            Self::Abc | Self::Unshift => Some(KeyboardPage::Normal),
            Self::Shift => Some(KeyboardPage::Shift),
            Self::Symbol => Some(KeyboardPage::Symbol),
            _ => None,
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Delete => "delete",
            Self::Done => "done",
            Self::Shift => "shift",
            Self::Unshift => "unshift",
            Self::Symbol => "symbol",
            Self::Abc => "abc",
            Self::Space => "space",
            Self::SwitchLanguage => "switch_language",
            Self::SwitchInputMethod => "switch_input_method",
            Self::Compound => "compound",
        };
        f.write_str(name)
    }
}

/// Immutable code -> role mapping.
#[derive(Debug, Clone)]
pub struct KeyCodeTable {
    codes: KeyCodeConfig,
    roles: HashMap<i32, KeyRole>,
}

impl KeyCodeTable {
    pub fn new(codes: &KeyCodeConfig, composer: &CompoundComposer) -> Result<Self, ConfigError> {
        let mut table = Self {
            codes: codes.clone(),
            roles: HashMap::new(),
        };
        table.register(codes.delete, KeyRole::Delete)?;
        table.register(codes.done, KeyRole::Done)?;
        table.register(codes.shift, KeyRole::Shift)?;
        table.register(codes.unshift, KeyRole::Unshift)?;
        table.register(codes.symbol, KeyRole::Symbol)?;
        table.register(codes.abc, KeyRole::Abc)?;
        table.register(codes.space, KeyRole::Space)?;
        table.register(codes.switch_input_method, KeyRole::SwitchInputMethod)?;
        if let Some(code) = codes.switch_language {
            table.register(code, KeyRole::SwitchLanguage)?;
        }

        let mut triggers: Vec<i32> = composer.triggers().collect();
        triggers.sort_unstable();
        for code in triggers {
            table.register(code, KeyRole::Compound)?;
        }
        Ok(table)
    }

    fn register(&mut self, code: i32, role: KeyRole) -> Result<(), ConfigError> {
        if let Some(existing) = self.roles.insert(code, role) {
            return Err(ConfigError::DuplicateKeyCode {
                code,
                first: existing.to_string(),
                second: role.to_string(),
            });
        }
        Ok(())
    }

    pub fn role(&self, code: i32) -> Option<KeyRole> {
        self.roles.get(&code).copied()
    }

    pub fn delete(&self) -> i32 {
        self.codes.delete
    }

    pub fn done(&self) -> i32 {
        self.codes.done
    }

    pub fn space(&self) -> i32 {
        self.codes.space
    }

    pub fn shift(&self) -> i32 {
        self.codes.shift
    }

    pub fn unshift(&self) -> i32 {
        self.codes.unshift
    }

    pub fn symbol(&self) -> i32 {
        self.codes.symbol
    }

    pub fn abc(&self) -> i32 {
        self.codes.abc
    }

    pub fn switch_input_method(&self) -> i32 {
        self.codes.switch_input_method
    }

    pub fn switch_language(&self) -> Option<i32> {
        self.codes.switch_language
    }

    /// First code registered for a role (compound roles excluded).
    pub fn code_for(&self, role: KeyRole) -> Option<i32> {
        match role {
            KeyRole::Delete => Some(self.codes.delete),
            KeyRole::Done => Some(self.codes.done),
            KeyRole::Shift => Some(self.codes.shift),
            KeyRole::Unshift => Some(self.codes.unshift),
            KeyRole::Symbol => Some(self.codes.symbol),
            KeyRole::Abc => Some(self.codes.abc),
            KeyRole::Space => Some(self.codes.space),
            KeyRole::SwitchInputMethod => Some(self.codes.switch_input_method),
            KeyRole::SwitchLanguage => self.codes.switch_language,
            KeyRole::Compound => None,
        }
    }
}
