//! Persistence of the last active language.
//!
//! The engine only needs an opaque integer store: it reads the stored
//! language index once when a session starts and writes it on every
//! language change.

use anyhow::Context;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Key under which the active language index is stored.
pub const CURRENT_LANGUAGE_KEY: &str = "current_language";

/// Integer key-value store provided by the host.
pub trait Preferences {
    fn get_int(&self, key: &str, default: i64) -> i64;
    fn put_int(&mut self, key: &str, value: i64);
}

/// Non-persistent store, for tests and hosts without storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: HashMap<String, i64>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

/// Store backed by a small TOML file, rewritten on every `put_int`.
#[derive(Debug, Clone)]
pub struct TomlPreferences {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl TomlPreferences {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading preferences {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("parsing preferences {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Preferences for TomlPreferences {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn put_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        if let Err(e) = self.save() {
            warn!("failed to save preferences to {}: {:#}", self.path.display(), e);
        }
    }
}
