// Configuration module
// Internal representation of user configuration

use std::collections::HashMap;
use std::time::Duration;

use crate::core::input::Key;
use crate::core::lookup::DEFAULT_DEBOUNCE;

pub const DEFAULT_THEME: &str = "default";
pub const DEFAULT_DROPDOWN_HEIGHT: usize = 8;
pub const DEFAULT_TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Key (in `Key` display form, e.g. `C-s`) to command name
    pub keybindings: HashMap<String, String>,
    pub settings: HashMap<String, ConfigValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl Config {
    /// Bind a key to a command. `^S` and `C-s` name the same key.
    pub fn bind(&mut self, key: &str, command: &str) {
        let key = key
            .parse::<Key>()
            .map_or_else(|_| key.to_string(), |k| k.to_string());
        self.keybindings.insert(key, command.to_string());
    }

    /// Command bound to `key`, if any
    pub fn command_for(&self, key: &Key) -> Option<&str> {
        self.keybindings.get(&key.to_string()).map(String::as_str)
    }

    /// Set a configuration value
    pub fn set<V: Into<ConfigValue>>(&mut self, key: &str, value: V) {
        self.settings.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.settings.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| match v {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| match v {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        })
    }

    // ==================== Typed Settings ====================

    pub fn theme(&self) -> &str {
        self.get_string("theme").unwrap_or(DEFAULT_THEME)
    }

    /// Quiet period before refreshing known names
    pub fn debounce(&self) -> Duration {
        self.get_int("debounce_ms")
            .and_then(|ms| u64::try_from(ms).ok())
            .map_or(DEFAULT_DEBOUNCE, Duration::from_millis)
    }

    /// Maximum visible rows of the suggestion dropdown
    pub fn dropdown_height(&self) -> usize {
        self.positive_int("dropdown_height")
            .unwrap_or(DEFAULT_DROPDOWN_HEIGHT)
    }

    pub fn tab_width(&self) -> usize {
        self.positive_int("tab_width").unwrap_or(DEFAULT_TAB_WIDTH)
    }

    fn positive_int(&self, key: &str) -> Option<usize> {
        self.get_int(key)
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n > 0)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}
