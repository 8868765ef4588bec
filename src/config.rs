//! Configuration for extconsole.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.extconsole/config.toml`
//! - The default `MessageConfig` used by `Console`
//! - Extra color shortcuts registered after the built-in set
//!
//! # Configuration File
//!
//! ```toml
//! [message]
//! add_prefix = true
//! hide_blank_lines = true
//!
//! [shortcuts]
//! "&p" = { r = 255, g = 105, b = 180 }
//! "&g" = { r = 128, g = 128, b = 128 }
//!
//! [window]
//! hidden = false
//! ```
//!
//! Missing keys take their defaults. A file that cannot be read or parsed is
//! ignored with a warning in the log.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::message::MessageConfig;
use crate::style::escape;
use crate::style::ShortcutRegistry;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default message formatting switches
    pub message: MessageConfig,
    /// Extra shortcuts, token -> color
    pub shortcuts: BTreeMap<String, Color>,
    /// Console window settings
    pub window: WindowConfig,
}

/// Console window configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Hide the console window on setup (Windows only)
    pub hidden: bool,
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Foreground escape sequence for this color
    pub fn escape(&self) -> String {
        escape::rgb8(self.r, self.g, self.b)
    }
}

impl Config {
    /// Load configuration from the default file
    pub fn load() -> Self {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_toml(&content) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> io::Result<()> {
        let path = Self::get_config_path().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config path")
        })?;
        self.save_to(&path)
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, content)
    }

    /// Register the configured shortcuts, in token order
    pub fn register_shortcuts(&self, registry: &mut ShortcutRegistry) -> Result<()> {
        for (token, color) in &self.shortcuts {
            registry.register(token.as_str(), color.escape())?;
        }
        Ok(())
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        let dir = config_dir()?;
        if !dir.exists() {
            let _ = fs::create_dir_all(&dir);
        }
        Some(dir.join("config.toml"))
    }
}

/// Directory holding the config file and log, `~/.extconsole`
pub fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".extconsole"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.message, MessageConfig::default());
        assert!(config.shortcuts.is_empty());
        assert!(!config.window.hidden);
    }

    #[test]
    fn test_partial_message_section() {
        let config = Config::from_toml(
            r#"
            [message]
            hide_blank_lines = true
            add_prefix = false
            "#,
        )
        .unwrap();
        assert!(config.message.hide_blank_lines);
        assert!(!config.message.add_prefix);
        assert!(config.message.add_shortcuts);
        assert!(config.message.append_reset);
    }

    #[test]
    fn test_shortcut_table() {
        let config = Config::from_toml(
            r#"
            [shortcuts]
            "&p" = { r = 255, g = 105, b = 180 }
            "&g" = { r = 1, g = 2, b = 3 }
            "#,
        )
        .unwrap();
        assert_eq!(config.shortcuts["&p"], Color::new(255, 105, 180));

        let mut registry = ShortcutRegistry::new();
        config.register_shortcuts(&mut registry).unwrap();
        let tokens: Vec<&str> = registry.iter().map(|s| s.token.as_str()).collect();
        assert_eq!(tokens, vec!["&g", "&p"]);
        assert_eq!(registry.lookup("&p"), Some("\x1b[38;2;255;105;180m"));
    }

    #[test]
    fn test_shortcut_colliding_with_default() {
        let config = Config::from_toml("[shortcuts]\n\"&c\" = { r = 1, g = 2, b = 3 }\n").unwrap();
        let mut registry = ShortcutRegistry::with_defaults();
        assert!(matches!(
            config.register_shortcuts(&mut registry),
            Err(ConsoleError::DuplicateToken(ref t)) if t == "&c"
        ));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        assert!(Config::from_toml("[message\nadd_prefix = 3").is_err());
        assert!(Config::from_toml("[message]\nadd_prefix = 3").is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.message.hide_blank_lines = true;
        config.shortcuts.insert("&p".to_string(), Color::new(9, 8, 7));
        config.window.hidden = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert_eq!(Config::load_from(&missing), Config::default());

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "shortcuts = 12").unwrap();
        assert_eq!(Config::load_from(&broken), Config::default());
    }
}
