//! Leveled message formatting
//!
//! Turns `(source, message, level)` into a colored line such as
//! `[server Warning] disk almost full`, expanding color shortcuts on the way.

use serde::{Deserialize, Serialize};

use super::LogLevel;
use crate::error::Result;
use crate::style::escape::{self, POSITIVE, RESET};
use crate::style::ShortcutRegistry;
use crate::term::Terminal;

/// Switches applied by [`MessageFormatter::format`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    /// Expand shortcuts in the message body
    pub add_shortcuts: bool,
    /// Expand shortcuts in the prefix (including the source tag)
    pub add_shortcuts_to_prefix: bool,
    /// End the text with a reset and inverse-off
    pub append_reset: bool,
    /// Suppress blank messages and trim the rest
    pub hide_blank_lines: bool,
    /// Repeat the prefix after every embedded newline
    pub add_prefix_to_new_lines: bool,
    /// Start the text with the prefix
    pub add_prefix: bool,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            add_shortcuts: true,
            add_shortcuts_to_prefix: true,
            append_reset: true,
            hide_blank_lines: false,
            add_prefix_to_new_lines: true,
            add_prefix: true,
        }
    }
}

/// Output stream a message is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Out,
    Err,
}

/// Color wrapped around the brackets and source tag
pub fn prefix_color() -> String {
    escape::rgb(0.0, 1.0, 1.0)
}

pub fn warning_color() -> String {
    escape::rgb(1.0, 1.0, 0.0)
}

pub fn error_color() -> String {
    escape::rgb(1.0, 0.0, 0.0)
}

pub fn green_text_color() -> String {
    escape::rgb(0.0, 1.0, 0.13333333333)
}

/// Base color of a level
pub fn level_color(level: LogLevel) -> String {
    match level {
        LogLevel::Critical | LogLevel::Error | LogLevel::Fail => error_color(),
        LogLevel::Warning => warning_color(),
        // Palette aqua, same as `&b`
        LogLevel::Info => escape::rgb(0.3333333, 1.0, 1.0),
        LogLevel::Debug => escape::rgb(0.70, 0.70, 0.70),
        LogLevel::Success | LogLevel::Input => green_text_color(),
    }
}

/// Bracketed `[source Level]` decoration for a level.
///
/// Critical, Error, Warning and Debug leave the level color active so the
/// message inherits it. The other levels end with a reset.
pub fn prefix(source: &str, level: LogLevel) -> String {
    let p = prefix_color();
    let c = level_color(level);
    let label = level.label();
    match level {
        LogLevel::Critical | LogLevel::Error | LogLevel::Warning | LogLevel::Debug => {
            format!("{p}[{source} {c}{label}{p}]{c}")
        }
        LogLevel::Info | LogLevel::Success | LogLevel::Fail => {
            format!("{p}[{source} {c}{label}{p}]{RESET}")
        }
        LogLevel::Input => format!("{p}[{c}{source} {label}{p}]{RESET}"),
    }
}

/// Formats and writes leveled messages using a shortcut registry
#[derive(Clone, Copy, Debug)]
pub struct MessageFormatter<'a> {
    registry: &'a ShortcutRegistry,
}

impl<'a> MessageFormatter<'a> {
    pub fn new(registry: &'a ShortcutRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a ShortcutRegistry {
        self.registry
    }

    /// Render a message, or `None` when `hide_blank_lines` suppresses it
    pub fn format(
        &self,
        source: &str,
        message: &str,
        level: LogLevel,
        config: &MessageConfig,
    ) -> Option<String> {
        if config.hide_blank_lines && message.trim().is_empty() {
            return None;
        }
        let message = if config.hide_blank_lines {
            message.trim()
        } else {
            message
        };

        let mut prefix = prefix(source, level);
        let mut message = if config.add_shortcuts {
            self.registry.expand(message)
        } else {
            message.to_string()
        };
        if config.add_shortcuts_to_prefix {
            prefix = self.registry.expand(&prefix);
        }
        if config.add_prefix_to_new_lines {
            message = message.replace('\n', &format!("\n{} ", prefix));
        }

        let mut text = if config.add_prefix {
            format!("{} {}", prefix, message)
        } else {
            message
        };
        if config.append_reset {
            text.push_str(RESET);
            text.push_str(POSITIVE);
        }
        Some(text)
    }

    /// Write a message to stdout without a line terminator
    pub fn write<T: Terminal + ?Sized>(
        &self,
        term: &mut T,
        source: &str,
        message: &str,
        level: LogLevel,
        config: &MessageConfig,
    ) -> Result<()> {
        let text = self.format(source, message, level, config);
        emit(term, Stream::Out, text, false)
    }

    /// Write a message to stdout followed by a line terminator
    pub fn write_line<T: Terminal + ?Sized>(
        &self,
        term: &mut T,
        source: &str,
        message: &str,
        level: LogLevel,
        config: &MessageConfig,
    ) -> Result<()> {
        let text = self.format(source, message, level, config);
        emit(term, Stream::Out, text, true)
    }

    /// Write a message to stderr without a line terminator
    pub fn error_write<T: Terminal + ?Sized>(
        &self,
        term: &mut T,
        source: &str,
        message: &str,
        level: LogLevel,
        config: &MessageConfig,
    ) -> Result<()> {
        let text = self.format(source, message, level, config);
        emit(term, Stream::Err, text, false)
    }

    /// Write a message to stderr followed by a line terminator
    pub fn error_write_line<T: Terminal + ?Sized>(
        &self,
        term: &mut T,
        source: &str,
        message: &str,
        level: LogLevel,
        config: &MessageConfig,
    ) -> Result<()> {
        let text = self.format(source, message, level, config);
        emit(term, Stream::Err, text, true)
    }
}

fn emit<T: Terminal + ?Sized>(
    term: &mut T,
    stream: Stream,
    text: Option<String>,
    newline: bool,
) -> Result<()> {
    let Some(text) = text else {
        return Ok(());
    };
    match (stream, newline) {
        (Stream::Out, false) => term.write(&text)?,
        (Stream::Out, true) => term.write_line(&text)?,
        (Stream::Err, false) => term.write_error(&text)?,
        (Stream::Err, true) => term.write_error_line(&text)?,
    }
    Ok(())
}
