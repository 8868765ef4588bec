//! Color shortcut registry
//!
//! Maps short inline tokens such as `&c` or `&l` to escape sequences and
//! expands them inside message text.
//!
//! # Expansion order
//!
//! Tokens are expanded one at a time in registration order, each pass
//! scanning the string produced by the previous pass. An occurrence directly
//! preceded by `^` is left as literal text and the `^` stays in the output.
//! Because later passes see the output of earlier ones, the result depends on
//! registration order whenever a replacement contains text that looks like a
//! later token.

use tracing::debug;

use super::escape::{
    self, BLINK, BOLD, ITALIC, NEGATIVE, POSITIVE, STRIKETHROUGH, STYLE_RESET, UNDERLINE,
};
use crate::error::{ConsoleError, Result};

/// Character every default token starts with.
pub const TOKEN_MARKER: char = '&';

/// Placed directly before a token to keep it literal.
pub const ESCAPE_MARKER: char = '^';

/// A registered token and its escape sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shortcut {
    pub token: String,
    pub escape: String,
}

/// Classic 16-color chat palette, `&0` through `&f`.
pub const PALETTE: [(&str, [f32; 3]); 16] = [
    ("&0", [0.0, 0.0, 0.0]),                   // Black
    ("&1", [0.0, 0.0, 0.666667]),              // Dark Blue
    ("&2", [0.0, 0.666667, 0.0]),              // Dark Green
    ("&3", [0.0, 0.666667, 0.666667]),         // Dark Aqua
    ("&4", [0.666667, 0.0, 0.0]),              // Dark Red
    ("&5", [0.666667, 0.0, 0.666667]),         // Dark Purple
    ("&6", [1.0, 0.666667, 0.0]),              // Gold
    ("&7", [0.666667, 0.666667, 0.666667]),    // Gray
    ("&8", [0.3333333, 0.3333333, 0.3333333]), // Dark Gray
    ("&9", [0.3333333, 0.3333333, 1.0]),       // Blue
    ("&a", [0.3333333, 1.0, 0.3333333]),       // Green
    ("&b", [0.3333333, 1.0, 1.0]),             // Aqua
    ("&c", [1.0, 0.3333333, 0.3333333]),       // Red
    ("&d", [1.0, 0.3333333, 1.0]),             // Light Purple
    ("&e", [1.0, 1.0, 0.3333333]),             // Yellow
    ("&f", [1.0, 1.0, 1.0]),                   // White
];

/// Style tokens that follow the palette.
pub const STYLES: [(&str, &str); 6] = [
    ("&k", BLINK),
    ("&l", BOLD),
    ("&m", STRIKETHROUGH),
    ("&n", UNDERLINE),
    ("&o", ITALIC),
    ("&r", STYLE_RESET),
];

/// Color used for user-entered values.
pub fn value_color() -> String {
    escape::rgb(0.0, 0.53333333333, 1.0)
}

/// Token to escape-sequence mapping, iterated in registration order
#[derive(Clone, Debug, Default)]
pub struct ShortcutRegistry {
    shortcuts: Vec<Shortcut>,
}

impl ShortcutRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the default shortcut set
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        // An empty registry cannot collide with the defaults.
        if let Err(e) = registry.register_defaults() {
            unreachable!("default shortcuts collided: {}", e);
        }
        registry
    }

    /// Register the 16 palette colors, 6 styles, `&v` and the inverse toggles.
    ///
    /// Fails with `DuplicateToken` if any of them is already present, so a
    /// second call on the same registry is an error.
    pub fn register_defaults(&mut self) -> Result<()> {
        for (token, [r, g, b]) in PALETTE {
            self.register_rgb(token, r, g, b)?;
        }
        for (token, escape) in STYLES {
            self.register(token, escape)?;
        }
        self.register("&v", value_color())?;
        self.register("&-", NEGATIVE)?;
        self.register("&+", POSITIVE)?;
        debug!("Registered {} default shortcuts", self.shortcuts.len());
        Ok(())
    }

    /// Register a token with a raw escape sequence
    pub fn register(&mut self, token: impl Into<String>, escape: impl Into<String>) -> Result<()> {
        let token = token.into();
        if self.contains(&token) {
            return Err(ConsoleError::DuplicateToken(token));
        }
        self.shortcuts.push(Shortcut {
            token,
            escape: escape.into(),
        });
        Ok(())
    }

    /// Register a token with a color given as normalized channels
    pub fn register_rgb(&mut self, token: impl Into<String>, r: f32, g: f32, b: f32) -> Result<()> {
        self.register(token, escape::rgb(r, g, b))
    }

    /// Register a token with a color given as 0-255 channels
    pub fn register_rgb8(&mut self, token: impl Into<String>, r: u8, g: u8, b: u8) -> Result<()> {
        self.register(token, escape::rgb8(r, g, b))
    }

    /// Escape sequence for a token, if registered
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.shortcuts
            .iter()
            .find(|s| s.token == token)
            .map(|s| s.escape.as_str())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.lookup(token).is_some()
    }

    /// Registered shortcuts in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.shortcuts.iter()
    }

    pub fn len(&self) -> usize {
        self.shortcuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shortcuts.is_empty()
    }

    /// Replace every unescaped token in `text` with its escape sequence
    pub fn expand(&self, text: &str) -> String {
        if !text.contains(TOKEN_MARKER) {
            return text.to_string();
        }
        let mut expanded = text.to_string();
        for shortcut in &self.shortcuts {
            if expanded.contains(shortcut.token.as_str()) {
                expanded = replace_unescaped(&expanded, &shortcut.token, &shortcut.escape);
            }
        }
        expanded
    }
}

/// Replace non-overlapping occurrences of `token`, skipping any preceded by `^`
fn replace_unescaped(text: &str, token: &str, escape: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (idx, matched) in text.match_indices(token) {
        out.push_str(&text[last..idx]);
        if text[..idx].ends_with(ESCAPE_MARKER) {
            out.push_str(matched);
        } else {
            out.push_str(escape);
        }
        last = idx + matched.len();
    }
    out.push_str(&text[last..]);
    out
}
