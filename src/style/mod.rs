//! Text styling.
//!
//! - **escape**: ANSI SGR constants and 24-bit color builders
//! - **shortcuts**: `ShortcutRegistry`, which expands `&`-tokens into escapes
//!
//! # Shortcut Tokens
//!
//! | Token | Effect |
//! |-------|--------|
//! | `&0`-`&f` | 16-color palette |
//! | `&k` | Blink (obfuscated) |
//! | `&l` | Bold |
//! | `&m` | Strikethrough |
//! | `&n` | Underline |
//! | `&o` | Italic |
//! | `&r` | Reset all styles |
//! | `&v` | Value color |
//! | `&-` / `&+` | Inverse video on / off |
//!
//! Prefix a token with `^` to print it literally.

pub mod escape;
pub mod shortcuts;

pub use shortcuts::{Shortcut, ShortcutRegistry};
