//! ANSI escape sequences
//!
//! Fixed SGR sequences plus builders for 24-bit foreground colors.

/// Escape character that introduces every control sequence.
pub const ESC: char = '\x1b';

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const ITALIC: &str = "\x1b[3m";
pub const UNDERLINE: &str = "\x1b[4m";
/// Blink. Stands in for "obfuscated" text, which terminals cannot render.
pub const BLINK: &str = "\x1b[5m";
pub const STRIKETHROUGH: &str = "\x1b[9m";
/// Inverse video on.
pub const NEGATIVE: &str = "\x1b[7m";
/// Inverse video off.
pub const POSITIVE: &str = "\x1b[27m";
/// Reset all attributes and leave inverse video.
pub const STYLE_RESET: &str = "\x1b[0m\x1b[27m";

/// Switch to the alternate screen buffer.
pub const ALTERNATE_BUFFER: &str = "\x1b[?1049h";
/// Switch back to the main screen buffer.
pub const MAIN_BUFFER: &str = "\x1b[?1049l";

/// Foreground color escape from 0-255 channels.
pub fn rgb8(r: u8, g: u8, b: u8) -> String {
    format!("{}[38;2;{};{};{}m", ESC, r, g, b)
}

/// Foreground color escape from normalized channels in `[0, 1]`.
///
/// Each channel is scaled by 255 in single precision and rounded to the
/// nearest integer, ties to even. Out-of-range input is clamped.
pub fn rgb(r: f32, g: f32, b: f32) -> String {
    rgb8(channel(r), channel(g), channel(b))
}

fn channel(value: f32) -> u8 {
    let scaled = round_half_even(255.0 * value);
    scaled.clamp(0.0, 255.0) as u8
}

fn round_half_even(x: f32) -> f32 {
    if (x - x.trunc()).abs() == 0.5 {
        2.0 * (x / 2.0).round()
    } else {
        x.round()
    }
}
