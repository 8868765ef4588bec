//! Terminal capability consumed by the formatter and readers.
//!
//! - **native**: crossterm-backed implementation over stdin/stdout/stderr
//! - **memory**: scripted in-memory implementation for tests and embedding
//! - **window**: console window visibility
//! - **screen**: screen-level helpers built on top of [`Terminal`]
//!
//! Every operation blocks until it completes. Failures are returned as
//! `io::Error` and never retried.

pub mod memory;
pub mod native;
pub mod screen;
pub mod window;

pub use crossterm::event::KeyCode;
pub use memory::MemoryTerminal;
pub use native::NativeTerminal;
pub use window::{Headless, WindowController};

use std::io;

/// Raw character-stream console
pub trait Terminal {
    /// Write text to the output stream
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write text followed by a line terminator to the output stream
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(text)?;
        self.write("\n")
    }

    /// Write text to the error stream
    fn write_error(&mut self, text: &str) -> io::Result<()>;

    fn write_error_line(&mut self, text: &str) -> io::Result<()> {
        self.write_error(text)?;
        self.write_error("\n")
    }

    /// Read one character, `None` at end of stream
    fn read_char(&mut self) -> io::Result<Option<char>>;

    /// Look at the next character without consuming it
    fn peek_char(&mut self) -> io::Result<Option<char>>;

    /// Block until a key is pressed. With `intercept` the key is not echoed.
    fn read_key(&mut self, intercept: bool) -> io::Result<KeyCode>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Cursor position as (column, row)
    fn cursor_position(&mut self) -> io::Result<(u16, u16)>;

    fn set_cursor_position(&mut self, col: u16, row: u16) -> io::Result<()>;

    /// Window size as (width, height)
    fn size(&mut self) -> io::Result<(u16, u16)>;
}
