//! In-memory terminal
//!
//! Replays scripted characters and key presses and records everything
//! written, so formatting and input routines can run without a console.

use std::collections::VecDeque;
use std::io;

use super::{KeyCode, Terminal};

/// Scripted terminal that records its output
#[derive(Debug)]
pub struct MemoryTerminal {
    /// Pending characters for `read_char`
    input: VecDeque<char>,
    /// Pending key presses for `read_key`
    keys: VecDeque<KeyCode>,
    /// Error returned by `read_char` once `input` is drained
    read_error: Option<io::ErrorKind>,
    /// Error returned when asked to show the cursor
    show_cursor_error: Option<io::ErrorKind>,
    output: String,
    error: String,
    cursor_visible: bool,
    /// Every visibility value passed to `set_cursor_visible`, in order
    cursor_changes: Vec<bool>,
    cursor: (u16, u16),
    size: (u16, u16),
}

impl Default for MemoryTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTerminal {
    /// Create an 80x24 terminal with no scripted input
    pub fn new() -> Self {
        Self {
            input: VecDeque::new(),
            keys: VecDeque::new(),
            read_error: None,
            show_cursor_error: None,
            output: String::new(),
            error: String::new(),
            cursor_visible: true,
            cursor_changes: Vec::new(),
            cursor: (0, 0),
            size: (80, 24),
        }
    }

    /// Create a terminal whose character stream yields `text`
    pub fn with_input(text: &str) -> Self {
        let mut term = Self::new();
        term.push_input(text);
        term
    }

    /// Create a terminal that yields the given key presses
    pub fn with_keys(keys: impl IntoIterator<Item = KeyCode>) -> Self {
        let mut term = Self::new();
        term.push_keys(keys);
        term
    }

    pub fn push_input(&mut self, text: &str) {
        self.input.extend(text.chars());
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = KeyCode>) {
        self.keys.extend(keys);
    }

    /// Make `read_char` fail with `kind` instead of reporting end of stream
    pub fn fail_reads_with(&mut self, kind: io::ErrorKind) {
        self.read_error = Some(kind);
    }

    /// Make `set_cursor_visible(true)` fail with `kind`
    pub fn fail_cursor_show_with(&mut self, kind: io::ErrorKind) {
        self.show_cursor_error = Some(kind);
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    /// Everything written to the output stream
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Everything written to the error stream
    pub fn error_output(&self) -> &str {
        &self.error
    }

    /// Drain the recorded output
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn cursor_changes(&self) -> &[bool] {
        &self.cursor_changes
    }

    /// Characters not yet consumed
    pub fn remaining_input(&self) -> String {
        self.input.iter().collect()
    }

    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Terminal for MemoryTerminal {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn write_error(&mut self, text: &str) -> io::Result<()> {
        self.error.push_str(text);
        Ok(())
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        match self.input.pop_front() {
            Some(ch) => Ok(Some(ch)),
            None => match self.read_error {
                Some(kind) => Err(io::Error::new(kind, "scripted read failure")),
                None => Ok(None),
            },
        }
    }

    fn peek_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.input.front().copied())
    }

    fn read_key(&mut self, intercept: bool) -> io::Result<KeyCode> {
        let key = self
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted key left"))?;
        if !intercept {
            if let KeyCode::Char(ch) = key {
                self.output.push(ch);
            }
        }
        Ok(key)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if let (true, Some(kind)) = (visible, self.show_cursor_error) {
            return Err(io::Error::new(kind, "scripted cursor failure"));
        }
        self.cursor_visible = visible;
        self.cursor_changes.push(visible);
        Ok(())
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.cursor)
    }

    fn set_cursor_position(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.cursor = (col, row);
        Ok(())
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.size)
    }
}
