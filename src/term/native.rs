//! Native terminal using crossterm
//!
//! Characters are read from stdin as UTF-8 with one character of lookahead.
//! Single key presses are read through crossterm events with raw mode held
//! only for the duration of the read.

use std::io::{self, BufReader, Read, Stderr, Stdin, Stdout, Write};

use crossterm::{
    cursor::{self, Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal,
};

use super::{KeyCode, Terminal};

/// Raw mode for as long as the guard lives
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// UTF-8 decoder over a byte stream with one byte of pushback
pub struct Utf8Reader<R> {
    inner: R,
    /// Byte that ended a malformed sequence, returned by the next read
    pending: Option<u8>,
}

impl<R: Read> Utf8Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pending.take() {
            return Ok(Some(byte));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Decode the next character, `None` at end of stream.
    ///
    /// A malformed or truncated sequence decodes as U+FFFD. The byte that
    /// broke the sequence is kept for the next call.
    pub fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };
        let len = utf8_len(lead);
        if len == 1 {
            let ch = if lead.is_ascii() {
                lead as char
            } else {
                char::REPLACEMENT_CHARACTER
            };
            return Ok(Some(ch));
        }

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(len).skip(1) {
            match self.read_byte()? {
                Some(byte) if (0x80..=0xBF).contains(&byte) => *slot = byte,
                Some(byte) => {
                    self.pending = Some(byte);
                    return Ok(Some(char::REPLACEMENT_CHARACTER));
                }
                None => return Ok(Some(char::REPLACEMENT_CHARACTER)),
            }
        }
        let ch = std::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        Ok(Some(ch))
    }
}

/// Encoded length announced by a UTF-8 leading byte
fn utf8_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Terminal backed by the process's standard streams
pub struct NativeTerminal {
    stdin: Utf8Reader<BufReader<Stdin>>,
    /// Character taken by `peek_char` and not yet consumed
    peeked: Option<char>,
    stdout: Stdout,
    stderr: Stderr,
}

impl Default for NativeTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeTerminal {
    pub fn new() -> Self {
        Self {
            stdin: Utf8Reader::new(BufReader::new(io::stdin())),
            peeked: None,
            stdout: io::stdout(),
            stderr: io::stderr(),
        }
    }

    /// Turn on ANSI escape processing for the console (Windows only).
    ///
    /// Redirected output has no console mode, so failures are logged and
    /// otherwise ignored.
    #[cfg(windows)]
    pub fn enable_ansi() {
        use windows::Win32::System::Console::{
            GetConsoleMode, GetStdHandle, SetConsoleMode, CONSOLE_MODE,
            ENABLE_VIRTUAL_TERMINAL_PROCESSING, STD_OUTPUT_HANDLE,
        };

        unsafe {
            let handle = match GetStdHandle(STD_OUTPUT_HANDLE) {
                Ok(handle) => handle,
                Err(e) => {
                    tracing::debug!("GetStdHandle failed: {:?}", e);
                    return;
                }
            };
            let mut mode = CONSOLE_MODE(0);
            if GetConsoleMode(handle, &mut mode).is_err() {
                tracing::debug!("GetConsoleMode failed, output is not a console");
                return;
            }
            let new_mode = CONSOLE_MODE(mode.0 | ENABLE_VIRTUAL_TERMINAL_PROCESSING.0);
            match SetConsoleMode(handle, new_mode) {
                Ok(_) => {
                    tracing::debug!("Console mode: 0x{:08X} -> 0x{:08X}", mode.0, new_mode.0)
                }
                Err(e) => tracing::warn!("SetConsoleMode failed: {:?}", e),
            }
        }
    }

    /// Terminals outside Windows interpret escapes natively
    #[cfg(not(windows))]
    pub fn enable_ansi() {}
}

impl Terminal for NativeTerminal {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.stdout.write_all(text.as_bytes())?;
        self.stdout.flush()
    }

    fn write_error(&mut self, text: &str) -> io::Result<()> {
        self.stderr.write_all(text.as_bytes())?;
        self.stderr.flush()
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        match self.peeked.take() {
            Some(ch) => Ok(Some(ch)),
            None => self.stdin.read_char(),
        }
    }

    fn peek_char(&mut self) -> io::Result<Option<char>> {
        if self.peeked.is_none() {
            self.peeked = self.stdin.read_char()?;
        }
        Ok(self.peeked)
    }

    fn read_key(&mut self, intercept: bool) -> io::Result<KeyCode> {
        let code = {
            let _raw = RawMode::enable()?;
            loop {
                if let Event::Key(key_event) = event::read()? {
                    if key_event.kind == KeyEventKind::Press {
                        break key_event.code;
                    }
                }
            }
        };
        if !intercept {
            if let KeyCode::Char(ch) = code {
                let mut utf8 = [0u8; 4];
                self.write(ch.encode_utf8(&mut utf8))?;
            }
        }
        Ok(code)
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.stdout, Show)
        } else {
            execute!(self.stdout, Hide)
        }
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        cursor::position()
    }

    fn set_cursor_position(&mut self, col: u16, row: u16) -> io::Result<()> {
        execute!(self.stdout, MoveTo(col, row))
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
}
