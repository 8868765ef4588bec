//! Interactive reads: masked lines, prompts and single-key choices

use std::io;
use std::ops::{Deref, DerefMut};

use crate::error::{ConsoleError, Result};
use crate::message::{LogLevel, MessageConfig, MessageFormatter};
use crate::style::escape::RESET;
use crate::style::shortcuts::{value_color, TOKEN_MARKER};
use crate::style::ShortcutRegistry;
use crate::term::{KeyCode, Terminal};

/// Echoed in place of each hidden character
const BACKSPACE: &str = "\x08";

/// Extra blanks `wait_for_enter` writes to cover the Input prefix
pub const PREFIX_PAD: usize = 16;

pub const DEFAULT_PAUSE_MESSAGE: &str = "Press any key to continue...";
pub const DEFAULT_ENTER_MESSAGE: &str = "Press enter to continue...";

/// An acceptable key and the label echoed when it is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutput {
    pub key: KeyCode,
    /// Label echoed after the prompt, may contain shortcuts
    pub output: String,
}

impl KeyOutput {
    pub fn new(key: KeyCode, output: impl Into<String>) -> Self {
        Self {
            key,
            output: output.into(),
        }
    }
}

/// Whether two key codes name the same physical key.
///
/// Letters compare case-insensitively.
pub fn same_key(a: KeyCode, b: KeyCode) -> bool {
    match (a, b) {
        (KeyCode::Char(x), KeyCode::Char(y)) => x.eq_ignore_ascii_case(&y),
        _ => a == b,
    }
}

/// Hides the cursor until `restore` is called or the guard is dropped
struct HiddenCursor<'t, T: Terminal + ?Sized> {
    term: &'t mut T,
    restored: bool,
}

impl<'t, T: Terminal + ?Sized> HiddenCursor<'t, T> {
    fn new(term: &'t mut T) -> io::Result<Self> {
        term.set_cursor_visible(false)?;
        Ok(Self {
            term,
            restored: false,
        })
    }

    /// Show the cursor again, reporting failure
    fn restore(mut self) -> io::Result<()> {
        self.restored = true;
        self.term.set_cursor_visible(true)
    }
}

impl<T: Terminal + ?Sized> Deref for HiddenCursor<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &*self.term
    }
}

impl<T: Terminal + ?Sized> DerefMut for HiddenCursor<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut *self.term
    }
}

impl<T: Terminal + ?Sized> Drop for HiddenCursor<'_, T> {
    fn drop(&mut self) {
        // Only reached on early return, where the original error wins
        if !self.restored {
            let _ = self.term.set_cursor_visible(true);
        }
    }
}

/// Read characters up to `\r`, `\n` or `\r\n`.
///
/// Returns `None` only when the stream ends before any character arrived.
fn read_line_from<T: Terminal + ?Sized>(term: &mut T, mask: bool) -> io::Result<Option<String>> {
    let mut line = String::new();
    while let Some(ch) = term.read_char()? {
        if ch == '\r' || ch == '\n' {
            if ch == '\r' && term.peek_char()? == Some('\n') {
                term.read_char()?;
            }
            return Ok(Some(line));
        }
        if mask {
            term.write(BACKSPACE)?;
        }
        line.push(ch);
    }
    Ok(if line.is_empty() { None } else { Some(line) })
}

/// Line and key input layered on a terminal
pub struct InteractiveReader<'a, T: Terminal + ?Sized> {
    terminal: &'a mut T,
    formatter: MessageFormatter<'a>,
    /// Config used to render prompts
    config: MessageConfig,
}

impl<'a, T: Terminal + ?Sized> InteractiveReader<'a, T> {
    pub fn new(terminal: &'a mut T, registry: &'a ShortcutRegistry) -> Self {
        Self {
            terminal,
            formatter: MessageFormatter::new(registry),
            config: MessageConfig::default(),
        }
    }

    /// Render prompts with `config` instead of the default
    pub fn with_config(mut self, config: MessageConfig) -> Self {
        self.config = config;
        self
    }

    /// Read a line as the terminal echoes it
    pub fn read_line(&mut self) -> Result<Option<String>> {
        Ok(read_line_from(&mut *self.terminal, false)?)
    }

    /// Read a line with the cursor hidden, cancelling each echoed character
    /// with a backspace. The cursor is shown again on every exit path.
    pub fn masked_read_line(&mut self) -> Result<Option<String>> {
        let mut term = HiddenCursor::new(&mut *self.terminal)?;
        let line = read_line_from(&mut *term, true)?;
        term.restore()?;
        Ok(line)
    }

    /// Write an Input prompt and read the answer in the value color
    pub fn prompt_read_line(
        &mut self,
        source: &str,
        message: &str,
        hide_input: bool,
    ) -> Result<Option<String>> {
        self.formatter
            .write(&mut *self.terminal, source, message, LogLevel::Input, &self.config)?;
        self.terminal.write(&value_color())?;
        let line = if hide_input {
            self.masked_read_line()
        } else {
            self.read_line()
        };
        self.terminal.write(RESET)?;
        line
    }

    /// Write an Input prompt and wait for one of `choices`.
    ///
    /// Other keys are swallowed. The chosen label is echoed followed by a
    /// reset and the choice's key is returned.
    pub fn bounded_key_read(
        &mut self,
        source: &str,
        message: &str,
        choices: &[KeyOutput],
    ) -> Result<KeyCode> {
        if choices.is_empty() {
            return Err(ConsoleError::NoChoices);
        }
        self.formatter
            .write(&mut *self.terminal, source, message, LogLevel::Input, &self.config)?;

        let choice = loop {
            let key = self.terminal.read_key(true)?;
            if let Some(choice) = choices.iter().find(|c| same_key(c.key, key)) {
                break choice;
            }
        };

        let label = self.formatter.registry().expand(&choice.output);
        self.terminal.write_line(&format!("{}{}", label, RESET))?;
        Ok(choice.key)
    }

    /// Ask a yes/no question answered with Y or N
    pub fn confirm(&mut self, title: &str, message: &str) -> Result<bool> {
        let choices = [
            KeyOutput::new(KeyCode::Char('y'), "YES"),
            KeyOutput::new(KeyCode::Char('n'), "NO"),
        ];
        let key = self.bounded_key_read(title, &format!("{} ", message), &choices)?;
        Ok(same_key(key, KeyCode::Char('y')))
    }

    /// Show `message` and wait for any key.
    ///
    /// With `clear_line` the message is blanked out afterwards, otherwise the
    /// cursor moves to a new line.
    pub fn pause(&mut self, message: &str, clear_line: bool) -> Result<()> {
        let message = if message.contains(TOKEN_MARKER) {
            self.formatter.registry().expand(message)
        } else {
            message.to_string()
        };
        self.terminal.write(&message)?;
        self.terminal.read_key(true)?;
        if clear_line {
            self.erase_line(message.chars().count())
        } else {
            Ok(self.terminal.write_line("")?)
        }
    }

    /// Write an Input prompt and wait for Enter, then blank the line
    pub fn wait_for_enter(&mut self, message: &str) -> Result<()> {
        self.formatter
            .write(&mut *self.terminal, "Console", message, LogLevel::Input, &self.config)?;
        while self.terminal.read_key(true)? != KeyCode::Enter {}
        self.erase_line(message.chars().count() + PREFIX_PAD)
    }

    fn erase_line(&mut self, width: usize) -> Result<()> {
        self.terminal.write(&format!("\r{}\r", " ".repeat(width)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::prefix;
    use crate::term::MemoryTerminal;

    fn registry() -> ShortcutRegistry {
        ShortcutRegistry::with_defaults()
    }

    #[test]
    fn test_masked_read_crlf() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("abc\r\nnext");

        let line = InteractiveReader::new(&mut term, &registry)
            .masked_read_line()
            .unwrap();

        assert_eq!(line.as_deref(), Some("abc"));
        assert_eq!(term.remaining_input(), "next");
        assert_eq!(term.output(), "\x08\x08\x08");
        assert_eq!(term.cursor_changes(), &[false, true]);
        assert!(term.cursor_visible());
    }

    #[test]
    fn test_masked_read_lone_terminators() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("a\rb\n\n");
        let mut reader = InteractiveReader::new(&mut term, &registry);

        assert_eq!(reader.masked_read_line().unwrap().as_deref(), Some("a"));
        assert_eq!(reader.masked_read_line().unwrap().as_deref(), Some("b"));
        assert_eq!(reader.masked_read_line().unwrap().as_deref(), Some(""));
        assert_eq!(reader.masked_read_line().unwrap(), None);
    }

    #[test]
    fn test_masked_read_eof_without_input() {
        let registry = registry();
        let mut term = MemoryTerminal::new();

        let line = InteractiveReader::new(&mut term, &registry)
            .masked_read_line()
            .unwrap();

        assert_eq!(line, None);
        assert!(term.cursor_visible());
        assert_eq!(term.cursor_changes(), &[false, true]);
    }

    #[test]
    fn test_masked_read_eof_after_input() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("partial");

        let line = InteractiveReader::new(&mut term, &registry)
            .masked_read_line()
            .unwrap();

        assert_eq!(line.as_deref(), Some("partial"));
        assert!(term.cursor_visible());
    }

    #[test]
    fn test_masked_read_error_restores_cursor() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("ab");
        term.fail_reads_with(io::ErrorKind::BrokenPipe);

        let result = InteractiveReader::new(&mut term, &registry).masked_read_line();

        assert!(
            matches!(result, Err(ConsoleError::Io(ref e)) if e.kind() == io::ErrorKind::BrokenPipe)
        );
        assert!(term.cursor_visible());
        assert_eq!(term.cursor_changes(), &[false, true]);
    }

    #[test]
    fn test_masked_read_reports_failed_cursor_restore() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("ab\nrest");
        term.fail_cursor_show_with(io::ErrorKind::BrokenPipe);

        let result = InteractiveReader::new(&mut term, &registry).masked_read_line();

        assert!(
            matches!(result, Err(ConsoleError::Io(ref e)) if e.kind() == io::ErrorKind::BrokenPipe)
        );
        assert_eq!(term.remaining_input(), "rest");
        // Hidden once, no second attempt to show it
        assert_eq!(term.cursor_changes(), &[false]);
    }

    #[test]
    fn test_plain_read_does_not_touch_cursor() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("hello\n");

        let line = InteractiveReader::new(&mut term, &registry).read_line().unwrap();

        assert_eq!(line.as_deref(), Some("hello"));
        assert_eq!(term.output(), "");
        assert!(term.cursor_changes().is_empty());
    }

    #[test]
    fn test_prompt_read_line() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("secret\r\n");

        let line = InteractiveReader::new(&mut term, &registry)
            .prompt_read_line("Login", "Password:", true)
            .unwrap();

        assert_eq!(line.as_deref(), Some("secret"));
        let expected = format!(
            "{} Password:\x1b[0m\x1b[27m{}{}\x1b[0m",
            prefix("Login", LogLevel::Input),
            value_color(),
            "\x08".repeat(6)
        );
        assert_eq!(term.output(), expected);
    }

    #[test]
    fn test_prompt_read_line_visible() {
        let registry = registry();
        let mut term = MemoryTerminal::with_input("bob\n");

        let line = InteractiveReader::new(&mut term, &registry)
            .prompt_read_line("Login", "User:", false)
            .unwrap();

        assert_eq!(line.as_deref(), Some("bob"));
        assert!(term.output().ends_with(&format!("{}\x1b[0m", value_color())));
        assert!(term.cursor_changes().is_empty());
    }

    #[test]
    fn test_bounded_key_read_skips_unlisted_keys() {
        let registry = registry();
        let mut term = MemoryTerminal::with_keys([
            KeyCode::Char('A'),
            KeyCode::Char('B'),
            KeyCode::Char('Y'),
            KeyCode::Char('N'),
        ]);
        let choices = [
            KeyOutput::new(KeyCode::Char('Y'), "YES"),
            KeyOutput::new(KeyCode::Char('N'), "NO"),
        ];

        let key = InteractiveReader::new(&mut term, &registry)
            .bounded_key_read("Q", "Continue?", &choices)
            .unwrap();

        assert_eq!(key, KeyCode::Char('Y'));
        assert_eq!(term.remaining_keys(), 1);
        assert!(term.output().ends_with("YES\x1b[0m\n"));
        assert!(term.output().starts_with(&prefix("Q", LogLevel::Input)));
    }

    #[test]
    fn test_bounded_key_read_expands_label() {
        let registry = registry();
        let mut term = MemoryTerminal::with_keys([KeyCode::Enter]);
        let choices = [KeyOutput::new(KeyCode::Enter, "&aOK")];

        let key = InteractiveReader::new(&mut term, &registry)
            .bounded_key_read("Q", "Go", &choices)
            .unwrap();

        assert_eq!(key, KeyCode::Enter);
        assert!(term.output().ends_with("\x1b[38;2;85;255;85mOK\x1b[0m\n"));
    }

    #[test]
    fn test_bounded_key_read_without_choices() {
        let registry = registry();
        let mut term = MemoryTerminal::with_keys([KeyCode::Enter]);

        let result =
            InteractiveReader::new(&mut term, &registry).bounded_key_read("Q", "Go", &[]);

        assert!(matches!(result, Err(ConsoleError::NoChoices)));
        assert_eq!(term.output(), "");
        assert_eq!(term.remaining_keys(), 1);
    }

    #[test]
    fn test_confirm() {
        let registry = registry();
        let mut term = MemoryTerminal::with_keys([KeyCode::Char('x'), KeyCode::Char('y')]);
        assert!(InteractiveReader::new(&mut term, &registry)
            .confirm("Setup", "Overwrite?")
            .unwrap());
        assert!(term.output().contains("Overwrite? "));
        assert!(term.output().ends_with("YES\x1b[0m\n"));

        let mut term = MemoryTerminal::with_keys([KeyCode::Char('N')]);
        assert!(!InteractiveReader::new(&mut term, &registry)
            .confirm("Setup", "Overwrite?")
            .unwrap());
        assert!(term.output().ends_with("NO\x1b[0m\n"));
    }

    #[test]
    fn test_pause_clears_line() {
        let registry = registry();
        let mut term = MemoryTerminal::with_keys([KeyCode::Char('q')]);

        InteractiveReader::new(&mut term, &registry)
            .pause("Wait", true)
            .unwrap();

        assert_eq!(term.output(), "Wait\r    \r");
    }

    #[test]
    fn test_pause_new_line_with_shortcuts() {
        let registry = registry();
        let mut term = MemoryTerminal::with_keys([KeyCode::Esc]);

        InteractiveReader::new(&mut term, &registry)
            .pause("&lWait", false)
            .unwrap();

        assert_eq!(term.output(), "\x1b[1mWait\n");
    }

    #[test]
    fn test_wait_for_enter() {
        let registry = registry();
        let mut term = MemoryTerminal::with_keys([
            KeyCode::Char('a'),
            KeyCode::Esc,
            KeyCode::Enter,
            KeyCode::Char('z'),
        ]);

        InteractiveReader::new(&mut term, &registry)
            .wait_for_enter("Go")
            .unwrap();

        assert_eq!(term.remaining_keys(), 1);
        let erase = format!("\r{}\r", " ".repeat(2 + PREFIX_PAD));
        assert!(term.output().starts_with(&prefix("Console", LogLevel::Input)));
        assert!(term.output().ends_with(&erase));
    }

    #[test]
    fn test_same_key() {
        assert!(same_key(KeyCode::Char('y'), KeyCode::Char('Y')));
        assert!(!same_key(KeyCode::Char('y'), KeyCode::Char('n')));
        assert!(same_key(KeyCode::Enter, KeyCode::Enter));
        assert!(!same_key(KeyCode::Enter, KeyCode::Char('\n')));
    }
}
