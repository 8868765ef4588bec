//! Console facade
//!
//! Owns a terminal, the shortcut registry and the default message config,
//! and hands out formatters and readers borrowing them.

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::input::InteractiveReader;
use crate::message::{LogLevel, MessageConfig, MessageFormatter};
use crate::style::ShortcutRegistry;
use crate::term::{screen, window, Headless, NativeTerminal, Terminal, WindowController};

/// Styled console over a terminal
pub struct Console<T: Terminal = NativeTerminal> {
    terminal: T,
    registry: ShortcutRegistry,
    /// Config applied by the write methods
    config: MessageConfig,
    window: Box<dyn WindowController>,
}

impl Console<NativeTerminal> {
    /// Set up the process console.
    ///
    /// Enables ANSI processing where the output is a console, registers the
    /// default and configured shortcuts and applies the window settings.
    pub fn setup(config: &Config) -> Result<Self> {
        NativeTerminal::enable_ansi();
        let mut console = Self::with_config(NativeTerminal::new(), config)?
            .with_window(window::platform_window());
        if config.window.hidden {
            console.hide_window()?;
        }
        debug!("Console ready with {} shortcuts", console.registry.len());
        Ok(console)
    }
}

impl<T: Terminal> Console<T> {
    /// Console with the default shortcuts and message config
    pub fn new(terminal: T) -> Self {
        Self {
            terminal,
            registry: ShortcutRegistry::with_defaults(),
            config: MessageConfig::default(),
            window: Box::new(Headless),
        }
    }

    /// Console with the default shortcuts plus those in `config`
    pub fn with_config(terminal: T, config: &Config) -> Result<Self> {
        let mut console = Self::new(terminal);
        config.register_shortcuts(&mut console.registry)?;
        console.config = config.message;
        Ok(console)
    }

    pub fn with_window(mut self, window: Box<dyn WindowController>) -> Self {
        self.window = window;
        self
    }

    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// Registry for adding shortcuts after setup
    pub fn registry_mut(&mut self) -> &mut ShortcutRegistry {
        &mut self.registry
    }

    pub fn message_config(&self) -> &MessageConfig {
        &self.config
    }

    pub fn set_message_config(&mut self, config: MessageConfig) {
        self.config = config;
    }

    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    pub fn formatter(&self) -> MessageFormatter<'_> {
        MessageFormatter::new(&self.registry)
    }

    /// Reader borrowing this console's terminal and registry
    pub fn reader(&mut self) -> InteractiveReader<'_, T> {
        InteractiveReader::new(&mut self.terminal, &self.registry).with_config(self.config)
    }

    /// Expand shortcuts in `text`
    pub fn colorize(&self, text: &str) -> String {
        self.registry.expand(text)
    }

    pub fn write(&mut self, source: &str, message: &str, level: LogLevel) -> Result<()> {
        MessageFormatter::new(&self.registry).write(
            &mut self.terminal,
            source,
            message,
            level,
            &self.config,
        )
    }

    pub fn write_line(&mut self, source: &str, message: &str, level: LogLevel) -> Result<()> {
        MessageFormatter::new(&self.registry).write_line(
            &mut self.terminal,
            source,
            message,
            level,
            &self.config,
        )
    }

    pub fn error_write(&mut self, source: &str, message: &str, level: LogLevel) -> Result<()> {
        MessageFormatter::new(&self.registry).error_write(
            &mut self.terminal,
            source,
            message,
            level,
            &self.config,
        )
    }

    pub fn error_write_line(&mut self, source: &str, message: &str, level: LogLevel) -> Result<()> {
        MessageFormatter::new(&self.registry).error_write_line(
            &mut self.terminal,
            source,
            message,
            level,
            &self.config,
        )
    }

    /// Info-level line on stdout
    pub fn info(&mut self, source: &str, message: &str) -> Result<()> {
        self.write_line(source, message, LogLevel::Info)
    }

    /// Error-level line on stderr
    pub fn error(&mut self, source: &str, message: &str) -> Result<()> {
        self.error_write_line(source, message, LogLevel::Error)
    }

    pub fn clear_below(&mut self, row: u16) -> Result<()> {
        Ok(screen::clear_below(&mut self.terminal, row)?)
    }

    pub fn switch_to_alternate_buffer(&mut self) -> Result<()> {
        Ok(screen::switch_to_alternate_buffer(&mut self.terminal)?)
    }

    pub fn switch_to_main_buffer(&mut self) -> Result<()> {
        Ok(screen::switch_to_main_buffer(&mut self.terminal)?)
    }

    pub fn show_window(&mut self) -> Result<()> {
        Ok(self.window.show()?)
    }

    pub fn hide_window(&mut self) -> Result<()> {
        Ok(self.window.hide()?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use super::*;
    use crate::config::Color;
    use crate::error::ConsoleError;
    use crate::message::prefix;
    use crate::term::{KeyCode, MemoryTerminal};

    /// Records show/hide calls
    struct RecordingWindow(Rc<RefCell<Vec<&'static str>>>);

    impl WindowController for RecordingWindow {
        fn show(&mut self) -> io::Result<()> {
            self.0.borrow_mut().push("show");
            Ok(())
        }

        fn hide(&mut self) -> io::Result<()> {
            self.0.borrow_mut().push("hide");
            Ok(())
        }
    }

    #[test]
    fn test_info_and_error_streams() {
        let mut console = Console::new(MemoryTerminal::new());
        console.info("App", "started").unwrap();
        console.error("App", "&cboom").unwrap();

        let term = console.into_terminal();
        assert_eq!(
            term.output(),
            format!("{} started\x1b[0m\x1b[27m\n", prefix("App", LogLevel::Info))
        );
        assert!(term.error_output().starts_with(&prefix("App", LogLevel::Error)));
        assert!(term.error_output().contains("\x1b[38;2;255;85;85mboom"));
    }

    #[test]
    fn test_with_config_applies_message_and_shortcuts() {
        let mut config = Config::default();
        config.message.add_prefix = false;
        config.message.append_reset = false;
        config.shortcuts.insert("&p".to_string(), Color::new(1, 2, 3));

        let mut console = Console::with_config(MemoryTerminal::new(), &config).unwrap();
        assert_eq!(console.registry().len(), 26);

        console.write("App", "&phi", LogLevel::Info).unwrap();
        assert_eq!(console.terminal().output(), "\x1b[38;2;1;2;3mhi");
    }

    #[test]
    fn test_with_config_rejects_duplicate_shortcut() {
        let mut config = Config::default();
        config.shortcuts.insert("&v".to_string(), Color::new(1, 2, 3));
        assert!(matches!(
            Console::with_config(MemoryTerminal::new(), &config),
            Err(ConsoleError::DuplicateToken(_))
        ));
    }

    #[test]
    fn test_runtime_registration() {
        let mut console = Console::new(MemoryTerminal::new());
        console.registry_mut().register_rgb8("&x", 10, 20, 30).unwrap();
        assert_eq!(console.colorize("&xA^&xB"), "\x1b[38;2;10;20;30mA^&xB");
    }

    #[test]
    fn test_reader_uses_console_config() {
        let mut console = Console::new(MemoryTerminal::with_keys([KeyCode::Char('n')]));
        console.set_message_config(MessageConfig {
            append_reset: false,
            ..MessageConfig::default()
        });

        assert!(!console.reader().confirm("Setup", "Proceed?").unwrap());
        let expected = format!("{} Proceed? NO\x1b[0m\n", prefix("Setup", LogLevel::Input));
        assert_eq!(console.terminal().output(), expected);
    }

    #[test]
    fn test_window_controller() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut console = Console::new(MemoryTerminal::new())
            .with_window(Box::new(RecordingWindow(calls.clone())));

        console.hide_window().unwrap();
        console.show_window().unwrap();
        assert_eq!(*calls.borrow(), vec!["hide", "show"]);
    }

    #[test]
    fn test_setup_with_captured_output() {
        // The test harness captures stdout, so there is no console to configure.
        let console = Console::setup(&Config::default()).unwrap();
        assert_eq!(console.registry().len(), 25);
        assert_eq!(*console.message_config(), MessageConfig::default());
    }

    #[test]
    fn test_screen_helpers() {
        let mut console = Console::new(MemoryTerminal::new());
        console.switch_to_alternate_buffer().unwrap();
        console.switch_to_main_buffer().unwrap();
        console.terminal_mut().set_size(2, 2);
        console.clear_below(1).unwrap();
        assert_eq!(console.terminal().output(), "\x1b[?1049h\x1b[?1049l  ");
    }
}
