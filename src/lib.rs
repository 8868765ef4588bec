//! extconsole - styled log lines and interactive input for ANSI terminals
//!
//! extconsole expands short color tokens such as `&c` or `&l` into escape
//! sequences, formats leveled `[source Level] message` lines and reads
//! secret input, prompts and single-key choices.
//!
//! # Features
//!
//! - **Color Shortcuts**: 16-color palette, styles and inverse video via `&`-tokens
//! - **Leveled Messages**: eight severities with their own prefix and color
//! - **Masked Input**: password reads that never show typed characters
//! - **Key Choices**: yes/no confirmation and arbitrary single-key menus
//!
//! # Quick Start
//!
//! ```no_run
//! use extconsole::{Config, Console, LogLevel};
//!
//! let mut console = Console::setup(&Config::load())?;
//! console.write_line("server", "listening on &v8080", LogLevel::Info)?;
//! if console.reader().confirm("server", "Shut down?")? {
//!     console.write_line("server", "&lbye", LogLevel::Success)?;
//! }
//! # Ok::<(), extconsole::ConsoleError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! Console
//! ├── ShortcutRegistry (token -> escape sequence)
//! ├── MessageFormatter (prefix, shortcuts, newlines, reset)
//! ├── InteractiveReader (masked lines, prompts, key choices)
//! └── Terminal (crossterm or in-memory)
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod input;
pub mod message;
pub mod style;
pub mod term;

pub use config::Config;
pub use console::Console;
pub use error::{ConsoleError, Result};
pub use input::{InteractiveReader, KeyOutput};
pub use message::{LogLevel, MessageConfig, MessageFormatter};
pub use style::ShortcutRegistry;
pub use term::{KeyCode, MemoryTerminal, NativeTerminal, Terminal};
