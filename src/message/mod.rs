//! Leveled log-line formatting.
//!
//! - **level**: `LogLevel`, the closed set of severities
//! - **formatter**: `MessageConfig` switches and the `MessageFormatter`
//!   that builds `[source Level] message` lines
//!
//! # Line Layout
//!
//! ```text
//! [source Level] first line of the message
//! [source Level] second line of the message
//! ```

pub mod formatter;
pub mod level;

pub use formatter::{prefix, MessageConfig, MessageFormatter, Stream};
pub use level::LogLevel;
