//! Interactive input.
//!
//! `InteractiveReader` borrows a [`Terminal`](crate::term::Terminal) and a
//! [`ShortcutRegistry`](crate::style::ShortcutRegistry) and provides:
//!
//! - masked (secret) line reads
//! - prompted line reads rendered as Input-level messages
//! - single-key choices, yes/no confirmation, pause and wait-for-enter
//!
//! All reads block without timeout.

pub mod reader;

pub use reader::{same_key, InteractiveReader, KeyOutput};
