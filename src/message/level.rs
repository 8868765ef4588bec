//! Log levels

use std::fmt;
use std::str::FromStr;

use crate::error::ConsoleError;

/// Severity of a message written to the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Success,
    Fail,
    Input,
}

impl LogLevel {
    pub const ALL: [LogLevel; 8] = [
        LogLevel::Critical,
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Success,
        LogLevel::Fail,
        LogLevel::Input,
    ];

    /// Label shown inside the prefix
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Critical => "Critical",
            LogLevel::Error => "Error",
            LogLevel::Warning => "Warning",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Success => "Success",
            LogLevel::Fail => "Fail",
            LogLevel::Input => "Input",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LogLevel {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConsoleError::InvalidSeverity(s.to_string()))
    }
}

impl TryFrom<u8> for LogLevel {
    type Error = ConsoleError;

    fn try_from(value: u8) -> Result<Self, ConsoleError> {
        LogLevel::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| ConsoleError::InvalidSeverity(value.to_string()))
    }
}
