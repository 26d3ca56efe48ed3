use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Severity of a log line, ordered by increasing urgency.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    #[default]
    #[serde(alias = "INFO", alias = "Info")]
    Info = 0,
    #[serde(alias = "WARN", alias = "Warn", alias = "warning")]
    Warn = 1,
    #[serde(alias = "ERROR", alias = "Error")]
    Error = 2,
}

const LEVEL_NAMES: [&str; 3] = ["INFO", "WARN", "ERROR"];

impl Level {
    pub const ALL: [Level; 3] = [Level::Info, Level::Warn, Level::Error];

    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Level::rank`]. Out-of-range ranks saturate to `Error`.
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Level::Info,
            1 => Level::Warn,
            _ => Level::Error,
        }
    }

    /// Label written between the brackets of each line.
    pub fn as_str(self) -> &'static str {
        LEVEL_NAMES[self as usize]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {0:?}, expected one of: info, warn, error")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
