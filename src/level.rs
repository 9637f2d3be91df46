use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub(crate) const BLUEISH: u8 = 94;
pub(crate) const DIMMED: u8 = 2;
pub(crate) const YELLOW: u8 = 93;
pub(crate) const RED: u8 = 91;

/// Record severity.
///
/// The gate keeps a record when `record >= floor`. Debug deliberately sits
/// above Info, so a floor of `Info` lets everything through and a floor of
/// `Debug` silences Info records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    #[default]
    Info = 1,
    Debug = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Info, Level::Debug, Level::Warn, Level::Error];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.code() == code)
    }

    pub fn style(self) -> Style {
        match self {
            Level::Info => Style::new(BLUEISH, "[INFO]"),
            Level::Debug => Style::new(DIMMED, "[DEBUG]"),
            Level::Warn => Style::new(YELLOW, "[WARN]"),
            Level::Error => Style::new(RED, "[ERROR]"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLevelError {
    #[error("unknown level name '{0}' (expected info, debug, warn or error)")]
    UnknownName(String),
    #[error("level code {0} is out of range")]
    UnknownCode(u8),
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Ok(code) = name.parse::<u8>() {
            return Level::from_code(code).ok_or(ParseLevelError::UnknownCode(code));
        }
        match name.to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(ParseLevelError::UnknownName(name.to_string())),
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = ParseLevelError;

    fn try_from(code: u8) -> Result<Self, ParseLevelError> {
        Level::from_code(code).ok_or(ParseLevelError::UnknownCode(code))
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

/// ANSI color code and label printed for a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: u8,
    pub label: &'static str,
}

impl Style {
    const fn new(color: u8, label: &'static str) -> Self {
        Self { color, label }
    }

    /// Unknown codes borrow the Info style.
    pub fn for_code(code: u8) -> Style {
        Level::from_code(code).unwrap_or(Level::Info).style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_ordering_puts_debug_above_info() {
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn styles_match_the_label_table() {
        assert_eq!(Level::Info.style(), Style::new(94, "[INFO]"));
        assert_eq!(Level::Debug.style(), Style::new(2, "[DEBUG]"));
        assert_eq!(Level::Warn.style(), Style::new(93, "[WARN]"));
        assert_eq!(Level::Error.style(), Style::new(91, "[ERROR]"));
    }

    #[test]
    fn unknown_codes_are_styled_as_info() {
        assert_eq!(Style::for_code(0), Level::Info.style());
        assert_eq!(Style::for_code(42), Level::Info.style());
        assert_eq!(Style::for_code(3), Level::Warn.style());
    }

    #[test]
    fn parse_names_and_codes() {
        assert_eq!("WARNING".parse::<Level>(), Ok(Level::Warn));
        assert_eq!(" debug ".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("4".parse::<Level>(), Ok(Level::Error));
        assert_eq!(
            "9".parse::<Level>(),
            Err(ParseLevelError::UnknownCode(9))
        );
        let err = "loud".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("unknown level name 'loud'"));
    }

    #[test]
    fn try_from_rejects_unknown_codes() {
        assert_eq!(Level::try_from(2), Ok(Level::Debug));
        assert_eq!(Level::try_from(0), Err(ParseLevelError::UnknownCode(0)));
    }

    #[test]
    fn log_crate_levels_fold_trace_into_debug() {
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
        assert_eq!(Level::from(log::Level::Error), Level::Error);
    }
}
