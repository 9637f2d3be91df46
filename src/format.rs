//! Column layout and ANSI decoration for a single record.
//!
//! A record is laid out as `LABEL CALLER ' ' TIMESTAMP MESSAGE`, where every
//! column except the message is padded to a fixed width so that consecutive
//! records line up whether or not escape codes are present.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::Path;

use crate::level::Style;

pub const LABEL_WIDTH: usize = 8;
pub const FILE_WIDTH: usize = 10;

pub(crate) const DARK_GRAY: u8 = 90;

const ESC: &str = "\x1b[";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";
const ELLIPSIS: &str = "...";

/// Source site of a record, reduced to its base file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller<'a> {
    file: &'a str,
    line: u32,
}

impl Caller<'static> {
    pub const UNKNOWN: Caller<'static> = Caller {
        file: "???",
        line: 0,
    };
}

impl<'a> Caller<'a> {
    pub fn new(path: &'a str, line: u32) -> Self {
        let file = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);
        Self { file, line }
    }

    pub fn from_location(location: &'a Location<'a>) -> Self {
        Self::new(location.file(), location.line())
    }

    pub fn from_parts(file: Option<&'a str>, line: Option<u32>) -> Self {
        match (file, line) {
            (Some(file), Some(line)) if !file.is_empty() => Self::new(file, line),
            _ => Caller::UNKNOWN,
        }
    }

    pub fn file(&self) -> &str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }
}

impl fmt::Display for Caller<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", shorten(self.file), self.line)
    }
}

/// Keeps the trailing `FILE_WIDTH - 3` characters of an over-long name
/// behind a `...` prefix.
pub fn shorten(name: &str) -> Cow<'_, str> {
    let keep = FILE_WIDTH - ELLIPSIS.len();
    let count = name.chars().count();
    if count <= keep {
        return Cow::Borrowed(name);
    }
    let tail: String = name.chars().skip(count - keep).collect();
    Cow::Owned(format!("{ELLIPSIS}{tail}"))
}

pub fn bold(s: &str) -> String {
    format!("{BOLD}{s}")
}

pub fn colorize(code: u8, s: &str) -> String {
    format!("{ESC}{code}m{s}{RESET}")
}

pub fn pad_label(label: &str) -> String {
    format!("{label:<width$}", width = LABEL_WIDTH)
}

pub fn pad_file(file: &str) -> String {
    if file.is_empty() {
        return String::new();
    }
    format!("{file:<width$}", width = FILE_WIDTH)
}

/// Width follows the format string, not the rendered timestamp.
pub fn pad_time(timestamp: &str, time_format: &str) -> String {
    if time_format.is_empty() {
        return String::new();
    }
    let width = time_format.chars().count();
    format!("{timestamp:<width$}  ")
}

/// Everything needed to lay out one record.
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    pub style: Style,
    pub caller: Caller<'a>,
    pub timestamp: &'a str,
    pub time_format: &'a str,
    pub use_color: bool,
}

impl Layout<'_> {
    /// Builds the full line. A newline is appended unless the message
    /// already ends with one.
    pub fn render(&self, message: &str) -> String {
        let label = pad_label(self.style.label);
        let caller = pad_file(&self.caller.to_string());
        let time = pad_time(self.timestamp, self.time_format);

        let mut line = if self.use_color {
            let time = if time.is_empty() {
                time
            } else {
                colorize(DARK_GRAY, &time)
            };
            format!(
                "{}{} {}{}",
                bold(&colorize(self.style.color, &label)),
                colorize(DARK_GRAY, &caller),
                time,
                message
            )
        } else {
            format!("{}{} {}{}", bold(&label), caller, time, message)
        };
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}
