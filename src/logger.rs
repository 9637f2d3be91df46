use std::fmt::{self, Write as _};
use std::panic::Location;

use chrono::Local;

use crate::format::{Caller, Layout};
use crate::level::{Level, Style};
use crate::sink::Sink;

/// Timestamp layout used by [`Log::with_time`].
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Severity-named entry points plus a formatted one.
pub trait Logr {
    fn info(&self, msg: &str);
    fn debug(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    fn logf(&self, level: Level, args: fmt::Arguments<'_>);
}

/// Immutable logger configuration bound to a shared [`Sink`].
///
/// Builder methods (`with_*`) leave the receiver untouched and return a new
/// value; clones share the sink, so they stay cheap and can be handed to
/// other threads freely.
#[derive(Debug, Clone)]
pub struct Log {
    level: Level,
    time_format: String,
    use_color: bool,
    save_to_file: bool,
    sink: Sink,
}

impl Log {
    pub fn new(min_level: Level) -> Self {
        Self {
            level: min_level,
            time_format: String::new(),
            use_color: false,
            save_to_file: false,
            sink: Sink::stdout(),
        }
    }

    pub fn with_color(&self) -> Self {
        Self {
            use_color: true,
            ..self.clone()
        }
    }

    /// Enables the timestamp column with [`DEFAULT_TIME_FORMAT`].
    pub fn with_time(&self) -> Self {
        self.with_time_format(DEFAULT_TIME_FORMAT)
    }

    /// Enables the timestamp column with a chrono `strftime` format, taken verbatim.
    pub fn with_time_format(&self, format: impl Into<String>) -> Self {
        Self {
            time_format: format.into(),
            ..self.clone()
        }
    }

    /// Reserved: sets the file-sink flag, which does not change output yet.
    pub fn with_file_sink(&self) -> Self {
        Self {
            save_to_file: true,
            ..self.clone()
        }
    }

    pub fn with_writer(&self, sink: Sink) -> Self {
        Self {
            sink,
            ..self.clone()
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn time_format(&self) -> &str {
        &self.time_format
    }

    pub fn uses_color(&self) -> bool {
        self.use_color
    }

    pub fn saves_to_file(&self) -> bool {
        self.save_to_file
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.enabled_code(level.code())
    }

    fn enabled_code(&self, code: u8) -> bool {
        code >= self.level.code()
    }

    #[track_caller]
    pub fn info(&self, msg: impl AsRef<str>) {
        self.emit_level(Level::Info, Location::caller(), msg.as_ref());
    }

    #[track_caller]
    pub fn debug(&self, msg: impl AsRef<str>) {
        self.emit_level(Level::Debug, Location::caller(), msg.as_ref());
    }

    #[track_caller]
    pub fn warn(&self, msg: impl AsRef<str>) {
        self.emit_level(Level::Warn, Location::caller(), msg.as_ref());
    }

    #[track_caller]
    pub fn error(&self, msg: impl AsRef<str>) {
        self.emit_level(Level::Error, Location::caller(), msg.as_ref());
    }

    /// Formatted entry point; usually reached through [`crate::logf!`].
    #[track_caller]
    pub fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logf_code(level.code(), args);
    }

    /// Like [`Log::logf`] for a raw numeric level. Codes outside the known
    /// range are gated numerically and styled as Info.
    #[track_caller]
    pub fn logf_code(&self, code: u8, args: fmt::Arguments<'_>) {
        self.logf_at(code, Caller::from_location(Location::caller()), args);
    }

    /// Formatted emission with an explicit call site, for callers that know
    /// their location better than the Rust call stack does.
    pub fn logf_at(&self, code: u8, caller: Caller<'_>, args: fmt::Arguments<'_>) {
        if !self.enabled_code(code) {
            return;
        }
        let message = match args.as_str() {
            Some(literal) => literal.to_string(),
            None => args.to_string(),
        };
        self.emit(code, Style::for_code(code), caller, &message);
    }

    fn emit_level(&self, level: Level, location: &Location<'_>, msg: &str) {
        self.emit(level.code(), level.style(), Caller::from_location(location), msg);
    }

    pub(crate) fn emit(&self, code: u8, style: Style, caller: Caller<'_>, msg: &str) {
        if !self.enabled_code(code) {
            return;
        }
        let timestamp = self.timestamp();
        let line = Layout {
            style,
            caller,
            timestamp: &timestamp,
            time_format: &self.time_format,
            use_color: self.use_color,
        }
        .render(msg);
        self.sink.write_line(&line);
    }

    fn timestamp(&self) -> String {
        if self.time_format.is_empty() {
            return String::new();
        }
        let mut rendered = String::new();
        if write!(rendered, "{}", Local::now().format(&self.time_format)).is_err() {
            // chrono reports unknown specifiers only while rendering
            return self.time_format.clone();
        }
        rendered
    }
}

impl Default for Log {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

impl Logr for Log {
    #[track_caller]
    fn info(&self, msg: &str) {
        Log::info(self, msg);
    }

    #[track_caller]
    fn debug(&self, msg: &str) {
        Log::debug(self, msg);
    }

    #[track_caller]
    fn warn(&self, msg: &str) {
        Log::warn(self, msg);
    }

    #[track_caller]
    fn error(&self, msg: &str) {
        Log::error(self, msg);
    }

    #[track_caller]
    fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        Log::logf(self, level, args);
    }
}

/// Formats and emits a record at an explicit level, reporting the macro's call site.
///
/// ```
/// use logr::{logf, Level, Log, Sink};
///
/// let (sink, capture) = Sink::capture();
/// let log = Log::default().with_writer(sink);
/// logf!(log, Level::Error, "code={}", 7);
/// assert!(capture.contents().ends_with("code=7\n"));
/// ```
#[macro_export]
macro_rules! logf {
    ($log:expr, $level:expr, $($arg:tt)+) => {
        $log.logf($level, ::std::format_args!($($arg)+))
    };
}
