use std::io::{self, IsTerminal};
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use thiserror::Error;

use crate::format::Caller;
use crate::level::{Level, ParseLevelError};
use crate::logger::DEFAULT_TIME_FORMAT;

#[derive(Parser, Debug)]
#[command(
    name = "logr",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Cli {
    /// Lowest level that is printed (gate order: info < debug < warn < error)
    #[arg(
        short = 'm',
        long,
        value_name = "LEVEL",
        env = "LOGR_LEVEL",
        default_value = "info",
        global = true
    )]
    pub min_level: Level,

    /// When to decorate records with ANSI colors
    #[arg(
        long,
        value_enum,
        value_name = "WHEN",
        env = "LOGR_COLOR",
        default_value_t = ColorMode::Auto,
        global = true
    )]
    pub color: ColorMode,

    /// Add a timestamp column (`--time` or `--time=<strftime format>`)
    #[arg(
        short = 't',
        long,
        value_name = "FORMAT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = DEFAULT_TIME_FORMAT,
        global = true
    )]
    pub time: Option<String>,

    /// Call site printed in the caller column, e.g. `deploy.sh:42`
    #[arg(long, value_name = "FILE:LINE", global = true)]
    pub caller: Option<CallSite>,

    /// Print logr's own diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Emit one record (`logr emit -h` for details)
    Emit(EmitOptions),
    /// Print a shell completion script
    Completions(CompletionsOptions),
    /// Emit directly (shorthand for `logr emit <LEVEL> ...`)
    #[command(external_subcommand)]
    Direct(Vec<String>),
}

#[derive(Args, Debug)]
#[command(trailing_var_arg = true)]
pub struct EmitOptions {
    /// Record level: a name or a numeric code (unknown codes print as info)
    #[arg(name = "LEVEL")]
    pub level: RecordLevel,

    /// Message words, joined with single spaces
    #[arg(name = "MESSAGE", allow_hyphen_values = true)]
    pub message: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CompletionsOptions {
    /// Target shell
    #[arg(name = "SHELL", value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Level of an emitted record. Unlike [`Level`], any numeric code is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLevel(pub u8);

impl FromStr for RecordLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Level>() {
            Ok(level) => Ok(RecordLevel(level.code())),
            Err(ParseLevelError::UnknownCode(code)) => Ok(RecordLevel(code)),
            Err(err) => Err(err),
        }
    }
}

/// `FILE:LINE` supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: String,
    pub line: u32,
}

impl CallSite {
    pub fn as_caller(&self) -> Caller<'_> {
        Caller::new(&self.file, self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("call site must look like FILE:LINE, got '{0}'")]
pub struct ParseCallSiteError(String);

impl FromStr for CallSite {
    type Err = ParseCallSiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (file, line) = s
            .rsplit_once(':')
            .ok_or_else(|| ParseCallSiteError(s.to_string()))?;
        let line = line
            .parse()
            .map_err(|_| ParseCallSiteError(s.to_string()))?;
        if file.is_empty() {
            return Err(ParseCallSiteError(s.to_string()));
        }
        Ok(CallSite {
            file: file.to_string(),
            line,
        })
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
