#![doc = include_str!("../README.md")]

pub mod cli;
pub mod completions;
pub mod diagnostics;
pub mod facade;
pub mod format;
pub mod global;
pub mod level;
pub mod logger;
pub mod sink;

pub use facade::init;
pub use format::{Caller, FILE_WIDTH, LABEL_WIDTH};
pub use global::{debug, default_logger, error, info, set_default, warn};
pub use level::{Level, ParseLevelError, Style};
pub use logger::{Log, Logr, DEFAULT_TIME_FORMAT};
pub use sink::{Capture, Sink};

use clap::Parser;
use cli::{CallSite, Cli, Commands, RecordLevel};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("a level is required when omitting the 'emit' subcommand")]
    MissingLevel,
    #[error(transparent)]
    Level(#[from] ParseLevelError),
}

pub fn run() -> Result<(), RunError> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

pub fn run_with_cli(cli: Cli) -> Result<(), RunError> {
    run_with_sink(cli, Sink::stdout())
}

/// Runs the command line against an explicit sink instead of stdout. Both
/// records and completion scripts go to the sink.
pub fn run_with_sink(cli: Cli, sink: Sink) -> Result<(), RunError> {
    diagnostics::init(cli.verbose);
    log::debug!("cli args: {:?}", cli);

    let log = build_logger(&cli, sink);
    dispatcher(cli.cmd, &log, cli.caller.as_ref())
}

fn build_logger(cli: &Cli, sink: Sink) -> Log {
    let mut log = Log::new(cli.min_level).with_writer(sink);
    if cli.color.enabled() {
        log = log.with_color();
    }
    if let Some(format) = &cli.time {
        log = log.with_time_format(format.as_str());
    }
    log::debug!(
        "logger: floor={} color={} time={:?}",
        log.level(),
        log.uses_color(),
        log.time_format()
    );
    log
}

fn dispatcher(cmd: Commands, log: &Log, site: Option<&CallSite>) -> Result<(), RunError> {
    log::debug!("dispatching command: {:?}", cmd);
    match cmd {
        Commands::Emit(opts) => {
            emit_record(log, opts.level, &opts.message, site);
            Ok(())
        }
        Commands::Completions(opts) => {
            log::info!("printing {} completions", opts.shell);
            let mut script = Vec::new();
            completions::write(opts.shell, &mut script);
            log.sink().write_line(&String::from_utf8_lossy(&script));
            Ok(())
        }
        Commands::Direct(raw) => {
            let (level, message) = raw.split_first().ok_or_else(|| {
                log::warn!("direct emission without a level");
                RunError::MissingLevel
            })?;
            let level: RecordLevel = level.parse()?;
            emit_record(log, level, message, site);
            Ok(())
        }
    }
}

fn emit_record(log: &Log, level: RecordLevel, words: &[String], site: Option<&CallSite>) {
    let message = words.join(" ");
    let caller = site.map_or(Caller::UNKNOWN, |site| site.as_caller());
    log.logf_at(level.0, caller, format_args!("{message}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_with(cmd: Commands) -> Cli {
        Cli {
            min_level: Level::Info,
            color: cli::ColorMode::Never,
            time: None,
            caller: None,
            verbose: false,
            cmd,
        }
    }

    #[test]
    fn direct_without_level_is_an_error() {
        let (sink, capture) = Sink::capture();
        let result = run_with_sink(cli_with(Commands::Direct(vec![])), sink);
        assert!(matches!(result, Err(RunError::MissingLevel)));
        assert!(capture.is_empty());
    }

    #[test]
    fn direct_with_bad_level_is_an_error() {
        let (sink, _capture) = Sink::capture();
        let raw = vec!["loud".to_string(), "hi".to_string()];
        let err = run_with_sink(cli_with(Commands::Direct(raw)), sink).unwrap_err();
        assert!(err.to_string().contains("unknown level name 'loud'"));
    }

    #[test]
    fn emit_uses_given_call_site() {
        let (sink, capture) = Sink::capture();
        let mut cli = cli_with(Commands::Emit(cli::EmitOptions {
            level: RecordLevel(3),
            message: vec!["low".to_string(), "disk".to_string()],
        }));
        cli.caller = Some("scripts/backup.sh:8".parse().unwrap());
        run_with_sink(cli, sink).unwrap();
        assert_eq!(capture.contents(), "\x1b[1m[WARN]  ...ckup.sh:8 low disk\n");
    }

    #[test]
    fn emit_without_call_site_uses_sentinel() {
        let (sink, capture) = Sink::capture();
        let raw = vec!["error".to_string(), "boom".to_string()];
        run_with_sink(cli_with(Commands::Direct(raw)), sink).unwrap();
        assert_eq!(capture.contents(), "\x1b[1m[ERROR] ???:0      boom\n");
    }

    #[test]
    fn completions_go_to_the_given_sink() {
        let (sink, capture) = Sink::capture();
        let cli = cli_with(Commands::Completions(cli::CompletionsOptions {
            shell: clap_complete::Shell::Bash,
        }));
        run_with_sink(cli, sink).unwrap();
        assert!(capture.contents().contains("_logr()"));
    }

    #[test]
    fn message_with_trailing_newline_ends_once() {
        let (sink, capture) = Sink::capture();
        let raw = vec!["warn".to_string(), "x\n".to_string()];
        run_with_sink(cli_with(Commands::Direct(raw)), sink).unwrap();
        assert_eq!(capture.contents(), "\x1b[1m[WARN]  ???:0      x\n");
    }

    #[test]
    fn gated_record_succeeds_silently() {
        let (sink, capture) = Sink::capture();
        let mut cli = cli_with(Commands::Direct(vec!["info".to_string(), "x".to_string()]));
        cli.min_level = Level::Debug;
        run_with_sink(cli, sink).unwrap();
        assert!(capture.is_empty());
    }
}
