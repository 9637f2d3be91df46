//! Internal diagnostics for the `logr` binary, kept on stderr so they never
//! mix with emitted records.
use env_logger::{Builder, Env, Target};
use std::io::Write;

pub const FILTER_ENV: &str = "LOGR_DIAG";

/// `--verbose` raises the fallback filter; an explicit `LOGR_DIAG` always wins.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "off" };
    let mut builder = Builder::from_env(Env::default().filter_or(FILTER_ENV, fallback));

    builder.target(Target::Stderr).format(|buf, record| {
        writeln!(
            buf,
            "logr[{:>5} {}:{}] {}",
            record.level(),
            record
                .file()
                .and_then(|file| file.rsplit('/').next())
                .unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        )
    });

    if builder.try_init().is_err() {
        log::debug!("diagnostics were already initialized");
    }
}
