//! Bridge to the `log` crate so `log::info!` and friends render through a [`Log`].

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::format::Caller;
use crate::level::Level;
use crate::logger::Log;

impl log::Log for Log {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        Log::enabled(self, Level::from(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        let level = Level::from(record.level());
        if !Log::enabled(self, level) {
            return;
        }
        let caller = Caller::from_parts(record.file(), record.line());
        let message = match record.args().as_str() {
            Some(literal) => literal.to_string(),
            None => record.args().to_string(),
        };
        self.emit(level.code(), level.style(), caller, &message);
    }

    fn flush(&self) {
        self.sink().flush();
    }
}

/// Installs `log` as the process-wide `log` backend.
///
/// Filtering stays with the logger's own floor, so the facade's max level is
/// left wide open.
pub fn init(log: Log) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(log))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}
