#![allow(dead_code)]

#[cfg(feature = "std")]
mod clock;
#[cfg(feature = "serde")]
mod serialization;
#[cfg(feature = "tzdb")]
mod zone;

/// A simple logger for the integration tests.
///
/// Enable the `logging` crate feature and run the tests with
/// `--nocapture` to see what `hora` is doing, e.g., while resolving a
/// datetime in a gap.
#[derive(Debug)]
struct Logger(());

const LOGGER: &'static Logger = &Logger(());

impl Logger {
    /// Installs the logger. Errors from installing it more than once are
    /// the caller's to ignore.
    pub fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.target().starts_with("hora")
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match (record.file(), record.line()) {
            (Some(file), Some(line)) => {
                eprintln!(
                    "{}|{}|{}:{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    line,
                    record.args()
                );
            }
            (Some(file), None) => {
                eprintln!(
                    "{}|{}|{}: {}",
                    record.level(),
                    record.target(),
                    file,
                    record.args()
                );
            }
            _ => {
                eprintln!(
                    "{}|{}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}
