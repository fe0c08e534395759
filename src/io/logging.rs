//! Minimal stderr backend for the `log` facade used by the binary

use log::{LevelFilter, Log, Metadata, Record};

/// Writes `log` records to stderr as `LEVEL message`
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    // Allow print, stderr is this backend's only output
    #[allow(clippy::print_stderr)]
    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Level matching the CLI verbosity flags
pub const fn level_for(quiet: bool, debug: bool) -> LevelFilter {
    if debug {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Off
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger once and set the maximum level
///
/// Returns `false` if another logger was installed first; the level is still
/// applied.
pub fn init(level: LevelFilter) -> bool {
    let installed = log::set_logger(&LOGGER).is_ok();
    log::set_max_level(level);
    installed
}
