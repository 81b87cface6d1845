
use stderrlog::LogLevelNum;

/// Installs the stderr logger. `debug_mode` 0 shows warnings and errors only,
/// 1 adds phase information, 2 adds progress and 3 or more enables tracing.
pub fn setup_logging(debug_mode: u8) -> Result<(), log::SetLoggerError> {

    let log_level = match debug_mode {
        0 => LogLevelNum::Warn,
        1 => LogLevelNum::Info,
        2 => LogLevelNum::Debug,
        _ => LogLevelNum::Trace,
    };

    stderrlog::new()
        .verbosity(log_level)
        .timestamp(stderrlog::Timestamp::Second)
        .init()
}
