// Conditional logging macros - only active in debug builds

use log::LevelFilter;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Sends log records to stderr. `RUST_LOG` overrides `-v`, except under the
/// full-screen UI where any output would corrupt the display.
pub fn init_logging(verbosity: u8, full_screen: bool) {
    let mut builder = env_logger::Builder::new();
    if full_screen {
        builder.filter_level(LevelFilter::Off);
    } else {
        builder
            .filter_level(level_for_verbosity(verbosity))
            .parse_default_env();
    }
    builder.format_timestamp(None);
    // a logger may already be installed (tests)
    let _ = builder.try_init();
}
