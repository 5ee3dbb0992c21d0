//! Logger set-up shared by the binary and tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level selected by a `-v` count: info by default, then debug, then trace.
///
/// # Examples
/// ```
/// use log::LevelFilter;
/// use leashline::logging::level_for;
/// assert_eq!(level_for(0), LevelFilter::Info);
/// assert_eq!(level_for(5), LevelFilter::Trace);
/// ```
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes the global logger at the level for `verbosity`.
///
/// `RUST_LOG` takes precedence when set. Repeated calls are ignored so tests
/// can initialise logging freely.
pub fn init(verbosity: u8) {
    let env = Env::default().default_filter_or(level_for(verbosity).to_string());
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    if builder.try_init().is_err() {
        log::trace!("logger already initialised");
    }
}
