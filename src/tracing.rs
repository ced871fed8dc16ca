use time::{format_description, UtcOffset};
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber};

const TRACE_VAR_NAME: &str = "TRACE";

// Sets up tracing. Goes to stderr, filtered by TRACE env var.
// Levels are: trace, debug, info, warn, error
//
// EnvFilter has a standard syntax, but basically can be boiled down to (for example):
//
// All targets, info level:               info
// The report parsers, trace level:       kapreport::report=trace
// Global at info, parsers as debug:      info,kapreport::report=debug
//
// https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html
pub fn setup_tracing() {
    // 5 digits of precision is apparently good enough.
    let time_format =
        match format_description::parse("[hour]:[minute]:[second].[subsecond digits:5]")
        {
            Ok(f) => f,
            Err(_) => return,
        };

    // This can fail if the process is multi-threaded at this point.
    let time_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(time_offset, time_format);

    // Off by default, unless TRACE is set.
    let subscriber = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_env(TRACE_VAR_NAME))
        .with_timer(timer)
        .finish();

    // Tests may set this up more than once.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Appends a directive (eg. "kapreport=debug") to the TRACE filter.
/// Must be called before setup_tracing, and before any threads are spawned.
pub fn enable_trace_env(trace_env: &str) {
    if let Ok(existing_env) = std::env::var(TRACE_VAR_NAME) {
        std::env::set_var(TRACE_VAR_NAME, existing_env + "," + trace_env);
    } else {
        std::env::set_var(TRACE_VAR_NAME, trace_env);
    }
}
