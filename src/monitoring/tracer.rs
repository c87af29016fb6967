/*!
 * Structured Tracing
 * Subscriber setup and spans for the simulation driver
 */

use tracing::{info, span, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PROCESS_SIM_TRACE_JSON: Enable JSON output (default: false)
///
/// A second call is a no-op; the first installed subscriber stays in place.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var("PROCESS_SIM_TRACE_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = use_json, "Structured tracing initialized");
    }
}

/// Span covering one driver tick
pub fn span_tick(tick: u64, quantum: u64) -> Span {
    span!(Level::DEBUG, "tick", tick, quantum)
}
