use tracing_subscriber::EnvFilter;

/// Installs the JSON subscriber used by every Lambda binary.
///
/// Honors `RUST_LOG` and falls back to `info`. Timestamps are omitted because
/// CloudWatch records its own. Calling this more than once is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_target(false)
        .without_time()
        .try_init();
}
