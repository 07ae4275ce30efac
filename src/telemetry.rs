//! Opt-in `tracing` subscriber setup for hosts embedding `progress-chart`.
//!
//! The crate itself only emits events (`progress_chart::*` targets). Hosts that
//! already run a subscriber should ignore this module entirely.

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to `info`.
///
/// See [`init_tracing_with_fallback`] for the return contract.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback("info")
}

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `fallback_directives` (for example `"progress_chart=trace"`) when the
/// environment variable is unset or unparsable.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directives));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directives;
        false
    }
}
