use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log expansion cache metrics at debug level.
///
/// Usage:
/// ```rust,ignore
/// let cache = ExpansionCache::from_oracle(oracle);
/// // ... run a search ...
/// log_cache_metrics!(cache.metrics(), "search");
/// ```
#[macro_export]
macro_rules! log_cache_metrics {
    ($metrics:expr, $name:expr) => {
        tracing::debug!(
            operation = $name,
            cache_hits = $metrics.hits(),
            cache_misses = $metrics.misses(),
            cache_failures = $metrics.failures(),
            cache_hit_rate = $metrics.hit_rate(),
            "cache_metrics"
        );
    };
}

/// Helper macro for logging elapsed time at trace level.
///
/// Usage:
/// ```rust,ignore
/// let start = Instant::now();
/// // ... some work ...
/// trace_time!(start, "operation_name");
/// // Or with additional fields:
/// trace_time!(start, "operation_name", node = node);
/// ```
#[macro_export]
macro_rules! trace_time {
    ($start:expr, $name:expr) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $name);
    };
    ($start:expr, $name:expr $(, $field:ident = $value:expr)*) => {
        tracing::trace!(elapsed = ?$start.elapsed(), $($field = $value),*, $name);
    };
}

/// Initialize structured logging based on CLI arguments
pub fn init_tracing(
    verbose: bool,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = match (verbose, log_level) {
        (true, None) => "linkpath=debug",
        (false, None) => "linkpath=warn",
        (_, Some(level)) => return init_with_level(level, log_json),
    };

    init_with_level(level, log_json)
}

/// Build the filter for a level string.
///
/// `RUST_LOG` wins, then `LINKPATH_LOG`, then the given level. A bare level such as
/// `debug` is scoped to the linkpath targets (which include `linkpath_core`).
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env("LINKPATH_LOG"))
        .unwrap_or_else(|_| {
            EnvFilter::new(if level.contains('=') {
                level.to_string()
            } else {
                format!("linkpath={}", level)
            })
        })
}

fn init_with_level(level: &str, log_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(build_filter(level));

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(
                        tracing_subscriber::fmt::format::FmtSpan::NEW
                            | tracing_subscriber::fmt::format::FmtSpan::CLOSE,
                    ),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}
