//! Span timing for profiling, enabled with `--features instrumentation`.
//!
//! Functions marked with `#[instrument]` (search, move generation, move
//! application) emit a span; each span's busy and idle time is printed when it
//! closes. `RUST_LOG` selects which spans are kept.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. Without `RUST_LOG` only search
/// spans are reported.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("chessmatch::searcher=trace"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .compact()
        .finish();

    // `log` records keep going to env_logger, so only the tracing dispatcher is set here.
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", err);
    }
}
