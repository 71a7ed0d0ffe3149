//! Tracing/logging setup shared by processes embedding a realm.

/// Tracing configuration (filters, formatting).
pub mod tracing;

pub use self::tracing::{LogFormat, TracingConfig};

/// Initialize process-wide tracing with the defaults (`RUST_LOG`, JSON output).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&TracingConfig::default());
}
