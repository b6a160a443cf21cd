//! Process-wide observability setup (tracing/logging).

pub mod tracing;

/// Initialize tracing/logging for the process.
///
/// Safe to call more than once; later calls become no-ops.
pub fn init() {
    tracing::init();
}
