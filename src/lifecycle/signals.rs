//! OS signal handling.
//!
//! A run cannot be partially cancelled; an interrupt abandons the whole
//! invocation.

/// Resolves on Ctrl-C (SIGINT).
///
/// If the handler cannot be installed the future never resolves, so the
/// run is simply left to finish.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
