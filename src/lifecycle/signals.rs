//! OS signal handling.

/// Resolve once the user asks the process to stop (Ctrl-C / SIGINT).
pub async fn wait_for_interrupt() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupt received, shutting down"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for interrupt, waiting forever");
            std::future::pending::<()>().await;
        }
    }
}
