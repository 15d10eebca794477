// Signal handling module
//
// - SIGINT  (Ctrl+C): shutdown
// - SIGTERM:          shutdown

use crate::logger;

/// Resolve once the process is asked to stop, returning the signal name
#[cfg(unix)]
pub async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => Some(s),
        Err(e) => {
            logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            None
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
                std::future::pending::<()>().await;
            }
            "Keyboard interrupt"
        }
        Some(()) = async {
            match sigterm.as_mut() {
                Some(s) => s.recv().await,
                None => std::future::pending().await,
            }
        } => "SIGTERM",
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() -> &'static str {
    if let Err(e) = tokio::signal::ctrl_c().await {
        logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
        std::future::pending::<()>().await;
    }
    "Keyboard interrupt"
}
