// Server loop module
// Accepts connections until a shutdown is signalled

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// How long in-flight connections get to finish after shutdown
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run the accept loop on the current `LocalSet`.
///
/// Returns once `shutdown` is notified and the in-flight connections have
/// finished or the drain timeout has passed.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown("Shutdown signal received");
                break;
            }
        }
    }

    drop(listener);
    drain_connections(&active_connections).await;
    Ok(())
}

async fn drain_connections(active_connections: &AtomicUsize) {
    let deadline = tokio::time::Instant::now() + DRAIN_TIMEOUT;
    loop {
        let remaining = active_connections.load(Ordering::SeqCst);
        if remaining == 0 {
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Closing with {remaining} connection(s) still open"
            ));
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_returns_when_idle() {
        let counter = AtomicUsize::new(0);
        tokio::time::timeout(Duration::from_secs(1), drain_connections(&counter))
            .await
            .unwrap();
    }
}
