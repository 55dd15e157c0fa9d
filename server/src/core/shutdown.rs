//! Process-wide shutdown signal

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::constants::SHUTDOWN_TIMEOUT_SECS;

/// Broadcasts a one-way "stop" flag to the HTTP server and anything else
/// that subscribes
#[derive(Clone)]
pub struct ShutdownService {
    flag: Arc<watch::Sender<bool>>,
}

impl Default for ShutdownService {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownService {
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self {
            flag: Arc::new(flag),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.flag.subscribe()
    }

    /// Idempotent
    pub fn trigger(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.flag.borrow()
    }

    /// Owned future resolving once `trigger` has been called, suitable for
    /// `with_graceful_shutdown`
    pub fn wait(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        let mut rx = self.subscribe();
        async move {
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    /// Deadline for in-flight requests once shutdown has been signalled
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(SHUTDOWN_TIMEOUT_SECS)
    }

    /// Trigger on Ctrl+C or SIGTERM
    pub fn install_signal_handlers(&self) {
        let service = self.clone();
        tokio::spawn(async move {
            let signal = os_signal().await;
            tracing::debug!(signal, "Received signal, shutting down");
            service.trigger();
        });
    }
}

async fn os_signal() -> &'static str {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "SIGINT",
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending().await
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                "SIGTERM"
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&'static str>();

    tokio::select! {
        name = ctrl_c => name,
        name = terminate => name,
    }
}
