use crate::*;
use axum_server::Handle;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Duration,
};

const GRACE_PERIOD: Duration = Duration::from_secs(1);

/// Interface for graceful shutdowns
#[derive(Debug, Default, Clone)]
pub struct Shutdown {
    initiated: Arc<AtomicBool>,
    server_handles: Arc<Mutex<Vec<Handle>>>,
}

impl Shutdown {
    pub fn initiate(&self) {
        if self.initiated.swap(true, Ordering::SeqCst) {
            return;
        }
        warn!(target: "server", "Initiating shutdown process");
        let handles = match self.server_handles.lock() {
            Ok(handles) => handles,
            Err(poisoned) => poisoned.into_inner(),
        };
        // stopping the servers
        for handle in handles.iter() {
            handle.graceful_shutdown(Some(GRACE_PERIOD))
        }
        debug!(target: "server", "Sent graceful shutdown signals for {} servers", handles.len());
    }

    pub fn in_progress(&self) -> bool {
        self.initiated.load(Ordering::SeqCst)
    }

    pub fn new_server_handle(&self) -> Handle {
        let handle = Handle::new();
        match self.server_handles.lock() {
            Ok(mut handles) => handles.push(handle.clone()),
            Err(poisoned) => poisoned.into_inner().push(handle.clone()),
        }
        handle
    }

    /// Waits for Ctrl-C or SIGTERM and initiates the shutdown
    pub async fn listen(self) {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(target: "server", "Error listening for Ctrl-C: {e}");
                std::future::pending::<()>().await
            }
        };

        #[cfg(unix)]
        let terminate = async {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(e) => {
                    error!(target: "server", "Error listening for shutdown(SIGTERM) signal: {e}");
                    std::future::pending::<()>().await
                }
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => warn!(target: "server", "Received Ctrl-C"),
            _ = terminate => warn!(target: "server", "Received shutdown(SIGTERM) signal"),
        }
        self.initiate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initiates_once() {
        let shutdown = Shutdown::default();
        let _handle = shutdown.new_server_handle();
        assert!(!shutdown.in_progress());

        shutdown.initiate();
        assert!(shutdown.in_progress());
        shutdown.clone().initiate();
        assert!(shutdown.in_progress());
    }
}
