use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::authentication::ports::AuthServicePort;

/// Periodically removes expired refresh tokens until told to stop.
pub struct TokenSweeper {
    auth_service: Arc<dyn AuthServicePort>,
    interval: Duration,
}

impl TokenSweeper {
    pub fn new(auth_service: Arc<dyn AuthServicePort>, interval: Duration) -> Self {
        Self {
            auth_service,
            interval,
        }
    }

    /// Spawn the sweep loop. The task ends once `shutdown` flips to `true`
    /// or its sender is dropped.
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    async fn run(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Starting expired refresh token sweeper"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.sweep().await,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Expired refresh token sweeper stopped");
    }

    async fn sweep(&self) {
        match self.auth_service.purge_expired_tokens().await {
            Ok(0) => tracing::debug!("No expired refresh tokens"),
            Ok(count) => tracing::info!(count, "Purged expired refresh tokens"),
            Err(e) => tracing::error!(error = %e, "Refresh token purge failed"),
        }
    }
}
