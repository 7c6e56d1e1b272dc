//! Expiry Sweeper
//!
//! Background task that evicts expired sessions on a fixed period until
//! told to stop.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::infra::session_registry::SessionRegistry;

/// Shortest period the loop will run at
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

pub struct ExpirySweeper {
    sessions: Arc<SessionRegistry>,
}

impl ExpirySweeper {
    pub fn new(sessions: Arc<SessionRegistry>) -> Self {
        Self { sessions }
    }

    /// One full scan. Returns the number of sessions removed.
    pub fn sweep_once(&self) -> usize {
        let removed = self.sessions.remove_expired(Utc::now());
        if removed > 0 {
            tracing::info!(removed, remaining = self.sessions.len(), "Expired sessions swept");
        } else {
            tracing::debug!("Sweep found no expired sessions");
        }
        removed
    }

    /// Run [`Self::sweep_once`] every `interval` on the current runtime.
    ///
    /// Intervals below [`MIN_SWEEP_INTERVAL`] are raised to it.
    pub fn spawn(sessions: Arc<SessionRegistry>, interval: Duration) -> SweeperHandle {
        if interval < MIN_SWEEP_INTERVAL {
            tracing::warn!(
                requested_ms = interval.as_millis() as u64,
                min_secs = MIN_SWEEP_INTERVAL.as_secs(),
                "Sweep interval too short, using minimum"
            );
        }
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let sweeper = Self::new(sessions);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        sweeper.sweep_once();
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Expiry sweeper stopping");
                        break;
                    }
                }
            }
        });

        tracing::info!(interval_secs = interval.as_secs(), "Expiry sweeper started");

        SweeperHandle {
            shutdown_tx: Some(shutdown_tx),
            task,
        }
    }
}

/// Owns the running sweeper task
pub struct SweeperHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl SweeperHandle {
    /// Signal the loop and wait for it to exit
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::warn!(error = %e, "Expiry sweeper task ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::fixtures::session_with;
    use chrono::TimeDelta;

    #[test]
    fn test_sweep_once_removes_only_expired() {
        let sessions = Arc::new(SessionRegistry::new());
        sessions
            .insert(session_with("/orders", TimeDelta::seconds(-1)))
            .unwrap();
        sessions
            .insert(session_with("/orders", TimeDelta::minutes(30)))
            .unwrap();

        let sweeper = ExpirySweeper::new(Arc::clone(&sessions));

        assert_eq!(sweeper.sweep_once(), 1);
        assert_eq!(sessions.len(), 1);
        assert_eq!(sweeper.sweep_once(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_sweeper_runs_each_interval() {
        let sessions = Arc::new(SessionRegistry::new());
        sessions
            .insert(session_with("/orders", TimeDelta::seconds(-1)))
            .unwrap();

        let handle = ExpirySweeper::spawn(Arc::clone(&sessions), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(sessions.is_empty());

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_is_raised_to_minimum() {
        let sessions = Arc::new(SessionRegistry::new());
        sessions
            .insert(session_with("/orders", TimeDelta::seconds(-1)))
            .unwrap();

        let handle = ExpirySweeper::spawn(Arc::clone(&sessions), Duration::ZERO);

        tokio::time::sleep(MIN_SWEEP_INTERVAL + Duration::from_millis(10)).await;
        assert!(sessions.is_empty());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let sessions = Arc::new(SessionRegistry::new());
        let handle = ExpirySweeper::spawn(sessions, Duration::from_secs(3600));

        tokio::time::timeout(Duration::from_secs(1), handle.shutdown())
            .await
            .expect("sweeper did not stop");
    }
}
