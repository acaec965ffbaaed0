//! Background TTL sweep for learned triggers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::engine::LearningEngine;

/// Periodically runs [`LearningEngine::expire_learned_terms`] on the blocking pool.
///
/// Must be spawned from inside a tokio runtime. Dropping the handle stops the
/// loop after the current sweep; [`shutdown`](Self::shutdown) also waits for it.
pub struct ExpirySweeper {
    shutdown_tx: broadcast::Sender<()>,
    task_handle: Option<JoinHandle<()>>,
    sweeps: Arc<AtomicU64>,
}

impl ExpirySweeper {
    /// Spawn with the engine's configured `sweep_interval_secs`.
    pub fn from_config(engine: Arc<LearningEngine>) -> Self {
        let period = Duration::from_secs(engine.config().sweep_interval_secs.max(1));
        Self::spawn(engine, period)
    }

    /// Spawn a sweeper that first fires one `period` from now.
    pub fn spawn(engine: Arc<LearningEngine>, period: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let sweeps = Arc::new(AtomicU64::new(0));

        let task_handle = tokio::spawn(run_sweep_loop(
            engine,
            period,
            shutdown_rx,
            Arc::clone(&sweeps),
        ));

        Self {
            shutdown_tx,
            task_handle: Some(task_handle),
            sweeps,
        }
    }

    /// Number of sweeps completed so far.
    pub fn completed_sweeps(&self) -> u64 {
        self.sweeps.load(Ordering::Relaxed)
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Signal the loop to stop and wait for it to exit.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.task_handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "learned term sweeper task failed");
            }
        }
    }
}

impl Drop for ExpirySweeper {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn run_sweep_loop(
    engine: Arc<LearningEngine>,
    period: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
    sweeps: Arc<AtomicU64>,
) {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_secs = period.as_secs_f64(), "learned term sweeper started");

    loop {
        tokio::select! {
            _ = timer.tick() => {
                let engine = Arc::clone(&engine);
                match tokio::task::spawn_blocking(move || engine.expire_learned_terms()).await {
                    Ok(changed) => {
                        sweeps.fetch_add(1, Ordering::Relaxed);
                        debug!(changed, "learned term sweep finished");
                    }
                    Err(e) => warn!(error = %e, "learned term sweep panicked"),
                }
            }
            _ = shutdown_rx.recv() => break,
        }
    }
    info!("learned term sweeper stopped");
}
