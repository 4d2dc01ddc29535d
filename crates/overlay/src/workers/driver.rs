//! Fixed-rate tick source for hosts without their own game loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::api::{ContextKey, OverlayError, Result, TickEvent};
use crate::hooks::LocalEventHub;

/// Background task firing tick events into a [`LocalEventHub`].
///
/// Each period fires one tick per context, all with the same tick number.
/// Tick numbers start at 0.
#[derive(Debug)]
pub struct TickDriver {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<u64>,
}

impl TickDriver {
    /// Spawns the driver on the current tokio runtime.
    pub fn spawn(hub: Arc<LocalEventHub>, contexts: Vec<ContextKey>, period: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run(hub, contexts, period, shutdown_rx));
        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stops the driver and returns how many ticks it fired.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::DriverJoin`] if the task panicked or was
    /// cancelled.
    pub async fn shutdown(self) -> Result<u64> {
        if self.shutdown_tx.send(()).is_err() {
            debug!(target: "overlay::driver", "driver already stopped");
        }
        self.handle.await.map_err(OverlayError::DriverJoin)
    }
}

async fn run(
    hub: Arc<LocalEventHub>,
    contexts: Vec<ContextKey>,
    period: Duration,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> u64 {
    info!(
        target: "overlay::driver",
        period_ms = period.as_millis() as u64,
        contexts = contexts.len(),
        "tick driver started"
    );

    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut tick = 0u64;

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,
            _ = interval.tick() => {
                for &context in &contexts {
                    hub.fire_tick(TickEvent::new(context, tick));
                }
                tick += 1;
            }
        }
    }

    info!(target: "overlay::driver", ticks = tick, "tick driver stopped");
    tick
}
