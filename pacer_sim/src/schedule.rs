//! Periodic background work with scoped cancellation.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::runtime::Builder;
use tokio::sync::oneshot;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::error::{PacerSimError, PacerSimResult};

/// A callback run once per period on a dedicated thread until cancelled.
///
/// Dropping the task cancels it. Once [`PeriodicTask::cancel`] returns, the callback
/// will not run again.
pub struct PeriodicTask {
    name: String,
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl PeriodicTask {
    pub fn spawn<F>(name: &str, period: Duration, on_tick: F) -> PacerSimResult<Self>
    where
        F: FnMut() + Send + 'static,
    {
        if period.is_zero() {
            return Err(PacerSimError::Schedule(format!(
                "`{name}` needs a non-zero period"
            )));
        }
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || Self::run(period, cancel_rx, on_tick))?;
        debug!(task = name, period_ms = period.as_millis() as u64, "periodic task started");
        Ok(Self {
            name: name.to_string(),
            cancel_tx: Some(cancel_tx),
            handle: Some(handle),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Stops the task and waits for its thread.
    pub fn cancel(mut self) -> PacerSimResult<()> {
        self.stop()
    }

    fn run<F: FnMut()>(
        period: Duration,
        mut cancel_rx: oneshot::Receiver<()>,
        mut on_tick: F,
    ) -> std::io::Result<()> {
        let runtime = Builder::new_current_thread().enable_time().build()?;
        runtime.block_on(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => break,
                    _ = interval.tick() => on_tick(),
                }
            }
        });
        Ok(())
    }

    fn stop(&mut self) -> PacerSimResult<()> {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
        }
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match handle.join() {
            Err(panic) => Err(PacerSimError::TaskPanicked(
                self.name.clone(),
                panic_message(panic.as_ref()),
            )),
            Ok(res) => {
                debug!(task = %self.name, "periodic task stopped");
                Ok(res?)
            }
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!(task = %self.name, error = %e, "periodic task ended abnormally");
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
