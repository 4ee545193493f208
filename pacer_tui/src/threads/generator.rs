use std::time::Duration;

use pacer_sim::{PeriodicTask, Simulator};
use tracing::info;

use super::{Thread, ThreadError, ThreadResult};

/// Adapts the simulator's generator loop to the thread group.
pub struct GeneratorThread {
    task: Option<PeriodicTask>,
}

impl GeneratorThread {
    pub fn new(simulator: &Simulator, tick_period: Duration) -> Result<Self, ThreadError> {
        let task = simulator.start(tick_period)?;
        Ok(Self { task: Some(task) })
    }
}

impl Thread for GeneratorThread {
    fn name(&self) -> &str {
        "pacer-generator"
    }

    fn terminate(&mut self) -> ThreadResult {
        if let Some(task) = self.task.take() {
            info!(task = task.name(), "stopping event generator");
            task.cancel()?;
        }
        Ok(())
    }
}
