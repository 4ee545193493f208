use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::clock::Clock;
use crate::config::{self, PacingConfig, SharedConfig};
use crate::error::PacerSimResult;
use crate::event_log::{self, EventLog, Retention, SharedEventLog};
use crate::generator::Generator;
use crate::schedule::PeriodicTask;

/// Owns the state shared between the controls, the generator loop and the display.
pub struct Simulator {
    config: SharedConfig,
    log: SharedEventLog,
    clock: Arc<dyn Clock>,
}

impl Simulator {
    pub fn new(config: PacingConfig, retention: Retention, clock: Arc<dyn Clock>) -> Self {
        Self {
            config: config::shared(config),
            log: event_log::shared(EventLog::new(retention)),
            clock,
        }
    }

    pub fn config(&self) -> SharedConfig {
        self.config.clone()
    }

    pub fn log(&self) -> SharedEventLog {
        self.log.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Starts the generator loop. Both cursors start at the current clock time; the
    /// configuration is re-read on every tick.
    pub fn start(&self, period: Duration) -> PacerSimResult<PeriodicTask> {
        let mut generator = Generator::new(self.clock.now_ms(), self.log.clone());
        let shared_config = self.config.clone();
        let clock = self.clock.clone();
        info!(
            period_ms = period.as_millis() as u64,
            config = ?config::snapshot(&shared_config),
            "starting event generator"
        );
        PeriodicTask::spawn("pacer-generator", period, move || {
            let config = config::snapshot(&shared_config);
            generator.tick(&config, clock.now_ms());
        })
    }
}
