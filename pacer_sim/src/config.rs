//! Pacing parameters and the layered settings they are loaded from.
//!
//! Settings are resolved from built-in defaults, then an optional YAML file, then
//! `PACER_`-prefixed environment variables (`PACER_PACEMAKER_RATE=90`,
//! `PACER_MODE=asynchronous`, ...).

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PacerSimResult;
use crate::event::Millis;
use crate::event_log::Retention;

const MS_PER_MINUTE: f64 = 60_000.0;

pub type SharedConfig = Arc<RwLock<PacingConfig>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PacingMode {
    /// VVI-like: paces only when intrinsic activity is inadequate.
    #[default]
    OnDemand,
    /// VVO-like: paces on a fixed schedule, ignoring intrinsic activity.
    Asynchronous,
}

/// The five externally supplied pacing parameters. The core never validates them;
/// degenerate values silence a channel instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pacing stimulus frequency, bpm.
    pub pacemaker_rate: f64,
    /// Stimulus strength, mA.
    pub output_ma: f64,
    /// Native heart rate, bpm.
    pub intrinsic_rate: f64,
    /// Sensed native signal strength, mV.
    pub intrinsic_amplitude: f64,
    pub mode: PacingMode,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            pacemaker_rate: 80.0,
            output_ma: 2.0,
            intrinsic_rate: 60.0,
            intrinsic_amplitude: 1.5,
            mode: PacingMode::OnDemand,
        }
    }
}

impl PacingConfig {
    pub fn intrinsic_interval(&self) -> Option<Millis> {
        interval_for(self.intrinsic_rate)
    }

    pub fn pacer_interval(&self) -> Option<Millis> {
        interval_for(self.pacemaker_rate)
    }

    /// Native rhythm at or above the pacing rate.
    pub fn intrinsic_is_adequate(&self) -> bool {
        self.intrinsic_rate >= self.pacemaker_rate
    }

    pub fn mode(mut self, mode: PacingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn pacemaker_rate(mut self, bpm: f64) -> Self {
        self.pacemaker_rate = bpm;
        self
    }

    pub fn output_ma(mut self, ma: f64) -> Self {
        self.output_ma = ma;
        self
    }

    pub fn intrinsic_rate(mut self, bpm: f64) -> Self {
        self.intrinsic_rate = bpm;
        self
    }

    pub fn intrinsic_amplitude(mut self, mv: f64) -> Self {
        self.intrinsic_amplitude = mv;
        self
    }
}

/// Beat period for a rate in bpm, or `None` when the channel can never fire.
pub fn interval_for(rate_bpm: f64) -> Option<Millis> {
    if rate_bpm.is_finite() && rate_bpm > 0.0 {
        let interval = MS_PER_MINUTE / rate_bpm;
        interval.is_finite().then_some(interval)
    } else {
        None
    }
}

impl PacingMode {
    pub fn toggled(self) -> Self {
        match self {
            PacingMode::OnDemand => PacingMode::Asynchronous,
            PacingMode::Asynchronous => PacingMode::OnDemand,
        }
    }
}

impl std::fmt::Display for PacingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PacingMode::OnDemand => f.write_str("On-Demand (VVI)"),
            PacingMode::Asynchronous => f.write_str("Asynchronous (VVO)"),
        }
    }
}

pub fn shared(config: PacingConfig) -> SharedConfig {
    Arc::new(RwLock::new(config))
}

/// Copies the current configuration out of the shared cell.
pub fn snapshot(config: &SharedConfig) -> PacingConfig {
    *config.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn update(config: &SharedConfig, f: impl FnOnce(&mut PacingConfig)) -> PacingConfig {
    let mut guard = config.write().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard);
    *guard
}

/// Everything a session is started with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pacemaker_rate: f64,
    pub output_ma: f64,
    pub intrinsic_rate: f64,
    pub intrinsic_amplitude: f64,
    pub mode: PacingMode,
    /// Generator tick period.
    pub tick_ms: u64,
    /// Display refresh period.
    pub frame_ms: u64,
    pub retention_ms: f64,
    pub log_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let pacing = PacingConfig::default();
        let retention = Retention::default();
        Self {
            pacemaker_rate: pacing.pacemaker_rate,
            output_ma: pacing.output_ma,
            intrinsic_rate: pacing.intrinsic_rate,
            intrinsic_amplitude: pacing.intrinsic_amplitude,
            mode: pacing.mode,
            tick_ms: 16,
            frame_ms: 16,
            retention_ms: retention.window_ms,
            log_capacity: retention.capacity,
        }
    }
}

impl Settings {
    pub fn figment(path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Settings::default()));
        let figment = match path {
            Some(path) => figment.merge(Yaml::file(path)),
            None => figment,
        };
        figment.merge(Env::prefixed("PACER_"))
    }

    pub fn load(path: Option<&Path>) -> PacerSimResult<Self> {
        let settings: Settings = Self::figment(path).extract()?;
        debug!(?settings, "settings loaded");
        Ok(settings)
    }

    pub fn pacing(&self) -> PacingConfig {
        PacingConfig {
            pacemaker_rate: self.pacemaker_rate,
            output_ma: self.output_ma,
            intrinsic_rate: self.intrinsic_rate,
            intrinsic_amplitude: self.intrinsic_amplitude,
            mode: self.mode,
        }
    }

    pub fn retention(&self) -> Retention {
        Retention {
            window_ms: self.retention_ms,
            capacity: self.log_capacity,
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
