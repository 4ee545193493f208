//! The pacing decision engine.
//!
//! [`tick`] is a pure step over an explicit [`GeneratorState`]: given the current
//! configuration and a timestamp it decides which events fire. [`Generator`] couples
//! that step to a shared [`EventLog`](crate::EventLog).

use tracing::{debug, trace};

use crate::config::{PacingConfig, PacingMode};
use crate::event::{Event, Millis};
use crate::event_log::{self, SharedEventLog};

/// Minimum stimulus, in mA, that captures. Inclusive.
pub const PACING_THRESHOLD_MA: f64 = 2.0;

/// The two timing cursors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorState {
    pub last_intrinsic: Millis,
    pub last_pacer: Millis,
}

impl GeneratorState {
    pub fn new(start: Millis) -> Self {
        Self {
            last_intrinsic: start,
            last_pacer: start,
        }
    }
}

/// Runs one scheduler step at `now` and returns the events it emits, in order.
///
/// Cursors are never reset by a configuration change; a new rate only changes how
/// far the existing cursor has to lag behind `now`.
pub fn tick(config: &PacingConfig, state: &mut GeneratorState, now: Millis) -> Vec<Event> {
    let mut emitted = Vec::with_capacity(3);

    if config.mode == PacingMode::OnDemand {
        if let Some(interval) = config.intrinsic_interval() {
            if now - state.last_intrinsic >= interval {
                emitted.push(Event::native(now));
                state.last_intrinsic = now;
            }
        }
    }

    if let Some(interval) = config.pacer_interval() {
        if !is_inhibited(config, state, now) && now - state.last_pacer >= interval {
            if let Some(pair) = fire_pacer(config, state, now) {
                // A captured beat replaces a native beat due on the same tick.
                emitted.clear();
                emitted.extend(pair);
            }
        }
    }

    emitted
}

/// On-demand inhibition: an adequate native rate whose latest beat still lies inside
/// the current intrinsic interval.
pub fn is_inhibited(config: &PacingConfig, state: &GeneratorState, now: Millis) -> bool {
    match config.mode {
        PacingMode::Asynchronous => false,
        PacingMode::OnDemand => {
            config.intrinsic_is_adequate()
                && config
                    .intrinsic_interval()
                    .is_some_and(|interval| now - state.last_intrinsic < interval)
        }
    }
}

/// Delivers a stimulus. Below threshold nothing is emitted and the pacer cursor stays
/// put, so the attempt repeats on the next tick.
pub fn fire_pacer(
    config: &PacingConfig,
    state: &mut GeneratorState,
    now: Millis,
) -> Option<[Event; 2]> {
    if !captures(config.output_ma) {
        debug!(output_ma = config.output_ma, "stimulus below capture threshold");
        return None;
    }
    state.last_pacer = now;
    // Capture depolarizes the ventricle, which restarts the native timer.
    state.last_intrinsic = now;
    Some([Event::spike(now), Event::paced(now)])
}

pub fn captures(output_ma: f64) -> bool {
    output_ma >= PACING_THRESHOLD_MA
}

/// Drives [`tick`] and publishes what it emits.
pub struct Generator {
    state: GeneratorState,
    log: SharedEventLog,
}

impl Generator {
    pub fn new(start: Millis, log: SharedEventLog) -> Self {
        Self {
            state: GeneratorState::new(start),
            log,
        }
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    pub fn log(&self) -> SharedEventLog {
        self.log.clone()
    }

    /// Returns the number of events appended.
    pub fn tick(&mut self, config: &PacingConfig, now: Millis) -> usize {
        let emitted = tick(config, &mut self.state, now);
        if emitted.is_empty() {
            return 0;
        }
        for event in &emitted {
            trace!(time = event.time, kind = %event.kind, "event emitted");
        }
        event_log::write(&self.log).append(&emitted);
        emitted.len()
    }
}
