pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod event_log;
pub mod generator;
pub mod schedule;
mod simulator;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{PacingConfig, PacingMode, Settings, SharedConfig};
pub use event::{Event, EventKind, Millis};
pub use event_log::{EventLog, Retention, SharedEventLog};
pub use generator::{Generator, GeneratorState, PACING_THRESHOLD_MA};
pub use schedule::PeriodicTask;
pub use simulator::Simulator;
