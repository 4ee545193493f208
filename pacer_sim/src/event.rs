/// Milliseconds on the simulation clock.
pub type Millis = f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Intrinsic, unpaced heartbeat.
    Native,
    /// Pacing stimulus artifact.
    Spike,
    /// Captured, paced depolarization.
    Paced,
}

/// A single timestamped cardiac or pacing event. Events are built whole and never
/// edited once they are handed to the log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub time: Millis,
    pub kind: EventKind,
}

impl Event {
    pub fn native(time: Millis) -> Self {
        Self {
            time,
            kind: EventKind::Native,
        }
    }

    pub fn spike(time: Millis) -> Self {
        Self {
            time,
            kind: EventKind::Spike,
        }
    }

    pub fn paced(time: Millis) -> Self {
        Self {
            time,
            kind: EventKind::Paced,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Native => f.write_str("native"),
            EventKind::Spike => f.write_str("spike"),
            EventKind::Paced => f.write_str("paced"),
        }
    }
}
