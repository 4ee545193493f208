use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::event::{Event, EventKind, Millis};

pub type SharedEventLog = Arc<RwLock<EventLog>>;

/// Bounds on how much history the log keeps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Retention {
    /// Events older than this, relative to the newest event, are dropped.
    pub window_ms: Millis,
    /// Hard cap on the number of stored events.
    pub capacity: usize,
}

impl Default for Retention {
    fn default() -> Self {
        // One full strip (1000 px at 0.04 px/ms) plus a second of slack.
        Self {
            window_ms: 26_000.0,
            capacity: 4096,
        }
    }
}

/// Append-only, time-ordered event history with bounded retention.
///
/// Written by a single generator; readers take snapshots under a read lock, so an
/// event is either fully visible or not visible at all.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: VecDeque<Event>,
    retention: Retention,
}

impl EventLog {
    pub fn new(retention: Retention) -> Self {
        Self {
            events: VecDeque::new(),
            retention,
        }
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// Appends a batch emitted by one tick, then ages out expired history.
    pub fn append(&mut self, events: &[Event]) {
        let Some(newest) = events.last().map(|e| e.time) else {
            return;
        };
        debug_assert!(
            self.events.back().map_or(true, |last| last.time <= events[0].time),
            "events must be appended in time order"
        );
        self.events.extend(events.iter().copied());
        self.expire(newest);
    }

    fn expire(&mut self, newest: Millis) {
        let window = self.retention.window_ms;
        if window.is_finite() && window >= 0.0 {
            let cutoff = newest - window;
            while self.events.front().is_some_and(|e| e.time < cutoff) {
                self.events.pop_front();
            }
        }
        while self.events.len() > self.retention.capacity {
            self.events.pop_front();
        }
        // A spike always precedes its paced event, so a leading paced event has lost
        // its partner to the capacity cap.
        while self.events.front().is_some_and(|e| e.kind == EventKind::Paced) {
            self.events.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Event> + '_ {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&Event> {
        self.events.back()
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.events.iter().copied().collect()
    }

    /// Events at or after `cutoff`, oldest first.
    pub fn snapshot_since(&self, cutoff: Millis) -> Vec<Event> {
        let start = self.events.partition_point(|e| e.time < cutoff);
        self.events.range(start..).copied().collect()
    }
}

pub fn shared(log: EventLog) -> SharedEventLog {
    Arc::new(RwLock::new(log))
}

pub fn read(log: &SharedEventLog) -> RwLockReadGuard<'_, EventLog> {
    log.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write(log: &SharedEventLog) -> RwLockWriteGuard<'_, EventLog> {
    log.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod test {
    use super::*;

    fn natives(times: &[Millis]) -> Vec<Event> {
        times.iter().map(|t| Event::native(*t)).collect()
    }

    #[test]
    fn test_append_keeps_order() {
        let mut log = EventLog::default();
        log.append(&natives(&[0.0, 600.0]));
        log.append(&[Event::spike(750.0), Event::paced(750.0)]);
        let kinds: Vec<EventKind> = log.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Native, EventKind::Native, EventKind::Spike, EventKind::Paced]
        );
        assert_eq!(log.last().map(|e| e.time), Some(750.0));
    }

    #[test]
    fn test_append_empty_batch_is_noop() {
        let mut log = EventLog::default();
        log.append(&[]);
        assert!(log.is_empty());
    }

    #[test]
    fn test_window_expiry() {
        let mut log = EventLog::new(Retention {
            window_ms: 1000.0,
            capacity: 100,
        });
        log.append(&natives(&[0.0, 500.0, 1000.0]));
        assert_eq!(log.len(), 3);
        log.append(&natives(&[1600.0]));
        let times: Vec<Millis> = log.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![1000.0, 1600.0]);
    }

    #[test]
    fn test_capacity_cap() {
        let mut log = EventLog::new(Retention {
            window_ms: f64::INFINITY,
            capacity: 4,
        });
        for i in 0..10 {
            log.append(&natives(&[i as f64]));
        }
        assert_eq!(log.len(), 4);
        assert_eq!(log.iter().next().map(|e| e.time), Some(6.0));
    }

    #[test]
    fn test_pair_survives_capacity_boundary_in_one_batch() {
        let mut log = EventLog::new(Retention {
            window_ms: f64::INFINITY,
            capacity: 3,
        });
        log.append(&natives(&[0.0, 1.0]));
        log.append(&[Event::spike(2.0), Event::paced(2.0)]);
        assert_eq!(log.snapshot(), vec![natives(&[1.0])[0], Event::spike(2.0), Event::paced(2.0)]);
    }

    #[test]
    fn test_capacity_never_splits_a_pace_pair() {
        let mut log = EventLog::new(Retention {
            window_ms: f64::INFINITY,
            capacity: 2,
        });
        log.append(&[Event::spike(0.0), Event::paced(0.0)]);
        log.append(&natives(&[1.0]));
        assert_eq!(log.snapshot(), natives(&[1.0]));
    }

    #[test]
    fn test_snapshot_since() {
        let mut log = EventLog::default();
        log.append(&natives(&[100.0, 200.0, 300.0]));
        assert_eq!(log.snapshot_since(200.0), natives(&[200.0, 300.0]));
        assert!(log.snapshot_since(301.0).is_empty());
        assert_eq!(log.snapshot_since(f64::NEG_INFINITY).len(), 3);
    }

    #[test]
    fn test_shared_log_writes_visible_to_readers() {
        let log = shared(EventLog::default());
        let reader = log.clone();
        assert!(read(&reader).is_empty());
        write(&log).append(&natives(&[1.0, 2.0]));
        assert_eq!(read(&reader).snapshot(), natives(&[1.0, 2.0]));
    }
}
