//! Composition of one frame of the scrolling ECG strip.
//!
//! [`compose`] turns the event history into a display list of [`Shape`]s for a single
//! refresh. It never mutates the history: events that have scrolled past the left
//! edge are simply not drawn.

pub mod shapes;

use pacer_sim::{Event, EventKind, Millis, PacingConfig, PacingMode};

pub use shapes::{ComplexWidth, Point, Shape, Stroke};

/// Below this sensing amplitude (mV) the trace drowns in noise.
pub const UNDER_SENSING_MV: f64 = 2.0;
/// At or above this sensing amplitude (mV) no trace is shown.
pub const OVER_SENSING_MV: f64 = 6.0;

const ARTIFACT_SPACING: usize = 10;
const ARTIFACT_SWING: f64 = 10.0;
const ARTIFACT_PHASE_RATE: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripGeometry {
    pub width: f64,
    pub height: f64,
    /// Strip units per millisecond.
    pub scroll_speed: f64,
}

impl Default for StripGeometry {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 500.0,
            scroll_speed: 0.04,
        }
    }
}

impl StripGeometry {
    pub fn mid_y(&self) -> f64 {
        self.height / 2.0
    }

    /// How long an event stays on screen.
    pub fn visible_span_ms(&self) -> Millis {
        self.width / self.scroll_speed
    }

    /// Horizontal position of an event; the newest events sit at the right edge.
    pub fn x_for(&self, event_time: Millis, now: Millis) -> f64 {
        self.width - (now - event_time) * self.scroll_speed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensingState {
    UnderSensing,
    #[default]
    Normal,
    OverSensing,
}

impl SensingState {
    pub fn from_amplitude(amplitude_mv: f64) -> Self {
        if amplitude_mv < UNDER_SENSING_MV {
            SensingState::UnderSensing
        } else if amplitude_mv >= OVER_SENSING_MV {
            SensingState::OverSensing
        } else {
            SensingState::Normal
        }
    }
}

impl std::fmt::Display for SensingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensingState::UnderSensing => f.write_str("Under-sensing"),
            SensingState::Normal => f.write_str("Sensing OK"),
            SensingState::OverSensing => f.write_str("Over-sensing"),
        }
    }
}

/// Display list for one refresh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StripFrame {
    pub sensing: SensingState,
    pub shapes: Vec<Shape>,
}

impl StripFrame {
    pub fn is_blank(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn count(&self, stroke: Stroke) -> usize {
        self.shapes.iter().filter(|s| s.stroke() == stroke).count()
    }
}

pub fn compose(
    config: &PacingConfig,
    events: &[Event],
    now: Millis,
    geometry: &StripGeometry,
) -> StripFrame {
    let sensing = SensingState::from_amplitude(config.intrinsic_amplitude);
    let shapes = match sensing {
        SensingState::UnderSensing => artifacts(now, geometry),
        SensingState::OverSensing => vec![],
        SensingState::Normal => trace(config, events, now, geometry),
    };
    StripFrame { sensing, shapes }
}

/// Paced complexes are drawn only when the pacer is the expected source.
pub fn shows_paced(config: &PacingConfig) -> bool {
    match config.mode {
        PacingMode::Asynchronous => true,
        PacingMode::OnDemand => config.intrinsic_rate < config.pacemaker_rate,
    }
}

pub fn shows_native(config: &PacingConfig) -> bool {
    config.mode == PacingMode::OnDemand && config.intrinsic_is_adequate()
}

fn artifacts(now: Millis, geometry: &StripGeometry) -> Vec<Shape> {
    let mid_y = geometry.mid_y();
    let phase = now * ARTIFACT_PHASE_RATE;
    let width = geometry.width.max(0.0) as usize;
    (0..width)
        .step_by(ARTIFACT_SPACING)
        .map(|x| {
            let x = x as f64;
            let offset = ((x + phase) % std::f64::consts::PI).sin() * ARTIFACT_SWING;
            shapes::artifact(x, mid_y + offset)
        })
        .collect()
}

fn trace(
    config: &PacingConfig,
    events: &[Event],
    now: Millis,
    geometry: &StripGeometry,
) -> Vec<Shape> {
    let mid_y = geometry.mid_y();
    let show_paced = shows_paced(config);
    let show_native = shows_native(config);

    let mut shapes = vec![shapes::baseline(geometry.width, mid_y)];
    for event in events {
        let x = geometry.x_for(event.time, now);
        if x < 0.0 {
            continue;
        }
        match event.kind {
            EventKind::Spike => shapes.push(shapes::spike(x, mid_y)),
            EventKind::Paced if show_paced => {
                shapes.push(shapes::complex(x, mid_y, ComplexWidth::Wide))
            }
            EventKind::Native if show_native => {
                shapes.push(shapes::complex(x, mid_y, ComplexWidth::Narrow))
            }
            _ => (),
        }
    }
    shapes
}

#[cfg(test)]
mod test {
    use super::*;

    fn config(pacemaker_rate: f64, intrinsic_rate: f64, amplitude: f64) -> PacingConfig {
        PacingConfig::default()
            .pacemaker_rate(pacemaker_rate)
            .intrinsic_rate(intrinsic_rate)
            .intrinsic_amplitude(amplitude)
            .output_ma(5.0)
    }

    fn mixed_history() -> Vec<Event> {
        vec![
            Event::native(9_000.0),
            Event::spike(9_250.0),
            Event::paced(9_250.0),
            Event::native(9_600.0),
        ]
    }

    #[test]
    fn test_under_sensing_draws_artifacts_only() {
        let geometry = StripGeometry::default();
        let frame = compose(&config(80.0, 100.0, 1.0), &mixed_history(), 10_000.0, &geometry);
        assert_eq!(frame.sensing, SensingState::UnderSensing);
        assert_eq!(frame.count(Stroke::Artifact), 100);
        assert_eq!(frame.count(Stroke::Artifact), frame.shapes.len());
    }

    #[test]
    fn test_artifacts_swing_around_baseline() {
        let geometry = StripGeometry::default();
        let frame = compose(&config(80.0, 60.0, 0.0), &[], 1234.0, &geometry);
        for shape in &frame.shapes {
            let Shape::Rect { origin, .. } = shape else {
                panic!("artifacts are rectangles");
            };
            assert!((origin.y - geometry.mid_y()).abs() <= ARTIFACT_SWING);
        }
    }

    #[test]
    fn test_over_sensing_is_blank() {
        let geometry = StripGeometry::default();
        for amplitude in [6.0, 7.0, 10.0] {
            let frame = compose(&config(80.0, 60.0, amplitude), &mixed_history(), 10_000.0, &geometry);
            assert_eq!(frame.sensing, SensingState::OverSensing);
            assert!(frame.is_blank());
        }
    }

    #[test]
    fn test_normal_sensing_has_baseline() {
        let geometry = StripGeometry::default();
        let frame = compose(&config(80.0, 60.0, 2.0), &[], 0.0, &geometry);
        assert_eq!(frame.sensing, SensingState::Normal);
        assert_eq!(frame.shapes, vec![shapes::baseline(1000.0, 250.0)]);
    }

    #[test]
    fn test_slow_intrinsic_rate_shows_paced_not_native() {
        let geometry = StripGeometry::default();
        let frame = compose(&config(80.0, 60.0, 3.0), &mixed_history(), 10_000.0, &geometry);
        assert_eq!(frame.count(Stroke::Baseline), 1);
        assert_eq!(frame.count(Stroke::Spike), 1);
        assert_eq!(frame.count(Stroke::PacedComplex), 1);
        assert_eq!(frame.count(Stroke::NativeComplex), 0);
    }

    #[test]
    fn test_adequate_intrinsic_rate_shows_native_not_paced() {
        let geometry = StripGeometry::default();
        let frame = compose(&config(80.0, 100.0, 3.0), &mixed_history(), 10_000.0, &geometry);
        assert_eq!(frame.count(Stroke::Spike), 1);
        assert_eq!(frame.count(Stroke::PacedComplex), 0);
        assert_eq!(frame.count(Stroke::NativeComplex), 2);
    }

    #[test]
    fn test_asynchronous_shows_paced_only() {
        let geometry = StripGeometry::default();
        let config = config(80.0, 100.0, 3.0).mode(PacingMode::Asynchronous);
        let frame = compose(&config, &mixed_history(), 10_000.0, &geometry);
        assert_eq!(frame.count(Stroke::PacedComplex), 1);
        assert_eq!(frame.count(Stroke::NativeComplex), 0);
    }

    #[test]
    fn test_events_scroll_left_and_cull() {
        let geometry = StripGeometry::default();
        let now = 30_000.0;
        let events = vec![
            Event::spike(now - 25_001.0),
            Event::spike(now - 25_000.0),
            Event::spike(now - 1_000.0),
        ];
        let frame = compose(&config(80.0, 60.0, 3.0), &events, now, &geometry);
        let xs: Vec<f64> = frame
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Line {
                    from,
                    stroke: Stroke::Spike,
                    ..
                } => Some(from.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![0.0, 960.0]);
    }

    #[test]
    fn test_geometry() {
        let geometry = StripGeometry::default();
        assert_eq!(geometry.mid_y(), 250.0);
        assert_eq!(geometry.visible_span_ms(), 25_000.0);
        assert_eq!(geometry.x_for(1_000.0, 1_000.0), 1000.0);
        assert_eq!(geometry.x_for(0.0, 1_000.0), 960.0);
    }

    #[test]
    fn test_sensing_thresholds() {
        assert_eq!(SensingState::from_amplitude(1.5), SensingState::UnderSensing);
        assert_eq!(SensingState::from_amplitude(2.0), SensingState::Normal);
        assert_eq!(SensingState::from_amplitude(5.5), SensingState::Normal);
        assert_eq!(SensingState::from_amplitude(6.0), SensingState::OverSensing);
    }
}
