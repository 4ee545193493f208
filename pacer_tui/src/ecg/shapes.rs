//! Primitive marks of the strip, in strip units (x to the right, y downward).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// What a mark depicts; the widget picks a color per stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stroke {
    Baseline,
    Spike,
    PacedComplex,
    NativeComplex,
    Artifact,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Polyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        stroke: Stroke,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexWidth {
    /// Intrinsic conduction.
    Narrow,
    /// Ventricular paced beat.
    Wide,
}

const AMPLITUDE_SCALE: f64 = 2.0;
const SPIKE_HALF_HEIGHT: f64 = 30.0;
const ARTIFACT_SIZE: f64 = 5.0;
const CURVE_SEGMENTS: usize = 8;

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ComplexWidth {
    fn r_wave_height(self) -> f64 {
        match self {
            ComplexWidth::Narrow => 10.0 * AMPLITUDE_SCALE,
            ComplexWidth::Wide => 20.0 * AMPLITUDE_SCALE,
        }
    }

    pub fn stroke(self) -> Stroke {
        match self {
            ComplexWidth::Narrow => Stroke::NativeComplex,
            ComplexWidth::Wide => Stroke::PacedComplex,
        }
    }
}

impl Shape {
    pub fn stroke(&self) -> Stroke {
        match self {
            Shape::Line { stroke, .. } | Shape::Polyline { stroke, .. } | Shape::Rect { stroke, .. } => {
                *stroke
            }
        }
    }
}

pub fn baseline(width: f64, mid_y: f64) -> Shape {
    Shape::Line {
        from: Point::new(0.0, mid_y),
        to: Point::new(width, mid_y),
        stroke: Stroke::Baseline,
    }
}

pub fn spike(x: f64, mid_y: f64) -> Shape {
    Shape::Line {
        from: Point::new(x, mid_y - SPIKE_HALF_HEIGHT),
        to: Point::new(x, mid_y + SPIKE_HALF_HEIGHT),
        stroke: Stroke::Spike,
    }
}

pub fn artifact(x: f64, y: f64) -> Shape {
    Shape::Rect {
        origin: Point::new(x, y),
        width: ARTIFACT_SIZE,
        height: ARTIFACT_SIZE,
        stroke: Stroke::Artifact,
    }
}

/// P-Q-R-S-T complex whose T wave ends just right of `x`.
pub fn complex(x: f64, mid_y: f64, width: ComplexWidth) -> Shape {
    let at = |dx: f64, dy: f64| Point::new(x + dx, mid_y + dy * AMPLITUDE_SCALE);

    let mut points = vec![at(-40.0, 0.0)];
    // P wave
    points.extend(cubic_bezier(
        at(-40.0, 0.0),
        at(-36.0, -2.0),
        at(-30.0, -2.0),
        at(-24.0, 0.0),
    ));
    // Q, R, S
    points.push(at(-20.0, -1.0));
    points.push(Point::new(x - 16.0, mid_y - width.r_wave_height()));
    points.push(at(-12.0, 5.0));
    // T wave
    points.extend(cubic_bezier(
        at(-12.0, 5.0),
        at(-4.0, 5.0),
        at(0.0, 5.0),
        at(8.0, 0.0),
    ));

    Shape::Polyline {
        points,
        stroke: width.stroke(),
    }
}

/// Samples a cubic curve, excluding `p0`, ending exactly on `p3`.
fn cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point) -> impl Iterator<Item = Point> {
    (1..=CURVE_SEGMENTS).map(move |i| {
        let t = i as f64 / CURVE_SEGMENTS as f64;
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * p0.x + b * p1.x + c * p2.x + d * p3.x,
            a * p0.y + b * p1.y + c * p2.y + d * p3.y,
        )
    })
}

#[cfg(test)]
mod test {
    use super::*;

    fn points_of(shape: &Shape) -> &[Point] {
        match shape {
            Shape::Polyline { points, .. } => points,
            _ => panic!("expected a polyline"),
        }
    }

    #[test]
    fn test_complex_spans_p_wave_to_t_wave() {
        let shape = complex(500.0, 250.0, ComplexWidth::Narrow);
        let points = points_of(&shape);
        assert_eq!(points.first(), Some(&Point::new(460.0, 250.0)));
        assert_eq!(points.last(), Some(&Point::new(508.0, 250.0)));
        assert!(points.windows(2).all(|p| p[0].x <= p[1].x));
    }

    #[test]
    fn test_paced_complex_has_taller_r_wave() {
        let peak = |width| {
            points_of(&complex(500.0, 250.0, width))
                .iter()
                .map(|p| p.y)
                .fold(f64::INFINITY, f64::min)
        };
        assert_eq!(peak(ComplexWidth::Narrow), 230.0);
        assert_eq!(peak(ComplexWidth::Wide), 210.0);
    }

    #[test]
    fn test_complex_stroke_follows_width() {
        assert_eq!(complex(0.0, 0.0, ComplexWidth::Wide).stroke(), Stroke::PacedComplex);
        assert_eq!(complex(0.0, 0.0, ComplexWidth::Narrow).stroke(), Stroke::NativeComplex);
    }

    #[test]
    fn test_spike_is_vertical() {
        assert_eq!(
            spike(42.0, 250.0),
            Shape::Line {
                from: Point::new(42.0, 220.0),
                to: Point::new(42.0, 280.0),
                stroke: Stroke::Spike,
            }
        );
    }

    #[test]
    fn test_bezier_hits_end_points() {
        let end = Point::new(10.0, 0.0);
        let curve: Vec<Point> = cubic_bezier(
            Point::new(0.0, 0.0),
            Point::new(2.0, -4.0),
            Point::new(8.0, -4.0),
            end,
        )
        .collect();
        assert_eq!(curve.len(), CURVE_SEGMENTS);
        assert_eq!(curve.last(), Some(&end));
        assert!(curve.iter().all(|p| p.y <= 0.0));
    }
}
