use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Context, Line, Rectangle},
        Block, Widget,
    },
};

use crate::{
    ecg::{Point, Shape, StripFrame, StripGeometry, Stroke},
    styles::ecg_viewer,
};

/// Paints a composed [`StripFrame`] onto a braille canvas.
pub struct EcgStrip<'a> {
    frame: &'a StripFrame,
    geometry: StripGeometry,
    block: Option<Block<'a>>,
}

impl<'a> EcgStrip<'a> {
    pub fn new(frame: &'a StripFrame, geometry: StripGeometry) -> Self {
        Self {
            frame,
            geometry,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for EcgStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let height = self.geometry.height;
        let shapes = &self.frame.shapes;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, self.geometry.width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for shape in shapes {
                    paint(ctx, shape, height);
                }
            });
        match self.block {
            Some(block) => canvas.block(block).render(area, buf),
            None => canvas.render(area, buf),
        }
    }
}

fn paint(ctx: &mut Context, shape: &Shape, height: f64) {
    // Strip y grows downward, canvas y grows upward.
    let flip = |p: &Point| (p.x, height - p.y);
    match shape {
        Shape::Line { from, to, stroke } => {
            let ((x1, y1), (x2, y2)) = (flip(from), flip(to));
            ctx.draw(&Line::new(x1, y1, x2, y2, color(*stroke)));
        }
        Shape::Polyline { points, stroke } => {
            for segment in points.windows(2) {
                let ((x1, y1), (x2, y2)) = (flip(&segment[0]), flip(&segment[1]));
                ctx.draw(&Line::new(x1, y1, x2, y2, color(*stroke)));
            }
        }
        Shape::Rect {
            origin,
            width,
            height: rect_height,
            stroke,
        } => {
            ctx.draw(&Rectangle {
                x: origin.x,
                y: height - origin.y - rect_height,
                width: *width,
                height: *rect_height,
                color: color(*stroke),
            });
        }
    }
}

fn color(stroke: Stroke) -> Color {
    match stroke {
        Stroke::Baseline => ecg_viewer::BASELINE_COLOR,
        Stroke::Spike => ecg_viewer::SPIKE_COLOR,
        Stroke::PacedComplex => ecg_viewer::PACED_COMPLEX_COLOR,
        Stroke::NativeComplex => ecg_viewer::NATIVE_COMPLEX_COLOR,
        Stroke::Artifact => ecg_viewer::ARTIFACT_COLOR,
    }
}
