use std::sync::Arc;

use crossterm::event::KeyEvent;
use pacer_sim::{config, event_log, generator, Clock, PacingConfig, SharedConfig, SharedEventLog};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{
    component::{Component, HandleResult},
    ecg::{self, SensingState, StripFrame, StripGeometry},
    styles::ecg_viewer::{
        CAPTURE_STYLE, NO_CAPTURE_STYLE, SENSING_FAULT_STYLE, SENSING_OK_STYLE,
        STATUS_LABEL_STYLE,
    },
    widgets::{EcgStrip, KeyMaps},
};

/// Scrolling rhythm strip with its status line. Only ever reads the event log.
pub struct EcgViewer {
    config: SharedConfig,
    log: SharedEventLog,
    clock: Arc<dyn Clock>,
    geometry: StripGeometry,
}

impl EcgViewer {
    pub fn new(config: SharedConfig, log: SharedEventLog, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            log,
            clock,
            geometry: StripGeometry::default(),
        }
    }

    /// Composes the strip for the current instant.
    pub fn frame(&self) -> (PacingConfig, StripFrame) {
        let config = config::snapshot(&self.config);
        let now = self.clock.now_ms();
        let events =
            event_log::read(&self.log).snapshot_since(now - self.geometry.visible_span_ms());
        let frame = ecg::compose(&config, &events, now, &self.geometry);
        (config, frame)
    }

    fn status_line(config: &PacingConfig, sensing: SensingState) -> Line<'static> {
        let (capture, capture_style) = if generator::captures(config.output_ma) {
            ("Capture", CAPTURE_STYLE)
        } else {
            ("No capture", NO_CAPTURE_STYLE)
        };
        let sensing_style = match sensing {
            SensingState::Normal => SENSING_OK_STYLE,
            SensingState::UnderSensing | SensingState::OverSensing => SENSING_FAULT_STYLE,
        };
        Line::from(vec![
            Span::from(" Mode: ").style(STATUS_LABEL_STYLE),
            Span::from(config.mode.to_string()),
            Span::from("  Output: ").style(STATUS_LABEL_STYLE),
            Span::from(capture).style(capture_style),
            Span::from("  Sensing: ").style(STATUS_LABEL_STYLE),
            Span::from(sensing.to_string()).style(sensing_style),
        ])
    }
}

impl Component for EcgViewer {
    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (config, frame) = self.frame();
        let chunks = Layout::vertical(vec![Constraint::Min(0), Constraint::Length(1)]).split(rect);
        let strip = EcgStrip::new(&frame, self.geometry)
            .block(Block::new().borders(Borders::ALL).title(" ECG "));
        f.render_widget(strip, chunks[0]);
        f.render_widget(
            Paragraph::new(Self::status_line(&config, frame.sensing)),
            chunks[1],
        );
    }

    fn handle_key_event(&mut self, _key_event: &KeyEvent) -> HandleResult {
        HandleResult::NotHandled
    }

    fn get_key_mappings(&self) -> KeyMaps {
        KeyMaps::default()
    }
}
