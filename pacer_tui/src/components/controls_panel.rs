use crossterm::event::{KeyCode, KeyEvent};
use pacer_sim::{config, PacingConfig, SharedConfig};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::info;

use crate::{
    component::{Component, HandleResult},
    styles::controls_panel::{
        KNOB_NAME_STYLE, KNOB_RANGE_STYLE, KNOB_VALUE_STYLE, SELECTED_KNOB_STYLE,
    },
    widgets::{KeyDesc, KeyMaps},
};

use super::models::Knob;

/// Knobs editing the shared pacing configuration.
pub struct ControlsPanel {
    config: SharedConfig,
    selected: usize,
    key_mappings: KeyMaps,
}

impl ControlsPanel {
    pub fn new(config: SharedConfig) -> Self {
        Self {
            config,
            selected: 0,
            key_mappings: Self::create_key_mappings(),
        }
    }

    pub fn selected_knob(&self) -> Knob {
        Knob::ALL[self.selected]
    }

    fn create_key_mappings() -> KeyMaps {
        KeyMaps::default()
            .with(KeyCode::Up, "select knob")
            .with(KeyCode::Down, "select knob")
            .with(KeyCode::Left, KeyDesc::from("adjust").prio(1))
            .with(KeyCode::Right, KeyDesc::from("adjust").prio(1))
            .with('m', KeyDesc::from("toggle mode").prio(2))
    }

    fn select_next(&mut self) {
        self.selected = (self.selected + 1).min(Knob::ALL.len() - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn adjust_selected(&mut self, steps: i32) {
        let knob = self.selected_knob();
        let mut value = 0.0;
        config::update(&self.config, |config| value = knob.adjust(config, steps));
        info!(knob = knob.spec().name, value, "knob adjusted");
    }

    fn toggle_mode(&mut self) {
        let updated = config::update(&self.config, |config| config.mode = config.mode.toggled());
        info!(mode = %updated.mode, "pacing mode changed");
    }

    fn knob_lines(&self, config: &PacingConfig) -> Vec<Line<'static>> {
        Knob::ALL
            .iter()
            .enumerate()
            .map(|(idx, knob)| {
                let spec = knob.spec();
                let line = Line::from(vec![
                    Span::from(format!("{:<18}", spec.name)).style(KNOB_NAME_STYLE),
                    Span::from(format!("{:>9}", knob.format(config))).style(KNOB_VALUE_STYLE),
                    Span::from(format!("  [{}]", spec.range_label())).style(KNOB_RANGE_STYLE),
                ]);
                if idx == self.selected {
                    line.style(SELECTED_KNOB_STYLE)
                } else {
                    line
                }
            })
            .collect()
    }
}

impl Component for ControlsPanel {
    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let config = config::snapshot(&self.config);
        let mut lines = self.knob_lines(&config);
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::from(format!("{:<18}", "Mode")).style(KNOB_NAME_STYLE),
            Span::from(config.mode.to_string()).style(KNOB_VALUE_STYLE),
        ]));
        f.render_widget(Paragraph::new(lines), rect);
    }

    fn handle_key_event(&mut self, key_event: &KeyEvent) -> HandleResult {
        match key_event.code {
            KeyCode::Up => self.select_prev(),
            KeyCode::Down => self.select_next(),
            KeyCode::Left => self.adjust_selected(-1),
            KeyCode::Right => self.adjust_selected(1),
            KeyCode::Char('m') => self.toggle_mode(),
            _ => return HandleResult::NotHandled,
        }
        HandleResult::Handled
    }

    fn get_key_mappings(&self) -> KeyMaps {
        self.key_mappings.clone()
    }
}
