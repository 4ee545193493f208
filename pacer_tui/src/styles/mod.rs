use ratatui::style::{Color, Modifier, Style};

pub mod root {
    use super::*;

    pub const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
    pub const VERSION_STYLE: Style = Style::new()
        .add_modifier(Modifier::ITALIC)
        .fg(Color::DarkGray);
}

pub mod ecg_viewer {
    use super::*;

    pub const BASELINE_COLOR: Color = Color::Gray;
    pub const SPIKE_COLOR: Color = Color::White;
    pub const PACED_COMPLEX_COLOR: Color = Color::Green;
    pub const NATIVE_COMPLEX_COLOR: Color = Color::Red;
    pub const ARTIFACT_COLOR: Color = Color::LightRed;

    pub const STATUS_LABEL_STYLE: Style = Style::new().fg(Color::DarkGray);
    pub const CAPTURE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
    pub const NO_CAPTURE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
    pub const SENSING_OK_STYLE: Style = Style::new().fg(Color::Green);
    pub const SENSING_FAULT_STYLE: Style = Style::new().fg(Color::Yellow);
}

pub mod controls_panel {
    use super::*;

    pub const SELECTED_KNOB_STYLE: Style = Style::new().bg(Color::DarkGray);
    pub const KNOB_NAME_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
    pub const KNOB_VALUE_STYLE: Style = Style::new()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::ITALIC);
    pub const KNOB_RANGE_STYLE: Style = Style::new().fg(Color::DarkGray);
}

pub mod command_keys_help_bar {
    use super::*;

    pub const KEY_ID_STYLE: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);
    pub const DESCRIPTION_STYLE: Style =
        Style::new().fg(Color::Green).add_modifier(Modifier::ITALIC);
}
