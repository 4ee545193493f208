use std::sync::mpsc::Sender;
use std::sync::{Arc, PoisonError, RwLock};

use crossterm::event::{Event, KeyCode, KeyEvent};
use pacer_sim::Simulator;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};
use tracing::info;

use crate::{
    component::{Component, HandleResult, SharedComponent},
    styles::root::{TITLE_STYLE, VERSION_STYLE},
    threads::RendererMessage,
    widgets::{KeyDesc, KeyMaps},
};

use super::{ControlsPanel, EcgViewer};

pub struct Root {
    message_tx: Sender<RendererMessage>,
    ecg_viewer: EcgViewer,
    controls_panel: Arc<RwLock<ControlsPanel>>,
    key_mappings: KeyMaps,
}

impl Root {
    pub fn new(message_tx: Sender<RendererMessage>, simulator: &Simulator) -> Self {
        Self {
            message_tx,
            ecg_viewer: EcgViewer::new(simulator.config(), simulator.log(), simulator.clock()),
            controls_panel: Arc::new(RwLock::new(ControlsPanel::new(simulator.config()))),
            key_mappings: KeyMaps::default().with('q', KeyDesc::from("quit").prio(10)),
        }
    }

    fn notify_render(&self) {
        let _ = self.message_tx.send(RendererMessage::Render);
    }

    fn notify_quit(&self) {
        info!("quit requested");
        let _ = self.message_tx.send(RendererMessage::Quit);
    }

    fn title() -> Line<'static> {
        Line::from(vec![
            Span::from(" Transvenous Pacing Simulator ").style(TITLE_STYLE),
            Span::from(concat!("v", env!("CARGO_PKG_VERSION"), " ")).style(VERSION_STYLE),
        ])
    }
}

impl Component for Root {
    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::new().borders(Borders::TOP).title(Self::title());
        let inner = block.inner(rect);
        f.render_widget(block, rect);
        let chunks =
            Layout::horizontal(vec![Constraint::Min(0), Constraint::Length(48)]).split(inner);
        self.ecg_viewer.render(f, chunks[0]);
        let controls_block = Block::new().borders(Borders::ALL).title(" Controls ");
        self.controls_panel
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .render_with_block(f, chunks[1], controls_block);
    }

    fn handle_key_event(&mut self, key_event: &KeyEvent) -> HandleResult {
        match key_event.code {
            KeyCode::Char('q') => {
                self.notify_quit();
                HandleResult::Handled
            }
            _ => HandleResult::NotHandled,
        }
    }

    fn get_focused_child(&self) -> Option<SharedComponent> {
        Some(self.controls_panel.clone())
    }

    /// Redraws right away once the controls accept a key.
    fn try_propagate_event(&mut self, event: &Event) -> HandleResult {
        let Some(child) = self.get_focused_child() else {
            return HandleResult::NotHandled;
        };
        let result = child
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .handle_event(event);
        if result == HandleResult::Handled {
            self.notify_render();
        }
        result
    }

    fn get_key_mappings(&self) -> KeyMaps {
        let controls = self
            .controls_panel
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get_key_mappings();
        KeyMaps::merge_mappings(&controls, &self.key_mappings)
    }
}

#[cfg(test)]
mod test {
    use std::sync::mpsc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pacer_sim::{config, ManualClock, PacingConfig, PacingMode, Retention, Simulator};
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::widgets::KeyId;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn simulator() -> Simulator {
        Simulator::new(
            PacingConfig::default(),
            Retention::default(),
            Arc::new(ManualClock::new(0.0)),
        )
    }

    #[test]
    fn test_quit_sends_quit_message() {
        let (tx, rx) = mpsc::channel();
        let mut root = Root::new(tx, &simulator());
        assert_eq!(root.handle_event(&key(KeyCode::Char('q'))), HandleResult::Handled);
        assert_eq!(rx.try_recv().ok(), Some(RendererMessage::Quit));
    }

    #[test]
    fn test_controls_receive_keys_first() {
        let (tx, _rx) = mpsc::channel();
        let simulator = simulator();
        let mut root = Root::new(tx, &simulator);
        root.handle_event(&key(KeyCode::Char('m')));
        assert_eq!(config::snapshot(&simulator.config()).mode, PacingMode::Asynchronous);
    }

    #[test]
    fn test_control_keys_request_render() {
        let (tx, rx) = mpsc::channel();
        let mut root = Root::new(tx, &simulator());
        for code in [KeyCode::Down, KeyCode::Right, KeyCode::Char('m')] {
            assert_eq!(root.handle_event(&key(code)), HandleResult::Handled);
            assert_eq!(rx.try_recv().ok(), Some(RendererMessage::Render));
        }
    }

    #[test]
    fn test_unbound_key_is_not_handled() {
        let (tx, rx) = mpsc::channel();
        let mut root = Root::new(tx, &simulator());
        assert_eq!(root.handle_event(&key(KeyCode::Char('x'))), HandleResult::NotHandled);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_key_mappings_cover_all_bindings() {
        let (tx, _rx) = mpsc::channel();
        let root = Root::new(tx, &simulator());
        let key_maps = root.get_key_mappings();
        for key_id in [
            KeyId::from('q'),
            KeyId::from('m'),
            KeyId::from(KeyCode::Up),
            KeyId::from(KeyCode::Down),
            KeyId::from(KeyCode::Left),
            KeyId::from(KeyCode::Right),
        ] {
            assert!(key_maps.contains(&key_id), "missing {key_id}");
        }
        assert!(!key_maps.contains(&KeyId::from('c')));
    }

    #[test]
    fn test_render_shows_title_and_controls() {
        let (tx, _rx) = mpsc::channel();
        let mut root = Root::new(tx, &simulator());
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                root.render_with_command_keys_help_bar(f, area)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Transvenous Pacing Simulator"));
        assert!(text.contains("Pacemaker rate"));
        assert!(text.contains("Asynchronous") || text.contains("On-Demand (VVI)"));
        assert!(text.contains("q: quit"));
    }
}
