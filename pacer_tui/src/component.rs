use std::sync::{Arc, PoisonError, RwLock};

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Block,
    Frame,
};

use crate::widgets::{KeyMapHelpBar, KeyMaps};

pub type SharedComponent = Arc<RwLock<dyn Component>>;

pub trait Component: Send + Sync {
    fn render(&mut self, f: &mut Frame, rect: Rect);

    fn handle_key_event(&mut self, key_event: &KeyEvent) -> HandleResult;

    fn get_focused_child(&self) -> Option<SharedComponent> {
        None
    }

    fn get_key_mappings(&self) -> KeyMaps;

    fn render_with_block(&mut self, f: &mut Frame, rect: Rect, block: Block) {
        let inner = block.inner(rect);
        self.render(f, inner);
        f.render_widget(block, rect);
    }

    fn render_with_command_keys_help_bar(&mut self, f: &mut Frame, rect: Rect) {
        let key_maps = self.get_key_mappings();
        let help_bar = KeyMapHelpBar::new(&key_maps);
        let chunks = Layout::vertical(vec![Constraint::Min(0), Constraint::Length(1)]).split(rect);
        f.render_widget(help_bar, chunks[1]);
        self.render(f, chunks[0]);
    }

    fn handle_event(&mut self, event: &Event) -> HandleResult {
        match self.try_propagate_event(event) {
            HandleResult::Handled => HandleResult::Handled,
            HandleResult::NotHandled => match event {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event)
                }
                _ => HandleResult::NotHandled,
            },
        }
    }

    fn try_propagate_event(&mut self, event: &Event) -> HandleResult {
        if let Some(child) = &self.get_focused_child() {
            child
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .handle_event(event)
        } else {
            HandleResult::NotHandled
        }
    }
}

#[derive(PartialEq, Debug)]
pub enum HandleResult {
    Handled,
    NotHandled,
}
