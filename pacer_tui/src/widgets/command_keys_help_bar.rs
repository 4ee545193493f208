use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Widget,
};

use crate::styles::command_keys_help_bar::{DESCRIPTION_STYLE, KEY_ID_STYLE};

use super::{key_maps::KeyMap, KeyMaps};

/// Single-line `[keys: description]` summary; entries that do not fit are dropped.
pub struct KeyMapHelpBar<'a> {
    key_maps: &'a KeyMaps,
}

impl<'a> KeyMapHelpBar<'a> {
    pub fn new(key_maps: &'a KeyMaps) -> Self {
        KeyMapHelpBar { key_maps }
    }
}

impl Widget for KeyMapHelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut line = Line::default();
        for key_map in self.key_maps.grouped() {
            let spans = entry_spans(&key_map);
            let entry_width: usize = spans.iter().map(Span::width).sum();
            if line.width() + entry_width > area.width as usize {
                break;
            }
            for span in spans {
                line.push_span(span);
            }
        }
        line.alignment(Alignment::Center).render(area, buf);
    }
}

fn entry_spans(key_map: &KeyMap) -> Vec<Span<'static>> {
    vec![
        Span::from("["),
        Span::from(key_map.key_ids_to_string()).style(KEY_ID_STYLE),
        Span::from(": "),
        Span::from(key_map.description.desc.clone()).style(DESCRIPTION_STYLE),
        Span::from("] "),
    ]
}

#[cfg(test)]
mod test {
    use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

    use super::KeyMapHelpBar;
    use crate::widgets::{KeyDesc, KeyMaps};

    fn text(buf: &Buffer) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_render_fits_entries() {
        let key_maps = KeyMaps::default()
            .with('m', "mode")
            .with('q', KeyDesc::from("quit").prio(1));
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 1));
        KeyMapHelpBar::new(&key_maps).render(buf.area, &mut buf);
        assert_eq!(text(&buf), "[m: mode] [q: quit] ");
    }

    #[test]
    fn test_render_drops_overflowing_entries() {
        let key_maps = KeyMaps::default()
            .with('m', "mode")
            .with('q', KeyDesc::from("quit").prio(1));
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 1));
        KeyMapHelpBar::new(&key_maps).render(buf.area, &mut buf);
        assert_eq!(text(&buf), " [m: mode]  ");
    }
}
