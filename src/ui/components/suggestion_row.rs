use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// The four canned-prompt chips under the transcript.
pub struct SuggestionRow<'a> {
    chips: &'a [String],
    selected: Option<usize>,
    theme: &'a Theme,
}

impl<'a> SuggestionRow<'a> {
    pub fn new(chips: &'a [String], selected: Option<usize>, theme: &'a Theme) -> Self {
        Self {
            chips,
            selected,
            theme,
        }
    }
}

impl Widget for SuggestionRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for (i, chip) in self.chips.iter().enumerate() {
            let is_selected = self.selected == Some(i);
            let style = if is_selected {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.accent()).bg(colors.accent_dim())
            };
            spans.push(Span::styled(format!(" {chip} "), style));
            spans.push(Span::raw("  "));
        }

        let paragraph = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(colors.bg()));
        paragraph.render(area, buf);
    }
}
