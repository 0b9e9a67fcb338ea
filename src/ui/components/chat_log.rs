use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::Message;
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

/// Transcript view. User messages sit on the right, tutor messages on the
/// left; the view keeps the latest message in sight.
pub struct ChatLog<'a> {
    messages: &'a [Message],
    theme: &'a Theme,
}

impl<'a> ChatLog<'a> {
    pub fn new(messages: &'a [Message], theme: &'a Theme) -> Self {
        Self { messages, theme }
    }
}

impl Widget for ChatLog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let mut lines: Vec<Line> = Vec::new();
        let mut height = 0usize;

        for msg in self.messages {
            let alignment = if msg.is_user {
                Alignment::Right
            } else {
                Alignment::Left
            };
            let body_style = if msg.is_user {
                Style::default().fg(colors.user_fg())
            } else {
                Style::default().fg(colors.tutor_fg())
            };

            lines.push(
                Line::from(Span::styled(
                    msg.timestamp.clone(),
                    Style::default()
                        .fg(colors.muted())
                        .add_modifier(Modifier::DIM),
                ))
                .alignment(alignment),
            );
            lines.push(Line::from(Span::styled(msg.content.clone(), body_style)).alignment(alignment));
            lines.push(Line::from(""));

            height += 2 + wrapped_line_count(&msg.content, width);
        }

        let scroll = height.saturating_sub(inner.height as usize);
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0));
        paragraph.render(inner, buf);
    }
}
