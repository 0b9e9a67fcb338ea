use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::bank::Question;
use crate::ui::theme::Theme;

const OPTION_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Generated test view: numbered questions with selectable options.
/// Picks live in the screen state only; the generated test itself is
/// never mutated by choosing an answer.
pub struct QuizSheet<'a> {
    pub summary: &'a str,
    pub questions: &'a [Question],
    pub picked: &'a [Option<usize>],
    pub cursor: usize,
    pub theme: &'a Theme,
}

impl Widget for QuizSheet<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.summary))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        let mut cursor_line = 0usize;

        for (qi, question) in self.questions.iter().enumerate() {
            if qi == self.cursor {
                cursor_line = lines.len();
            }
            let marker = if qi == self.cursor { ">" } else { " " };
            lines.push(Line::from(Span::styled(
                format!("{marker} {}. {}", qi + 1, question.prompt),
                Style::default()
                    .fg(if qi == self.cursor {
                        colors.accent()
                    } else {
                        colors.fg()
                    })
                    .add_modifier(Modifier::BOLD),
            )));

            for (oi, option) in question.options.iter().enumerate() {
                let letter = OPTION_LETTERS.get(oi).copied().unwrap_or('?');
                let is_picked = self.picked.get(qi).copied().flatten() == Some(oi);
                let pick_mark = if is_picked { "●" } else { "○" };
                let style = if is_picked {
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.fg())
                };
                lines.push(Line::from(Span::styled(
                    format!("    {pick_mark} {letter}. {option}"),
                    style,
                )));
            }
            lines.push(Line::from(""));
        }

        // Keep the focused question in view.
        let viewport = inner.height as usize;
        let scroll = if cursor_line + 6 > viewport {
            cursor_line + 6 - viewport
        } else {
            0
        };

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll as u16, 0));
        paragraph.render(inner, buf);
    }
}
