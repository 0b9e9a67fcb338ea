use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::theme::Theme;

/// Topic and difficulty pickers shown while the quiz session is
/// configuring. All labels arrive pre-translated.
pub struct QuizForm<'a> {
    pub select_topic: &'a str,
    pub difficulty_heading: &'a str,
    pub questions_in: &'a str,
    pub language_name: &'a str,
    pub topics: &'a [String],
    pub topic_cursor: usize,
    pub chosen_topic: Option<usize>,
    pub difficulties: &'a [String],
    pub difficulty_index: usize,
    pub offline_hint: Option<&'a str>,
    pub status: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for QuizForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(self.topics.len() as u16),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(inner);

        let heading = Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.select_topic),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )));
        heading.render(layout[0], buf);

        let topic_lines: Vec<Line> = self
            .topics
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let cursor = if i == self.topic_cursor { ">" } else { " " };
                let chosen = if self.chosen_topic == Some(i) { "●" } else { "○" };
                let style = if i == self.topic_cursor {
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD)
                } else if self.chosen_topic == Some(i) {
                    Style::default().fg(colors.success())
                } else {
                    Style::default().fg(colors.fg())
                };
                Line::from(Span::styled(format!(" {cursor} {chosen} {label}"), style))
            })
            .collect();
        Paragraph::new(topic_lines).render(layout[1], buf);

        let difficulty_heading = Paragraph::new(Line::from(Span::styled(
            format!(" {}", self.difficulty_heading),
            Style::default()
                .fg(colors.fg())
                .add_modifier(Modifier::BOLD),
        )));
        difficulty_heading.render(layout[2], buf);

        let mut difficulty_spans: Vec<Span> = vec![Span::raw(" ")];
        for (i, label) in self.difficulties.iter().enumerate() {
            let style = if i == self.difficulty_index {
                Style::default()
                    .fg(colors.bg())
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg()).bg(colors.accent_dim())
            };
            difficulty_spans.push(Span::styled(format!(" {label} "), style));
            difficulty_spans.push(Span::raw("  "));
        }
        Paragraph::new(Line::from(difficulty_spans)).render(layout[3], buf);

        let language_line = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {}: ", self.questions_in),
                Style::default().fg(colors.muted()),
            ),
            Span::styled(
                self.language_name,
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        language_line.render(layout[4], buf);

        let mut tail_lines: Vec<Line> = Vec::new();
        if let Some(hint) = self.offline_hint {
            tail_lines.push(Line::from(Span::styled(
                format!(" {hint}"),
                Style::default().fg(colors.warning()),
            )));
        }
        if let Some(status) = self.status {
            tail_lines.push(Line::from(Span::styled(
                format!(" {status}"),
                Style::default().fg(colors.error()),
            )));
        }
        if !tail_lines.is_empty() {
            Paragraph::new(tail_lines).render(layout[5], buf);
        }
    }
}
