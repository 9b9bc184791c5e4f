use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::engine::progression::Progression;
use crate::generator::lesson::target_wpm;
use crate::session::result::SessionResult;
use crate::ui::theme::Theme;

/// Result card shown once a level finishes.
pub struct Dashboard<'a> {
    pub result: &'a SessionResult,
    pub verdict: &'a Progression,
    pub theme: &'a Theme,
}

impl<'a> Dashboard<'a> {
    pub fn new(result: &'a SessionResult, verdict: &'a Progression, theme: &'a Theme) -> Self {
        Self {
            result,
            verdict,
            theme,
        }
    }
}

impl Widget for Dashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let border = if self.verdict.passed {
            colors.success()
        } else {
            colors.warning()
        };

        let block = Block::bordered()
            .title(format!(" Level {} Complete ", self.result.level))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let headline = if self.verdict.passed {
            Span::styled(
                "Passed",
                Style::default()
                    .fg(colors.success())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                "Not yet",
                Style::default()
                    .fg(colors.warning())
                    .add_modifier(Modifier::BOLD),
            )
        };
        Paragraph::new(Line::from(headline))
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let label = Style::default().fg(colors.fg());
        let target = target_wpm(self.result.level);
        let rows = [
            Line::from(vec![
                Span::styled("  Speed:    ", label),
                Span::styled(
                    format!("{} WPM", self.result.wpm),
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  (target {target})"),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Accuracy: ", label),
                Span::styled(
                    format!("{}%", self.result.accuracy),
                    Style::default()
                        .fg(colors.accuracy(self.result.accuracy))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({} correct)", self.result.correct),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Errors:   ", label),
                Span::styled(
                    self.result.errors.to_string(),
                    Style::default().fg(if self.result.errors == 0 {
                        colors.success()
                    } else {
                        colors.error()
                    }),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Time:     ", label),
                Span::styled(format!("{:.1}s", self.result.elapsed_secs), label),
            ]),
        ];
        for (row, line) in rows.into_iter().enumerate() {
            Paragraph::new(line).render(layout[row + 1], buf);
        }

        Paragraph::new(Line::from(Span::styled(
            self.verdict.message.as_str(),
            Style::default().fg(colors.fg()),
        )))
        .wrap(Wrap { trim: true })
        .render(layout[6], buf);

        let mut hints = vec![Span::styled(
            "  [r] Retry  ",
            Style::default().fg(colors.accent()),
        )];
        if let Some(next) = self.verdict.next_level.filter(|_| self.verdict.passed) {
            hints.push(Span::styled(
                format!("[n] Level {next}  "),
                Style::default().fg(colors.accent()),
            ));
        }
        hints.push(Span::styled("[Esc] Levels", Style::default().fg(colors.accent())));
        Paragraph::new(Line::from(hints)).render(layout[7], buf);
    }
}
