use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::{AuthForm, AuthMode};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct AuthPanel<'a> {
    form: &'a AuthForm,
    theme: &'a Theme,
}

impl<'a> AuthPanel<'a> {
    pub fn new(form: &'a AuthForm, theme: &'a Theme) -> Self {
        Self { form, theme }
    }

    fn field_line(&self, label: &str, input: &LineInput, index: usize) -> Line<'static> {
        let colors = &self.theme.colors;
        let focused = self.form.focus == index;
        let label_style = if focused {
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };

        let (before, at, after) = input.render_parts();
        let mut spans = vec![
            Span::styled(format!("{label:<10}"), label_style),
            Span::styled(before, Style::default().fg(colors.fg())),
        ];
        if focused {
            let cursor = at.map_or_else(|| " ".to_string(), |c| c.to_string());
            spans.push(Span::styled(
                cursor,
                Style::default()
                    .fg(colors.text_cursor_fg())
                    .bg(colors.text_cursor_bg()),
            ));
        } else if let Some(c) = at {
            spans.push(Span::styled(c.to_string(), Style::default().fg(colors.fg())));
        }
        spans.push(Span::styled(after, Style::default().fg(colors.fg())));
        Line::from(spans)
    }
}

impl Widget for AuthPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let (title, other) = match self.form.mode {
            AuthMode::Login => ("Login", "Register"),
            AuthMode::Register => ("Register", "Login"),
        };

        let mut lines = vec![
            Line::from(Span::styled(
                "ThunderType",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            Line::from(""),
            self.field_line("Email", &self.form.email, 0),
            self.field_line("Password", &self.form.password, 1),
        ];

        if self.form.mode == AuthMode::Register {
            lines.push(self.field_line("Username", &self.form.username, 2));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Prove you are human:",
                Style::default().fg(colors.text_pending()),
            )));
            for (i, (challenge, answer)) in self
                .form
                .challenges
                .iter()
                .zip(self.form.answers.iter())
                .enumerate()
            {
                lines.push(Line::from(Span::styled(
                    format!("  {}", challenge.question),
                    Style::default().fg(colors.fg()),
                )));
                lines.push(self.field_line("  Answer", answer, 3 + i));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[Enter] {title}  [Tab] next field  [F2] {other}  [Esc] quit"),
            Style::default().fg(colors.text_pending()),
        )));

        let block = Block::bordered()
            .title(format!(" {title} "))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}
