use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::typing::{SessionPhase, TypingSession};
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharState {
    Correct,
    Incorrect(char),
    Cursor,
    Pending,
}

/// Per target position: how the typed buffer lines up against it.
fn char_states(target: &[char], typed: &[char]) -> Vec<CharState> {
    target
        .iter()
        .enumerate()
        .map(|(i, &expected)| match typed.get(i) {
            Some(&actual) if actual == expected => CharState::Correct,
            Some(&actual) => CharState::Incorrect(actual),
            None if i == typed.len() => CharState::Cursor,
            None => CharState::Pending,
        })
        .collect()
}

pub struct TypingArea<'a> {
    session: &'a TypingSession,
    instructions: &'a str,
    theme: &'a Theme,
}

impl<'a> TypingArea<'a> {
    pub fn new(session: &'a TypingSession, instructions: &'a str, theme: &'a Theme) -> Self {
        Self {
            session,
            instructions,
            theme,
        }
    }
}

impl Widget for TypingArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let target = self.session.target();

        let spans: Vec<Span> = char_states(target, self.session.typed())
            .into_iter()
            .zip(target.iter())
            .map(|(state, &expected)| match state {
                CharState::Correct => {
                    Span::styled(expected.to_string(), Style::default().fg(colors.text_correct()))
                }
                CharState::Incorrect(actual) => {
                    // a mistyped space would be invisible
                    let shown = if actual == ' ' { '\u{00b7}' } else { actual };
                    Span::styled(
                        shown.to_string(),
                        Style::default()
                            .fg(colors.text_incorrect())
                            .bg(colors.text_incorrect_bg())
                            .add_modifier(Modifier::UNDERLINED),
                    )
                }
                CharState::Cursor => Span::styled(
                    expected.to_string(),
                    Style::default()
                        .fg(colors.text_cursor_fg())
                        .bg(colors.text_cursor_bg()),
                ),
                CharState::Pending => {
                    Span::styled(expected.to_string(), Style::default().fg(colors.text_pending()))
                }
            })
            .collect();

        let status = match self.session.phase() {
            SessionPhase::Ready => "Start typing to begin the timer.",
            SessionPhase::Active => "",
            SessionPhase::Finished => "Finished. [r] restart  [Esc] levels",
            SessionPhase::Idle => "Pick a level to start.",
        };

        let lines = vec![
            Line::from(Span::styled(
                self.instructions,
                Style::default().fg(colors.fg()).add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(spans),
            Line::from(""),
            Line::from(Span::styled(status, Style::default().fg(colors.text_pending()))),
        ];

        let block = Block::bordered()
            .title(format!(" Level {} ", self.session.level()))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn states_track_typed_prefix() {
        let states = char_states(&chars("abcd"), &chars("ax"));
        assert_eq!(
            states,
            vec![
                CharState::Correct,
                CharState::Incorrect('x'),
                CharState::Cursor,
                CharState::Pending,
            ]
        );
    }

    #[test]
    fn empty_buffer_puts_cursor_first() {
        let states = char_states(&chars("ab"), &[]);
        assert_eq!(states[0], CharState::Cursor);
        assert_eq!(states[1], CharState::Pending);
    }

    #[test]
    fn complete_buffer_has_no_cursor() {
        let states = char_states(&chars("ab"), &chars("ab"));
        assert!(!states.contains(&CharState::Cursor));
    }
}
