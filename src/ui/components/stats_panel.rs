use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::typing::TypingSession;
use crate::store::schema::UserProfile;
use crate::ui::theme::Theme;

/// Live numbers for the running session next to the profile's best.
pub struct StatsPanel<'a> {
    session: &'a TypingSession,
    target_wpm: u32,
    profile: Option<&'a UserProfile>,
    theme: &'a Theme,
}

impl<'a> StatsPanel<'a> {
    pub fn new(
        session: &'a TypingSession,
        target_wpm: u32,
        profile: Option<&'a UserProfile>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            target_wpm,
            profile,
            theme,
        }
    }
}

fn format_gap(wpm: u32, target: u32) -> String {
    if wpm >= target {
        format!("\u{2191}+{}", wpm - target)
    } else {
        format!("\u{2193}-{}", target - wpm)
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let live = self.session.live();
        let label = Style::default().fg(colors.fg());

        let wpm_color = if live.wpm >= self.target_wpm {
            colors.success()
        } else {
            colors.accent()
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("WPM:      ", label),
                Span::styled(
                    live.wpm.to_string(),
                    Style::default().fg(wpm_color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", format_gap(live.wpm, self.target_wpm)),
                    Style::default().fg(colors.text_pending()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Target:   ", label),
                Span::styled(
                    format!("{} WPM", self.target_wpm),
                    Style::default().fg(colors.fg()),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Accuracy: ", label),
                Span::styled(
                    format!("{}%", live.accuracy),
                    Style::default().fg(colors.accuracy(live.accuracy)),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Correct:  ", label),
                Span::styled(
                    self.session.correct_count().to_string(),
                    Style::default().fg(colors.success()),
                ),
            ]),
            Line::from(vec![
                Span::styled("Errors:   ", label),
                Span::styled(
                    self.session.error_count().to_string(),
                    Style::default().fg(colors.error()),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Time:     ", label),
                Span::styled(format!("{:.0}s", live.elapsed_secs), label),
            ]),
        ];

        if let Some(profile) = self.profile {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Best:     ", label),
                Span::styled(
                    format!("{} WPM", profile.wpm),
                    Style::default().fg(colors.accent()),
                ),
            ]));
        }

        let block = Block::bordered()
            .title(" Stats ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_shows_direction() {
        assert_eq!(format_gap(12, 10), "\u{2191}+2");
        assert_eq!(format_gap(10, 10), "\u{2191}+0");
        assert_eq!(format_gap(3, 10), "\u{2193}-7");
    }
}
