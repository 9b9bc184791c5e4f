use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::generator::lesson::LevelDescriptor;
use crate::ui::theme::Theme;

/// Scrolling list of nearby levels; locked ones are dimmed.
pub struct LevelList<'a> {
    title: &'a str,
    levels: &'a [LevelDescriptor],
    selected: usize,
    profile_level: u32,
    completed: Option<&'a BTreeSet<u32>>,
    theme: &'a Theme,
}

impl<'a> LevelList<'a> {
    pub fn new(
        title: &'a str,
        levels: &'a [LevelDescriptor],
        selected: usize,
        profile_level: u32,
        completed: Option<&'a BTreeSet<u32>>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            title,
            levels,
            selected,
            profile_level,
            completed,
            theme,
        }
    }
}

/// First row to draw so that `selected` stays visible in `height` rows.
fn scroll_offset(selected: usize, height: usize, len: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let max_offset = len - height;
    selected.saturating_sub(height / 2).min(max_offset)
}

impl Widget for LevelList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = inner.height as usize;
        let offset = scroll_offset(self.selected, rows, self.levels.len());

        let lines: Vec<Line> = self
            .levels
            .iter()
            .enumerate()
            .skip(offset)
            .take(rows)
            .map(|(i, level)| {
                let is_selected = i == self.selected;
                let unlocked = level.is_unlocked(self.profile_level);
                let indicator = if is_selected { ">" } else { " " };
                let status = if !unlocked {
                    "Locked"
                } else if self.completed.is_some_and(|c| c.contains(&level.id)) {
                    "\u{2713}"
                } else {
                    ""
                };

                let mut style = Style::default().fg(if !unlocked {
                    colors.text_pending()
                } else if is_selected {
                    colors.accent()
                } else {
                    colors.fg()
                });
                if is_selected {
                    style = style.add_modifier(Modifier::BOLD);
                }

                let status_color = if unlocked {
                    colors.success()
                } else {
                    colors.error()
                };
                Line::from(vec![
                    Span::styled(format!(" {indicator} {}", level.title()), style),
                    Span::styled(format!("  {status}"), Style::default().fg(status_color)),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
