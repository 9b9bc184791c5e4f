use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// One-row gauge with the count centered on it, e.g. `7/15`.
pub struct ProgressBar<'a> {
    label: String,
    done: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(label: &str, done: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            label: label.to_string(),
            done: done.min(total),
            total,
            theme,
        }
    }

    fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.label))
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64) as u16;
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let count = format!("{}/{}", self.done, self.total);
        let label_x = inner.x + (inner.width.saturating_sub(count.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &count, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_handles_empty_total() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new("x", 3, 0, &theme).ratio(), 0.0);
        assert_eq!(ProgressBar::new("x", 9, 6, &theme).ratio(), 1.0);
    }

    #[test]
    fn renders_count() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::new("Progress", 2, 4, &theme).render(area, &mut buf);
        let row: String = (0..20u16).map(|x| buf[(x, 1u16)].symbol().to_string()).collect();
        assert!(row.contains("2/4"));
    }
}
