use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::app::Toast;
use crate::ui::theme::Theme;

const MAX_VISIBLE: usize = 3;

/// Newest toasts stacked in the top-right corner.
pub struct ToastStack<'a> {
    toasts: &'a [Toast],
    theme: &'a Theme,
}

impl<'a> ToastStack<'a> {
    pub fn new(toasts: &'a [Toast], theme: &'a Theme) -> Self {
        Self { toasts, theme }
    }
}

fn toast_height(message: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    let rows = message.chars().count().max(1).div_ceil(inner);
    rows as u16 + 2
}

impl Widget for ToastStack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let width = (area.width / 2).clamp(24.min(area.width), 60.min(area.width));
        let x = area.x + area.width.saturating_sub(width + 1);
        let mut y = area.y + 1;

        for toast in self.toasts.iter().rev().take(MAX_VISIBLE) {
            let height = toast_height(&toast.message, width);
            if y + height > area.y + area.height {
                break;
            }
            let rect = Rect::new(x, y, width, height);
            let color = colors.toast(toast.kind);

            Clear.render(rect, buf);
            Paragraph::new(Line::from(Span::styled(
                toast.message.as_str(),
                Style::default().fg(colors.fg()),
            )))
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(color))
                    .style(Style::default().bg(colors.header_bg())),
            )
            .render(rect, buf);

            y += height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_grows_with_message() {
        assert_eq!(toast_height("short", 30), 3);
        assert_eq!(toast_height(&"x".repeat(56), 30), 4);
        assert_eq!(toast_height("", 30), 3);
    }
}
