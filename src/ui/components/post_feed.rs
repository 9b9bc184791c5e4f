use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::{Post, ReactionKind};
use crate::ui::theme::Theme;

pub struct PostFeed<'a> {
    posts: &'a [Post],
    selected: Option<usize>,
    viewer: Option<&'a str>,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> PostFeed<'a> {
    pub fn new(posts: &'a [Post], title: &'a str, theme: &'a Theme) -> Self {
        Self {
            posts,
            selected: None,
            viewer: None,
            title,
            theme,
        }
    }

    /// Highlights one post and marks the viewer's own reactions.
    pub fn interactive(mut self, selected: usize, viewer: &'a str) -> Self {
        self.selected = Some(selected);
        self.viewer = Some(viewer);
        self
    }
}

fn reaction_label(post: &Post, kind: ReactionKind, viewer: Option<&str>) -> String {
    let icon = match kind {
        ReactionKind::Likes => "\u{1f44d}",
        ReactionKind::Hearts => "\u{2764}",
    };
    let set = post.reactions(kind);
    let marker = if viewer.is_some_and(|v| set.contains(v)) {
        "\u{2605}"
    } else {
        ""
    };
    format!("{icon} {}{marker}", set.len())
}

impl Widget for PostFeed<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        if self.posts.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No posts yet. Be the first!",
                Style::default().fg(colors.text_pending()),
            )))
            .block(block)
            .render(area, buf);
            return;
        }

        let width = area.width.saturating_sub(2) as usize;
        let mut lines: Vec<Line> = Vec::new();
        let mut selected_rows = 0..0;
        for (i, post) in self.posts.iter().enumerate() {
            let is_selected = self.selected == Some(i);
            let first_row = lines.len();
            let author_style = if is_selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.accent())
            };
            let indicator = if is_selected { "> " } else { "  " };

            lines.push(Line::from(vec![
                Span::styled(indicator, author_style),
                Span::styled(post.author_name.clone(), author_style),
                Span::styled(
                    format!("  {}", post.created_at.format("%Y-%m-%d %H:%M")),
                    Style::default().fg(colors.text_pending()),
                ),
            ]));
            for row in content_rows(&post.content, width) {
                lines.push(Line::from(Span::styled(
                    format!("  {row}"),
                    Style::default().fg(colors.fg()),
                )));
            }
            lines.push(Line::from(Span::styled(
                format!(
                    "  {}   {}",
                    reaction_label(post, ReactionKind::Likes, self.viewer),
                    reaction_label(post, ReactionKind::Hearts, self.viewer)
                ),
                Style::default().fg(colors.text_pending()),
            )));
            lines.push(Line::from(""));

            if is_selected {
                // spacer excluded
                selected_rows = first_row..lines.len() - 1;
            }
        }

        let visible = area.height.saturating_sub(2) as usize;
        let scroll = scroll_offset(selected_rows, visible);

        Paragraph::new(lines)
            .block(block)
            .scroll((scroll as u16, 0))
            .render(area, buf);
    }
}

/// Splits content into rows that fit `width` after the two-column indent.
/// Rows are pre-split so the row count is exact for scrolling.
fn content_rows(content: &str, width: usize) -> Vec<String> {
    let usable = width.saturating_sub(2).max(1);
    let chars: Vec<char> = content.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(usable)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Smallest scroll that shows the whole selected post, or its top when it
/// is taller than the viewport.
fn scroll_offset(selected: std::ops::Range<usize>, visible: usize) -> usize {
    if selected.end <= visible {
        return 0;
    }
    (selected.end - visible).min(selected.start)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;

    use super::*;

    fn post() -> Post {
        Post {
            id: "p-1".to_string(),
            author_id: "u-1".to_string(),
            author_name: "amy".to_string(),
            content: "hello".to_string(),
            created_at: Utc::now(),
            likes: BTreeSet::from(["u-2".to_string(), "u-3".to_string()]),
            hearts: BTreeSet::new(),
        }
    }

    #[test]
    fn reaction_label_counts_and_marks_viewer() {
        let p = post();
        assert_eq!(reaction_label(&p, ReactionKind::Likes, None), "\u{1f44d} 2");
        assert_eq!(
            reaction_label(&p, ReactionKind::Likes, Some("u-2")),
            "\u{1f44d} 2\u{2605}"
        );
        assert_eq!(reaction_label(&p, ReactionKind::Hearts, Some("u-2")), "\u{2764} 0");
    }

    #[test]
    fn content_rows_fit_width() {
        let rows = content_rows(&"x".repeat(25), 12);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.chars().count() <= 10));
        assert_eq!(content_rows("", 12), vec![String::new()]);
    }

    #[test]
    fn scroll_keeps_selected_post_in_view() {
        assert_eq!(scroll_offset(0..3, 10), 0);
        assert_eq!(scroll_offset(12..15, 10), 5);
        // taller than the viewport: show its top
        assert_eq!(scroll_offset(4..30, 10), 4);
    }

    #[test]
    fn long_posts_do_not_hide_the_selected_one() {
        let theme = Theme::default();
        let mut long = post();
        long.content = "word ".repeat(60);
        let mut target = post();
        target.author_name = "bob".to_string();
        target.content = "short".to_string();
        let posts = vec![long.clone(), long, target];

        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        PostFeed::new(&posts, "Feed", &theme)
            .interactive(2, "u-9")
            .render(area, &mut buf);

        let screen: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert!(screen.contains("> bob"), "{screen}");
        assert!(screen.contains("short"), "{screen}");
    }
}
