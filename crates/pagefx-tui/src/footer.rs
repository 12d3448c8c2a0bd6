//! Key hints along the bottom of the preview.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// (key, action) pairs, in display order.
pub const HINTS: [(&str, &str); 6] = [
    ("q", "quit"),
    ("Up/Down", "scroll"),
    ("1-9", "tab"),
    ("Left/Right", "prev/next"),
    ("l", "logs"),
    ("mouse", "hover pauses"),
];

/// Render the footer panel with keyboard shortcuts.
pub fn render_footer(frame: &mut Frame, area: Rect, theme: &ColorTheme) {
    let mut spans = Vec::with_capacity(HINTS.len() * 3);
    for (i, (key, action)) in HINTS.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.muted_style()));
        }
        spans.push(Span::styled(*key, theme.warning_style()));
        spans.push(Span::raw(format!(": {action}")));
    }

    let block = Block::default().borders(Borders::TOP).border_style(theme.border_style());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
