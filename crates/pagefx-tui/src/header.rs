//! TUI header panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Page scroll position shown in the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollInfo {
    pub top: f64,
    pub bottom: f64,
    pub height: f64,
}

/// Render the header panel.
pub fn render_header(frame: &mut Frame, area: Rect, title: &str, scroll: ScrollInfo, theme: &ColorTheme) {
    let text = vec![Line::from(vec![
        Span::styled(title.to_string(), theme.header_style()),
        Span::styled(
            format!(
                " | viewport {:.0}-{:.0} of {:.0}px",
                scroll.top, scroll.bottom, scroll.height
            ),
            theme.muted_style(),
        ),
    ])];

    let block = Block::default().borders(Borders::BOTTOM).title(" pagefx ");

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
