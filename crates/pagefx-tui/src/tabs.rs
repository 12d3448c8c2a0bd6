//! Tab strip with progress gauges, and the active content panel.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// One tab as the preview shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct TabView {
    pub label: String,
    /// Indicator proportion read from the progress bar's inline width.
    pub progress: f64,
    pub active: bool,
}

/// Screen areas of `count` tabs laid side by side in `area`.
///
/// Rendering and mouse hit-testing share this split.
#[must_use]
pub fn tab_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

/// Index of the tab under terminal cell (`column`, `row`).
#[must_use]
pub fn tab_at(area: Rect, count: usize, column: u16, row: u16) -> Option<usize> {
    tab_areas(area, count)
        .iter()
        .position(|r| r.contains(ratatui::layout::Position::new(column, row)))
}

/// Render the tab strip.
pub fn render_tabs(frame: &mut Frame, area: Rect, tabs: &[TabView], paused: bool, theme: &ColorTheme) {
    for (tab, rect) in tabs.iter().zip(tab_areas(area, tabs.len())) {
        let (border, title) = if tab.active && paused {
            (theme.active_style(), format!(" {} (paused) ", tab.label))
        } else if tab.active {
            (theme.active_style(), format!(" {} ", tab.label))
        } else {
            (theme.border_style(), format!(" {} ", tab.label))
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border)
                    .title(title),
            )
            .gauge_style(theme.gauge_style(paused && tab.active))
            .ratio(tab.progress.clamp(0.0, 1.0));

        frame.render_widget(gauge, rect);
    }
}

/// Render the active tab's content panel.
pub fn render_content(frame: &mut Frame, area: Rect, text: &str, hovered: bool, theme: &ColorTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if hovered { theme.active_style() } else { theme.border_style() })
        .title(" Content ");
    let paragraph = Paragraph::new(text.to_string())
        .style(theme.text_style())
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}
