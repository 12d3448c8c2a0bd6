//! Metric cards panel.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use pagefx_core::CounterPhase;

use crate::styles::ColorTheme;

/// Cards per row.
pub const CARD_COLUMNS: usize = 3;
/// Height of one card including borders.
pub const CARD_HEIGHT: u16 = 4;

/// One metric as the preview shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: String,
    pub text: String,
    pub phase: CounterPhase,
}

/// Render the metric cards in a grid, row by row.
#[allow(clippy::cast_possible_truncation)]
pub fn render_metrics(frame: &mut Frame, area: Rect, cards: &[MetricCard], theme: &ColorTheme) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Metrics ")
        .border_style(theme.border_style());
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    for (row, chunk) in cards.chunks(CARD_COLUMNS).enumerate() {
        let y = inner.y + (row as u16) * CARD_HEIGHT;
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }
        let row_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        let columns = Layout::horizontal([Constraint::Ratio(1, CARD_COLUMNS as u32); CARD_COLUMNS]).split(row_area);
        for (card, &rect) in chunk.iter().zip(columns.iter()) {
            render_card(frame, rect, card, theme);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &MetricCard, theme: &ColorTheme) {
    let (style, status) = match card.phase {
        CounterPhase::Unanimated => (theme.muted_style(), "waiting"),
        CounterPhase::Animating => (theme.animating_style(), "counting"),
        CounterPhase::Settled => (theme.text_style(), "done"),
    };
    let text = vec![
        Line::styled(card.text.clone(), style),
        Line::styled(status, theme.muted_style()),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", card.label))
        .border_style(theme.border_style());
    frame.render_widget(Paragraph::new(text).block(block), area);
}
