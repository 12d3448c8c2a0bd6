//! Scrollable log panel.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Maximum number of retained log lines.
pub const LOG_CAPACITY: usize = 500;

/// Bounded log buffer with a follow-the-tail scroll position.
#[derive(Debug, Clone)]
pub struct LogBuffer {
    lines: Vec<String>,
    /// First visible line.
    pub offset: usize,
    /// Whether new lines scroll the view to the bottom.
    pub auto_scroll: bool,
}

impl LogBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Append a line, dropping the oldest past capacity.
    pub fn push(&mut self, line: String) {
        self.lines.push(line);
        if self.lines.len() > LOG_CAPACITY {
            self.lines.remove(0);
            self.offset = self.offset.saturating_sub(1);
        }
        if self.auto_scroll {
            self.offset = self.lines.len().saturating_sub(1);
        }
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    pub fn end(&mut self) {
        self.auto_scroll = true;
        self.offset = self.lines.len().saturating_sub(1);
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the log panel so that line `offset` is the last one visible.
pub fn render_logs(frame: &mut Frame, area: Rect, logs: &LogBuffer, theme: &ColorTheme) {
    let visible_height = area.height.saturating_sub(2) as usize; // borders
    let end = (logs.offset + 1).min(logs.len());
    let start = end.saturating_sub(visible_height);

    let items: Vec<ListItem> = logs.lines()[start..end]
        .iter()
        .map(|log| {
            let style = if log.starts_with("[ERROR]") {
                theme.error_style()
            } else if log.starts_with("[WARN]") {
                theme.warning_style()
            } else if log.starts_with("[HOVER]") {
                theme.muted_style()
            } else {
                theme.text_style()
            };
            ListItem::new(Line::raw(log.as_str())).style(style)
        })
        .collect();

    let title = if logs.auto_scroll {
        " Events ".to_string()
    } else {
        format!(" Events ({}/{}) ", end, logs.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.border_style()),
    );

    frame.render_widget(list, area);
}
