//! Preview application model (Elm architecture).

use std::io;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::Terminal;
use tracing::debug;

use pagefx_core::surface::parse_percent;
use pagefx_core::{
    EffectOptions, ElementId, FrameClock, MemoryDocument, Page, PageLayout, PointerEvent, PointerKind, Surface,
};

use crate::bridge::{log_line, TuiBridgeObserver};
use crate::footer::render_footer;
use crate::header::{render_header, ScrollInfo};
use crate::keymap::{map_key, KeyAction};
use crate::logs::{render_logs, LogBuffer};
use crate::messages::TuiMessage;
use crate::metrics::{render_metrics, MetricCard};
use crate::styles::ColorTheme;
use crate::tabs::{render_content, render_tabs, tab_at, TabView};

/// Pixels scrolled per arrow key.
pub const LINE_SCROLL_PX: f64 = 80.0;
/// Event channel capacity.
const CHANNEL_CAPACITY: usize = 1024;
/// Redraw interval of the interactive loop (~60 Hz).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Screen regions of the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLayout {
    pub header: Rect,
    pub tabs: Rect,
    pub content: Rect,
    pub metrics: Rect,
    pub logs: Option<Rect>,
    pub footer: Rect,
}

/// Hoverable page region under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hovered {
    Tab(usize),
    Content,
}

/// Preview application state (Elm Model).
pub struct PreviewApp<C: FrameClock> {
    page: Page<MemoryDocument, C>,
    layout: PageLayout,
    title: String,
    rx: Receiver<TuiMessage>,
    tx: Sender<TuiMessage>,
    hovered: Option<Hovered>,
    theme: ColorTheme,
    pub logs: LogBuffer,
    pub should_quit: bool,
    pub show_logs: bool,
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub errors: Vec<String>,
}

impl<C: FrameClock> PreviewApp<C> {
    /// Load the page and subscribe the preview to its events.
    pub fn new(doc: MemoryDocument, layout: PageLayout, clock: C, options: EffectOptions) -> Self {
        let (tx, rx) = bounded(CHANNEL_CAPACITY);
        let title = layout
            .header
            .and_then(|id| doc.text(id))
            .unwrap_or_default()
            .to_string();
        let mut page = Page::load(doc, clock, options);
        page.register_observer(Box::new(TuiBridgeObserver::new(tx.clone())));
        Self {
            page,
            layout,
            title,
            rx,
            tx,
            hovered: None,
            theme: ColorTheme::default(),
            logs: LogBuffer::new(),
            should_quit: false,
            show_logs: true,
            terminal_width: 80,
            terminal_height: 24,
            errors: Vec::new(),
        }
    }

    /// Sender for messages from outside the event loop.
    #[must_use]
    pub fn sender(&self) -> Sender<TuiMessage> {
        self.tx.clone()
    }

    #[must_use]
    pub fn page(&self) -> &Page<MemoryDocument, C> {
        &self.page
    }

    /// Run one page frame, then drain pending messages (Elm Update).
    pub fn tick(&mut self) {
        self.page.frame();
        self.update();
    }

    /// Drain pending messages.
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Effect(event) => self.logs.push(log_line(&event)),
            TuiMessage::Log(line) => self.logs.push(line),
            TuiMessage::Error(err) => {
                self.logs.push(format!("[ERROR] {err}"));
                self.errors.push(err);
            }
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::KeyPress(action) => self.handle_key_action(action),
            TuiMessage::Mouse { column, row, click } => self.handle_mouse(column, row, click),
            TuiMessage::Quit => self.should_quit = true,
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        let viewport = self.page.surface().viewport().height;
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::ScrollUp => self.page.surface_mut().scroll_by(-LINE_SCROLL_PX),
            KeyAction::ScrollDown => self.page.surface_mut().scroll_by(LINE_SCROLL_PX),
            KeyAction::PageUp => self.page.surface_mut().scroll_by(-viewport),
            KeyAction::PageDown => self.page.surface_mut().scroll_by(viewport),
            KeyAction::Home => {
                self.page.surface_mut().scroll_to(0.0);
                self.logs.home();
            }
            KeyAction::End => {
                let bottom = self.page.surface().max_scroll();
                self.page.surface_mut().scroll_to(bottom);
                self.logs.end();
            }
            KeyAction::SelectTab(index) => self.click_tab(index),
            KeyAction::PrevTab | KeyAction::NextTab => {
                let Some((active, count)) = self.page.carousel().map(|c| (c.active(), c.tab_count())) else {
                    return;
                };
                let step = if action == KeyAction::NextTab { 1 } else { count - 1 };
                self.click_tab((active + step) % count);
            }
            KeyAction::ToggleLogs => self.show_logs = !self.show_logs,
            KeyAction::None => {}
        }
        self.update();
    }

    fn click_tab(&mut self, index: usize) {
        match self.page.tab_element(index) {
            Ok(id) => {
                self.page.dispatch(PointerEvent::new(id, PointerKind::Click));
            }
            Err(e) => self.logs.push(format!("[WARN] {e}")),
        }
    }

    /// Handle pointer movement or a click at a terminal cell.
    ///
    /// Moving between regions leaves the old one before entering the new
    /// one; both happen before the next frame, so the carousel never sees an
    /// unpaused frame in between.
    pub fn handle_mouse(&mut self, column: u16, row: u16, click: bool) {
        let screen = Rect::new(0, 0, self.terminal_width, self.terminal_height);
        let layout = Self::compute_layout(screen, self.show_logs);
        let tab_count = self.page.carousel().map_or(0, pagefx_core::Carousel::tab_count);

        let under = tab_at(layout.tabs, tab_count, column, row).map(Hovered::Tab).or_else(|| {
            (tab_count > 0 && layout.content.contains(Position::new(column, row))).then_some(Hovered::Content)
        });

        if under != self.hovered {
            if let Some(old) = self.hovered.and_then(|h| self.element_of(h)) {
                self.page.dispatch(PointerEvent::new(old, PointerKind::Leave));
            }
            if let Some(new) = under.and_then(|h| self.element_of(h)) {
                self.page.dispatch(PointerEvent::new(new, PointerKind::Enter));
            }
            debug!(from = ?self.hovered, to = ?under, "pointer moved");
            self.hovered = under;
        }

        if click {
            if let Some(Hovered::Tab(i)) = under {
                self.click_tab(i);
            }
        }
        self.update();
    }

    fn element_of(&self, hovered: Hovered) -> Option<ElementId> {
        match hovered {
            Hovered::Tab(i) => self.page.tab_element(i).ok(),
            Hovered::Content => self.page.content_display_element(),
        }
    }

    /// Compute the screen layout.
    #[must_use]
    pub fn compute_layout(area: Rect, show_logs: bool) -> PreviewLayout {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // header
                Constraint::Length(3), // tab strip
                Constraint::Length(6), // content
                Constraint::Min(4),    // metrics + logs
                Constraint::Length(2), // footer
            ])
            .split(area);

        let (metrics, logs) = if show_logs {
            let bottom = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(outer[3]);
            (bottom[0], Some(bottom[1]))
        } else {
            (outer[3], None)
        };

        PreviewLayout {
            header: outer[0],
            tabs: outer[1],
            content: outer[2],
            metrics,
            logs,
            footer: outer[4],
        }
    }

    /// Tabs as currently rendered on the page surface.
    #[must_use]
    pub fn tab_views(&self) -> Vec<TabView> {
        let Some(carousel) = self.page.carousel() else {
            return Vec::new();
        };
        let surface = self.page.surface();
        carousel
            .tabs()
            .iter()
            .enumerate()
            .map(|(i, binding)| TabView {
                label: surface.text(binding.tab).unwrap_or_default().to_string(),
                progress: surface.width(binding.bar).and_then(parse_percent).unwrap_or(0.0),
                active: i == carousel.active(),
            })
            .collect()
    }

    /// Metric elements with their labels and current text.
    #[must_use]
    pub fn metric_cards(&self) -> Vec<MetricCard> {
        let surface = self.page.surface();
        self.layout
            .metrics
            .iter()
            .enumerate()
            .map(|(i, &id)| MetricCard {
                label: self
                    .layout
                    .labels
                    .get(i)
                    .copied()
                    .flatten()
                    .and_then(|l| surface.text(l))
                    .unwrap_or_default()
                    .to_string(),
                text: surface.text(id).unwrap_or_default().to_string(),
                phase: self.page.counter_phase(id).unwrap_or(pagefx_core::CounterPhase::Unanimated),
            })
            .collect()
    }

    fn active_content(&self) -> String {
        let surface = self.page.surface();
        self.page
            .carousel()
            .and_then(|c| c.tabs().get(c.active()))
            .and_then(|b| surface.text(b.content))
            .unwrap_or("(no tabs on this page)")
            .to_string()
    }

    /// Render the full view.
    pub fn render(&self, frame: &mut ratatui::Frame) {
        let layout = Self::compute_layout(frame.area(), self.show_logs);
        let doc = self.page.surface();
        let viewport = doc.viewport();
        let scroll = ScrollInfo {
            top: viewport.y,
            bottom: viewport.bottom(),
            height: doc.content_height(),
        };
        render_header(frame, layout.header, &self.title, scroll, &self.theme);

        let paused = self.page.carousel().is_some_and(pagefx_core::Carousel::is_paused);
        render_tabs(frame, layout.tabs, &self.tab_views(), paused, &self.theme);
        render_content(
            frame,
            layout.content,
            &self.active_content(),
            self.hovered == Some(Hovered::Content),
            &self.theme,
        );
        render_metrics(frame, layout.metrics, &self.metric_cards(), &self.theme);
        if let Some(area) = layout.logs {
            render_logs(frame, area, &self.logs, &self.theme);
        }
        render_footer(frame, layout.footer, &self.theme);
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the interactive loop: poll input, run a page frame, render.
    pub fn run(&mut self) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let size = terminal.size()?;
        self.terminal_width = size.width;
        self.terminal_height = size.height;

        let result = self.event_loop(&mut terminal);
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        loop {
            terminal.draw(|frame| self.render(frame))?;
            if self.should_quit {
                return Ok(());
            }

            while event::poll(FRAME_INTERVAL)? {
                if let Some(msg) = translate_event(&event::read()?) {
                    self.handle_message(msg);
                    if self.should_quit {
                        return Ok(());
                    }
                }
                // Drain only what is already queued before the next frame.
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }

            self.tick();
        }
    }
}

/// Map a terminal event to a message; `None` for events the preview ignores.
fn translate_event(event: &Event) -> Option<TuiMessage> {
    match event {
        Event::Key(key) => Some(TuiMessage::KeyPress(map_key(*key))),
        Event::Resize(width, height) => Some(TuiMessage::Resize {
            width: *width,
            height: *height,
        }),
        Event::Mouse(mouse) => {
            let click = match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => false,
                MouseEventKind::Down(MouseButton::Left) => true,
                _ => return None,
            };
            Some(TuiMessage::Mouse {
                column: mouse.column,
                row: mouse.row,
                click,
            })
        }
        _ => None,
    }
}
