//! # pagefx-tui
//!
//! Interactive terminal preview of a page's effects, using ratatui with Elm
//! architecture. The page runs on a real clock; the mouse drives hover and
//! clicks on tabs, the keyboard scrolls the viewport.

pub mod bridge;
pub mod footer;
pub mod header;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod metrics;
pub mod model;
pub mod styles;
pub mod tabs;

pub use bridge::{log_line, TuiBridgeObserver};
pub use logs::LogBuffer;
pub use messages::TuiMessage;
pub use model::{PreviewApp, PreviewLayout};
