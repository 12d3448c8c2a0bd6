//! pagefx library: application logic for the pagefx command line tool.

pub mod app;
pub mod config;
pub mod errors;
pub mod report;
