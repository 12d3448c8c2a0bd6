//! Shared harness for the workspace-level scenario tests.
//!
//! Pages here are small and built in code so every test states the markup
//! it depends on.

use pagefx_core::markup::{AttrValue, MetricDescription, TabDescription};
use pagefx_core::{EffectOptions, PageDescription, PageLayout, Simulation, Surface};

/// Frame interval of every scenario; divides the default durations evenly.
pub const FRAME_MS: f64 = 16.0;

/// A page with one metric and no tabs.
#[must_use]
pub fn metric_page(value: &str, suffix: &str, is_large: bool) -> PageDescription {
    PageDescription {
        title: "metric".to_string(),
        metrics: vec![MetricDescription {
            value: AttrValue::Text(value.to_string()),
            suffix: (!suffix.is_empty()).then(|| suffix.to_string()),
            is_large,
            label: None,
        }],
        tabs: Vec::new(),
        content_display: true,
    }
}

/// A page with `count` tabs and no metrics.
#[must_use]
pub fn tab_page(count: usize) -> PageDescription {
    PageDescription {
        title: "tabs".to_string(),
        metrics: Vec::new(),
        tabs: (0..count)
            .map(|i| TabDescription {
                label: format!("Tab {i}"),
                content: format!("Panel {i}"),
            })
            .collect(),
        content_display: true,
    }
}

/// Build `page` into a simulation with default options.
#[must_use]
pub fn simulate(page: &PageDescription) -> (Simulation, PageLayout) {
    let (doc, layout) = page.build();
    (Simulation::new(doc, EffectOptions::default(), FRAME_MS), layout)
}

/// Current text of every metric, in document order.
#[must_use]
pub fn metric_texts(sim: &Simulation, layout: &PageLayout) -> Vec<String> {
    let doc = sim.page().surface();
    layout
        .metrics
        .iter()
        .map(|&id| doc.text(id).unwrap_or_default().to_string())
        .collect()
}

/// Inline width of every progress bar, in tab order.
#[must_use]
pub fn bar_widths(sim: &Simulation, layout: &PageLayout) -> Vec<String> {
    let doc = sim.page().surface();
    layout
        .bars
        .iter()
        .map(|&id| doc.width(id).unwrap_or_default().to_string())
        .collect()
}

/// Index of the tab marked active, checking that there is exactly one.
#[must_use]
pub fn active_tab(sim: &Simulation, layout: &PageLayout) -> Option<usize> {
    let doc = sim.page().surface();
    let active: Vec<usize> = layout
        .tabs
        .iter()
        .enumerate()
        .filter(|&(_, &id)| doc.has_class(id, pagefx_core::constants::markup::ACTIVE))
        .map(|(i, _)| i)
        .collect();
    match active.as_slice() {
        [one] => Some(*one),
        _ => None,
    }
}
