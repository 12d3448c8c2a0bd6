//! Page descriptions and the document layout built from them.
//!
//! A [`PageDescription`] is the JSON form of a landing page: a list of
//! metrics and a list of tabs. [`PageDescription::build`] turns it into a
//! [`MemoryDocument`] that honors the markup contract, with the tab section
//! near the top and the metrics below the fold.

use serde::{Deserialize, Serialize};

use crate::constants::markup::{
    ACTIVE, ARIA_SELECTED, CONTENT_DISPLAY, CONTENT_ITEM, DATA_IS_LARGE, DATA_SUFFIX, DATA_VALUE,
    METRIC_LABEL, METRIC_VALUE, PROGRESS_BAR, TAB_ITEM,
};
use crate::document::{Element, MemoryDocument};
use crate::error::EffectError;
use crate::surface::{percent_width, ElementId, Rect, Surface};

pub const VIEWPORT_WIDTH: f64 = 1280.0;
pub const VIEWPORT_HEIGHT: f64 = 720.0;

const MARGIN: f64 = 40.0;
const HEADER_HEIGHT: f64 = 200.0;
const TAB_Y: f64 = 220.0;
const TAB_HEIGHT: f64 = 48.0;
const TAB_GAP: f64 = 16.0;
const BAR_HEIGHT: f64 = 4.0;
const CONTENT_Y: f64 = 290.0;
const CONTENT_HEIGHT: f64 = 360.0;
const METRICS_Y: f64 = 900.0;
const METRIC_COLUMNS: usize = 3;
const METRIC_WIDTH: f64 = 360.0;
const METRIC_VALUE_HEIGHT: f64 = 64.0;
const METRIC_LABEL_HEIGHT: f64 = 32.0;
const METRIC_ROW_HEIGHT: f64 = 160.0;
const FOOTER_HEIGHT: f64 = 240.0;

/// A metric's `data-value`: authors write numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(i64),
    Text(String),
}

impl AttrValue {
    #[must_use]
    pub fn to_attribute(&self) -> String {
        match self {
            AttrValue::Number(n) => n.to_string(),
            AttrValue::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescription {
    pub value: AttrValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default)]
    pub is_large: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabDescription {
    pub label: String,
    #[serde(default)]
    pub content: String,
}

/// JSON description of a landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescription {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub metrics: Vec<MetricDescription>,
    #[serde(default)]
    pub tabs: Vec<TabDescription>,
    /// Whether the content panels sit in a hoverable `content-display`.
    #[serde(default = "default_true")]
    pub content_display: bool,
}

fn default_true() -> bool {
    true
}

/// Element ids of a built page, by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub header: Option<ElementId>,
    pub tabs: Vec<ElementId>,
    pub bars: Vec<ElementId>,
    pub content_display: Option<ElementId>,
    pub contents: Vec<ElementId>,
    pub metrics: Vec<ElementId>,
    pub labels: Vec<Option<ElementId>>,
}

impl PageDescription {
    /// Built-in demo page.
    #[must_use]
    pub fn demo() -> Self {
        let metric = |value: AttrValue, suffix: &str, is_large: bool, label: &str| MetricDescription {
            value,
            suffix: (!suffix.is_empty()).then(|| suffix.to_string()),
            is_large,
            label: Some(label.to_string()),
        };
        let tab = |label: &str, content: &str| TabDescription {
            label: label.to_string(),
            content: content.to_string(),
        };
        Self {
            title: "Ship faster with fewer surprises".to_string(),
            metrics: vec![
                metric(AttrValue::Number(500), "+", false, "Teams onboarded"),
                metric(AttrValue::Number(98), "%", false, "Uptime last quarter"),
                metric(AttrValue::Number(2_000_000), "", true, "Requests served daily"),
                metric(AttrValue::Number(24), "/7", false, "Support coverage"),
                metric(AttrValue::Number(1_250_000), "+", true, "Builds verified"),
            ],
            tabs: vec![
                tab("Analytics", "Dashboards that update as your traffic does."),
                tab("Automation", "Pipelines that run themselves on every merge."),
                tab("Security", "Policies enforced before anything reaches production."),
            ],
            content_display: true,
        }
    }

    /// Parse and validate a page description.
    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        let page: Self = serde_json::from_str(json).map_err(|e| EffectError::InvalidPage(e.to_string()))?;
        page.validate()?;
        Ok(page)
    }

    /// Reject pages that can show nothing.
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.metrics.is_empty() && self.tabs.is_empty() {
            return Err(EffectError::InvalidPage(
                "page has neither metrics nor tabs".to_string(),
            ));
        }
        if let Some(i) = self.tabs.iter().position(|t| t.label.trim().is_empty()) {
            return Err(EffectError::InvalidPage(format!("tab {i} has an empty label")));
        }
        Ok(())
    }

    /// Build the document for this page.
    #[must_use]
    pub fn build(&self) -> (MemoryDocument, PageLayout) {
        let mut doc = MemoryDocument::new(Rect::new(0.0, 0.0, VIEWPORT_WIDTH, VIEWPORT_HEIGHT));
        let mut layout = PageLayout {
            header: Some(doc.push(
                Element::new("header")
                    .with_text(&self.title)
                    .with_rect(Rect::new(0.0, 0.0, VIEWPORT_WIDTH, HEADER_HEIGHT)),
            )),
            ..PageLayout::default()
        };

        if !self.tabs.is_empty() {
            self.build_tabs(&mut doc, &mut layout);
        }

        let mut bottom = if self.tabs.is_empty() { HEADER_HEIGHT } else { CONTENT_Y + CONTENT_HEIGHT };
        let mut x = MARGIN;
        let mut y = METRICS_Y;
        for (i, metric) in self.metrics.iter().enumerate() {
            if i > 0 && i % METRIC_COLUMNS == 0 {
                x = MARGIN;
                y += METRIC_ROW_HEIGHT;
            }
            let mut el = Element::new("span")
                .with_class(METRIC_VALUE)
                .with_attr(DATA_VALUE, &metric.value.to_attribute())
                .with_text("0")
                .with_rect(Rect::new(x, y, METRIC_WIDTH, METRIC_VALUE_HEIGHT));
            if let Some(suffix) = &metric.suffix {
                el = el.with_attr(DATA_SUFFIX, suffix);
            }
            if metric.is_large {
                el = el.with_attr(DATA_IS_LARGE, "true");
            }
            layout.metrics.push(doc.push(el));
            layout.labels.push(metric.label.as_ref().map(|label| {
                doc.push(
                    Element::new("p")
                        .with_class(METRIC_LABEL)
                        .with_text(label)
                        .with_rect(Rect::new(x, y + METRIC_VALUE_HEIGHT, METRIC_WIDTH, METRIC_LABEL_HEIGHT)),
                )
            }));
            bottom = y + METRIC_VALUE_HEIGHT + METRIC_LABEL_HEIGHT;
            x += METRIC_WIDTH + MARGIN;
        }

        doc.push(Element::new("footer").with_rect(Rect::new(0.0, bottom + MARGIN, VIEWPORT_WIDTH, FOOTER_HEIGHT)));
        (doc, layout)
    }

    fn build_tabs(&self, doc: &mut MemoryDocument, layout: &mut PageLayout) {
        let count = self.tabs.len();
        #[allow(clippy::cast_precision_loss)]
        let width = ((VIEWPORT_WIDTH - 2.0 * MARGIN - TAB_GAP * (count - 1) as f64) / count as f64).max(1.0);

        let mut x = MARGIN;
        for tab in &self.tabs {
            layout.tabs.push(doc.push(
                Element::new("button")
                    .with_class(TAB_ITEM)
                    .with_attr(ARIA_SELECTED, "false")
                    .with_text(&tab.label)
                    .with_rect(Rect::new(x, TAB_Y, width, TAB_HEIGHT)),
            ));
            let bar = doc.push(
                Element::new("div")
                    .with_class(PROGRESS_BAR)
                    .with_rect(Rect::new(x, TAB_Y + TAB_HEIGHT - BAR_HEIGHT, width, BAR_HEIGHT)),
            );
            doc.set_width(bar, &percent_width(0.0));
            layout.bars.push(bar);
            x += width + TAB_GAP;
        }

        let panel = Rect::new(MARGIN, CONTENT_Y, VIEWPORT_WIDTH - 2.0 * MARGIN, CONTENT_HEIGHT);
        if self.content_display {
            layout.content_display = Some(doc.push(Element::new("section").with_class(CONTENT_DISPLAY).with_rect(panel)));
        }
        for (i, tab) in self.tabs.iter().enumerate() {
            let mut el = Element::new("article").with_class(CONTENT_ITEM).with_text(&tab.content).with_rect(panel);
            if i == 0 {
                el = el.with_class(ACTIVE);
            }
            layout.contents.push(doc.push(el));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visibility::intersection_ratio;

    #[test]
    fn parses_numbers_and_strings() {
        let page = PageDescription::from_json(
            r#"{"metrics":[{"value":500,"suffix":"+"},{"value":"98.6","is_large":true}],"tabs":[]}"#,
        )
        .unwrap();
        assert_eq!(page.metrics[0].value, AttrValue::Number(500));
        assert_eq!(page.metrics[1].value, AttrValue::Text("98.6".into()));
        assert!(page.content_display);
    }

    #[test]
    fn rejects_empty_and_malformed_pages() {
        assert!(matches!(PageDescription::from_json("{}"), Err(EffectError::InvalidPage(_))));
        assert!(matches!(PageDescription::from_json("[1,2"), Err(EffectError::InvalidPage(_))));
        let err = PageDescription::from_json(r#"{"tabs":[{"label":" "}]}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid page description: tab 0 has an empty label");
    }

    #[test]
    fn demo_honors_the_markup_contract() {
        let (doc, layout) = PageDescription::demo().build();
        let tabs = doc.query_class(TAB_ITEM);
        assert_eq!(tabs.len(), 3);
        assert_eq!(doc.query_class(PROGRESS_BAR).len(), 3);
        assert_eq!(doc.query_class(CONTENT_ITEM).len(), 3);
        assert_eq!(doc.query_class(CONTENT_DISPLAY).len(), 1);
        assert_eq!(doc.query_class(METRIC_VALUE), layout.metrics);
        assert_eq!(doc.attribute(layout.metrics[2], DATA_IS_LARGE), Some("true"));
        assert_eq!(doc.attribute(layout.metrics[0], DATA_SUFFIX), Some("+"));
        assert_eq!(layout.labels.iter().flatten().count(), 5);
    }

    #[test]
    fn metrics_start_below_the_fold() {
        let (mut doc, layout) = PageDescription::demo().build();
        let viewport = doc.viewport();
        for &id in &layout.metrics {
            let rect = doc.bounding_rect(id).unwrap();
            assert!(intersection_ratio(rect, viewport, 0.0) < 0.5);
        }
        doc.scroll_to(doc.max_scroll());
        let last = doc.bounding_rect(*layout.metrics.last().unwrap()).unwrap();
        assert!(intersection_ratio(last, doc.viewport(), 0.0) >= 0.5);
    }

    #[test]
    fn tabs_fit_the_viewport() {
        let (doc, layout) = PageDescription::demo().build();
        let last = doc.bounding_rect(*layout.tabs.last().unwrap()).unwrap();
        assert!(last.right() <= VIEWPORT_WIDTH - MARGIN + 1e-9);
    }

    #[test]
    fn no_content_display_when_disabled() {
        let mut page = PageDescription::demo();
        page.content_display = false;
        let (doc, layout) = page.build();
        assert!(layout.content_display.is_none());
        assert!(doc.query_class(CONTENT_DISPLAY).is_empty());
    }
}
