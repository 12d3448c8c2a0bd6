//! Plain-text rendering of a page snapshot.

use std::fmt::Write;

use pagefx_core::{CounterPhase, PageSnapshot};

/// Human-readable names for the snapshot's metrics and tabs.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    pub metrics: Vec<String>,
    pub tabs: Vec<String>,
}

fn phase_name(phase: CounterPhase) -> &'static str {
    match phase {
        CounterPhase::Unanimated => "waiting",
        CounterPhase::Animating => "animating",
        CounterPhase::Settled => "settled",
    }
}

/// Full report: one line per metric, then the carousel state.
#[must_use]
pub fn render_text(snapshot: &PageSnapshot, labels: &Labels) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "pagefx: {} frames, clock at {:.0} ms",
        snapshot.frames, snapshot.time_ms
    );

    if !snapshot.metrics.is_empty() {
        let _ = writeln!(out, "metrics:");
        let width = labels.metrics.iter().map(String::len).max().unwrap_or(0);
        for (i, metric) in snapshot.metrics.iter().enumerate() {
            let label = labels.metrics.get(i).map_or("", String::as_str);
            let _ = writeln!(
                out,
                "  {label:<width$}  {:>14}  {}",
                metric.text,
                phase_name(metric.phase)
            );
        }
    }

    match &snapshot.carousel {
        Some(carousel) => {
            let state = if carousel.paused { "paused" } else { "running" };
            let _ = writeln!(out, "carousel: tab {} active, {state}", carousel.active);
            for (i, progress) in carousel.progress.iter().enumerate() {
                let label = labels.tabs.get(i).map_or("", String::as_str);
                let marker = if i == carousel.active { '*' } else { ' ' };
                let _ = writeln!(out, "  {marker}[{i}] {label}  {:.0}%", progress * 100.0);
            }
        }
        None => {
            let _ = writeln!(out, "carousel: none");
        }
    }
    out
}

/// Quiet report: metric texts only, one per line.
#[must_use]
pub fn render_quiet(snapshot: &PageSnapshot) -> String {
    snapshot.metrics.iter().fold(String::new(), |mut out, m| {
        let _ = writeln!(out, "{}", m.text);
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagefx_core::page::{CarouselSnapshot, MetricSnapshot};
    use pagefx_core::ElementId;

    fn snapshot() -> PageSnapshot {
        PageSnapshot {
            time_ms: 3216.0,
            frames: 202,
            metrics: vec![
                MetricSnapshot {
                    element: ElementId(9),
                    text: "500+".into(),
                    phase: CounterPhase::Settled,
                },
                MetricSnapshot {
                    element: ElementId(11),
                    text: "0".into(),
                    phase: CounterPhase::Unanimated,
                },
            ],
            carousel: Some(CarouselSnapshot {
                active: 1,
                paused: true,
                progress: vec![0.0, 0.4, 0.0],
            }),
        }
    }

    #[test]
    fn text_report_lists_metrics_and_tabs() {
        let labels = Labels {
            metrics: vec!["Teams".into(), "Uptime".into()],
            tabs: vec!["Analytics".into(), "Automation".into(), "Security".into()],
        };
        let text = render_text(&snapshot(), &labels);
        assert!(text.starts_with("pagefx: 202 frames, clock at 3216 ms\n"));
        assert!(text.contains("Teams"));
        assert!(text.contains("500+  settled"));
        assert!(text.contains("0  waiting"));
        assert!(text.contains("carousel: tab 1 active, paused"));
        assert!(text.contains("*[1] Automation  40%"));
    }

    #[test]
    fn missing_labels_and_carousel() {
        let mut snap = snapshot();
        snap.carousel = None;
        let text = render_text(&snap, &Labels::default());
        assert!(text.contains("carousel: none"));
        assert!(text.contains("500+"));
    }

    #[test]
    fn quiet_report_is_texts_only() {
        assert_eq!(render_quiet(&snapshot()), "500+\n0\n");
    }
}
