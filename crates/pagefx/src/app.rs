//! Application entry point and dispatch.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use pagefx_core::observers::TracingObserver;
use pagefx_core::simulate::parse_script;
use pagefx_core::{EffectOptions, MemoryDocument, PageDescription, PageLayout, Simulation, Surface, SystemClock};
use pagefx_tui::PreviewApp;

use crate::config::AppConfig;
use crate::errors::CliError;
use crate::report::{render_quiet, render_text, Labels};

/// Run the application.
pub fn run(config: &AppConfig) -> Result<()> {
    // Handle shell completion
    if let Some(shell) = config.completion {
        let mut cmd = <AppConfig as clap::CommandFactory>::command();
        clap_complete::generate(shell, &mut cmd, "pagefx", &mut std::io::stdout());
        return Ok(());
    }

    let page = load_page(config)?;
    let options = load_options(config)?;

    if config.tui {
        return run_tui(config, &page, options);
    }
    let output = run_headless(config, &page, options)?;
    print!("{output}");
    Ok(())
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// The page from `--page`, or the built-in demo.
pub fn load_page(config: &AppConfig) -> Result<PageDescription> {
    match &config.page {
        Some(path) => {
            let page = PageDescription::from_json(&read(path)?)
                .with_context(|| format!("loading page {}", path.display()))?;
            Ok(page)
        }
        None => Ok(PageDescription::demo()),
    }
}

/// Options from `--options`, or the defaults.
pub fn load_options(config: &AppConfig) -> Result<EffectOptions> {
    match &config.options {
        Some(path) => Ok(EffectOptions::from_json(&read(path)?)
            .with_context(|| format!("loading options {}", path.display()))?),
        None => Ok(EffectOptions::default()),
    }
}

/// Run the page headless on a simulated clock and render the final state.
pub fn run_headless(config: &AppConfig, page: &PageDescription, options: EffectOptions) -> Result<String> {
    let duration = config.simulate_duration()?;
    let (doc, layout) = page.build();

    let mut sim = Simulation::new(doc, options, config.frame_interval_ms);
    sim.page_mut().register_observer(Box::new(TracingObserver::new()));
    if let Some(path) = &config.script {
        let script = parse_script(&read(path)?).with_context(|| format!("loading script {}", path.display()))?;
        info!(events = script.len(), "script loaded");
        sim = sim.with_script(script);
    }
    if config.reveal_all {
        sim.reveal_all();
    }

    #[allow(clippy::cast_precision_loss)]
    let ms = duration.as_millis() as f64;
    sim.run_for(ms)?;
    if !sim.remaining_script().is_empty() {
        warn!(
            skipped = sim.remaining_script().len(),
            "script events after the end of the run were not replayed"
        );
    }

    let snapshot = sim.page().snapshot();
    if config.json {
        return Ok(serde_json::to_string_pretty(&snapshot)? + "\n");
    }
    if config.quiet {
        return Ok(render_quiet(&snapshot));
    }
    Ok(render_text(&snapshot, &labels(sim.page().surface(), &layout)))
}

fn labels(doc: &MemoryDocument, layout: &PageLayout) -> Labels {
    let text = |id| doc.text(id).unwrap_or_default().to_string();
    Labels {
        metrics: layout.labels.iter().map(|l| l.map(text).unwrap_or_default()).collect(),
        tabs: layout.tabs.iter().map(|&id| text(id)).collect(),
    }
}

fn run_tui(config: &AppConfig, page: &PageDescription, options: EffectOptions) -> Result<()> {
    if config.script.is_some() {
        warn!("--script only applies to headless runs");
    }
    let (mut doc, layout) = page.build();
    if config.reveal_all {
        let height = doc.content_height();
        let width = doc.viewport().width;
        doc.resize_viewport(width, height);
    }

    let mut app = PreviewApp::new(doc, layout, SystemClock::new(), options);
    app.run().map_err(|e| anyhow::anyhow!("TUI error: {e}"))?;
    Ok(())
}
