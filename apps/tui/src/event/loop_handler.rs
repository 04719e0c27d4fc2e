use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io::Stdout;
use std::path::Path;
use std::time::Duration;

use trendboard_core::html::{render_page, PageLayout};
use trendboard_core::widgets::{ChartSlot, CloudLayout, DashboardView, GlyphMeasure};

use crate::app::{handle_input, App};
use crate::loader::load_snapshot;
use crate::ui;

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &App, json: bool) -> Result<()> {
    let snapshot = load_snapshot(&app.config.data_path).await?;
    let view = DashboardView::build(&snapshot, &app.config.dashboard);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render_headless_summary(&view);
    }

    Ok(())
}

fn render_headless_summary(view: &DashboardView) {
    println!("\nTrendboard");
    println!("==========");
    if let Some(updated) = &view.last_updated {
        println!("Last updated: {updated}");
    }

    println!("\nTop Keywords:");
    for entry in &view.keywords {
        println!("{:>3}. {} ({})", entry.rank, entry.word, entry.count);
    }

    println!("\nKeyword Velocity:");
    for bar in &view.velocity {
        println!("- {} {}", bar.label, bar.value_label());
    }

    println!("\nExplore:");
    for tile in &view.explore {
        println!("- {}: {} ({})", tile.label, tile.count_label(), tile.fallback);
        for item in &tile.items {
            println!("    {} | {}", item.title, item.url);
        }
    }
}

/// Write the dashboard as one static HTML page
pub async fn export_html(app: &App, output: &Path) -> Result<()> {
    let snapshot = load_snapshot(&app.config.data_path).await?;
    let config = &app.config.dashboard;
    let view = DashboardView::build(&snapshot, config);
    let layout = PageLayout::default();

    let placements = CloudLayout::new(layout.cloud_width, layout.cloud_height, &config.cloud)
        .place(
            &view.cloud_words,
            &GlyphMeasure::default(),
            &config.cloud.palette,
            &mut rand::thread_rng(),
        );

    let mut slot = ChartSlot::new();
    let chart = slot.render(
        view.velocity.clone(),
        (&config.velocity).into(),
        layout.chart_width,
    );

    let page = render_page(&view, &placements, Some(chart), layout)?;
    tokio::fs::write(output, page)
        .await
        .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        output = %output.display(),
        words = placements.len(),
        "exported dashboard page"
    );
    Ok(())
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.reload().await;

    loop {
        let size = terminal.size()?;
        app.sync_layout(Rect::new(0, 0, size.width, size.height));

        // Update animations
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    tracing::debug!(width, height, "terminal resized");
                    app.sync_layout(Rect::new(0, 0, width, height));
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
            }
        }
    }
    Ok(())
}
