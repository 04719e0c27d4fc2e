use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::layout::DashboardLayout;
use crate::ui::widgets::{cloud, explore, keywords, mascot, ticker, velocity};

pub fn render_dashboard(app: &App, f: &mut Frame<'_>) {
    let area = f.area();
    let layout = DashboardLayout::new(area);

    render_header(app, f, layout.header);

    // Widget cards only exist once a snapshot has loaded
    if let Some(view) = &app.view {
        keywords::render_keyword_list(&view.keywords, f, layout.keywords);
        cloud::render_word_cloud(&app.cloud_placements, app.cloud_area, f, layout.cloud);
        mascot::render_mascot(f, layout.mascot);
        velocity::render_velocity_chart(
            app.chart_slot.current(),
            app.chart_elapsed(),
            f,
            layout.velocity,
        );
        explore::render_explore_grid(&view.explore, f, layout.explore);
        ticker::render_ticker(&view.ticker, app.ticker_offset, f, layout.ticker);
    }

    render_shortcuts(app, f, layout.footer);

    if app.show_help {
        render_help_popup(f, area);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(255, 0, 168)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let title = Paragraph::new(TextLine::from(vec![
        Span::styled(
            "Trendboard ",
            Style::default()
                .fg(Color::Rgb(255, 0, 168))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("trending keywords", Style::default().fg(Color::Gray)),
    ]));
    f.render_widget(title, columns[0]);

    if let Some(label) = app.view.as_ref().and_then(|view| view.last_updated.as_deref()) {
        let updated = Paragraph::new(TextLine::from(vec![
            Span::styled("Last updated ", Style::default().fg(Color::DarkGray)),
            Span::styled(label.to_string(), Style::default().fg(Color::White)),
        ]))
        .alignment(Alignment::Right);
        f.render_widget(updated, columns[1]);
    }
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let key_style = Style::default()
        .fg(Color::Rgb(164, 255, 79))
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::new();
    for (key, action) in [("q", "quit"), ("r", "reload"), ("p", "pause ticker"), ("?", "help")] {
        spans.push(Span::styled(key, key_style));
        spans.push(Span::styled(format!(" {action}  "), Style::default().fg(Color::Gray)));
    }
    if !app.status_message.is_empty() {
        spans.push(Span::styled(
            format!("| {}", app.status_message),
            Style::default().fg(Color::DarkGray),
        ));
    }

    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

/// A `percent_x` by `percent_y` rectangle centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Fill(1),
    ])
    .areas(middle);

    center
}

fn render_help_popup(f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let key_style = Style::default()
        .fg(Color::Rgb(164, 255, 79))
        .add_modifier(Modifier::BOLD);
    let lines: Vec<TextLine<'_>> = [
        ("q / Esc", "Quit"),
        ("r", "Reload the snapshot"),
        ("p / Space", "Pause or resume the ticker"),
        ("?", "Toggle this help"),
    ]
    .into_iter()
    .map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(format!("{key:<10}"), key_style),
            Span::raw(action),
        ])
    })
    .collect();

    let help = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(help, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::collections::BTreeMap;
    use trendboard_core::snapshot::{KeywordFrequency, KeywordVelocity, SourceItem};
    use trendboard_core::TrendsSnapshot;

    const WIDGET_TITLES: [&str; 5] = [
        "Top Keywords",
        "Word Cloud",
        "Keyword Velocity",
        "Trending",
        "Explore",
    ];

    fn draw(app: &mut App) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(160, 50))?;
        app.sync_layout(Rect::new(0, 0, 160, 50));
        terminal.draw(|f| render_dashboard(app, f))?;

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        Ok(text)
    }

    fn snapshot() -> TrendsSnapshot {
        TrendsSnapshot {
            generated_at: Some("2024-05-01T12:00:00Z".to_string()),
            keyword_frequencies: vec![
                KeywordFrequency::new("<script>", 9),
                KeywordFrequency::new("rust", 7),
            ],
            keyword_velocity: vec![KeywordVelocity::new("rust", 4)],
            sources: BTreeMap::from([(
                "tech".to_string(),
                vec![SourceItem::new("Compiler news", "https://example.com/a")],
            )]),
            source_counts: BTreeMap::from([("reddit".to_string(), 3)]),
        }
    }

    #[tokio::test]
    async fn failed_load_draws_no_widgets() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(AppConfig::with_data_path("/nonexistent/trends.json"));
        app.reload().await;

        let screen = draw(&mut app)?;

        for title in WIDGET_TITLES {
            assert!(!screen.contains(title), "{title} drawn without data");
        }
        assert!(!screen.contains("Last updated"));
        assert!(screen.contains("Trendboard"));
        Ok(())
    }

    #[test]
    fn loaded_snapshot_fills_every_card() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(AppConfig::with_data_path("unused.json"));
        app.apply_snapshot(&snapshot());

        let screen = draw(&mut app)?;

        for title in WIDGET_TITLES {
            assert!(screen.contains(title), "{title} missing");
        }
        assert!(screen.contains("Last updated"));
        assert!(screen.contains("<script>"));
        assert!(screen.contains("Compiler news"));
        assert!(screen.contains("3 items"));
        assert!(screen.contains("No recent items"));
        assert!(screen.contains("Open source"));
        Ok(())
    }

    #[test]
    fn centered_rect_sits_in_the_middle() {
        let popup = centered_rect(50, 40, Rect::new(0, 0, 100, 50));
        assert_eq!(popup, Rect::new(25, 15, 50, 20));
    }

    #[test]
    fn help_popup_lists_shortcuts() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(AppConfig::with_data_path("unused.json"));
        app.show_help = true;

        let screen = draw(&mut app)?;

        assert!(screen.contains("Pause or resume the ticker"));
        Ok(())
    }
}
