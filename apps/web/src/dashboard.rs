//! Browser rendition of the dashboard, drawn cell by cell through ratzilla.

use ratzilla::ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};
use trendboard_core::animation::{advance_ticker_offset, AnimationMode};
use trendboard_core::config::HexColor;
use trendboard_core::widgets::velocity::{bar_width, BAR_GAP};
use trendboard_core::widgets::{
    CellMeasure, ChartOptions, ChartSlot, ExploreTile, KeywordEntry, Placement, TickerItem,
    TickerTrack, MASCOT, NO_RECENT_ITEMS, OPEN_SOURCE,
};
use trendboard_core::{DashboardConfig, DashboardView, TrendsSnapshot};

const PINK: Color = Color::Rgb(255, 0, 168);
const LIME: Color = Color::Rgb(164, 255, 79);
const VIOLET: Color = Color::Rgb(127, 0, 255);
const BONE: Color = Color::Rgb(242, 239, 232);

const fn hex_color(color: HexColor) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cards {
    header: Rect,
    ticker: Rect,
    keywords: Rect,
    cloud: Rect,
    mascot: Rect,
    velocity: Rect,
    explore: Rect,
}

impl Cards {
    fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(12),
                Constraint::Length(13),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(26), Constraint::Percentage(74)])
            .split(rows[2]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body[1]);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(78), Constraint::Percentage(22)])
            .split(right[0]);

        Self {
            header: rows[0],
            ticker: rows[1],
            keywords: body[0],
            cloud: top[0],
            // Mascot card takes the cloud card's height
            mascot: Rect {
                y: top[0].y,
                height: top[0].height,
                ..top[1]
            },
            velocity: right[1],
            explore: rows[3],
        }
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    measure: CellMeasure,
    view: Option<DashboardView>,
    chart_slot: ChartSlot,
    chart_rendered_at: f64,
    cloud: Vec<Placement>,
    cloud_canvas: Rect,
    ticker_offset: f64,
    ticker_last_tick: Option<f64>,
    ticker_mode: AnimationMode,
    pending_render: bool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            measure: CellMeasure::default(),
            view: None,
            chart_slot: ChartSlot::new(),
            chart_rendered_at: 0.0,
            cloud: Vec::new(),
            cloud_canvas: Rect::default(),
            ticker_offset: 0.0,
            ticker_last_tick: None,
            ticker_mode: AnimationMode::Running,
            pending_render: false,
        }
    }

    /// Swaps in a freshly loaded snapshot. The cloud and the chart are
    /// rendered on the next frame, once the card sizes are known.
    pub fn apply_snapshot(&mut self, snapshot: &TrendsSnapshot) {
        self.view = Some(DashboardView::build(snapshot, &self.config));
        self.ticker_offset = 0.0;
        self.pending_render = true;
    }

    pub fn toggle_ticker(&mut self) {
        self.ticker_mode = self.ticker_mode.toggled();
    }

    pub fn draw(&mut self, f: &mut Frame<'_>, now: f64) {
        let cards = Cards::new(f.area());
        draw_header(self.view.as_ref(), f, cards.header);

        self.sync(&cards, now);
        let Some(view) = &self.view else {
            return;
        };

        let wrap_width = f64::from(sequence_width(&view.ticker));
        (self.ticker_offset, self.ticker_last_tick) = advance_ticker_offset(
            self.ticker_offset,
            self.ticker_last_tick,
            now,
            self.ticker_mode,
            wrap_width,
        );

        draw_keywords(&view.keywords, f, cards.keywords);
        draw_cloud(&self.cloud, self.cloud_canvas, self.measure, f, cards.cloud);
        draw_mascot(f, cards.mascot);
        self.draw_chart(now, f, cards.velocity);
        draw_explore(&view.explore, f, cards.explore);
        draw_ticker(&view.ticker, self.ticker_offset, f, cards.ticker);
    }

    /// Lays out the cloud when the canvas changes and creates the chart after
    /// a load.
    fn sync(&mut self, cards: &Cards, now: f64) {
        let Some(view) = &self.view else {
            return;
        };

        let canvas = cards.cloud.inner(Margin::new(1, 1));
        if self.pending_render || canvas != self.cloud_canvas {
            let cloud = &self.config.cloud;
            self.cloud = self
                .measure
                .layout(canvas.width, canvas.height, cloud)
                .place(&view.cloud_words, &self.measure, &cloud.palette, &mut rand::thread_rng());
            self.cloud_canvas = canvas;
        }

        if self.pending_render {
            let velocity = &self.config.velocity;
            let options = ChartOptions {
                height: self.measure.rows(f64::from(velocity.height)),
                ..ChartOptions::from(velocity)
            };
            let width = cards.velocity.inner(Margin::new(1, 1)).width;
            self.chart_slot.render(view.velocity.clone(), options, width);
            self.chart_rendered_at = now;
            self.pending_render = false;
        }
    }

    fn draw_chart(&self, now: f64, f: &mut Frame<'_>, area: Rect) {
        let Some(chart) = self.chart_slot.current() else {
            return;
        };

        let block = Block::default()
            .title(format!(" Keyword Velocity · {} ", chart.options().label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(PINK));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let (width, height) = chart.viewport(inner.width, inner.height);
        let progress = chart.progress(now - self.chart_rendered_at);

        let bars: Vec<Bar<'_>> = chart
            .bars()
            .iter()
            .map(|bar| {
                let color = hex_color(bar.color);
                Bar::default()
                    .value(bar.scaled(progress))
                    .text_value(bar.value_label())
                    .label(TextLine::from(bar.label.clone()))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();

        f.render_widget(
            BarChart::default()
                .data(BarGroup::default().bars(&bars))
                .bar_width(bar_width(width, bars.len()))
                .bar_gap(BAR_GAP)
                .max(chart.max_magnitude()),
            Rect {
                width,
                height,
                ..inner
            },
        );
    }
}

fn draw_header(view: Option<&DashboardView>, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PINK));
    let inner = block.inner(area);
    f.render_widget(block, area);

    f.render_widget(
        Paragraph::new(TextLine::from(vec![
            Span::styled("Trendboard ", Style::default().fg(PINK).add_modifier(Modifier::BOLD)),
            Span::styled("trending keywords", Style::default().fg(Color::Gray)),
        ])),
        inner,
    );

    if let Some(label) = view.and_then(|view| view.last_updated.as_deref()) {
        f.render_widget(
            Paragraph::new(TextLine::from(vec![
                Span::styled("Last updated ", Style::default().fg(Color::DarkGray)),
                Span::styled(label.to_string(), Style::default().fg(Color::White)),
            ]))
            .alignment(Alignment::Right),
            inner,
        );
    }
}

fn draw_keywords(entries: &[KeywordEntry], f: &mut Frame<'_>, area: Rect) {
    let items: Vec<ListItem<'_>> = entries
        .iter()
        .map(|entry| {
            ListItem::new(TextLine::from(vec![
                Span::styled(format!("{:>2}. ", entry.rank), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    entry.word.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {}", entry.count), Style::default().fg(LIME)),
            ]))
        })
        .collect();

    f.render_widget(
        List::new(items).block(
            Block::default()
                .title(" Top Keywords ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

struct CloudCells<'a> {
    placements: &'a [Placement],
    measure: CellMeasure,
}

impl Widget for CloudCells<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for placement in self.placements {
            let style = Style::default().fg(placement.color.map_or(Color::White, hex_color));
            for (x, y, ch) in self.measure.cells(placement, area.width, area.height) {
                if let Some(cell) = buf.cell_mut(Position::new(area.x + x, area.y + y)) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }
    }
}

fn draw_cloud(
    placements: &[Placement],
    canvas: Rect,
    measure: CellMeasure,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = Block::default()
        .title(" Word Cloud ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(VIOLET));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if canvas == inner {
        f.render_widget(CloudCells { placements, measure }, inner);
    }
}

fn draw_mascot(f: &mut Frame<'_>, area: Rect) {
    f.render_widget(
        Paragraph::new(MASCOT)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .title(" on the lookout ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(BONE)),
            ),
        area,
    );
}

fn explore_lines(tile: &ExploreTile) -> Vec<TextLine<'static>> {
    let mut lines = vec![TextLine::from(Span::styled(
        tile.count_label(),
        Style::default().fg(Color::Gray),
    ))];
    if tile.is_empty() {
        lines.push(TextLine::from(Span::styled(
            NO_RECENT_ITEMS,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(
            tile.items
                .iter()
                .map(|item| TextLine::from(format!("• {}", item.title))),
        );
    }
    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        format!("{OPEN_SOURCE} ↗ {}", tile.fallback),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    )));
    lines
}

fn draw_explore(tiles: &[ExploreTile], f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Explore ")
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::Rgb(184, 115, 51)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Ok(count) = u32::try_from(tiles.len()) else {
        return;
    };
    if count == 0 {
        return;
    }
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(tiles.iter().map(|_| Constraint::Ratio(1, count)))
        .split(inner);

    for (tile, column) in tiles.iter().zip(columns.iter()) {
        f.render_widget(
            Paragraph::new(Text::from(explore_lines(tile))).block(
                Block::default()
                    .title(format!(" {} ", tile.label))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(BONE)),
            ),
            *column,
        );
    }
}

fn sequence_spans(items: &[TickerItem]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for item in items {
        match item {
            TickerItem::Chip { word, count } => {
                spans.push(Span::styled(
                    word.clone(),
                    Style::default().fg(PINK).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(format!(" {count}"), Style::default().fg(Color::Gray)));
            }
            TickerItem::Separator { glyph } => {
                spans.push(Span::styled(format!(" {glyph} "), Style::default().fg(Color::DarkGray)));
            }
        }
    }
    spans.push(Span::raw("   "));
    spans
}

fn sequence_width(track: &TickerTrack) -> u16 {
    if track.is_empty() {
        return 0;
    }
    u16::try_from(TextLine::from(sequence_spans(track.sequence())).width()).unwrap_or(u16::MAX)
}

fn draw_ticker(track: &TickerTrack, offset: f64, f: &mut Frame<'_>, area: Rect) {
    let mut spans = Vec::new();
    if !track.is_empty() {
        let half = track.sequence().len();
        spans.extend(sequence_spans(&track.items()[..half]));
        spans.extend(sequence_spans(&track.items()[half..]));
    }

    f.render_widget(
        Paragraph::new(TextLine::from(spans))
            .scroll((0, offset.max(0.0) as u16))
            .block(
                Block::default()
                    .title(" Trending ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(LIME)),
            ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendboard_core::snapshot::{KeywordFrequency, KeywordVelocity};
    use trendboard_core::widgets::VelocityChart;

    fn snapshot() -> TrendsSnapshot {
        TrendsSnapshot {
            keyword_frequencies: (0..12_u64)
                .map(|i| KeywordFrequency::new(format!("kw{i}"), 40 - i))
                .collect(),
            keyword_velocity: vec![
                KeywordVelocity::new("up", 5),
                KeywordVelocity::new("down", -3),
            ],
            ..TrendsSnapshot::default()
        }
    }

    fn chart_id(dashboard: &Dashboard) -> Option<u64> {
        dashboard.chart_slot.current().map(VelocityChart::id)
    }

    #[test]
    fn mascot_card_matches_cloud_height() {
        let cards = Cards::new(Rect::new(0, 0, 160, 50));

        assert_eq!(cards.mascot.y, cards.cloud.y);
        assert_eq!(cards.mascot.height, cards.cloud.height);
        assert_eq!(cards.mascot.x, cards.cloud.x + cards.cloud.width);
    }

    #[test]
    fn nothing_renders_before_a_load() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        dashboard.sync(&Cards::new(Rect::new(0, 0, 160, 50)), 0.0);

        assert!(chart_id(&dashboard).is_none());
        assert!(dashboard.cloud.is_empty());
    }

    #[test]
    fn chart_is_created_once_per_load() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        let cards = Cards::new(Rect::new(0, 0, 160, 50));

        dashboard.apply_snapshot(&snapshot());
        dashboard.sync(&cards, 1.0);
        let first = chart_id(&dashboard);
        assert!(first.is_some());
        assert!(!dashboard.cloud.is_empty());
        assert_eq!(dashboard.cloud_canvas, cards.cloud.inner(Margin::new(1, 1)));

        dashboard.sync(&cards, 2.0);
        assert_eq!(chart_id(&dashboard), first);
        assert!((dashboard.chart_rendered_at - 1.0).abs() < f64::EPSILON);

        dashboard.apply_snapshot(&snapshot());
        dashboard.sync(&cards, 3.0);
        assert_ne!(chart_id(&dashboard), first);
        assert_eq!(dashboard.chart_slot.live_instances(), 1);
    }

    #[test]
    fn resize_relays_the_cloud_and_keeps_the_chart() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        dashboard.apply_snapshot(&snapshot());
        dashboard.sync(&Cards::new(Rect::new(0, 0, 160, 50)), 0.0);
        let chart = chart_id(&dashboard);

        let smaller = Cards::new(Rect::new(0, 0, 120, 40));
        dashboard.sync(&smaller, 1.0);

        assert_eq!(dashboard.cloud_canvas, smaller.cloud.inner(Margin::new(1, 1)));
        assert_eq!(chart_id(&dashboard), chart);
        assert!(dashboard
            .chart_slot
            .current()
            .is_some_and(|chart| chart.options().height == 14));
    }
}
