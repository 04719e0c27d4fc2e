use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::Frame;
use trendboard_core::widgets::velocity::{bar_width, BAR_GAP};
use trendboard_core::widgets::VelocityChart;

use super::hex_color;

pub fn render_velocity_chart(
    chart: Option<&VelocityChart>,
    elapsed: f64,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let Some(chart) = chart else {
        return;
    };

    let block = Block::default()
        .title(format!(" Keyword Velocity · {} ", chart.options().label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(255, 0, 168)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (width, height) = chart.viewport(inner.width, inner.height);
    let canvas = Rect {
        width,
        height,
        ..inner
    };

    let progress = chart.progress(elapsed);
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
                .value_style(Style::default().fg(Color::Black).bg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    let bar_chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(width, bars.len()))
        .bar_gap(BAR_GAP)
        .max(chart.max_magnitude());
    f.render_widget(bar_chart, canvas);
}
