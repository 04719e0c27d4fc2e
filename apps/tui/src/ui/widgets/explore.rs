use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use trendboard_core::widgets::{ExploreTile, NO_RECENT_ITEMS, OPEN_SOURCE};

pub fn tile_lines(tile: &ExploreTile) -> Vec<TextLine<'static>> {
    let mut lines = vec![TextLine::from(Span::styled(
        tile.count_label(),
        Style::default().fg(Color::Gray),
    ))];

    if tile.is_empty() {
        lines.push(TextLine::from(Span::styled(
            NO_RECENT_ITEMS,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        lines.extend(tile.items.iter().map(|item| {
            TextLine::from(vec![
                Span::styled("• ", Style::default().fg(Color::Rgb(255, 107, 0))),
                Span::styled(item.title.clone(), Style::default().fg(Color::White)),
            ])
        }));
    }

    lines.push(TextLine::from(""));
    lines.push(TextLine::from(Span::styled(
        format!("{OPEN_SOURCE} ↗"),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines.push(TextLine::from(Span::styled(
        tile.fallback.clone(),
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

pub fn render_explore_grid(tiles: &[ExploreTile], f: &mut Frame<'_>, area: Rect) {
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
        let paragraph = Paragraph::new(Text::from(tile_lines(tile))).block(
            Block::default()
                .title(format!(" {} ", tile.label))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(242, 239, 232))),
        );
        f.render_widget(paragraph, *column);
    }
}
