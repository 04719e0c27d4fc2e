use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use trendboard_core::widgets::MASCOT;

use crate::ui::layout::mascot_art_area;

pub fn render_mascot(f: &mut Frame<'_>, area: Rect) {
    let border = Style::default().fg(Color::Rgb(242, 239, 232));
    f.render_widget(Block::default().borders(Borders::ALL).border_style(border), area);

    let caption = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: u16::from(area.height > 2),
    };
    f.render_widget(
        Paragraph::new("on the lookout")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        caption,
    );

    let art = mascot_art_area(area);
    let art_rows = u16::try_from(MASCOT.lines().count()).unwrap_or(u16::MAX);
    // Bottom-align the art like an image filling its card
    let top_pad = art.height.saturating_sub(art_rows);
    let art = Rect {
        y: art.y + top_pad,
        height: art.height - top_pad,
        ..art
    };
    f.render_widget(
        Paragraph::new(MASCOT)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center),
        art,
    );
}
