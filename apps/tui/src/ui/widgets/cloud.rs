//! Draws word cloud placements onto terminal cells.
//!
//! Placement runs in pixel units so the layout behaves the same as on the
//! web; [`CellMeasure`] maps pixels to cells.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Widget};
use ratatui::Frame;
use trendboard_core::widgets::{CellMeasure, Placement};

use super::hex_color;

/// Words at or above this font size are drawn bold.
const BOLD_SIZE: f64 = 40.0;

pub struct CloudWidget<'a> {
    pub placements: &'a [Placement],
    pub measure: CellMeasure,
}

impl Widget for CloudWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for placement in self.placements {
            let style = placement_style(placement);
            for (x, y, ch) in self.measure.cells(placement, area.width, area.height) {
                if let Some(cell) = buf.cell_mut(Position::new(area.x + x, area.y + y)) {
                    cell.set_char(ch).set_style(style);
                }
            }
        }
    }
}

fn placement_style(placement: &Placement) -> Style {
    let style = Style::default().fg(placement.color.map_or(Color::White, hex_color));
    if placement.size >= BOLD_SIZE {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Draws the card and the placements laid out for `canvas`.
pub fn render_word_cloud(placements: &[Placement], canvas: Rect, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Word Cloud ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(127, 0, 255)));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // A canvas from a different frame size waits for the next layout pass
    if canvas == inner {
        f.render_widget(
            CloudWidget {
                placements,
                measure: CellMeasure::default(),
            },
            inner,
        );
    }
}
