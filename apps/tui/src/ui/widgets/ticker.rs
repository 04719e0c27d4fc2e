use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use trendboard_core::widgets::{TickerItem, TickerTrack};

/// Blank cells after each copy of the sequence.
const SEQUENCE_GAP: &str = "   ";

fn item_spans(item: &TickerItem) -> Vec<Span<'static>> {
    match item {
        TickerItem::Chip { word, count } => vec![
            Span::styled(
                word.clone(),
                Style::default()
                    .fg(Color::Rgb(255, 0, 168))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {count}"), Style::default().fg(Color::Gray)),
        ],
        TickerItem::Separator { glyph } => vec![Span::styled(
            format!(" {glyph} "),
            Style::default().fg(Color::DarkGray),
        )],
    }
}

fn sequence_spans(items: &[TickerItem]) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = items.iter().flat_map(item_spans).collect();
    spans.push(Span::raw(SEQUENCE_GAP));
    spans
}

/// The whole track on one line, each copy of the sequence followed by a gap.
pub fn ticker_line(track: &TickerTrack) -> TextLine<'static> {
    if track.is_empty() {
        return TextLine::default();
    }
    let mut spans = sequence_spans(track.sequence());
    spans.extend(sequence_spans(&track.items()[track.sequence().len()..]));
    TextLine::from(spans)
}

/// Cells in one copy of the sequence and its gap; the scroll offset wraps here.
pub fn sequence_width(track: &TickerTrack) -> u16 {
    if track.is_empty() {
        return 0;
    }
    let width = TextLine::from(sequence_spans(track.sequence())).width();
    u16::try_from(width).unwrap_or(u16::MAX)
}

pub fn render_ticker(track: &TickerTrack, offset: f64, f: &mut Frame<'_>, area: Rect) {
    let ticker = Paragraph::new(ticker_line(track))
        .scroll((0, offset.max(0.0) as u16))
        .block(
            Block::default()
                .title(" Trending ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(164, 255, 79))),
        );
    f.render_widget(ticker, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendboard_core::config::TickerConfig;
    use trendboard_core::snapshot::KeywordFrequency;

    fn track() -> TickerTrack {
        let keywords = vec![KeywordFrequency::new("rust", 12), KeywordFrequency::new("wasm", 3)];
        TickerTrack::build(&keywords, &TickerConfig::default())
    }

    #[test]
    fn line_repeats_the_sequence() {
        let line = ticker_line(&track()).to_string();
        assert_eq!(line, "rust 12 • wasm 3   rust 12 • wasm 3   ");
    }

    #[test]
    fn wrap_width_is_exactly_half_the_line() {
        let track = track();
        let line_width = ticker_line(&track).width();

        assert_eq!(usize::from(sequence_width(&track)) * 2, line_width);
        assert_eq!(sequence_width(&track), 19);
    }

    #[test]
    fn empty_track_has_nothing_to_scroll() {
        let empty = TickerTrack::build(&[], &TickerConfig::default());
        assert_eq!(sequence_width(&empty), 0);
        assert_eq!(ticker_line(&empty).width(), 0);
    }
}
