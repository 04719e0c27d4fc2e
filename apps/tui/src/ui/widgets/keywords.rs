use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;
use trendboard_core::widgets::KeywordEntry;

pub fn keyword_line(entry: &KeywordEntry) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{:>2}. ", entry.rank), Style::default().fg(Color::DarkGray)),
        Span::styled(
            entry.word.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", entry.count),
            Style::default().fg(Color::Rgb(164, 255, 79)),
        ),
    ])
}

pub fn render_keyword_list(entries: &[KeywordEntry], f: &mut Frame<'_>, area: Rect) {
    let items: Vec<ListItem<'_>> = entries
        .iter()
        .map(|entry| ListItem::new(keyword_line(entry)))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Top Keywords ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_keeps_markup_as_text() {
        let entry = KeywordEntry {
            rank: 3,
            word: "<b>bold</b>".to_string(),
            count: 12,
        };

        assert_eq!(keyword_line(&entry).to_string(), " 3. <b>bold</b> 12");
    }
}
