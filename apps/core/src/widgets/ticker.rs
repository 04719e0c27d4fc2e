use serde::Serialize;

use crate::config::TickerConfig;
use crate::snapshot::KeywordFrequency;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickerItem {
    Chip { word: String, count: u64 },
    Separator { glyph: String },
}

impl TickerItem {
    pub const fn is_chip(&self) -> bool {
        matches!(self, Self::Chip { .. })
    }

    /// Plain text of the item as it scrolls past.
    pub fn text(&self) -> String {
        match self {
            Self::Chip { word, count } => format!("{word} {count}"),
            Self::Separator { glyph } => glyph.clone(),
        }
    }
}

/// Two identical chip sequences laid back to back.
///
/// Scrolling by exactly one sequence brings the second copy to where the
/// first started, so the loop wraps without a visible jump. Where that wrap
/// happens is up to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickerTrack {
    items: Vec<TickerItem>,
}

impl TickerTrack {
    pub fn build(keywords: &[KeywordFrequency], config: &TickerConfig) -> Self {
        let shown = &keywords[..keywords.len().min(config.limit)];

        let mut sequence = Vec::with_capacity(shown.len() * 2);
        for (index, keyword) in shown.iter().enumerate() {
            if index > 0 {
                sequence.push(TickerItem::Separator {
                    glyph: config.separator.clone(),
                });
            }
            sequence.push(TickerItem::Chip {
                word: keyword.word.clone(),
                count: keyword.count,
            });
        }

        let mut items = sequence.clone();
        items.extend(sequence);
        Self { items }
    }

    pub fn items(&self) -> &[TickerItem] {
        &self.items
    }

    /// One copy of the sequence.
    pub fn sequence(&self) -> &[TickerItem] {
        &self.items[..self.items.len() / 2]
    }

    pub fn chip_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_chip()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(n: u64) -> Vec<KeywordFrequency> {
        (0..n)
            .map(|i| KeywordFrequency::new(format!("kw{i}"), 100 - i))
            .collect()
    }

    #[test]
    fn doubles_the_truncated_sequence() {
        let track = TickerTrack::build(&keywords(30), &TickerConfig::default());

        assert_eq!(track.chip_count(), 48);
        let half = track.items().len() / 2;
        assert_eq!(track.items()[..half], track.items()[half..]);
        assert_eq!(track.sequence(), &track.items()[half..]);
    }

    #[test]
    fn halves_render_to_identical_text() {
        let track = TickerTrack::build(&keywords(5), &TickerConfig::default());
        let texts: Vec<String> = track.items().iter().map(TickerItem::text).collect();
        let half = texts.len() / 2;

        assert_eq!(texts[..half].concat(), texts[half..].concat());
        assert_eq!(texts[..half].concat(), "kw0 100•kw1 99•kw2 98•kw3 97•kw4 96");
    }

    #[test]
    fn separators_sit_between_chips_only() {
        let track = TickerTrack::build(&keywords(3), &TickerConfig::default());
        let sequence = track.sequence();

        assert!(sequence.first().is_some_and(TickerItem::is_chip));
        assert!(sequence.last().is_some_and(TickerItem::is_chip));
        assert_eq!(sequence.len(), 5);
    }

    #[test]
    fn short_input_is_not_padded() {
        let config = TickerConfig {
            limit: 20,
            ..TickerConfig::default()
        };
        let track = TickerTrack::build(&keywords(2), &config);
        assert_eq!(track.chip_count(), 4);

        let empty = TickerTrack::build(&[], &config);
        assert!(empty.is_empty());
        assert_eq!(empty.chip_count(), 0);
    }
}
