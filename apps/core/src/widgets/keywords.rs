use serde::Serialize;

use crate::snapshot::KeywordFrequency;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    /// 1-based position in the snapshot order.
    pub rank: usize,
    pub word: String,
    pub count: u64,
}

/// The first `limit` keywords, in the order the snapshot supplies them.
pub fn top_keywords(frequencies: &[KeywordFrequency], limit: usize) -> Vec<KeywordEntry> {
    frequencies
        .iter()
        .take(limit)
        .enumerate()
        .map(|(index, frequency)| KeywordEntry {
            rank: index + 1,
            word: frequency.word.clone(),
            count: frequency.count,
        })
        .collect()
}
