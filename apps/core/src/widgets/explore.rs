use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::ExploreConfig;
use crate::snapshot::SourceItem;

pub const NO_RECENT_ITEMS: &str = "No recent items";
pub const OPEN_SOURCE: &str = "Open source";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExploreTile {
    pub key: String,
    pub label: String,
    /// Reported item count for the category. Not tied to `items.len()`.
    pub count: u64,
    pub items: Vec<SourceItem>,
    /// Category home page, always linked.
    pub fallback: String,
}

impl ExploreTile {
    /// An empty tile shows the [`NO_RECENT_ITEMS`] placeholder row.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn count_label(&self) -> String {
        format!("{} items", self.count)
    }
}

/// One tile per configured category, each with up to `max` items from
/// `sources`. The count comes from `counts` when the category has one,
/// otherwise from the items shown.
pub fn explore_tiles(
    sources: &BTreeMap<String, Vec<SourceItem>>,
    counts: &BTreeMap<String, u64>,
    config: &ExploreConfig,
) -> Vec<ExploreTile> {
    config
        .categories
        .iter()
        .map(|category| {
            let items: Vec<SourceItem> = sources
                .get(&category.key)
                .map(|list| list.iter().take(category.max).cloned().collect())
                .unwrap_or_default();
            let count = counts
                .get(&category.key)
                .copied()
                .unwrap_or(items.len() as u64);

            ExploreTile {
                key: category.key.clone(),
                label: category.label.clone(),
                count,
                items,
                fallback: category.fallback.clone(),
            }
        })
        .collect()
}
