//! The five dashboard widgets as pure functions from snapshot data to views.

pub mod cloud;
pub mod explore;
pub mod keywords;
pub mod ticker;
pub mod velocity;

use serde::Serialize;

use crate::config::DashboardConfig;
use crate::snapshot::TrendsSnapshot;

pub use cloud::{
    CellMeasure, CloudLayout, CloudWord, GlyphMeasure, Placement, Rotation, TextMeasure,
};
pub use explore::{ExploreTile, NO_RECENT_ITEMS, OPEN_SOURCE};
pub use keywords::KeywordEntry;
pub use ticker::{TickerItem, TickerTrack};
pub use velocity::{ChartOptions, ChartSlot, VelocityBar, VelocityChart};

/// Art for the mascot card that sits beside the word cloud.
pub const MASCOT: &str = r"  .--.
 |o_o |
 |:_/ |
//   \ \
(|     | )
/'\_   _/`\
\___)=(___/";

/// Everything a frontend needs to draw one snapshot.
///
/// Built in the fixed render order: keyword list, word cloud, velocity chart,
/// explore grid, ticker. Word placement and the chart instance depend on the
/// container, so the frontends finish those two from `cloud_words` and
/// `velocity` when they know their size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub last_updated: Option<String>,
    pub keywords: Vec<KeywordEntry>,
    pub cloud_words: Vec<CloudWord>,
    pub velocity: Vec<VelocityBar>,
    pub explore: Vec<ExploreTile>,
    pub ticker: TickerTrack,
}

impl DashboardView {
    pub fn build(snapshot: &TrendsSnapshot, config: &DashboardConfig) -> Self {
        let last_updated = snapshot.last_updated_label();
        let keywords = keywords::top_keywords(&snapshot.keyword_frequencies, config.keywords.limit);
        let cloud_words = cloud::cloud_words(&snapshot.keyword_frequencies, &config.cloud);
        let velocity = velocity::velocity_bars(&snapshot.keyword_velocity, &config.velocity);
        let explore = explore::explore_tiles(
            &snapshot.sources,
            &snapshot.source_counts,
            &config.explore,
        );
        let ticker = TickerTrack::build(&snapshot.keyword_frequencies, &config.ticker);

        Self {
            last_updated,
            keywords,
            cloud_words,
            velocity,
            explore,
            ticker,
        }
    }
}
