//! Dashboard configuration.
//!
//! Category sets, palettes, limits, and chart behavior all differ between
//! deployments, so none of them are hard-coded in the renderers. The config is
//! read from TOML; every table and field is optional.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendsError};

/// A `#rrggbb` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = TrendsError;

    fn from_str(value: &str) -> Result<Self> {
        let invalid = || TrendsError::InvalidColor(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for HexColor {
    type Error = TrendsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub keywords: KeywordListConfig,
    pub cloud: CloudConfig,
    pub velocity: VelocityConfig,
    pub ticker: TickerConfig,
    pub explore: ExploreConfig,
}

impl DashboardConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordListConfig {
    pub limit: usize,
}

impl Default for KeywordListConfig {
    fn default() -> Self {
        Self { limit: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub limit: usize,
    /// Font size for a count of zero.
    pub base_size: f64,
    /// Growth factor applied to the square root of the count.
    pub scale: f64,
    pub padding: f64,
    pub rotate_probability: f64,
    /// Height used when the container reports none.
    pub fallback_height: f64,
    pub palette: Vec<HexColor>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            base_size: 10.0,
            scale: 12.0,
            padding: 5.0,
            rotate_probability: 0.15,
            fallback_height: 480.0,
            palette: vec![
                HexColor::new(0xff, 0x00, 0xa8),
                HexColor::new(0xa4, 0xff, 0x4f),
                HexColor::new(0x7f, 0x00, 0xff),
                HexColor::new(0xff, 0x00, 0x50),
                HexColor::new(0xff, 0x6b, 0x00),
                HexColor::new(0xb8, 0x73, 0x33),
                HexColor::new(0xf2, 0xef, 0xe8),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VelocityConfig {
    pub limit: usize,
    pub positive_color: HexColor,
    pub negative_color: HexColor,
    /// Grow bars from zero after each render.
    pub animation: bool,
    /// Follow the container size after creation. Off by default: a chart
    /// that resizes inside a layout sized by the chart never settles.
    pub responsive: bool,
    /// Fixed chart height in pixels.
    pub height: u16,
    pub label: String,
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self {
            limit: 16,
            positive_color: HexColor::new(0xff, 0x00, 0xa8),
            negative_color: HexColor::new(0xff, 0x00, 0x50),
            animation: false,
            responsive: false,
            height: 220,
            label: "Δ since last run".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerConfig {
    pub limit: usize,
    pub separator: String,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            limit: 24,
            separator: "•".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    pub categories: Vec<CategoryConfig>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                CategoryConfig::new(
                    "major_outlets",
                    "Major Outlets",
                    "https://news.google.com/topstories?hl=en-US&gl=US&ceid=US:en",
                ),
                CategoryConfig::new(
                    "reddit",
                    "Reddit (r/news · worldnews · politics)",
                    "https://www.reddit.com/r/news/",
                ),
                CategoryConfig::new(
                    "tech",
                    "Tech (HN · Techmeme)",
                    "https://news.ycombinator.com/",
                ),
                CategoryConfig::new(
                    "wikipedia",
                    "Wikipedia Top Reads",
                    "https://en.wikipedia.org/wiki/Wikipedia:Top_25_Report",
                ),
            ],
        }
    }
}

/// One tile of the explore grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Key into `sources` and `source_counts`.
    pub key: String,
    pub label: String,
    #[serde(default = "default_category_max")]
    pub max: usize,
    /// Home page linked from the tile regardless of item count.
    pub fallback: String,
}

impl CategoryConfig {
    pub fn new(key: &str, label: &str, fallback: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            max: default_category_max(),
            fallback: fallback.to_string(),
        }
    }
}

const fn default_category_max() -> usize {
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() -> Result<()> {
        let config = DashboardConfig::from_toml_str("")?;

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.keywords.limit, 20);
        assert_eq!(config.cloud.palette.len(), 7);
        assert_eq!(config.velocity.limit, 16);
        assert!(!config.velocity.animation);
        assert!(!config.velocity.responsive);
        assert_eq!(config.explore.categories.len(), 4);
        Ok(())
    }

    #[test]
    fn partial_tables_keep_other_defaults() -> Result<()> {
        let config = DashboardConfig::from_toml_str(
            r##"
            [velocity]
            animation = true
            positive_color = "#00FF00"

            [[explore.categories]]
            key = "youtube"
            label = "YouTube"
            fallback = "https://www.youtube.com/feed/trending"
            "##,
        )?;

        assert!(config.velocity.animation);
        assert_eq!(config.velocity.positive_color, HexColor::new(0, 255, 0));
        assert_eq!(config.velocity.negative_color, HexColor::new(0xff, 0x00, 0x50));
        assert_eq!(config.explore.categories.len(), 1);
        assert_eq!(config.explore.categories[0].max, 6);
        assert_eq!(config.ticker.separator, "•");
        Ok(())
    }

    #[test]
    fn invalid_palette_color_is_rejected() {
        let result = DashboardConfig::from_toml_str(
            r##"
            [cloud]
            palette = ["#ff00a8", "magenta"]
            "##,
        );
        assert!(result.is_err());
    }

    #[test]
    fn hex_color_round_trips_through_display() -> Result<()> {
        let color: HexColor = "#B87333".parse()?;
        assert_eq!(color.rgb(), (0xb8, 0x73, 0x33));
        assert_eq!(color.to_string(), "#b87333");
        assert!("#b8733".parse::<HexColor>().is_err());
        assert!("b87333".parse::<HexColor>().is_err());
        Ok(())
    }
}
