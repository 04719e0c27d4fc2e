//! Static dashboard page.
//!
//! Writes the same mount points the browser dashboard uses, with every
//! keyword, title, and label escaped. The cloud and chart are inline SVG; the
//! ticker scrolls with CSS alone and wraps at -50%, the width of one of its
//! two identical sequences.

use std::borrow::Cow;
use std::fmt::{self, Write};

use url::Url;

use crate::error::Result;
use crate::widgets::{
    DashboardView, ExploreTile, KeywordEntry, Placement, TickerItem, TickerTrack, VelocityChart,
    MASCOT, NO_RECENT_ITEMS, OPEN_SOURCE,
};

pub const LAST_UPDATED_ID: &str = "lastUpdated";
pub const KEYWORD_LIST_ID: &str = "topKeywords";
pub const WORD_CLOUD_ID: &str = "wordCloud";
pub const VELOCITY_CHART_ID: &str = "velocityChart";
pub const TICKER_TRACK_ID: &str = "tickerTrack";
pub const EXPLORE_GRID_ID: &str = "exploreGrid";
pub const CLOUD_CARD_ID: &str = "cloudCard";
pub const MASCOT_CARD_ID: &str = "mascotCard";

const CHART_MARGIN_TOP: f64 = 10.0;
const CHART_MARGIN_BOTTOM: f64 = 48.0;

const STYLE: &str = r"
body { background: #0d0f16; color: #f2efe8; font-family: Inter, system-ui, sans-serif; margin: 0; }
header { display: flex; justify-content: space-between; padding: 16px 24px; }
.card { background: #151924; border: 1px solid #202433; border-radius: 8px; padding: 16px; }
.grid { display: grid; grid-template-columns: 1fr 2fr 1fr; gap: 16px; padding: 0 24px; align-items: stretch; }
.mascot-img { height: calc(100% - 48px); object-fit: contain; }
.ticker { overflow: hidden; white-space: nowrap; border-block: 1px solid #202433; }
.ticker-track { display: inline-flex; animation: ticker 120s linear infinite; }
.ticker:hover .ticker-track { animation-play-state: paused; }
.ticker-seq { display: inline-flex; padding-right: 48px; }
.ticker-word { color: #ff00a8; }
.ticker-sep { padding: 0 12px; opacity: 0.6; }
.badge { margin-left: 6px; opacity: 0.8; }
@keyframes ticker { from { transform: translateX(0); } to { transform: translateX(-50%); } }
.explore { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px; padding: 24px; }
.muted { opacity: 0.6; }
a { color: #a4ff4f; }
";

/// Escape untrusted text for element content and attribute values.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    html_escape::encode_safe(text)
}

/// Feed-supplied URLs become links only when they are http(s).
fn safe_href(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .map(String::from)
}

pub fn write_keyword_list(out: &mut String, entries: &[KeywordEntry]) -> fmt::Result {
    writeln!(out, r#"<ol id="{KEYWORD_LIST_ID}">"#)?;
    for entry in entries {
        writeln!(
            out,
            r#"<li><span class="kw">{}</span> — <span class="count">{}</span></li>"#,
            escape_text(&entry.word),
            entry.count
        )?;
    }
    writeln!(out, "</ol>")
}

pub fn write_word_cloud(
    out: &mut String,
    placements: &[Placement],
    width: f64,
    height: f64,
) -> fmt::Result {
    writeln!(
        out,
        r#"<svg id="{WORD_CLOUD_ID}" width="{width:.0}" height="{height:.0}" viewBox="0 0 {width:.0} {height:.0}">"#
    )?;
    writeln!(
        out,
        r#"<g transform="translate({:.1},{:.1})">"#,
        width / 2.0,
        height / 2.0
    )?;
    for placement in placements {
        let fill = placement
            .color
            .map_or_else(|| "currentColor".to_string(), |color| color.to_string());
        writeln!(
            out,
            r#"<text text-anchor="middle" dominant-baseline="central" opacity="0.95" fill="{fill}" font-size="{:.1}px" transform="translate({:.1},{:.1})rotate({})">{}</text>"#,
            placement.size,
            placement.x,
            placement.y,
            placement.rotation.degrees(),
            escape_text(&placement.text)
        )?;
    }
    writeln!(out, "</g>\n</svg>")
}

pub fn write_velocity_chart(out: &mut String, chart: &VelocityChart, width: u16) -> fmt::Result {
    let options = chart.options();
    let (width, height) = chart.viewport(width, options.height);
    let (width, height) = (f64::from(width), f64::from(height));
    let bars = chart.bars();

    writeln!(
        out,
        r#"<svg id="{VELOCITY_CHART_ID}" width="{width:.0}" height="{height:.0}" role="img" aria-label="{}">"#,
        escape_text(&options.label)
    )?;

    if !bars.is_empty() {
        let highest = bars.iter().map(|bar| bar.delta.max(0)).max().unwrap_or(0);
        let lowest = bars.iter().map(|bar| bar.delta.min(0)).min().unwrap_or(0);
        let range = highest
            .unsigned_abs()
            .saturating_add(lowest.unsigned_abs())
            .max(1) as f64;
        let plot_height = (height - CHART_MARGIN_TOP - CHART_MARGIN_BOTTOM).max(1.0);
        let zero_y = CHART_MARGIN_TOP + plot_height * (highest as f64 / range);
        let slot = width / bars.len() as f64;
        let progress = chart.progress(f64::INFINITY);

        writeln!(
            out,
            "<line x1=\"0\" x2=\"{width:.0}\" y1=\"{zero_y:.1}\" y2=\"{zero_y:.1}\" stroke=\"#202433\"/>"
        )?;
        for (index, bar) in bars.iter().enumerate() {
            let bar_height = bar.delta.unsigned_abs() as f64 / range * plot_height * progress;
            let y = if bar.is_rising() {
                zero_y - bar_height
            } else {
                zero_y
            };
            let x = slot.mul_add(index as f64, slot * 0.15);
            let label = escape_text(&bar.label);
            writeln!(
                out,
                "<rect x=\"{x:.1}\" y=\"{y:.1}\" width=\"{:.1}\" height=\"{bar_height:.1}\" fill=\"{}\" stroke=\"#1b1f2b\"><title>{label}: Δ {}</title></rect>",
                slot * 0.7,
                bar.color,
                bar.value_label()
            )?;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" font-size="10" fill="currentColor" text-anchor="end" transform="rotate(-45 {:.1} {:.1})">{label}</text>"#,
                slot.mul_add(index as f64, slot / 2.0),
                height - CHART_MARGIN_BOTTOM + 12.0,
                slot.mul_add(index as f64, slot / 2.0),
                height - CHART_MARGIN_BOTTOM + 12.0,
            )?;
        }
    }

    writeln!(out, "</svg>")
}

fn write_ticker_item(out: &mut String, item: &TickerItem) -> fmt::Result {
    match item {
        TickerItem::Chip { word, count } => write!(
            out,
            r#"<span class="ticker-item"><span class="ticker-word">{}</span><span class="badge">{count}</span></span>"#,
            escape_text(word)
        ),
        TickerItem::Separator { glyph } => write!(
            out,
            r#"<span class="ticker-sep">{}</span>"#,
            escape_text(glyph)
        ),
    }
}

pub fn write_ticker(out: &mut String, track: &TickerTrack) -> fmt::Result {
    let items = track.items();
    let (first, second) = items.split_at(items.len() / 2);

    write!(out, r#"<div class="ticker"><div class="ticker-track" id="{TICKER_TRACK_ID}">"#)?;
    for sequence in [first, second] {
        write!(out, r#"<span class="ticker-seq">"#)?;
        for item in sequence {
            write_ticker_item(out, item)?;
        }
        write!(out, "</span>")?;
    }
    writeln!(out, "</div></div>")
}

fn write_link(out: &mut String, class: &str, href: &str, text: &str) -> fmt::Result {
    match safe_href(href) {
        Some(href) => write!(
            out,
            r#"<a class="{class}" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape_text(&href),
            escape_text(text)
        ),
        None => write!(out, r#"<span class="{class}">{}</span>"#, escape_text(text)),
    }
}

pub fn write_explore_grid(out: &mut String, tiles: &[ExploreTile]) -> fmt::Result {
    writeln!(out, r#"<section class="explore" id="{EXPLORE_GRID_ID}">"#)?;
    for tile in tiles {
        writeln!(out, r#"<div class="explore-tile card">"#)?;
        writeln!(
            out,
            r#"<div class="explore-title">{}</div>"#,
            escape_text(&tile.label)
        )?;
        writeln!(
            out,
            r#"<div class="explore-count">{}</div>"#,
            tile.count_label()
        )?;
        writeln!(out, r#"<ul class="explore-list">"#)?;
        if tile.is_empty() {
            writeln!(out, r#"<li><span class="muted">{NO_RECENT_ITEMS}</span></li>"#)?;
        }
        for item in &tile.items {
            write!(out, "<li>")?;
            write_link(out, "explore-item", &item.url, &item.title)?;
            writeln!(out, "</li>")?;
        }
        writeln!(out, "</ul>")?;
        write_link(out, "explore-more", &tile.fallback, OPEN_SOURCE)?;
        writeln!(out, "\n</div>")?;
    }
    writeln!(out, "</section>")
}

/// Container sizes the page is rendered for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub cloud_width: f64,
    pub cloud_height: f64,
    pub chart_width: u16,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            cloud_width: 720.0,
            cloud_height: 480.0,
            chart_width: 640,
        }
    }
}

/// The whole dashboard page. Widgets are written in render order: keyword
/// list, word cloud, velocity chart, explore grid, ticker.
pub fn render_page(
    view: &DashboardView,
    placements: &[Placement],
    chart: Option<&VelocityChart>,
    layout: PageLayout,
) -> Result<String> {
    let mut keywords = String::new();
    write_keyword_list(&mut keywords, &view.keywords)?;

    let mut cloud = String::new();
    write_word_cloud(&mut cloud, placements, layout.cloud_width, layout.cloud_height)?;

    let mut velocity = String::new();
    if let Some(chart) = chart {
        write_velocity_chart(&mut velocity, chart, layout.chart_width)?;
    }

    let mut explore = String::new();
    write_explore_grid(&mut explore, &view.explore)?;

    let mut ticker = String::new();
    write_ticker(&mut ticker, &view.ticker)?;

    let last_updated = view.last_updated.as_deref().unwrap_or("");

    let mut page = String::new();
    writeln!(page, "<!doctype html>")?;
    writeln!(page, r#"<html lang="en"><head><meta charset="utf-8">"#)?;
    writeln!(page, "<title>Trendboard</title><style>{STYLE}</style></head><body>")?;
    writeln!(
        page,
        r#"<header><h1>Trendboard</h1><span>Last updated <time id="{LAST_UPDATED_ID}">{}</time></span></header>"#,
        escape_text(last_updated)
    )?;
    page.push_str(&ticker);
    writeln!(page, r#"<main class="grid">"#)?;
    writeln!(page, r#"<div class="card">"#)?;
    page.push_str(&keywords);
    writeln!(page, "</div>")?;
    writeln!(page, r#"<div class="card" id="{CLOUD_CARD_ID}">"#)?;
    page.push_str(&cloud);
    writeln!(page, "</div>")?;
    writeln!(
        page,
        r#"<div class="card" id="{MASCOT_CARD_ID}"><pre class="mascot-img">{}</pre></div>"#,
        escape_text(MASCOT)
    )?;
    writeln!(page, "</main>")?;
    writeln!(page, r#"<section class="card">"#)?;
    page.push_str(&velocity);
    writeln!(page, "</section>")?;
    page.push_str(&explore);
    writeln!(page, "</body></html>")?;

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::snapshot::{KeywordFrequency, KeywordVelocity, SourceItem, TrendsSnapshot};
    use crate::widgets::{ChartSlot, CloudLayout, GlyphMeasure};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn hostile_snapshot() -> TrendsSnapshot {
        TrendsSnapshot {
            generated_at: Some("<b>now</b>".to_string()),
            keyword_frequencies: vec![
                KeywordFrequency::new("<script>alert(1)</script>", 9),
                KeywordFrequency::new("tom & jerry", 4),
            ],
            keyword_velocity: vec![KeywordVelocity::new("<script>", -2)],
            sources: BTreeMap::from([(
                "reddit".to_string(),
                vec![
                    SourceItem::new("<img src=x onerror=alert(1)>", "https://reddit.com/r/news/1"),
                    SourceItem::new("sneaky", "javascript:alert(1)"),
                ],
            )]),
            source_counts: BTreeMap::new(),
        }
    }

    fn render(snapshot: &TrendsSnapshot) -> Result<String> {
        let config = DashboardConfig::default();
        let view = DashboardView::build(snapshot, &config);
        let layout = PageLayout::default();
        let placements = CloudLayout::new(layout.cloud_width, layout.cloud_height, &config.cloud)
            .place(
                &view.cloud_words,
                &GlyphMeasure::default(),
                &config.cloud.palette,
                &mut StdRng::seed_from_u64(1),
            );
        let mut slot = ChartSlot::new();
        let chart = slot.render(view.velocity.clone(), (&config.velocity).into(), layout.chart_width);
        render_page(&view, &placements, Some(chart), layout)
    }

    #[test]
    fn keywords_never_reach_the_page_as_markup() -> Result<()> {
        let page = render(&hostile_snapshot())?;

        assert!(!page.contains("<script"));
        assert!(!page.contains("<img"));
        assert!(!page.contains("<b>now"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
        assert!(page.contains("tom &amp; jerry"));
        Ok(())
    }

    #[test]
    fn only_http_links_become_anchors() -> Result<()> {
        let page = render(&hostile_snapshot())?;

        assert!(!page.contains("javascript:"));
        assert!(page.contains(r#"<span class="explore-item">sneaky</span>"#));
        assert!(page.contains("href=\"https:&#x2F;&#x2F;reddit.com&#x2F;r&#x2F;news&#x2F;1\""));
        Ok(())
    }

    #[test]
    fn page_carries_every_mount_point() -> Result<()> {
        let page = render(&TrendsSnapshot::default())?;

        for id in [
            LAST_UPDATED_ID,
            KEYWORD_LIST_ID,
            WORD_CLOUD_ID,
            VELOCITY_CHART_ID,
            TICKER_TRACK_ID,
            EXPLORE_GRID_ID,
            CLOUD_CARD_ID,
            MASCOT_CARD_ID,
        ] {
            assert!(page.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
        Ok(())
    }

    #[test]
    fn explore_tile_shows_placeholder_count_and_fallback() -> fmt::Result {
        let tiles = vec![ExploreTile {
            key: "reddit".to_string(),
            label: "Reddit".to_string(),
            count: 3,
            items: Vec::new(),
            fallback: "https://www.reddit.com/r/news/".to_string(),
        }];
        let mut out = String::new();
        write_explore_grid(&mut out, &tiles)?;

        assert!(out.contains(NO_RECENT_ITEMS));
        assert!(out.contains("3 items"));
        assert!(out.contains(r#"class="explore-more""#));
        Ok(())
    }

    #[test]
    fn ticker_sequences_are_identical() -> fmt::Result {
        let snapshot = TrendsSnapshot {
            keyword_frequencies: vec![
                KeywordFrequency::new("alpha", 3),
                KeywordFrequency::new("beta", 2),
            ],
            ..TrendsSnapshot::default()
        };
        let view = DashboardView::build(&snapshot, &DashboardConfig::default());
        let mut out = String::new();
        write_ticker(&mut out, &view.ticker)?;

        let sequences: Vec<&str> = out.split(r#"<span class="ticker-seq">"#).skip(1).collect();
        assert_eq!(sequences.len(), 2);
        assert_eq!(
            sequences[0],
            sequences[1].trim_end_matches("</div></div>\n")
        );
        Ok(())
    }

    #[test]
    fn chart_bars_use_sign_colors() -> fmt::Result {
        let config = DashboardConfig::default();
        let snapshot = TrendsSnapshot {
            keyword_velocity: vec![KeywordVelocity::new("up", 0), KeywordVelocity::new("down", -5)],
            ..TrendsSnapshot::default()
        };
        let view = DashboardView::build(&snapshot, &config);
        let mut slot = ChartSlot::new();
        let chart = slot.render(view.velocity, (&config.velocity).into(), 400);
        let mut out = String::new();
        write_velocity_chart(&mut out, chart, 400)?;

        assert!(out.contains(r##"fill="#ff00a8""##));
        assert!(out.contains(r##"fill="#ff0050""##));
        assert!(out.contains("up: Δ +0"));
        assert!(out.contains(r#"width="400" height="220""#));
        Ok(())
    }
}
