use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Display format for the "last updated" stamp.
const LAST_UPDATED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pre-built summary produced by the external trends batch job.
///
/// Every field is optional in the JSON document; absent and `null` fields
/// become empty containers so each widget can render whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsSnapshot {
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword_frequencies: Vec<KeywordFrequency>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keyword_velocity: Vec<KeywordVelocity>,
    /// Read per category: a value that is not a list, or an item that is not
    /// a `{title, url}` object, is skipped without failing the snapshot.
    #[serde(default, deserialize_with = "lenient_sources")]
    pub sources: BTreeMap<String, Vec<SourceItem>>,
    /// Counts that are not non-negative integers are treated as absent.
    #[serde(default, deserialize_with = "lenient_counts")]
    pub source_counts: BTreeMap<String, u64>,
}

/// A `[keyword, count]` pair, ordered by descending count in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, u64)", into = "(String, u64)")]
pub struct KeywordFrequency {
    pub word: String,
    pub count: u64,
}

impl KeywordFrequency {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl From<(String, u64)> for KeywordFrequency {
    fn from((word, count): (String, u64)) -> Self {
        Self { word, count }
    }
}

impl From<KeywordFrequency> for (String, u64) {
    fn from(value: KeywordFrequency) -> Self {
        (value.word, value.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordVelocity {
    pub keyword: String,
    pub delta: i64,
}

impl KeywordVelocity {
    pub fn new(keyword: impl Into<String>, delta: i64) -> Self {
        Self {
            keyword: keyword.into(),
            delta,
        }
    }
}

/// A headline or page link collected for one source category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceItem {
    pub title: String,
    pub url: String,
}

impl SourceItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

impl TrendsSnapshot {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Generation time, accepting RFC 3339 or a naive ISO timestamp taken as UTC.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated_at.as_deref().and_then(parse_timestamp)
    }

    /// The stamp shown in the header, in local time. Unparseable timestamps
    /// are shown as they were written.
    pub fn last_updated_label(&self) -> Option<String> {
        let raw = self.generated_at.as_deref()?;
        Some(parse_timestamp(raw).map_or_else(
            || raw.to_string(),
            |timestamp| {
                timestamp
                    .with_timezone(&Local)
                    .format(LAST_UPDATED_FORMAT)
                    .to_string()
            },
        ))
    }

    pub fn sources_for(&self, category: &str) -> &[SourceItem] {
        self.sources.get(category).map_or(&[], Vec::as_slice)
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc()))
}

fn lenient_sources<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, Vec<SourceItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = null_as_default(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(category, value)| {
            let items = match value {
                Value::Array(items) => items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
                _ => Vec::new(),
            };
            (category, items)
        })
        .collect())
}

fn lenient_counts<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<String, Value> = null_as_default(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(category, value)| value.as_u64().map(|count| (category, count)))
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "generated_at": "2025-08-14T09:30:00+00:00",
        "keyword_frequencies": [["election", 42], ["heatwave", 17]],
        "keyword_velocity": [{"keyword": "election", "delta": 12}, {"keyword": "storm", "delta": -4}],
        "sources": {
            "reddit": [{"title": "Headline", "url": "https://www.reddit.com/r/news/1"}],
            "tech": []
        },
        "source_counts": {"reddit": 150, "tech": 0}
    }"#;

    #[test]
    fn parses_full_snapshot() -> Result<()> {
        let snapshot = TrendsSnapshot::from_json(SAMPLE)?;

        assert_eq!(
            snapshot.keyword_frequencies,
            vec![
                KeywordFrequency::new("election", 42),
                KeywordFrequency::new("heatwave", 17)
            ]
        );
        assert_eq!(snapshot.keyword_velocity[1], KeywordVelocity::new("storm", -4));
        assert_eq!(snapshot.sources_for("reddit").len(), 1);
        assert!(snapshot.sources_for("tech").is_empty());
        assert!(snapshot.sources_for("youtube").is_empty());
        assert_eq!(snapshot.source_counts.get("reddit"), Some(&150));
        Ok(())
    }

    #[test]
    fn missing_and_null_fields_become_empty() -> Result<()> {
        let snapshot =
            TrendsSnapshot::from_json(r#"{"keyword_frequencies": null, "sources": null}"#)?;

        assert_eq!(snapshot, TrendsSnapshot::default());
        Ok(())
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(TrendsSnapshot::from_json("{\"keyword_frequencies\": [[\"a\"").is_err());
        assert!(TrendsSnapshot::from_json("<html>404</html>").is_err());
    }

    #[test]
    fn wrong_field_type_fails_the_whole_snapshot() {
        let result = TrendsSnapshot::from_json(r#"{"keyword_velocity": {"keyword": "x"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn non_list_category_is_empty_and_others_survive() -> Result<()> {
        let snapshot = TrendsSnapshot::from_json(
            r#"{
                "keyword_frequencies": [["election", 42]],
                "sources": {"google_trends": {"error": "rate limited"}, "reddit": []},
                "source_counts": {"reddit": 3}
            }"#,
        )?;

        assert_eq!(snapshot.keyword_frequencies, vec![KeywordFrequency::new("election", 42)]);
        assert!(snapshot.sources_for("google_trends").is_empty());
        assert!(snapshot.sources_for("reddit").is_empty());
        assert_eq!(snapshot.source_counts.get("reddit"), Some(&3));
        Ok(())
    }

    #[test]
    fn non_integer_counts_are_absent() -> Result<()> {
        let snapshot = TrendsSnapshot::from_json(
            r#"{"source_counts": {"reddit": null, "tech": "lots", "wikipedia": -2, "major_outlets": 7}}"#,
        )?;

        assert_eq!(
            snapshot.source_counts,
            BTreeMap::from([("major_outlets".to_string(), 7)])
        );
        Ok(())
    }

    #[test]
    fn malformed_items_are_skipped() -> Result<()> {
        let snapshot = TrendsSnapshot::from_json(
            r#"{"sources": {"tech": [
                {"title": "no link"},
                "just text",
                {"title": "HN", "url": "https://news.ycombinator.com/item?id=1"}
            ]}}"#,
        )?;

        assert_eq!(
            snapshot.sources_for("tech"),
            &[SourceItem::new("HN", "https://news.ycombinator.com/item?id=1")]
        );

        let only_bad = TrendsSnapshot::from_json(r#"{"sources": {"tech": [{"title": "no link"}]}}"#)?;
        assert!(only_bad.sources_for("tech").is_empty());
        Ok(())
    }

    #[test]
    fn generated_at_accepts_naive_timestamps_as_utc() {
        let snapshot = TrendsSnapshot {
            generated_at: Some("2025-08-14T09:30:00.123456".to_string()),
            ..TrendsSnapshot::default()
        };

        let parsed = snapshot.generated_at();
        assert_eq!(
            parsed.map(|timestamp| timestamp.timestamp()),
            Some(Utc.with_ymd_and_hms(2025, 8, 14, 9, 30, 0).unwrap().timestamp())
        );
    }

    #[test]
    fn unparseable_timestamp_is_shown_verbatim() {
        let snapshot = TrendsSnapshot {
            generated_at: Some("yesterday-ish".to_string()),
            ..TrendsSnapshot::default()
        };

        assert_eq!(snapshot.generated_at(), None);
        assert_eq!(snapshot.last_updated_label().as_deref(), Some("yesterday-ish"));
    }
}
