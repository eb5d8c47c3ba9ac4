//! Recommendation record shape shared by the pipeline and the HTTP layer
//!
//! Records arrive from a generative model, so deserialization is permissive:
//! a missing or mistyped field degrades to its empty value instead of
//! rejecting the whole batch.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Recommendation tier relative to the cafeteria menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecommendationTier {
    /// Premium version of the same dish family
    Upgrade,
    /// Related dish in the same meal style
    Alternative,
    /// Deliberately different dish picked for weather or distance
    #[default]
    Exception,
}

impl RecommendationTier {
    const UPGRADE_MARKERS: &'static [&'static str] = &["상위", "upgrade"];
    const ALTERNATIVE_MARKERS: &'static [&'static str] = &["대체", "비슷", "alternative"];

    /// Parse a free-text tier label. Anything unrecognised is an exception.
    pub fn from_label(label: &str) -> Self {
        let lowered = label.to_lowercase();
        if Self::UPGRADE_MARKERS.iter().any(|m| lowered.contains(m)) {
            RecommendationTier::Upgrade
        } else if Self::ALTERNATIVE_MARKERS.iter().any(|m| lowered.contains(m)) {
            RecommendationTier::Alternative
        } else {
            RecommendationTier::Exception
        }
    }

    /// Canonical label written back to clients
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::Upgrade => "상위호환",
            RecommendationTier::Alternative => "비슷한카테고리",
            RecommendationTier::Exception => "날씨기반",
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for RecommendationTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RecommendationTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw.as_str().map(Self::from_label).unwrap_or_default())
    }
}

/// Identity of a recommendation for repeat detection: (restaurant, menu)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordKey {
    pub restaurant_name: String,
    pub menu_name: String,
}

/// A single recommendation as produced by the model or the fallback rules
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawRecommendationRecord")]
pub struct RecommendationRecord {
    #[serde(rename = "type")]
    pub tier: RecommendationTier,
    pub restaurant_name: String,
    pub place_id: String,
    pub minutes_away: u32,
    pub menu_name: String,
    pub display_name: String,
    pub category: String,
    pub reason: String,
    pub price_range: String,
    pub normalized_search_query: String,
    pub alt_queries: Vec<String>,
    pub category_group_code: String,
}

/// Wire shape of a record. Canonical keys and their short aliases are read
/// side by side so a record carrying both never fails to decode.
#[derive(Deserialize)]
struct RawRecommendationRecord {
    #[serde(rename = "type", default)]
    tier: RecommendationTier,

    #[serde(default, deserialize_with = "lenient_string")]
    restaurant_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    restaurant: String,

    #[serde(default, deserialize_with = "lenient_string")]
    place_id: String,

    #[serde(default, deserialize_with = "lenient_minutes")]
    minutes_away: Option<u32>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    walking_min: Option<u32>,

    #[serde(default, deserialize_with = "lenient_string")]
    menu_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    menu: String,

    #[serde(default, deserialize_with = "lenient_string")]
    display_name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    category: String,

    #[serde(default, deserialize_with = "lenient_string")]
    reason: String,

    #[serde(default, deserialize_with = "lenient_string")]
    price_range: String,

    #[serde(default, deserialize_with = "lenient_string")]
    normalized_search_query: String,

    #[serde(default, deserialize_with = "lenient_string_list")]
    alt_queries: Vec<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    category_group_code: String,
}

/// Canonical value unless it is empty
fn prefer(canonical: String, alias: String) -> String {
    if canonical.trim().is_empty() { alias } else { canonical }
}

impl From<RawRecommendationRecord> for RecommendationRecord {
    fn from(raw: RawRecommendationRecord) -> Self {
        Self {
            tier: raw.tier,
            restaurant_name: prefer(raw.restaurant_name, raw.restaurant),
            place_id: raw.place_id,
            minutes_away: raw.minutes_away.or(raw.walking_min).unwrap_or(0),
            menu_name: prefer(raw.menu_name, raw.menu),
            display_name: raw.display_name,
            category: raw.category,
            reason: raw.reason,
            price_range: raw.price_range,
            normalized_search_query: raw.normalized_search_query,
            alt_queries: raw.alt_queries,
            category_group_code: raw.category_group_code,
        }
    }
}

impl RecommendationRecord {
    pub fn new(
        tier: RecommendationTier,
        restaurant_name: impl Into<String>,
        menu_name: impl Into<String>,
    ) -> Self {
        Self {
            tier,
            restaurant_name: restaurant_name.into(),
            menu_name: menu_name.into(),
            ..Self::default()
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            restaurant_name: self.restaurant_name.clone(),
            menu_name: self.menu_name.clone(),
        }
    }

    pub fn with_tier(mut self, tier: RecommendationTier) -> Self {
        self.tier = tier;
        self
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Walking minutes; `None` when absent or unreadable so an alias can fill in
fn lenient_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .map(|m| u32::try_from(m).unwrap_or(u32::MAX)),
        // "7분" style answers
        Value::String(s) => {
            let digits: String = s.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

fn lenient_string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s],
        _ => Vec::new(),
    })
}
