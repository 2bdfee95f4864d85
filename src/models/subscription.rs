use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

/// The capability set recognized by this client. Feature gating is a typed
/// lookup against this enum; wire names the client does not know are dropped
/// during deserialization rather than carried as strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    PdfExport,
    ExcelExport,
    GapSignals,
    ExtendedHistory,
    SavedSearches,
}

impl Feature {
    pub const fn wire_name(&self) -> &'static str {
        match self {
            Feature::PdfExport => "pdf_export",
            Feature::ExcelExport => "excel_export",
            Feature::GapSignals => "gap_signals",
            Feature::ExtendedHistory => "extended_history",
            Feature::SavedSearches => "saved_searches",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "pdf_export" => Some(Feature::PdfExport),
            "excel_export" => Some(Feature::ExcelExport),
            "gap_signals" => Some(Feature::GapSignals),
            "extended_history" => Some(Feature::ExtendedHistory),
            "saved_searches" => Some(Feature::SavedSearches),
            _ => None,
        }
    }

    pub fn all() -> &'static [Feature] {
        &[
            Feature::PdfExport,
            Feature::ExcelExport,
            Feature::GapSignals,
            Feature::ExtendedHistory,
            Feature::SavedSearches,
        ]
    }
}

/// A capability is either a plain flag or a numeric allowance. A numeric
/// allowance of zero means the capability is off.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FeatureValue {
    Flag(bool),
    Limit(i64),
}

impl FeatureValue {
    pub const fn enabled(&self) -> bool {
        match self {
            FeatureValue::Flag(enabled) => *enabled,
            FeatureValue::Limit(limit) => *limit != 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UsageCounters {
    pub queries_this_month: u32,
    pub exports_this_month: u32,
}

/// Current entitlement as reported by the backend. Read-only outside the
/// subscription context; mutations go through upgrade/cancel and a refetch.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Subscription {
    pub tier: SubscriptionTier,
    #[serde(deserialize_with = "deserialize_features")]
    pub features: HashMap<Feature, FeatureValue>,
    #[serde(default)]
    pub usage: UsageCounters,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features
            .get(&feature)
            .is_some_and(FeatureValue::enabled)
    }
}

fn deserialize_features<'de, D>(deserializer: D) -> Result<HashMap<Feature, FeatureValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: HashMap<String, Value> = HashMap::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(name, value)| {
            let feature = Feature::from_wire_name(&name)?;
            let value = match value {
                Value::Bool(flag) => FeatureValue::Flag(flag),
                Value::Number(n) => FeatureValue::Limit(n.as_i64()?),
                _ => return None,
            };
            Some((feature, value))
        })
        .collect())
}

/// Entry in the plan catalog shown on the upgrade panel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub tier: SubscriptionTier,
    /// Monthly price in 원.
    pub monthly_price: u64,
    #[serde(deserialize_with = "deserialize_feature_list")]
    pub features: Vec<Feature>,
}

fn deserialize_feature_list<'de, D>(deserializer: D) -> Result<Vec<Feature>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = Vec::deserialize(deserializer)?;
    Ok(raw
        .iter()
        .filter_map(|name| Feature::from_wire_name(name))
        .collect())
}
