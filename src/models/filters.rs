use serde_json::{Map, Value};

use super::region::Region;

/// Filter parameters shared by every analysis view. Prices are in 만원,
/// areas in ㎡.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct AnalysisFilters {
    pub region: Option<Region>,
    pub months_back: Option<u32>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_count: Option<u32>,
    pub search: Option<String>,
}

impl AnalysisFilters {
    /// Canonical form used for both the cache key and the outbound request.
    ///
    /// The selector's `All` sentinel means "no region filter" and must not
    /// reach the wire, otherwise identical queries would land in different
    /// cache entries depending on how the user expressed "everything".
    pub fn normalized(&self) -> Self {
        let mut normalized = self.clone();
        if normalized.region == Some(Region::All) {
            normalized.region = None;
        }
        normalized.search = normalized
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        normalized
    }

    /// Stable serialization of the normalized filters, used as the second
    /// half of a cache key.
    pub fn cache_key(&self) -> String {
        let normalized = self.normalized();
        let mut parts = Vec::new();
        if let Some(region) = normalized.region {
            parts.push(format!("region={}", region.code()));
        }
        if let Some(months) = normalized.months_back {
            parts.push(format!("months={months}"));
        }
        if let Some(min) = normalized.min_price {
            parts.push(format!("min_price={min}"));
        }
        if let Some(max) = normalized.max_price {
            parts.push(format!("max_price={max}"));
        }
        if let Some(min) = normalized.min_area {
            parts.push(format!("min_area={min}"));
        }
        if let Some(max) = normalized.max_area {
            parts.push(format!("max_area={max}"));
        }
        if let Some(count) = normalized.min_count {
            parts.push(format!("min_count={count}"));
        }
        if let Some(search) = &normalized.search {
            parts.push(format!("search={}", search.to_lowercase()));
        }
        parts.join("&")
    }

    /// JSON body for the analysis endpoints. Unset filters are omitted
    /// entirely so the backend applies its own defaults.
    pub fn to_request_body(&self) -> Value {
        let normalized = self.normalized();
        let mut body = Map::new();
        if let Some(region) = normalized.region {
            body.insert("region".into(), Value::from(region.name()));
        }
        if let Some(months) = normalized.months_back {
            body.insert("months_back".into(), Value::from(months));
        }
        if let Some(min) = normalized.min_price {
            body.insert("min_price".into(), Value::from(min));
        }
        if let Some(max) = normalized.max_price {
            body.insert("max_price".into(), Value::from(max));
        }
        if let Some(min) = normalized.min_area {
            body.insert("min_area".into(), Value::from(min));
        }
        if let Some(max) = normalized.max_area {
            body.insert("max_area".into(), Value::from(max));
        }
        if let Some(count) = normalized.min_count {
            body.insert("min_count".into(), Value::from(count));
        }
        if let Some(search) = &normalized.search {
            body.insert("search".into(), Value::from(search.as_str()));
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_sentinel_matches_no_filter() {
        let with_sentinel = AnalysisFilters {
            region: Some(Region::All),
            months_back: Some(6),
            ..AnalysisFilters::default()
        };
        let without = AnalysisFilters {
            region: None,
            months_back: Some(6),
            ..AnalysisFilters::default()
        };

        assert_eq!(with_sentinel.cache_key(), without.cache_key());
        assert_eq!(with_sentinel.to_request_body(), without.to_request_body());
    }

    #[test]
    fn test_request_body_omits_unset_fields() {
        let filters = AnalysisFilters {
            region: Some(Region::Mapo),
            min_count: Some(10),
            ..AnalysisFilters::default()
        };
        let body = filters.to_request_body();

        assert_eq!(body["region"], "마포구");
        assert_eq!(body["min_count"], 10);
        assert!(body.get("min_price").is_none());
        assert!(body.get("search").is_none());
    }

    #[test]
    fn test_distinct_filters_distinct_keys() {
        let a = AnalysisFilters {
            region: Some(Region::Gangnam),
            ..AnalysisFilters::default()
        };
        let b = AnalysisFilters {
            region: Some(Region::Seocho),
            ..AnalysisFilters::default()
        };
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let filters = AnalysisFilters {
            search: Some("   ".into()),
            ..AnalysisFilters::default()
        };
        assert_eq!(filters.cache_key(), AnalysisFilters::default().cache_key());
    }
}
