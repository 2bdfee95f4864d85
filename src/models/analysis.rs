use serde::{Deserialize, Serialize};

/// Per-district aggregate over the filtered transaction window.
/// Prices are in 만원, price-per-area in 만원/㎡.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionalStat {
    pub region: String,
    pub avg_price: f64,
    pub median_price: f64,
    pub avg_price_per_area: f64,
    pub transaction_count: u32,
    /// Change against the previous window, as a fraction (0.031 = +3.1%).
    pub change_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionalStats {
    stats: Vec<RegionalStat>,
}

impl RegionalStats {
    pub fn new(stats: Vec<RegionalStat>) -> Self {
        Self { stats }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionalStat> {
        self.stats.iter()
    }

    /// (district labels, average prices) sorted by price descending, for the
    /// regional bar chart.
    pub fn series_data(&self) -> (Vec<String>, Vec<f64>) {
        let mut sorted: Vec<&RegionalStat> = self.stats.iter().collect();
        sorted.sort_by(|a, b| {
            b.avg_price
                .partial_cmp(&a.avg_price)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let labels = sorted.iter().map(|s| s.region.clone()).collect();
        let values = sorted.iter().map(|s| s.avg_price).collect();
        (labels, values)
    }
}

/// Transaction count and average price per floor-area band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaBandStat {
    /// Band label, e.g. "60㎡ 이하".
    pub band: String,
    pub count: u32,
    pub avg_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaDistribution {
    bands: Vec<AreaBandStat>,
}

impl AreaDistribution {
    pub fn new(bands: Vec<AreaBandStat>) -> Self {
        Self { bands }
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AreaBandStat> {
        self.bands.iter()
    }

    /// (count, band label) pairs for the distribution pie chart.
    pub fn pie_data(&self) -> Vec<(f64, String)> {
        self.bands
            .iter()
            .map(|b| (f64::from(b.count), b.band.clone()))
            .collect()
    }
}

/// Monthly market average, one point per month.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// "YYYY-MM"
    pub month: String,
    pub avg_price: f64,
    pub transaction_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTrend {
    points: Vec<TrendPoint>,
}

impl PriceTrend {
    pub fn new(points: Vec<TrendPoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (month labels, average prices) in chronological order. Months sort
    /// correctly as strings because of the fixed "YYYY-MM" format.
    pub fn series_data(&self) -> (Vec<String>, Vec<f64>) {
        let mut sorted = self.points.clone();
        sorted.sort_by(|a, b| a.month.cmp(&b.month));

        let labels = sorted.iter().map(|p| p.month.clone()).collect();
        let values = sorted.iter().map(|p| p.avg_price).collect();
        (labels, values)
    }

    /// Fractional price change from the first to the last month of the
    /// window, if there are at least two points.
    pub fn window_change_rate(&self) -> Option<f64> {
        let (_, values) = self.series_data();
        let first = values.first()?;
        let last = values.last()?;
        if values.len() < 2 || *first == 0.0 {
            return None;
        }
        Some((last - first) / first)
    }
}

/// Aggregate row for a single apartment complex.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApartmentStat {
    pub name: String,
    pub region: String,
    pub avg_price: f64,
    pub count: u32,
    pub avg_area: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApartmentStats {
    rows: Vec<ApartmentStat>,
}

impl ApartmentStats {
    pub fn new(rows: Vec<ApartmentStat>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ApartmentStat> {
        self.rows.iter()
    }
}

/// Gap-investment candidate: a complex where the jeonse deposit covers most
/// of the sale price, so the buyer's own capital (the gap) is small.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GapOpportunity {
    pub apartment: String,
    pub region: String,
    pub sale_price: f64,
    pub jeonse_price: f64,
    /// sale_price - jeonse_price, in 만원.
    pub gap: f64,
    /// jeonse_price / sale_price, as a fraction.
    pub jeonse_ratio: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GapOpportunities {
    rows: Vec<GapOpportunity>,
}

impl GapOpportunities {
    pub fn new(rows: Vec<GapOpportunity>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GapOpportunity> {
        self.rows.iter()
    }
}

/// Per-district lease-market ratios.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RentRatioPoint {
    pub region: String,
    /// Average jeonse deposit over sale price, as a fraction.
    pub jeonse_ratio: f64,
    /// Jeonse-to-wolse conversion rate, as a fraction.
    pub wolse_conversion_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentRatios {
    points: Vec<RentRatioPoint>,
}

impl RentRatios {
    pub fn new(points: Vec<RentRatioPoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (district labels, jeonse ratios in percent) for the ratio bar chart.
    pub fn series_data(&self) -> (Vec<String>, Vec<f64>) {
        let labels = self.points.iter().map(|p| p.region.clone()).collect();
        let values = self.points.iter().map(|p| p.jeonse_ratio * 100.0).collect();
        (labels, values)
    }
}

/// Expected gross rental yield per district, from converted wolse income
/// over purchase price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RentalYieldPoint {
    pub region: String,
    /// Annual gross yield, as a fraction.
    pub gross_yield: f64,
    pub avg_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentalYields {
    points: Vec<RentalYieldPoint>,
}

impl RentalYields {
    pub fn new(points: Vec<RentalYieldPoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RentalYieldPoint> {
        self.points.iter()
    }
}

/// Headline numbers for the summary card row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub total_transactions: u32,
    pub avg_price: f64,
    pub hottest_region: String,
    pub price_change_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regional_series_sorted_by_price() {
        let stats = RegionalStats::new(vec![
            RegionalStat {
                region: "노원구".into(),
                avg_price: 58_000.0,
                median_price: 54_000.0,
                avg_price_per_area: 700.0,
                transaction_count: 210,
                change_rate: 0.01,
            },
            RegionalStat {
                region: "강남구".into(),
                avg_price: 220_000.0,
                median_price: 195_000.0,
                avg_price_per_area: 2600.0,
                transaction_count: 120,
                change_rate: 0.03,
            },
        ]);

        let (labels, values) = stats.series_data();
        assert_eq!(labels, vec!["강남구", "노원구"]);
        assert_eq!(values, vec![220_000.0, 58_000.0]);
    }

    #[test]
    fn test_trend_series_sorted_chronologically() {
        let trend = PriceTrend::new(vec![
            TrendPoint {
                month: "2025-06".into(),
                avg_price: 101_000.0,
                transaction_count: 900,
            },
            TrendPoint {
                month: "2025-04".into(),
                avg_price: 98_000.0,
                transaction_count: 840,
            },
        ]);

        let (labels, values) = trend.series_data();
        assert_eq!(labels, vec!["2025-04", "2025-06"]);
        assert_eq!(values[0], 98_000.0);
    }

    #[test]
    fn test_trend_window_change_rate() {
        let trend = PriceTrend::new(vec![
            TrendPoint {
                month: "2025-01".into(),
                avg_price: 100_000.0,
                transaction_count: 800,
            },
            TrendPoint {
                month: "2025-06".into(),
                avg_price: 105_000.0,
                transaction_count: 820,
            },
        ]);

        let rate = trend.window_change_rate().unwrap();
        assert!((rate - 0.05).abs() < 1e-9);

        let single = PriceTrend::new(vec![TrendPoint {
            month: "2025-01".into(),
            avg_price: 100_000.0,
            transaction_count: 800,
        }]);
        assert_eq!(single.window_change_rate(), None);
    }

    #[test]
    fn test_transparent_wrappers_deserialize_from_arrays() {
        let json = r#"[
            {"band": "60㎡ 이하", "count": 320, "avg_price": 62000.0},
            {"band": "60-85㎡", "count": 510, "avg_price": 98000.0}
        ]"#;

        let distribution: AreaDistribution = serde_json::from_str(json).unwrap();
        assert_eq!(distribution.pie_data().len(), 2);
        assert_eq!(distribution.pie_data()[1].1, "60-85㎡");
    }
}
