use serde_json::Value;

use crate::models::analysis::{
    ApartmentStat, AreaBandStat, GapOpportunity, MarketSummary, RegionalStat, RentRatioPoint,
    RentalYieldPoint, TrendPoint,
};
use crate::models::error::AppError;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Hand-authored response fixtures, one set per analysis kind. Served only
/// when `DataSource::Fixture` is configured; the backend normally applies
/// these filters server-side, so the by-apartment set filters client-side to
/// keep the development experience faithful.
pub fn response_for(kind: AnalysisKind, filters: &AnalysisFilters) -> Result<Value, AppError> {
    let value = match kind {
        AnalysisKind::RegionalStats => to_value(filter_by_region(regional_stats(), filters, |s| {
            s.region.as_str()
        }))?,
        AnalysisKind::AreaDistribution | AnalysisKind::ByArea => to_value(area_bands())?,
        AnalysisKind::ByApartment => to_value(by_apartment(filters))?,
        AnalysisKind::PriceTrend => to_value(price_trend())?,
        AnalysisKind::MarketSummary => to_value(market_summary())?,
        AnalysisKind::RentRatio => to_value(filter_by_region(rent_ratios(), filters, |p| {
            p.region.as_str()
        }))?,
        AnalysisKind::RentalYield => to_value(filter_by_region(rental_yields(), filters, |p| {
            p.region.as_str()
        }))?,
        AnalysisKind::GapInvestment => to_value(filter_by_region(
            gap_opportunities(),
            filters,
            |g| g.region.as_str(),
        ))?,
    };
    Ok(value)
}

/// Filters the by-apartment rows the way the backend does: exact region
/// match, minimum transaction count, case-insensitive name search.
pub fn by_apartment(filters: &AnalysisFilters) -> Vec<ApartmentStat> {
    let filters = filters.normalized();
    let region = filters.region.map(|r| r.name());
    let search = filters.search.as_deref().map(str::to_lowercase);

    apartment_stats()
        .into_iter()
        .filter(|row| region.is_none_or(|name| row.region == name))
        .filter(|row| filters.min_count.is_none_or(|min| row.count >= min))
        .filter(|row| {
            search
                .as_deref()
                .is_none_or(|needle| row.name.to_lowercase().contains(needle))
        })
        .collect()
}

fn filter_by_region<T>(
    rows: Vec<T>,
    filters: &AnalysisFilters,
    region_of: impl Fn(&T) -> &str,
) -> Vec<T> {
    let region = filters.normalized().region.map(|r| r.name());
    rows.into_iter()
        .filter(|row| region.is_none_or(|name| region_of(row) == name))
        .collect()
}

fn to_value<T: serde::Serialize>(rows: T) -> Result<Value, AppError> {
    serde_json::to_value(rows)
        .map_err(|e| AppError::DataError(format!("Failed to serialize fixture: {e}")))
}

fn regional_stats() -> Vec<RegionalStat> {
    vec![
        stat("강남구", 221_000.0, 198_000.0, 2_650.0, 184, 0.034),
        stat("서초구", 208_000.0, 186_500.0, 2_480.0, 141, 0.028),
        stat("송파구", 162_000.0, 151_000.0, 1_920.0, 232, 0.019),
        stat("용산구", 171_000.0, 158_000.0, 2_100.0, 76, 0.041),
        stat("성동구", 126_500.0, 119_000.0, 1_540.0, 118, 0.022),
        stat("마포구", 121_000.0, 114_500.0, 1_490.0, 134, 0.015),
        stat("영등포구", 102_000.0, 96_000.0, 1_230.0, 157, 0.009),
        stat("강동구", 94_500.0, 89_000.0, 1_120.0, 171, 0.006),
        stat("노원구", 58_500.0, 55_000.0, 780.0, 289, -0.004),
        stat("강서구", 74_000.0, 70_500.0, 940.0, 203, 0.002),
    ]
}

fn stat(
    region: &str,
    avg_price: f64,
    median_price: f64,
    avg_price_per_area: f64,
    transaction_count: u32,
    change_rate: f64,
) -> RegionalStat {
    RegionalStat {
        region: region.to_string(),
        avg_price,
        median_price,
        avg_price_per_area,
        transaction_count,
        change_rate,
    }
}

fn area_bands() -> Vec<AreaBandStat> {
    [
        ("40㎡ 이하", 212, 48_000.0),
        ("40-60㎡", 486, 76_500.0),
        ("60-85㎡", 734, 112_000.0),
        ("85-102㎡", 198, 148_000.0),
        ("102-135㎡", 121, 186_000.0),
        ("135㎡ 초과", 54, 248_000.0),
    ]
    .into_iter()
    .map(|(band, count, avg_price)| AreaBandStat {
        band: band.to_string(),
        count,
        avg_price,
    })
    .collect()
}

fn price_trend() -> Vec<TrendPoint> {
    [
        ("2024-07", 98_200.0, 1_412),
        ("2024-08", 99_100.0, 1_388),
        ("2024-09", 99_800.0, 1_291),
        ("2024-10", 100_600.0, 1_350),
        ("2024-11", 100_900.0, 1_175),
        ("2024-12", 101_700.0, 1_098),
        ("2025-01", 102_800.0, 1_009),
        ("2025-02", 103_400.0, 1_121),
        ("2025-03", 104_900.0, 1_287),
        ("2025-04", 106_200.0, 1_344),
        ("2025-05", 107_000.0, 1_402),
        ("2025-06", 108_300.0, 1_459),
    ]
    .into_iter()
    .map(|(month, avg_price, transaction_count)| TrendPoint {
        month: month.to_string(),
        avg_price,
        transaction_count,
    })
    .collect()
}

fn apartment_stats() -> Vec<ApartmentStat> {
    [
        ("래미안대치팰리스", "강남구", 312_000.0, 18, 94.5),
        ("은마아파트", "강남구", 246_000.0, 41, 84.4),
        ("도곡렉슬", "강남구", 284_000.0, 23, 114.8),
        ("반포자이", "서초구", 334_000.0, 27, 116.4),
        ("아크로리버파크", "서초구", 398_000.0, 12, 112.9),
        ("잠실엘스", "송파구", 221_000.0, 56, 84.8),
        ("리센츠", "송파구", 218_000.0, 48, 84.9),
        ("헬리오시티", "송파구", 189_000.0, 94, 84.9),
        ("마포래미안푸르지오", "마포구", 168_000.0, 37, 84.6),
        ("경의선숲길파크", "마포구", 121_000.0, 9, 59.9),
        ("상계주공7단지", "노원구", 61_500.0, 64, 58.0),
        ("중계그린", "노원구", 54_800.0, 71, 49.5),
    ]
    .into_iter()
    .map(|(name, region, avg_price, count, avg_area)| ApartmentStat {
        name: name.to_string(),
        region: region.to_string(),
        avg_price,
        count,
        avg_area,
    })
    .collect()
}

fn gap_opportunities() -> Vec<GapOpportunity> {
    [
        ("상계주공7단지", "노원구", 61_500.0, 46_500.0),
        ("중계그린", "노원구", 54_800.0, 40_200.0),
        ("헬리오시티", "송파구", 189_000.0, 118_000.0),
        ("마포래미안푸르지오", "마포구", 168_000.0, 102_000.0),
        ("강서힐스테이트", "강서구", 92_000.0, 64_500.0),
    ]
    .into_iter()
    .map(|(apartment, region, sale_price, jeonse_price)| GapOpportunity {
        apartment: apartment.to_string(),
        region: region.to_string(),
        sale_price,
        jeonse_price,
        gap: sale_price - jeonse_price,
        jeonse_ratio: jeonse_price / sale_price,
    })
    .collect()
}

fn rent_ratios() -> Vec<RentRatioPoint> {
    [
        ("강남구", 0.468, 0.042),
        ("서초구", 0.482, 0.041),
        ("송파구", 0.524, 0.044),
        ("용산구", 0.491, 0.043),
        ("성동구", 0.571, 0.046),
        ("마포구", 0.588, 0.047),
        ("영등포구", 0.602, 0.049),
        ("강동구", 0.615, 0.050),
        ("노원구", 0.681, 0.055),
        ("강서구", 0.664, 0.053),
    ]
    .into_iter()
    .map(|(region, jeonse_ratio, wolse_conversion_rate)| RentRatioPoint {
        region: region.to_string(),
        jeonse_ratio,
        wolse_conversion_rate,
    })
    .collect()
}

fn rental_yields() -> Vec<RentalYieldPoint> {
    [
        ("강남구", 0.021, 221_000.0),
        ("서초구", 0.022, 208_000.0),
        ("송파구", 0.026, 162_000.0),
        ("용산구", 0.024, 171_000.0),
        ("성동구", 0.029, 126_500.0),
        ("마포구", 0.031, 121_000.0),
        ("영등포구", 0.033, 102_000.0),
        ("강동구", 0.034, 94_500.0),
        ("노원구", 0.041, 58_500.0),
        ("강서구", 0.038, 74_000.0),
    ]
    .into_iter()
    .map(|(region, gross_yield, avg_price)| RentalYieldPoint {
        region: region.to_string(),
        gross_yield,
        avg_price,
    })
    .collect()
}

fn market_summary() -> MarketSummary {
    MarketSummary {
        total_transactions: 1_805,
        avg_price: 108_300.0,
        hottest_region: "용산구".to_string(),
        price_change_rate: 0.041,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::region::Region;

    #[test]
    fn test_by_apartment_region_filter_is_exact() {
        let filters = AnalysisFilters {
            region: Some(Region::Gangnam),
            ..AnalysisFilters::default()
        };
        let rows = by_apartment(&filters);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.region == "강남구"));
    }

    #[test]
    fn test_by_apartment_min_count_cutoff() {
        let filters = AnalysisFilters {
            min_count: Some(40),
            ..AnalysisFilters::default()
        };
        let rows = by_apartment(&filters);
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.count >= 40));
    }

    #[test]
    fn test_by_apartment_search_is_case_insensitive_substring() {
        let filters = AnalysisFilters {
            search: Some("래미안".into()),
            ..AnalysisFilters::default()
        };
        let rows = by_apartment(&filters);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.name.contains("래미안")));
    }

    #[test]
    fn test_all_sentinel_returns_every_region() {
        let sentinel = AnalysisFilters {
            region: Some(Region::All),
            ..AnalysisFilters::default()
        };
        let unfiltered = AnalysisFilters::default();
        assert_eq!(by_apartment(&sentinel), by_apartment(&unfiltered));
    }

    #[test]
    fn test_gap_fixture_ratios_are_consistent() {
        for row in gap_opportunities() {
            assert!((row.gap - (row.sale_price - row.jeonse_price)).abs() < 1e-9);
            assert!(row.jeonse_ratio > 0.0 && row.jeonse_ratio < 1.0);
        }
    }

    #[test]
    fn test_every_kind_has_a_fixture() {
        let filters = AnalysisFilters::default();
        for kind in [
            AnalysisKind::RegionalStats,
            AnalysisKind::AreaDistribution,
            AnalysisKind::ByApartment,
            AnalysisKind::ByArea,
            AnalysisKind::PriceTrend,
            AnalysisKind::MarketSummary,
            AnalysisKind::RentRatio,
            AnalysisKind::RentalYield,
            AnalysisKind::GapInvestment,
        ] {
            let value = response_for(kind, &filters).unwrap();
            assert!(!value.is_null());
        }
    }
}
