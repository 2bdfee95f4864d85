pub mod use_area_distribution;
pub mod use_by_apartment;
pub mod use_by_area;
pub mod use_gap_investment;
pub mod use_market_summary;
pub mod use_price_trend;
pub mod use_query;
pub mod use_regional_stats;
pub mod use_rent_ratio;
pub mod use_rental_yield;
