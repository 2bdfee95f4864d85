pub mod apartment_table;
pub mod area_distribution_chart;
pub mod auth_panel;
pub mod export_button;
pub mod filter_bar;
pub mod gap_table;
pub mod market_summary_cards;
pub mod premium_gate;
pub mod price_trend_chart;
pub mod regional_price_chart;
pub mod rent_ratio_chart;
pub mod status;
