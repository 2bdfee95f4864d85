use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::MarketSummary;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Headline numbers for the summary cards.
#[hook]
pub fn use_market_summary(filters: &AnalysisFilters) -> QueryState<MarketSummary> {
    use_analysis(AnalysisKind::MarketSummary, filters)
}
