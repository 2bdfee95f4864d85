use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::PriceTrend;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Monthly market averages over the filtered window.
#[hook]
pub fn use_price_trend(filters: &AnalysisFilters) -> QueryState<PriceTrend> {
    use_analysis(AnalysisKind::PriceTrend, filters)
}
