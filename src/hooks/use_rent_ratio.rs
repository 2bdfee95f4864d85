use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::RentRatios;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Jeonse-to-price and wolse conversion ratios per district.
#[hook]
pub fn use_rent_ratio(filters: &AnalysisFilters) -> QueryState<RentRatios> {
    use_analysis(AnalysisKind::RentRatio, filters)
}
