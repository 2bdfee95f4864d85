use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::AreaDistribution;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Transaction volume per floor-area band.
#[hook]
pub fn use_area_distribution(filters: &AnalysisFilters) -> QueryState<AreaDistribution> {
    use_analysis(AnalysisKind::AreaDistribution, filters)
}
