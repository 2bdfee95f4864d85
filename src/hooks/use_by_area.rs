use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::AreaDistribution;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Average prices per floor-area band.
#[hook]
pub fn use_by_area(filters: &AnalysisFilters) -> QueryState<AreaDistribution> {
    use_analysis(AnalysisKind::ByArea, filters)
}
