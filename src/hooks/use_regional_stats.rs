use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::RegionalStats;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Per-district aggregates for the regional comparison chart.
#[hook]
pub fn use_regional_stats(filters: &AnalysisFilters) -> QueryState<RegionalStats> {
    use_analysis(AnalysisKind::RegionalStats, filters)
}
