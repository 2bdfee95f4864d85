use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::GapOpportunities;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Gap-investment candidates: complexes where the jeonse deposit covers
/// most of the sale price. Premium-gated in the UI.
#[hook]
pub fn use_gap_investment(filters: &AnalysisFilters) -> QueryState<GapOpportunities> {
    use_analysis(AnalysisKind::GapInvestment, filters)
}
