use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::ApartmentStats;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Aggregates per apartment complex. Honors the region, minimum-count and
/// name-search filters.
#[hook]
pub fn use_by_apartment(filters: &AnalysisFilters) -> QueryState<ApartmentStats> {
    use_analysis(AnalysisKind::ByApartment, filters)
}
