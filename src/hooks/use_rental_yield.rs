use yew::prelude::*;

use crate::hooks::use_query::{QueryState, use_analysis};
use crate::models::analysis::RentalYields;
use crate::models::filters::AnalysisFilters;
use crate::services::engine::AnalysisKind;

/// Expected gross rental yield per district.
#[hook]
pub fn use_rental_yield(filters: &AnalysisFilters) -> QueryState<RentalYields> {
    use_analysis(AnalysisKind::RentalYield, filters)
}
