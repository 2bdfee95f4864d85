use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::models::filters::AnalysisFilters;
use crate::models::region::Region;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub filters: AnalysisFilters,
    pub on_change: Callback<AnalysisFilters>,
}

/// Shared filter controls: district, window length, minimum transaction
/// count and complex-name search. Emits a whole new filter set on every
/// change; the hooks take care of normalization and caching.
#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let on_region_change = {
        let filters = props.filters.clone();
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(region) = target.value().parse::<Region>() {
                callback.emit(AnalysisFilters {
                    region: Some(region),
                    ..filters.clone()
                });
            }
        })
    };

    let on_months_change = {
        let filters = props.filters.clone();
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            let months_back = target.value().parse::<u32>().ok();
            callback.emit(AnalysisFilters {
                months_back,
                ..filters.clone()
            });
        })
    };

    let on_min_count_change = {
        let filters = props.filters.clone();
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlInputElement = e.target_unchecked_into();
            let min_count = target.value().parse::<u32>().ok().filter(|n| *n > 0);
            callback.emit(AnalysisFilters {
                min_count,
                ..filters.clone()
            });
        })
    };

    let on_search_change = {
        let filters = props.filters.clone();
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlInputElement = e.target_unchecked_into();
            let value = target.value();
            let search = (!value.trim().is_empty()).then_some(value);
            callback.emit(AnalysisFilters {
                search,
                ..filters.clone()
            });
        })
    };

    let selected_region = props.filters.region.unwrap_or_default();
    let selected_months = props.filters.months_back.unwrap_or(6);

    html! {
        <div class="filter-bar">
            <select
                class="region-selector"
                onchange={on_region_change}
                aria-label="지역 선택"
                title="지역 선택"
            >
                {
                    Region::all().iter().map(|r| {
                        let selected = *r == selected_region;
                        html! {
                            <option value={r.code()} {selected}>{r.name()}</option>
                        }
                    }).collect::<Html>()
                }
            </select>

            <select
                class="months-selector"
                onchange={on_months_change}
                aria-label="조회 기간"
                title="조회 기간"
            >
                {
                    [3u32, 6, 12, 24].iter().map(|months| {
                        let selected = *months == selected_months;
                        html! {
                            <option value={months.to_string()} {selected}>
                                {format!("최근 {months}개월")}
                            </option>
                        }
                    }).collect::<Html>()
                }
            </select>

            <input
                class="min-count-input"
                type="number"
                min="0"
                placeholder="최소 거래건수"
                value={props.filters.min_count.map(|n| n.to_string()).unwrap_or_default()}
                onchange={on_min_count_change}
                aria-label="최소 거래건수"
            />

            <input
                class="search-input"
                type="text"
                placeholder="단지명 검색"
                value={props.filters.search.clone().unwrap_or_default()}
                onchange={on_search_change}
                aria-label="단지명 검색"
            />
        </div>
    }
}
