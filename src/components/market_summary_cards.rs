use std::rc::Rc;
use yew::prelude::*;

use crate::models::analysis::MarketSummary;
use crate::utils::format::{format_percent, format_price};

#[derive(Properties, PartialEq)]
pub struct MarketSummaryCardsProps {
    pub summary: Rc<MarketSummary>,
}

/// Headline card grid shown above the charts.
#[function_component(MarketSummaryCards)]
pub fn market_summary_cards(props: &MarketSummaryCardsProps) -> Html {
    let summary = &props.summary;

    html! {
        <div class="summary-card">
            <div class="summary-grid">
                <div class="summary-item">
                    <h3>{"총 거래건수"}</h3>
                    <p class="summary-value">{format!("{}건", summary.total_transactions)}</p>
                </div>
                <div class="summary-item">
                    <h3>{"평균 매매가"}</h3>
                    <p class="summary-value">{format_price(summary.avg_price)}</p>
                </div>
                <div class="summary-item">
                    <h3>{"상승률"}</h3>
                    <p class="summary-value">{format_percent(summary.price_change_rate)}</p>
                </div>
                <div class="summary-item">
                    <h3>{"주목 지역"}</h3>
                    <p class="summary-value">{&summary.hottest_region}</p>
                </div>
            </div>
        </div>
    }
}
