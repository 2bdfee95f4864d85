use std::rc::Rc;

use chrono::Utc;
use yew::prelude::*;

use crate::components::apartment_table::ApartmentTable;
use crate::components::area_distribution_chart::AreaDistributionChart;
use crate::components::auth_panel::AuthPanel;
use crate::components::export_button::ExportButton;
use crate::components::filter_bar::FilterBar;
use crate::components::gap_table::GapTable;
use crate::components::market_summary_cards::MarketSummaryCards;
use crate::components::premium_gate::PremiumGate;
use crate::components::price_trend_chart::PriceTrendChart;
use crate::components::regional_price_chart::RegionalPriceChart;
use crate::components::rent_ratio_chart::RentRatioChart;
use crate::components::status::Status;
use crate::config::AppConfig;
use crate::contexts::auth::AuthProvider;
use crate::contexts::subscription::SubscriptionProvider;
use crate::hooks::use_area_distribution::use_area_distribution;
use crate::hooks::use_by_apartment::use_by_apartment;
use crate::hooks::use_by_area::use_by_area;
use crate::hooks::use_gap_investment::use_gap_investment;
use crate::hooks::use_market_summary::use_market_summary;
use crate::hooks::use_price_trend::use_price_trend;
use crate::hooks::use_query::EngineHandle;
use crate::hooks::use_regional_stats::use_regional_stats;
use crate::hooks::use_rent_ratio::use_rent_ratio;
use crate::hooks::use_rental_yield::use_rental_yield;
use crate::models::error::AppError;
use crate::models::filters::AnalysisFilters;
use crate::models::subscription::Feature;
use crate::services::api::TokenStore;
use crate::services::engine::QueryEngine;
use crate::services::health::health_json;
use crate::utils::format::format_price;

#[function_component(App)]
pub fn app() -> Html {
    let engine = use_state(|| -> Result<EngineHandle, AppError> {
        let config = AppConfig::from_env().unwrap_or_else(|e| {
            gloo::console::error!(&format!("Bad build configuration: {e}"));
            AppConfig::default()
        });

        // The hosting layer serves this payload as the liveness probe.
        if let Ok(health) = health_json(&config, Utc::now()) {
            gloo::console::info!(&health);
        }

        let engine = QueryEngine::new(config, TokenStore::new())?;
        Ok(EngineHandle(Rc::new(engine)))
    });

    match &*engine {
        Ok(handle) => html! {
            <ContextProvider<EngineHandle> context={handle.clone()}>
                <AuthProvider>
                    <SubscriptionProvider>
                        <Dashboard />
                    </SubscriptionProvider>
                </AuthProvider>
            </ContextProvider<EngineHandle>>
        },
        Err(e) => html! {
            <div class="status error">
                <p>{"앱을 시작할 수 없습니다: "}{e.to_string()}</p>
            </div>
        },
    }
}

#[function_component(Dashboard)]
fn dashboard() -> Html {
    let filters = use_state(|| AnalysisFilters {
        months_back: Some(6),
        ..AnalysisFilters::default()
    });
    let current = (*filters).clone();

    let on_filters_change = {
        let filters = filters.clone();
        Callback::from(move |next: AnalysisFilters| filters.set(next))
    };

    let summary = use_market_summary(&current);
    let regional = use_regional_stats(&current);
    let trend = use_price_trend(&current);
    let distribution = use_area_distribution(&current);
    let by_area = use_by_area(&current);
    let apartments = use_by_apartment(&current);
    let ratios = use_rent_ratio(&current);
    let yields = use_rental_yield(&current);
    let gap = use_gap_investment(&current);

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"아파트 실거래 분석"}</h1>
                <AuthPanel />
            </header>

            <main class="app-main">
                <section class="filter-section">
                    <FilterBar filters={current.clone()} on_change={on_filters_change} />
                </section>

                <section class="summary-section">
                    <Status is_loading={summary.is_loading} error={summary.error.clone()} />
                    if let Some(summary) = summary.data() {
                        <MarketSummaryCards summary={summary.clone()} />
                    }
                </section>

                <section class="chart-section">
                    <h2>{"지역별 시세"}</h2>
                    <Status is_loading={regional.is_loading} error={regional.error.clone()} />
                    if let Some(stats) = regional.data() {
                        <RegionalPriceChart stats={stats.clone()} />
                    }
                </section>

                <section class="chart-section">
                    <h2>{"가격 추이"}</h2>
                    <Status is_loading={trend.is_loading} error={trend.error.clone()} />
                    if let Some(trend) = trend.data() {
                        <PriceTrendChart trend={trend.clone()} />
                    }
                </section>

                <section class="chart-section">
                    <h2>{"면적대별 분석"}</h2>
                    <Status is_loading={distribution.is_loading} error={distribution.error.clone()} />
                    if let Some(distribution) = distribution.data() {
                        <AreaDistributionChart distribution={distribution.clone()} />
                    }
                    if let Some(by_area) = by_area.data() {
                        <table class="data-table">
                            <thead>
                                <tr>
                                    <th>{"면적대"}</th>
                                    <th>{"거래건수"}</th>
                                    <th>{"평균 매매가"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {
                                    by_area.iter().map(|band| html! {
                                        <tr key={band.band.clone()}>
                                            <td>{&band.band}</td>
                                            <td>{band.count}</td>
                                            <td>{format_price(band.avg_price)}</td>
                                        </tr>
                                    }).collect::<Html>()
                                }
                            </tbody>
                        </table>
                    }
                </section>

                <section class="chart-section">
                    <h2>{"전월세 비율"}</h2>
                    <Status is_loading={ratios.is_loading} error={ratios.error.clone()} />
                    if let Some(ratios) = ratios.data() {
                        <RentRatioChart ratios={ratios.clone()} />
                    }
                </section>

                <section class="table-section">
                    <h2>{"단지별 실거래"}</h2>
                    <Status is_loading={apartments.is_loading} error={apartments.error.clone()} />
                    if let Some(apartments) = apartments.data() {
                        <ApartmentTable stats={apartments.clone()} />
                    }
                </section>

                <section class="table-section">
                    <h2>{"임대 수익률"}</h2>
                    <Status is_loading={yields.is_loading} error={yields.error.clone()} />
                    if let Some(yields) = yields.data() {
                        if yields.is_empty() {
                            <div class="table-placeholder"><p>{"데이터가 없습니다"}</p></div>
                        } else {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"지역"}</th>
                                        <th>{"연 수익률"}</th>
                                        <th>{"평균 매매가"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {
                                        yields.iter().map(|point| html! {
                                            <tr key={point.region.clone()}>
                                                <td>{&point.region}</td>
                                                <td>{format!("{:.1}%", point.gross_yield * 100.0)}</td>
                                                <td>{format_price(point.avg_price)}</td>
                                            </tr>
                                        }).collect::<Html>()
                                    }
                                </tbody>
                            </table>
                        }
                    }
                </section>

                <section class="table-section">
                    <h2>{"갭투자 시그널"}</h2>
                    <PremiumGate feature={Feature::GapSignals}>
                        <Status is_loading={gap.is_loading} error={gap.error.clone()} />
                        if let Some(gap) = gap.data() {
                            <GapTable opportunities={gap.clone()} />
                        }
                    </PremiumGate>
                </section>

                <section class="export-section">
                    <PremiumGate feature={Feature::PdfExport}>
                        <ExportButton filters={current.clone()} />
                    </PremiumGate>
                </section>
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}
