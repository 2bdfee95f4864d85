use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_query::use_engine;
use crate::models::filters::AnalysisFilters;
use crate::services::export::request_pdf_export;

#[derive(Clone, PartialEq)]
enum ExportState {
    Idle,
    Requesting,
    Ready(String),
    Failed(String),
}

#[derive(Properties, PartialEq)]
pub struct ExportButtonProps {
    pub filters: AnalysisFilters,
}

/// Requests a PDF report for the current filters. Rendered inside a
/// `PremiumGate`; the backend still enforces the entitlement.
#[function_component(ExportButton)]
pub fn export_button(props: &ExportButtonProps) -> Html {
    let engine = use_engine();
    let state = use_state(|| ExportState::Idle);

    let on_click = {
        let engine = engine.clone();
        let state = state.clone();
        let filters = props.filters.clone();
        Callback::from(move |_: MouseEvent| {
            let engine = engine.clone();
            let state = state.clone();
            let filters = filters.clone();
            state.set(ExportState::Requesting);
            spawn_local(async move {
                match request_pdf_export(engine.0.client(), &filters).await {
                    Ok(receipt) => state.set(ExportState::Ready(receipt.download_url)),
                    Err(e) => state.set(ExportState::Failed(e.to_string())),
                }
            });
        })
    };

    html! {
        <div class="export-panel">
            <button
                class="export-button"
                onclick={on_click}
                disabled={*state == ExportState::Requesting}
            >
                {"PDF 리포트 받기"}
            </button>
            {
                match &*state {
                    ExportState::Ready(url) => html! {
                        <a class="export-link" href={url.clone()} target="_blank">{"다운로드"}</a>
                    },
                    ExportState::Failed(message) => html! {
                        <span class="export-error">{"내보내기 실패: "}{message}</span>
                    },
                    _ => html! {},
                }
            }
        </div>
    }
}
