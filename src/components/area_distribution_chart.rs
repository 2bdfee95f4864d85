use charming::{
    Chart as CharmingChart,
    component::{Legend, Title},
    element::{Color, TextStyle, Tooltip, Trigger},
    renderer::WasmRenderer,
    series::Pie,
};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::models::analysis::AreaDistribution;

const CHART_ID: &str = "area-distribution-chart";

const PALETTE: [&str; 6] = [
    "#00b4a0", "#648fff", "#785ef0", "#dc267f", "#fe6100", "#ffb000",
];

#[derive(Properties, PartialEq)]
pub struct AreaDistributionChartProps {
    pub distribution: Rc<AreaDistribution>,
}

/// Transaction share per floor-area band.
#[function_component(AreaDistributionChart)]
pub fn area_distribution_chart(props: &AreaDistributionChartProps) -> Html {
    let container_ref = use_node_ref();
    let pie_data = use_memo(props.distribution.clone(), |distribution| {
        distribution.pie_data()
    });

    {
        let container_ref = container_ref.clone();

        use_effect_with((pie_data, container_ref), |(pie_data, container_ref)| {
            let listener = container_ref.cast::<HtmlElement>().map(|container| {
                render_chart(&container, pie_data);

                let pie_data = pie_data.clone();
                EventListener::new(&web_sys::window().unwrap(), "resize", move |_| {
                    render_chart(&container, &pie_data);
                })
            });

            move || drop(listener)
        });
    }

    if props.distribution.is_empty() {
        return html! { <div class="chart-placeholder"><p>{"데이터가 없습니다"}</p></div> };
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={CHART_ID} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, pie_data: &[(f64, String)]) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    let chart = build_chart(pie_data);
    if let Err(e) = WasmRenderer::new(width, height).render(CHART_ID, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

fn build_chart(pie_data: &[(f64, String)]) -> CharmingChart {
    let palette: Vec<Color> = PALETTE.iter().map(|c| Color::from(*c)).collect();
    let data: Vec<(f64, &str)> = pie_data
        .iter()
        .map(|(value, band)| (*value, band.as_str()))
        .collect();

    CharmingChart::new()
        .title(
            Title::new()
                .text("면적대별 거래 비중")
                .left("center")
                .text_style(TextStyle::new().font_size(16).color("#1f2937")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom("0"))
        .color(palette)
        .series(Pie::new().radius("62%").data(data))
}
