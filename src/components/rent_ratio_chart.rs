use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, LineStyle, LineStyleType,
        SplitLine, TextStyle, Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::Bar,
};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::models::analysis::RentRatios;

const CHART_ID: &str = "rent-ratio-chart";

#[derive(Properties, PartialEq)]
pub struct RentRatioChartProps {
    pub ratios: Rc<RentRatios>,
}

/// Jeonse deposit as a share of sale price, per district. High ratios mean
/// a small gap between deposit and price.
#[function_component(RentRatioChart)]
pub fn rent_ratio_chart(props: &RentRatioChartProps) -> Html {
    let container_ref = use_node_ref();
    let series_data = use_memo(props.ratios.clone(), |ratios| ratios.series_data());

    {
        let container_ref = container_ref.clone();

        use_effect_with((series_data, container_ref), |(series_data, container_ref)| {
            let listener = container_ref.cast::<HtmlElement>().map(|container| {
                render_chart(&container, series_data);

                let series_data = series_data.clone();
                EventListener::new(&web_sys::window().unwrap(), "resize", move |_| {
                    render_chart(&container, &series_data);
                })
            });

            move || drop(listener)
        });
    }

    if props.ratios.is_empty() {
        return html! { <div class="chart-placeholder"><p>{"데이터가 없습니다"}</p></div> };
    }

    html! {
        <div class="chart-container" ref={container_ref}>
            <div id={CHART_ID} />
        </div>
    }
}

fn render_chart(container: &HtmlElement, series_data: &(Vec<String>, Vec<f64>)) {
    let width = container.client_width().cast_unsigned();
    let height = container.client_height().cast_unsigned();

    if width == 0 || height == 0 {
        return;
    }

    let chart = build_chart(series_data);
    if let Err(e) = WasmRenderer::new(width, height).render(CHART_ID, &chart) {
        web_sys::console::error_1(&format!("Render error: {e:?}").into());
    }
}

fn build_chart(series_data: &(Vec<String>, Vec<f64>)) -> CharmingChart {
    let (x_data, y_data) = series_data;

    CharmingChart::new()
        .title(
            Title::new()
                .text("지역별 전세가율")
                .left("center")
                .text_style(TextStyle::new().font_size(16).color("#1f2937")),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("8%")
                .right("4%")
                .bottom("18%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(x_data.clone())
                .axis_label(AxisLabel::new().rotate(45).color("#6b7280")),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name("%")
                .axis_label(AxisLabel::new().color("#6b7280"))
                .split_line(
                    SplitLine::new().line_style(
                        LineStyle::new()
                            .color("#e5e7eb")
                            .type_(LineStyleType::Dashed),
                    ),
                ),
        )
        .series(
            Bar::new()
                .data(y_data.clone())
                .bar_width("60%")
                .item_style(ItemStyle::new().color("#785ef0")),
        )
}
