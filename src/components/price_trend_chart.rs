use charming::{
    Chart as CharmingChart,
    component::{Axis, Grid, Title},
    element::{
        AreaStyle, AxisLabel, AxisType, ItemStyle, LineStyle, LineStyleType, SplitLine, TextStyle,
        Tooltip, Trigger,
    },
    renderer::WasmRenderer,
    series::Line,
};
use gloo::events::EventListener;
use std::rc::Rc;
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::models::analysis::PriceTrend;

const CHART_ID: &str = "price-trend-chart";

#[derive(Properties, PartialEq)]
pub struct PriceTrendChartProps {
    pub trend: Rc<PriceTrend>,
}

/// Monthly market average over the filtered window.
#[function_component(PriceTrendChart)]
pub fn price_trend_chart(props: &PriceTrendChartProps) -> Html {
    let container_ref = use_node_ref();
    let series_data = use_memo(props.trend.clone(), |trend| trend.series_data());

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

    if props.trend.is_empty() {
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
    let y_eok: Vec<f64> = y_data.iter().map(|p| p / 10_000.0).collect();

    CharmingChart::new()
        .title(
            Title::new()
                .text("매매가 추이")
                .left("center")
                .text_style(TextStyle::new().font_size(16).color("#1f2937")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("8%")
                .right("4%")
                .bottom("14%")
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
                .name("억원")
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
            Line::new()
                .data(y_eok)
                .smooth(0.3)
                .item_style(ItemStyle::new().color("#00b4a0"))
                .area_style(AreaStyle::new().color("#00b4a01a")),
        )
}
