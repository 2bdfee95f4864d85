use std::rc::Rc;
use yew::prelude::*;

use crate::models::analysis::ApartmentStats;
use crate::utils::format::{format_area, format_price};

#[derive(Properties, PartialEq)]
pub struct ApartmentTableProps {
    pub stats: Rc<ApartmentStats>,
}

/// Per-complex aggregates as a plain table.
#[function_component(ApartmentTable)]
pub fn apartment_table(props: &ApartmentTableProps) -> Html {
    if props.stats.is_empty() {
        return html! { <div class="table-placeholder"><p>{"데이터가 없습니다"}</p></div> };
    }

    html! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>{"단지명"}</th>
                    <th>{"지역"}</th>
                    <th>{"평균 매매가"}</th>
                    <th>{"거래건수"}</th>
                    <th>{"평균 전용면적"}</th>
                </tr>
            </thead>
            <tbody>
                {
                    props.stats.iter().map(|row| html! {
                        <tr key={row.name.clone()}>
                            <td>{&row.name}</td>
                            <td>{&row.region}</td>
                            <td>{format_price(row.avg_price)}</td>
                            <td>{row.count}</td>
                            <td>{format_area(row.avg_area)}</td>
                        </tr>
                    }).collect::<Html>()
                }
            </tbody>
        </table>
    }
}
