use std::rc::Rc;
use yew::prelude::*;

use crate::models::analysis::GapOpportunities;
use crate::utils::format::format_price;

#[derive(Properties, PartialEq)]
pub struct GapTableProps {
    pub opportunities: Rc<GapOpportunities>,
}

/// Gap-investment candidates: the gap column is the buyer's own capital
/// after the tenant's jeonse deposit.
#[function_component(GapTable)]
pub fn gap_table(props: &GapTableProps) -> Html {
    if props.opportunities.is_empty() {
        return html! { <div class="table-placeholder"><p>{"데이터가 없습니다"}</p></div> };
    }

    html! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>{"단지명"}</th>
                    <th>{"지역"}</th>
                    <th>{"매매가"}</th>
                    <th>{"전세가"}</th>
                    <th>{"갭"}</th>
                    <th>{"전세가율"}</th>
                </tr>
            </thead>
            <tbody>
                {
                    props.opportunities.iter().map(|row| html! {
                        <tr key={row.apartment.clone()}>
                            <td>{&row.apartment}</td>
                            <td>{&row.region}</td>
                            <td>{format_price(row.sale_price)}</td>
                            <td>{format_price(row.jeonse_price)}</td>
                            <td class="gap-value">{format_price(row.gap)}</td>
                            <td>{format!("{:.1}%", row.jeonse_ratio * 100.0)}</td>
                        </tr>
                    }).collect::<Html>()
                }
            </tbody>
        </table>
    }
}
