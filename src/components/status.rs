use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub is_loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

/// Loading and error banner shared by every analysis section. Sections with
/// previous data keep rendering it underneath while a refetch is pending.
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    if let Some(error) = &props.error {
        return html! {
            <div class="status error">
                <p>{"오류: "}{error}</p>
            </div>
        };
    }

    if props.is_loading {
        return html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"데이터를 불러오는 중..."}</p>
            </div>
        };
    }

    html! {}
}
