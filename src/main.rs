use apt_insight::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
