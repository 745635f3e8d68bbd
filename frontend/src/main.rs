use crate::app::App;

mod app;
mod components;
mod renderer;

fn main() {
    yew::Renderer::<App>::new().render();
}
