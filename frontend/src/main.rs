use crate::app::App;

mod api;
mod app;
mod components;
mod helpers;
mod share;

fn main() {
    yew::Renderer::<App>::new().render();
}
