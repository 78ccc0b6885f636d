mod components;
mod config;
mod geometry;
mod hit;
mod measure;
mod model;
mod render;
mod state;
mod util;

use components::app::App;

fn main() {
    util::init_logging(log::LevelFilter::Info);
    yew::Renderer::<App>::new().render();
}
