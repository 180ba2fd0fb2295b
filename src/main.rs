mod anim;
mod components;
mod drag;
mod model;
mod state;
mod util;
mod visibility;

use components::app::App;

fn main() {
    yew::Renderer::<App>::new().render();
}
