use std::rc::Rc;

use web_sys::HtmlElement;
use yew::prelude::*;

use super::tile::TileNode;
use crate::model::{tiles_differ, Tile};

#[derive(Properties, Clone)]
pub struct TileFieldProps {
    pub tiles: Rc<Vec<Tile>>,
    pub on_hover_enter: Callback<u32>,
    pub on_hover_leave: Callback<()>,
    pub register: Callback<(u32, Option<HtmlElement>)>,
}

// The re-render gate: only a positional change in the tile batch counts as a
// prop change. Callback identity is deliberately not compared.
impl PartialEq for TileFieldProps {
    fn eq(&self, other: &Self) -> bool {
        !tiles_differ(&self.tiles, &other.tiles)
    }
}

/// The keyed tile list.
#[function_component(TileField)]
pub fn tile_field(props: &TileFieldProps) -> Html {
    props
        .tiles
        .iter()
        .map(|tile| {
            html! {
                <TileNode
                    key={tile.id}
                    tile={tile.clone()}
                    on_hover_enter={props.on_hover_enter.clone()}
                    on_hover_leave={props.on_hover_leave.clone()}
                    register={props.register.clone()}
                />
            }
        })
        .collect::<Html>()
}
