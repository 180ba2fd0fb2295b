use web_sys::HtmlElement;
use yew::prelude::*;

use crate::anim::Tween;
use crate::model::{Tile, ENTRANCE_DELAY_MAX_MS, ENTRANCE_DURATION_MS, ENTRANCE_OVERSHOOT};

#[derive(Properties, PartialEq, Clone)]
pub struct TileNodeProps {
    pub tile: Tile,
    pub on_hover_enter: Callback<u32>,
    pub on_hover_leave: Callback<()>,
    /// `(id, Some(element))` on mount, `(id, None)` on unmount.
    pub register: Callback<(u32, Option<HtmlElement>)>,
}

/// One positioned glyph tile. Plays a one-shot entrance tween on mount and
/// registers its element with the visibility tracker; unmounting cancels the
/// tween and unregisters.
#[function_component(TileNode)]
pub fn tile_node(props: &TileNodeProps) -> Html {
    let node_ref = use_node_ref();

    {
        let node_ref = node_ref.clone();
        let register = props.register.clone();
        let id = props.tile.id;
        use_effect_with((), move |_| {
            let mut tween = None;
            if let Some(el) = node_ref.cast::<HtmlElement>() {
                register.emit((id, Some(el.clone())));
                let delay = js_sys::Math::random() * ENTRANCE_DELAY_MAX_MS;
                tween = Some(Tween::scale_in(
                    &el,
                    ENTRANCE_DURATION_MS,
                    delay,
                    ENTRANCE_OVERSHOOT,
                ));
            }
            move || {
                drop(tween);
                register.emit((id, None));
            }
        });
    }

    let onmouseenter = {
        let cb = props.on_hover_enter.clone();
        let id = props.tile.id;
        Callback::from(move |_: MouseEvent| cb.emit(id))
    };
    let onmouseleave = {
        let cb = props.on_hover_leave.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let t = &props.tile;
    let style = format!(
        "left:{}px; top:{}px; width:{}px; height:{}px; font-size:{}px; transform:scale(0); opacity:0;",
        t.x, t.y, t.size, t.size, t.font_size
    );
    html! {
        <div
            ref={node_ref}
            class="tile"
            data-tile-id={t.id.to_string()}
            {style}
            {onmouseenter}
            {onmouseleave}
        >
            { t.glyph }
        </div>
    }
}
