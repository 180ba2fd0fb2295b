use web_sys::HtmlElement;
use yew::prelude::*;

use super::tile_field::TileField;
use crate::drag::make_draggable;
use crate::model::{generate_tiles, DRAG_BOUND, DRAG_RESISTANCE, VISIBILITY_RADIUS};
use crate::state::Bounds;
use crate::util::viewport_size;
use crate::visibility::VisibilityTracker;

/// Composition root: generates the tile batch once, mounts the drag
/// controller on the canvas, and owns the visibility tracker.
#[function_component(App)]
pub fn app() -> Html {
    let container_ref = use_node_ref();

    // One batch per mount, from the viewport size at mount time. Resize does
    // not regenerate; the pan buffer absorbs moderate size changes.
    let tiles = use_memo((), |_| {
        let (w, h) = viewport_size();
        generate_tiles(w, h, || js_sys::Math::random())
    });

    let tracker = use_mut_ref(|| VisibilityTracker::new(VISIBILITY_RADIUS));

    {
        let container_ref = container_ref.clone();
        use_effect_with((), move |_| {
            let drag = container_ref.cast::<HtmlElement>().map(|el| {
                make_draggable(&el, Bounds::centered(DRAG_BOUND), true, DRAG_RESISTANCE)
            });
            move || drop(drag)
        });
    }

    let register = {
        let tracker = tracker.clone();
        Callback::from(move |(id, el): (u32, Option<HtmlElement>)| {
            tracker.borrow().register(id, el);
        })
    };

    // Hover is surfaced per tile but nothing reacts to it yet.
    let on_hover_enter = Callback::from(|_id: u32| {});
    let on_hover_leave = Callback::from(|_: ()| {});

    html! {
        <div class="field-viewport">
            <div ref={container_ref} class="field-canvas">
                <TileField
                    tiles={tiles}
                    on_hover_enter={on_hover_enter}
                    on_hover_leave={on_hover_leave}
                    register={register}
                />
            </div>
        </div>
    }
}
