//! Draggable pan controller: wires a container element to pointer input with
//! bounded travel and post-release inertia.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MouseEvent, TouchEvent};

use crate::state::{Bounds, Pan};

struct DragShared {
    el: HtmlElement,
    pan: RefCell<Pan>,
    frame: RefCell<Option<AnimationFrame>>,
    inertia: bool,
}

/// Handle for an active drag binding.
///
/// Dropping it removes every listener and cancels a glide in flight, so
/// re-initialization is: drop the old handle, call [`make_draggable`] again.
pub struct Draggable {
    _listeners: Vec<EventListener>,
    shared: Rc<DragShared>,
}

impl Drop for Draggable {
    fn drop(&mut self) {
        self.shared.frame.borrow_mut().take();
    }
}

/// Enable free 2-axis dragging of `el` via its CSS transform.
///
/// Pointer movement is damped by `resistance`, the offset is clamped to
/// `bounds`, and with `inertia` a fast release keeps gliding until the
/// velocity decays or a bound is hit. Single-finger touch drags behave like
/// mouse drags; multi-touch is ignored.
pub fn make_draggable(el: &HtmlElement, bounds: Bounds, inertia: bool, resistance: f64) -> Draggable {
    let shared = Rc::new(DragShared {
        el: el.clone(),
        pan: RefCell::new(Pan::new(bounds, resistance)),
        frame: RefCell::new(None),
        inertia,
    });
    let active = EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    };
    let mut listeners = Vec::new();

    {
        let s = shared.clone();
        listeners.push(EventListener::new_with_options(
            el,
            "mousedown",
            active,
            move |event| {
                let Some(e) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if e.button() != 0 {
                    return;
                }
                e.prevent_default();
                begin(&s, e.client_x() as f64, e.client_y() as f64, event.time_stamp());
            },
        ));
    }

    // Move/up live on the window so a drag survives leaving the element.
    if let Some(window) = web_sys::window() {
        let s = shared.clone();
        listeners.push(EventListener::new(&window, "mousemove", move |event| {
            let Some(e) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            drag(&s, e.client_x() as f64, e.client_y() as f64, event.time_stamp());
        }));

        let s = shared.clone();
        listeners.push(EventListener::new(&window, "mouseup", move |_event| {
            release(&s);
        }));
    }

    {
        let s = shared.clone();
        listeners.push(EventListener::new(el, "touchstart", move |event| {
            let Some(e) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            if e.touches().length() != 1 {
                return;
            }
            let Some(t) = e.touches().item(0) else {
                return;
            };
            begin(&s, t.client_x() as f64, t.client_y() as f64, event.time_stamp());
        }));
    }
    {
        let s = shared.clone();
        listeners.push(EventListener::new_with_options(
            el,
            "touchmove",
            active,
            move |event| {
                let Some(e) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                if e.touches().length() != 1 || !s.pan.borrow().dragging {
                    return;
                }
                let Some(t) = e.touches().item(0) else {
                    return;
                };
                // Keep the page from scrolling while the canvas pans.
                event.prevent_default();
                drag(&s, t.client_x() as f64, t.client_y() as f64, event.time_stamp());
            },
        ));
    }
    for kind in ["touchend", "touchcancel"] {
        let s = shared.clone();
        listeners.push(EventListener::new(el, kind, move |_event| {
            release(&s);
        }));
    }

    Draggable {
        _listeners: listeners,
        shared,
    }
}

fn begin(s: &Rc<DragShared>, px: f64, py: f64, ts: f64) {
    // A new grab cancels any glide still running.
    s.frame.borrow_mut().take();
    s.pan.borrow_mut().begin(px, py, ts);
}

fn drag(s: &Rc<DragShared>, px: f64, py: f64, ts: f64) {
    let (x, y, dragging) = {
        let mut pan = s.pan.borrow_mut();
        pan.drag_to(px, py, ts);
        (pan.x, pan.y, pan.dragging)
    };
    if dragging {
        apply_transform(&s.el, x, y);
    }
}

fn release(s: &Rc<DragShared>) {
    let glide = {
        let mut pan = s.pan.borrow_mut();
        if !pan.dragging {
            return;
        }
        pan.end();
        s.inertia && pan.moving()
    };
    if glide {
        schedule_glide(s);
    }
}

fn schedule_glide(s: &Rc<DragShared>) {
    let next = s.clone();
    let handle = request_animation_frame(move |ts| glide_frame(next, ts));
    *s.frame.borrow_mut() = Some(handle);
}

fn glide_frame(s: Rc<DragShared>, ts: f64) {
    s.frame.borrow_mut().take();
    let (x, y, keep) = {
        let mut pan = s.pan.borrow_mut();
        let keep = pan.glide_step(ts);
        (pan.x, pan.y, keep)
    };
    apply_transform(&s.el, x, y);
    if keep {
        schedule_glide(&s);
    }
}

fn apply_transform(el: &HtmlElement, x: f64, y: f64) {
    let _ = el
        .style()
        .set_property("transform", &format!("translate3d({x:.2}px, {y:.2}px, 0)"));
}
