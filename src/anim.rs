//! Entrance animation: a cancellable scale/opacity tween driven by
//! requestAnimationFrame timestamps.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::HtmlElement;

/// Back-out easing: decelerates past 1, then settles back.
/// `overshoot` controls how far past 1 the curve peaks.
pub fn back_out(t: f64, overshoot: f64) -> f64 {
    let u = t - 1.0;
    u * u * ((overshoot + 1.0) * u + overshoot) + 1.0
}

struct TweenShared {
    el: HtmlElement,
    duration_ms: f64,
    delay_ms: f64,
    overshoot: f64,
    /// Timestamp of the first frame; the delay counts from here.
    start: Cell<Option<f64>>,
    frame: RefCell<Option<AnimationFrame>>,
}

/// One-shot entrance tween. Dropping the handle cancels the pending frame,
/// leaving the element at whatever state it last reached.
pub struct Tween {
    shared: Rc<TweenShared>,
}

impl Tween {
    /// Animate `el` from `scale(0)`/transparent to full size and opacity.
    /// The element is put in its initial state immediately; motion begins
    /// after `delay_ms`.
    pub fn scale_in(el: &HtmlElement, duration_ms: f64, delay_ms: f64, overshoot: f64) -> Self {
        let shared = Rc::new(TweenShared {
            el: el.clone(),
            duration_ms: duration_ms.max(1.0),
            delay_ms: delay_ms.max(0.0),
            overshoot,
            start: Cell::new(None),
            frame: RefCell::new(None),
        });
        Self::apply(&shared.el, 0.0);
        Self::schedule(&shared);
        Self { shared }
    }

    fn schedule(shared: &Rc<TweenShared>) {
        let next = shared.clone();
        let handle = request_animation_frame(move |ts| Self::step(next, ts));
        *shared.frame.borrow_mut() = Some(handle);
    }

    fn step(shared: Rc<TweenShared>, ts: f64) {
        shared.frame.borrow_mut().take();
        let start = match shared.start.get() {
            Some(s) => s,
            None => {
                shared.start.set(Some(ts));
                ts
            }
        };
        let elapsed = ts - start - shared.delay_ms;
        if elapsed >= shared.duration_ms {
            Self::apply(&shared.el, 1.0);
            return;
        }
        if elapsed >= 0.0 {
            let eased = back_out(elapsed / shared.duration_ms, shared.overshoot);
            Self::apply(&shared.el, eased);
        }
        Self::schedule(&shared);
    }

    // Scale follows the eased value through the overshoot; opacity is the
    // same curve clamped to its valid range.
    fn apply(el: &HtmlElement, value: f64) {
        let style = el.style();
        let _ = style.set_property("transform", &format!("scale({value:.4})"));
        let _ = style.set_property("opacity", &format!("{:.4}", value.clamp(0.0, 1.0)));
    }
}

impl Drop for Tween {
    fn drop(&mut self) {
        self.shared.frame.borrow_mut().take();
    }
}
