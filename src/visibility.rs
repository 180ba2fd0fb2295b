//! Viewport visibility tracker: a registry of tile elements and the set of
//! ids whose bounding rects overlap the inflated viewport.
//!
//! Recomputation is coalesced to one pass per animation frame. The visible
//! set is replaced wholesale on every pass. Nothing at the composition root
//! consumes it yet; the capability is kept for future interactivity.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use web_sys::HtmlElement;

use crate::state::{visible_ids, Rect};

/// Bounded retry for the first check, in case layout has not settled yet.
const INITIAL_ATTEMPTS: u32 = 5;
const INITIAL_KICK_MS: u32 = 50;
const RETRY_STEP_MS: u32 = 100;

struct TrackerShared {
    radius: f64,
    items: RefCell<HashMap<u32, HtmlElement>>,
    visible: RefCell<HashSet<u32>>,
    frame: RefCell<Option<AnimationFrame>>,
    retry: RefCell<Option<Timeout>>,
    attempts: Cell<u32>,
}

/// Owns the id→element registry and the visible-id set.
pub struct VisibilityTracker {
    shared: Rc<TrackerShared>,
    _listeners: Vec<EventListener>,
}

impl VisibilityTracker {
    /// Build a tracker whose viewport rect is inflated by `radius` on all
    /// sides. Scroll and resize trigger a recompute; the first check runs
    /// shortly after construction and retries while nothing is visible.
    pub fn new(radius: f64) -> Self {
        let shared = Rc::new(TrackerShared {
            radius,
            items: RefCell::new(HashMap::new()),
            visible: RefCell::new(HashSet::new()),
            frame: RefCell::new(None),
            retry: RefCell::new(None),
            attempts: Cell::new(0),
        });

        let mut listeners = Vec::new();
        if let Some(window) = web_sys::window() {
            for kind in ["scroll", "resize"] {
                let s = shared.clone();
                listeners.push(EventListener::new(&window, kind, move |_event| {
                    Self::schedule_check(&s);
                }));
            }
        }

        {
            let s = shared.clone();
            *shared.retry.borrow_mut() =
                Some(Timeout::new(INITIAL_KICK_MS, move || Self::initial_check(s)));
        }

        Self {
            shared,
            _listeners: listeners,
        }
    }

    /// Add or remove a tile's element. `None` unregisters the id and drops it
    /// from the visible set. Either way a recompute is scheduled.
    pub fn register(&self, id: u32, el: Option<HtmlElement>) {
        match el {
            Some(el) => {
                self.shared.items.borrow_mut().insert(id, el);
            }
            None => {
                self.shared.items.borrow_mut().remove(&id);
                self.shared.visible.borrow_mut().remove(&id);
            }
        }
        Self::schedule_check(&self.shared);
    }

    pub fn is_visible(&self, id: u32) -> bool {
        self.shared.visible.borrow().contains(&id)
    }

    pub fn visible_snapshot(&self) -> HashSet<u32> {
        self.shared.visible.borrow().clone()
    }

    /// Run one recompute synchronously, bypassing the frame coalescing.
    pub fn check_now(&self) {
        Self::check(&self.shared);
    }

    fn schedule_check(shared: &Rc<TrackerShared>) {
        if shared.frame.borrow().is_some() {
            return;
        }
        let s = shared.clone();
        let handle = request_animation_frame(move |_ts| {
            s.frame.borrow_mut().take();
            Self::check(&s);
        });
        *shared.frame.borrow_mut() = Some(handle);
    }

    fn check(shared: &Rc<TrackerShared>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let vw = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let vh = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let viewport = Rect::new(0.0, 0.0, vw, vh);

        let next = {
            let items = shared.items.borrow();
            visible_ids(
                items.iter().map(|(id, el)| {
                    let r = el.get_bounding_client_rect();
                    (*id, Rect::new(r.left(), r.top(), r.right(), r.bottom()))
                }),
                viewport,
                shared.radius,
            )
        };

        let mut visible = shared.visible.borrow_mut();
        if *visible != next {
            gloo::console::debug!("visible tiles:", next.len() as u32);
            *visible = next;
        }
    }

    fn initial_check(shared: Rc<TrackerShared>) {
        let attempt = shared.attempts.get() + 1;
        shared.attempts.set(attempt);
        Self::check(&shared);
        if shared.visible.borrow().is_empty() && attempt < INITIAL_ATTEMPTS {
            let s = shared.clone();
            *shared.retry.borrow_mut() = Some(Timeout::new(RETRY_STEP_MS * attempt, move || {
                Self::initial_check(s)
            }));
        } else {
            shared.retry.borrow_mut().take();
        }
    }
}

impl Drop for VisibilityTracker {
    fn drop(&mut self) {
        self.shared.frame.borrow_mut().take();
        self.shared.retry.borrow_mut().take();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fixed_div(left: f64, top: f64, size: f64) -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let el: HtmlElement = document
            .create_element("div")
            .unwrap()
            .dyn_into()
            .unwrap();
        let style = el.style();
        style.set_property("position", "fixed").unwrap();
        style.set_property("left", &format!("{left}px")).unwrap();
        style.set_property("top", &format!("{top}px")).unwrap();
        style.set_property("width", &format!("{size}px")).unwrap();
        style.set_property("height", &format!("{size}px")).unwrap();
        document.body().unwrap().append_child(&el).unwrap();
        el
    }

    fn remove(el: &HtmlElement) {
        el.remove();
    }

    #[wasm_bindgen_test]
    fn onscreen_tile_is_visible_after_first_check() {
        let tracker = VisibilityTracker::new(100.0);
        let el = fixed_div(10.0, 10.0, 40.0);
        tracker.register(1, Some(el.clone()));
        tracker.check_now();
        assert!(tracker.is_visible(1));
        remove(&el);
    }

    #[wasm_bindgen_test]
    fn tile_beyond_the_radius_is_excluded() {
        let tracker = VisibilityTracker::new(100.0);
        let el = fixed_div(-10_000.0, 10.0, 40.0);
        tracker.register(2, Some(el.clone()));
        tracker.check_now();
        assert!(!tracker.is_visible(2));
        remove(&el);
    }

    #[wasm_bindgen_test]
    fn visible_set_shrinks_when_a_tile_leaves() {
        let tracker = VisibilityTracker::new(100.0);
        let el = fixed_div(10.0, 10.0, 40.0);
        tracker.register(3, Some(el.clone()));
        tracker.check_now();
        assert!(tracker.is_visible(3));

        el.style().set_property("left", "-10000px").unwrap();
        tracker.check_now();
        assert!(!tracker.is_visible(3));
        remove(&el);
    }

    #[wasm_bindgen_test]
    fn unregistering_removes_the_id() {
        let tracker = VisibilityTracker::new(100.0);
        let el = fixed_div(10.0, 10.0, 40.0);
        tracker.register(4, Some(el.clone()));
        tracker.check_now();
        assert!(tracker.is_visible(4));

        tracker.register(4, None);
        assert!(!tracker.is_visible(4));
        assert!(tracker.visible_snapshot().is_empty());
        remove(&el);
    }
}
