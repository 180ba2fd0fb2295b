// Pan state for the draggable canvas: drag deltas, clamping, glide.

/// Allowed displacement window for the canvas, relative to its rest position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn centered(extent: f64) -> Self {
        Self {
            min_x: -extent,
            min_y: -extent,
            max_x: extent,
            max_y: extent,
        }
    }

    fn clamp_x(&self, x: f64) -> f64 {
        x.clamp(self.min_x, self.max_x)
    }

    fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.min_y, self.max_y)
    }
}

/// Velocity decay factor per 60Hz frame during a glide.
const GLIDE_DECAY: f64 = 0.95;
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Below this speed (px/ms) a glide is considered settled.
const MIN_GLIDE_SPEED: f64 = 0.02;
/// Glide frames longer than this are treated as this long (tab was hidden).
const MAX_GLIDE_DT_MS: f64 = 50.0;
/// Weight of the newest sample in the velocity estimate.
const VELOCITY_BLEND: f64 = 0.8;

/// Canvas pan offset plus drag/glide bookkeeping.
///
/// All inputs are pointer positions and event timestamps in ms; the struct
/// never touches the DOM, so the full drag contract is host-testable.
#[derive(Debug, Clone)]
pub struct Pan {
    pub x: f64,
    pub y: f64,
    pub dragging: bool,
    bounds: Bounds,
    resistance: f64,
    last_x: f64,
    last_y: f64,
    last_t: f64,
    vx: f64,
    vy: f64,
    glide_t: Option<f64>,
}

impl Pan {
    pub fn new(bounds: Bounds, resistance: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            dragging: false,
            bounds,
            resistance,
            last_x: 0.0,
            last_y: 0.0,
            last_t: 0.0,
            vx: 0.0,
            vy: 0.0,
            glide_t: None,
        }
    }

    pub fn begin(&mut self, px: f64, py: f64, now_ms: f64) {
        self.dragging = true;
        self.last_x = px;
        self.last_y = py;
        self.last_t = now_ms;
        self.vx = 0.0;
        self.vy = 0.0;
        self.glide_t = None;
    }

    /// Apply a pointer move. The raw delta is damped by the resistance factor
    /// and the resulting offset clamped to the bounds.
    pub fn drag_to(&mut self, px: f64, py: f64, now_ms: f64) {
        if !self.dragging {
            return;
        }
        let dx = (px - self.last_x) * (1.0 - self.resistance);
        let dy = (py - self.last_y) * (1.0 - self.resistance);
        self.last_x = px;
        self.last_y = py;
        self.x = self.bounds.clamp_x(self.x + dx);
        self.y = self.bounds.clamp_y(self.y + dy);

        let dt = now_ms - self.last_t;
        if dt > 0.0 {
            self.vx = VELOCITY_BLEND * (dx / dt) + (1.0 - VELOCITY_BLEND) * self.vx;
            self.vy = VELOCITY_BLEND * (dy / dt) + (1.0 - VELOCITY_BLEND) * self.vy;
            self.last_t = now_ms;
        }
    }

    pub fn end(&mut self) {
        self.dragging = false;
        self.glide_t = None;
    }

    fn speed(&self) -> f64 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// Whether release should start a glide at all.
    pub fn moving(&self) -> bool {
        self.speed() > MIN_GLIDE_SPEED
    }

    /// Advance one glide frame. Returns false once the glide has settled.
    ///
    /// A bound hit zeroes the velocity on that axis, so an overshooting fling
    /// comes to rest exactly on the bound.
    pub fn glide_step(&mut self, now_ms: f64) -> bool {
        let dt = match self.glide_t {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_GLIDE_DT_MS),
            None => 0.0,
        };
        self.glide_t = Some(now_ms);
        if dt <= 0.0 {
            // First frame only records the timestamp.
            return true;
        }

        let nx = self.x + self.vx * dt;
        let ny = self.y + self.vy * dt;
        let cx = self.bounds.clamp_x(nx);
        let cy = self.bounds.clamp_y(ny);
        if cx != nx {
            self.vx = 0.0;
        }
        if cy != ny {
            self.vy = 0.0;
        }
        self.x = cx;
        self.y = cy;

        let k = GLIDE_DECAY.powf(dt / FRAME_MS);
        self.vx *= k;
        self.vy *= k;
        self.speed() > MIN_GLIDE_SPEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pan() -> Pan {
        Pan::new(Bounds::centered(500.0), 0.1)
    }

    #[test]
    fn resistance_damps_raw_movement() {
        let mut p = pan();
        p.begin(0.0, 0.0, 0.0);
        p.drag_to(100.0, 0.0, 16.0);
        assert_eq!(p.x, 90.0);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn drag_is_clamped_to_the_bounds() {
        let mut p = pan();
        p.begin(0.0, 0.0, 0.0);
        p.drag_to(10_000.0, -10_000.0, 16.0);
        assert_eq!(p.x, 500.0);
        assert_eq!(p.y, -500.0);
    }

    #[test]
    fn ignores_moves_when_not_dragging() {
        let mut p = pan();
        p.drag_to(100.0, 100.0, 16.0);
        assert_eq!((p.x, p.y), (0.0, 0.0));
    }

    #[test]
    fn fast_release_glides_and_settles_within_bounds() {
        let mut p = pan();
        p.begin(0.0, 0.0, 0.0);
        p.drag_to(120.0, 0.0, 16.0);
        p.drag_to(240.0, 0.0, 32.0);
        p.end();
        assert!(p.moving());

        let mut t = 32.0;
        let mut frames = 0;
        loop {
            t += 16.0;
            frames += 1;
            assert!(frames < 10_000, "glide never settled");
            if !p.glide_step(t) {
                break;
            }
        }
        assert!(!p.moving());
        assert!(p.x > 216.0, "glide should carry past the release point");
        assert!(p.x <= 500.0 && p.y.abs() <= 500.0);
    }

    #[test]
    fn glide_into_a_bound_stops_exactly_on_it() {
        let mut p = pan();
        p.begin(0.0, 0.0, 0.0);
        // Two fast strokes toward +x leave x at 360 with a high velocity.
        p.drag_to(200.0, 0.0, 16.0);
        p.drag_to(400.0, 0.0, 32.0);
        p.end();

        let mut t = 32.0;
        while p.glide_step(t + 16.0) {
            t += 16.0;
        }
        assert_eq!(p.x, 500.0);
    }

    #[test]
    fn slow_release_does_not_glide() {
        let mut p = pan();
        p.begin(0.0, 0.0, 0.0);
        p.drag_to(1.0, 0.0, 1000.0);
        p.end();
        assert!(!p.moving());
    }
}
