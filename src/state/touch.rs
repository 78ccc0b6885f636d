// Two-finger pinch state.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct TouchState {
    pub pinch: bool,
    /// Finger distance at the last zoom step.
    pub last_dist: f64,
}

pub fn finger_span(a: (f64, f64), b: (f64, f64)) -> (f64, f64, f64) {
    let dist = (b.0 - a.0).hypot(b.1 - a.1).max(1.0);
    (dist, (a.0 + b.0) * 0.5, (a.1 + b.1) * 0.5)
}

impl TouchState {
    pub fn start(&mut self, a: (f64, f64), b: (f64, f64)) {
        self.pinch = true;
        self.last_dist = finger_span(a, b).0;
    }

    /// Returns `Some((zoom_in, mid_x, mid_y))` once the finger distance has
    /// changed by more than `step_px` since the last step.
    pub fn update(&mut self, a: (f64, f64), b: (f64, f64), step_px: f64) -> Option<(bool, f64, f64)> {
        if !self.pinch {
            return None;
        }
        let (dist, mx, my) = finger_span(a, b);
        let change = dist - self.last_dist;
        if change.abs() <= step_px {
            return None;
        }
        self.last_dist = dist;
        Some((change > 0.0, mx, my))
    }

    pub fn end(&mut self) {
        self.pinch = false;
    }
}
