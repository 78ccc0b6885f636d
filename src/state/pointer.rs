// Press/drag/release bookkeeping for the primary pointer.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub down: bool,
    pub start_x: f64,
    pub start_y: f64,
    pub last_x: f64,
    pub last_y: f64,
}

impl PointerState {
    pub fn press(&mut self, x: f64, y: f64) {
        *self = Self {
            down: true,
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
        };
    }

    /// Movement since the previous position, or `None` when not pressed.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.down {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    /// Ends the press. Returns whether the pointer stayed within
    /// `threshold` of where it went down on both axes.
    pub fn release(&mut self, x: f64, y: f64, threshold: f64) -> Option<bool> {
        if !self.down {
            return None;
        }
        self.down = false;
        Some((x - self.start_x).abs() < threshold && (y - self.start_y).abs() < threshold)
    }

    pub fn cancel(&mut self) {
        self.down = false;
    }
}
