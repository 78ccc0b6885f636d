// Live pan/zoom applied on top of the fit projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Camera {
    pub fn to_display(&self, base_x: f64, base_y: f64) -> (f64, f64) {
        (
            base_x * self.zoom + self.offset_x,
            base_y * self.zoom + self.offset_y,
        )
    }

    pub fn to_base(&self, disp_x: f64, disp_y: f64) -> (f64, f64) {
        (
            (disp_x - self.offset_x) / self.zoom,
            (disp_y - self.offset_y) / self.zoom,
        )
    }

    /// Scales by `factor` while keeping the base point under `(mx, my)` fixed.
    pub fn zoom_at(&mut self, mx: f64, my: f64, factor: f64, min: f64, max: f64) {
        let (bx, by) = self.to_base(mx, my);
        self.zoom = (self.zoom * factor).clamp(min, max);
        self.offset_x = mx - bx * self.zoom;
        self.offset_y = my - by * self.zoom;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
