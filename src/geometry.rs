//! Fit-to-canvas projection from world coordinates to base pixels.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
        }
    }
}

/// Scale and center chosen once per plot so every point lands inside the
/// padded canvas. World Y grows upwards, base Y grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub scale: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub surface: Surface,
}

impl Fit {
    pub fn identity(surface: Surface) -> Self {
        Self {
            scale: 1.0,
            center_x: 0.0,
            center_y: 0.0,
            surface,
        }
    }

    pub fn compute(coords: &[(f64, f64)], surface: Surface, padding: f64) -> Self {
        let Some(&(x0, y0)) = coords.first() else {
            return Self::identity(surface);
        };
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);
        for &(x, y) in coords {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        let draw_w = surface.width - padding * 2.0;
        let draw_h = surface.height - padding * 2.0;
        let range_x = max_x - min_x;
        let range_y = max_y - min_y;
        let scale = if range_x == 0.0 && range_y == 0.0 {
            1.0
        } else {
            let rx = if range_x == 0.0 { 1.0 } else { range_x };
            let ry = if range_y == 0.0 { 1.0 } else { range_y };
            (draw_w / rx).min(draw_h / ry)
        };
        // A canvas smaller than twice the padding would flip the plot.
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        Self {
            scale,
            center_x: (min_x + max_x) / 2.0,
            center_y: (min_y + max_y) / 2.0,
            surface,
        }
    }

    pub fn world_to_base(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x - self.center_x) * self.scale + self.surface.width / 2.0,
            -(y - self.center_y) * self.scale + self.surface.height / 2.0,
        )
    }

    pub fn base_to_world(&self, bx: f64, by: f64) -> (f64, f64) {
        (
            (bx - self.surface.width / 2.0) / self.scale + self.center_x,
            -(by - self.surface.height / 2.0) / self.scale + self.center_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn fit_centers_and_scales_to_tightest_axis() {
        let surface = Surface { width: 600.0, height: 600.0 };
        let fit = Fit::compute(&[(0.0, 0.0), (10.0, 5.0)], surface, 50.0);
        assert!((fit.scale - 50.0).abs() < EPS);
        assert_eq!((fit.center_x, fit.center_y), (5.0, 2.5));
        let (bx, by) = fit.world_to_base(10.0, 5.0);
        assert!((bx - 550.0).abs() < EPS);
        assert!((by - 175.0).abs() < EPS);
    }

    #[test]
    fn y_axis_points_up() {
        let fit = Fit::compute(&[(0.0, 0.0), (0.0, 4.0)], Surface::default(), 50.0);
        let (_, low) = fit.world_to_base(0.0, 0.0);
        let (_, high) = fit.world_to_base(0.0, 4.0);
        assert!(high < low);
    }

    #[test]
    fn single_point_uses_unit_scale() {
        let fit = Fit::compute(&[(3.0, -2.0)], Surface::default(), 50.0);
        assert_eq!(fit.scale, 1.0);
        assert_eq!(fit.world_to_base(3.0, -2.0), (300.0, 300.0));
    }

    #[test]
    fn zero_range_on_one_axis_is_guarded() {
        let fit = Fit::compute(&[(0.0, 1.0), (4.0, 1.0)], Surface::default(), 50.0);
        // x range 4 over 500px, y range treated as 1
        assert!((fit.scale - 125.0).abs() < EPS);
        assert!(fit.scale.is_finite());
    }

    #[test]
    fn empty_set_is_identity() {
        let fit = Fit::compute(&[], Surface::default(), 50.0);
        assert_eq!(fit, Fit::identity(Surface::default()));
        assert_eq!(fit.world_to_base(0.0, 0.0), (300.0, 300.0));
    }

    #[test]
    fn base_to_world_inverts_projection() {
        let pts = [(-12.5, 3.25), (7.0, 40.0), (0.001, -9.0)];
        let fit = Fit::compute(&pts, Surface { width: 500.0, height: 320.0 }, 50.0);
        for &(x, y) in &pts {
            let (bx, by) = fit.world_to_base(x, y);
            let (wx, wy) = fit.base_to_world(bx, by);
            assert!((wx - x).abs() < 1e-9 && (wy - y).abs() < 1e-9);
        }
    }
}
