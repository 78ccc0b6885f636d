//! Click hit-testing against plotted points and their name labels.

use crate::config::PlotConfig;
use crate::model::{Point, PointId};
use crate::state::Camera;

/// Text measurement used for label extents.
pub trait LabelMetrics {
    fn text_width(&self, text: &str, font_px: f64) -> f64;
}

/// Approximates every glyph with the same advance, as a fraction of the
/// font size.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvance {
    pub em_ratio: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em_ratio: 0.6 }
    }
}

impl LabelMetrics for FixedAdvance {
    fn text_width(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * font_px * self.em_ratio
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Display-space box of a point's name label. The label's baseline is the
/// box bottom.
pub fn label_box(point: &Point, cam: &Camera, cfg: &PlotConfig) -> Rect {
    let (dx, dy) = cam.to_display(point.base_x, point.base_y);
    let left = dx + cfg.label_dx * cam.zoom;
    let bottom = dy + cfg.label_dy * cam.zoom;
    Rect {
        left,
        top: bottom - cfg.font_px * cam.zoom,
        right: left + point.label_width * cam.zoom,
        bottom,
    }
}

/// Finds the point clicked at display position `(x, y)`. A click on a
/// label wins outright; otherwise the closest body within the zoomed
/// tolerance is taken, earlier points winning ties.
pub fn find_hit(
    points: &[Point],
    cam: &Camera,
    x: f64,
    y: f64,
    cfg: &PlotConfig,
) -> Option<PointId> {
    let mut best: Option<PointId> = None;
    let mut best_dist = cfg.hit_radius * cam.zoom;
    for (id, p) in points.iter().enumerate() {
        if label_box(p, cam, cfg).contains(x, y) {
            return Some(id);
        }
        let (px, py) = cam.to_display(p.base_x, p.base_y);
        let dist = (px - x).hypot(py - y);
        if dist < best_dist {
            best_dist = dist;
            best = Some(id);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(name: &str, bx: f64, by: f64) -> Point {
        Point {
            name: name.to_string(),
            world_x: 0.0,
            world_y: 0.0,
            base_x: bx,
            base_y: by,
            label_width: FixedAdvance::default().text_width(name, 12.0),
        }
    }

    #[test]
    fn click_on_center_hits_point() {
        let cfg = PlotConfig::default();
        let cam = Camera { zoom: 2.0, offset_x: 30.0, offset_y: -10.0 };
        let pts = vec![point("A", 100.0, 100.0), point("B", 200.0, 150.0)];
        assert_eq!(find_hit(&pts, &cam, 430.0, 290.0, &cfg), Some(1));
        assert_eq!(find_hit(&pts, &cam, 230.0, 190.0, &cfg), Some(0));
    }

    #[test]
    fn tolerance_scales_with_zoom() {
        let cfg = PlotConfig::default();
        let pts = vec![point("A", 100.0, 100.0)];
        // 20px below the point: outside 15px at zoom 1, inside 30px at zoom 2
        let cam1 = Camera::default();
        assert_eq!(find_hit(&pts, &cam1, 100.0, 120.0, &cfg), None);
        let cam2 = Camera { zoom: 2.0, ..Camera::default() };
        assert_eq!(find_hit(&pts, &cam2, 200.0, 220.0, &cfg), Some(0));
    }

    #[test]
    fn far_click_misses() {
        let cfg = PlotConfig::default();
        let pts = vec![point("A", 100.0, 100.0), point("B", 300.0, 300.0)];
        assert_eq!(find_hit(&pts, &Camera::default(), 500.0, 20.0, &cfg), None);
        assert_eq!(find_hit(&[], &Camera::default(), 0.0, 0.0, &cfg), None);
    }

    #[test]
    fn nearest_point_wins() {
        let cfg = PlotConfig::default();
        let pts = vec![point("A", 100.0, 100.0), point("B", 110.0, 100.0)];
        assert_eq!(find_hit(&pts, &Camera::default(), 108.0, 100.0, &cfg), Some(1));
    }

    #[test]
    fn tie_goes_to_first_point() {
        let cfg = PlotConfig::default();
        let pts = vec![point("A", 100.0, 100.0), point("A", 100.0, 100.0)];
        assert_eq!(find_hit(&pts, &Camera::default(), 101.0, 101.0, &cfg), Some(0));
    }

    #[test]
    fn label_click_beats_closer_body() {
        let cfg = PlotConfig::default();
        // label of AB spans x 115..129.4, y 78..90; B sits right next to it
        let pts = vec![point("AB", 100.0, 100.0), point("B", 125.0, 92.0)];
        assert_eq!(find_hit(&pts, &Camera::default(), 124.0, 89.0, &cfg), Some(0));
    }

    #[test]
    fn label_box_follows_zoom() {
        let cfg = PlotConfig::default();
        let p = point("AB", 10.0, 10.0);
        let b = label_box(&p, &Camera { zoom: 2.0, offset_x: 5.0, offset_y: 5.0 }, &cfg);
        assert_eq!((b.left, b.top, b.bottom), (55.0, -19.0, 5.0));
        assert!((b.right - 83.8).abs() < 1e-9);
    }
}
