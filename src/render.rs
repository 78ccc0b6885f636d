//! Scene building and canvas painting.
//!
//! `build_scene` turns the application state into display-space draw
//! commands; `paint` replays them on a 2D canvas context. Keeping the two
//! apart lets the scene be checked without a browser.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::hit::{FixedAdvance, LabelMetrics};
use crate::state::AppState;
use crate::util::format_distance;

const AXIS_COLOR: &str = "#ccc";
const LINE_COLOR: &str = "#1f6feb";
const POINT_COLOR: &str = "#f85149";
const SELECTED_COLOR: &str = "#58a6ff";
const TEXT_COLOR: &str = "#c9d1d9";
const DISTANCE_BG: &str = "rgba(255,255,255,0.9)";
const DISTANCE_FG: &str = "#333";
const ANGLE_BG: &str = "rgba(255,255,0,0.9)";
const ANGLE_FG: &str = "#000";

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    Clear { width: f64, height: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, color: &'static str, width: f64 },
    Circle { x: f64, y: f64, r: f64, color: &'static str },
    /// Left-aligned text on an alphabetic baseline.
    Text { x: f64, y: f64, text: String, font: String, color: &'static str },
    /// Boxed text centered on `(x, y)`, rotated by `angle` radians.
    Label {
        x: f64,
        y: f64,
        angle: f64,
        text: String,
        font: String,
        bg: &'static str,
        fg: &'static str,
        half_w: f64,
        half_h: f64,
    },
}

fn font(px: f64, bold: bool) -> String {
    if bold {
        format!("bold {:.2}px sans-serif", px)
    } else {
        format!("{:.2}px sans-serif", px)
    }
}

pub fn build_scene(state: &AppState, metrics: &dyn LabelMetrics) -> Vec<DrawCmd> {
    let cfg = &state.config;
    let cam = &state.camera;
    let pts = &state.registry.points;
    let fit = &state.registry.fit;
    let z = cam.zoom;
    let surface = fit.surface;
    let font_px = cfg.font_px * z;
    let pad = cfg.label_padding * z;

    let mut cmds = vec![DrawCmd::Clear {
        width: surface.width,
        height: surface.height,
    }];

    // axes through the world origin
    let (ox, oy) = fit.world_to_base(0.0, 0.0);
    let (ox, oy) = cam.to_display(ox, oy);
    cmds.push(DrawCmd::Line { x1: ox, y1: 0.0, x2: ox, y2: surface.height, color: AXIS_COLOR, width: 1.0 });
    cmds.push(DrawCmd::Line { x1: 0.0, y1: oy, x2: surface.width, y2: oy, color: AXIS_COLOR, width: 1.0 });

    for m in state.engine.measurements() {
        let (a, b) = (&pts[m.from], &pts[m.to]);
        let (x1, y1) = cam.to_display(a.base_x, a.base_y);
        let (x2, y2) = cam.to_display(b.base_x, b.base_y);
        cmds.push(DrawCmd::Line { x1, y1, x2, y2, color: LINE_COLOR, width: cfg.line_width * z });
    }
    for m in state.engine.measurements() {
        let text = format_distance(m.distance, &state.settings.unit);
        let (x, y) = cam.to_display(m.label_x, m.label_y);
        let w = metrics.text_width(&text, font_px);
        cmds.push(DrawCmd::Label {
            x,
            y,
            angle: m.label_angle,
            half_w: w / 2.0 + pad,
            half_h: 8.0 * z + pad,
            text,
            font: font(font_px, false),
            bg: DISTANCE_BG,
            fg: DISTANCE_FG,
        });
    }
    for a in state.engine.angles() {
        let text = a.label(pts);
        let (x, y) = cam.to_display(a.label_x, a.label_y);
        let w = metrics.text_width(&text, font_px);
        cmds.push(DrawCmd::Label {
            x,
            y,
            angle: 0.0,
            half_w: w / 2.0 + pad,
            half_h: 8.0 * z + pad,
            text,
            font: font(font_px, false),
            bg: ANGLE_BG,
            fg: ANGLE_FG,
        });
    }

    let selected = state.engine.anchor();
    for (id, p) in pts.iter().enumerate() {
        let is_sel = selected == Some(id);
        let (x, y) = cam.to_display(p.base_x, p.base_y);
        cmds.push(DrawCmd::Circle {
            x,
            y,
            r: cfg.point_radius * z,
            color: if is_sel { SELECTED_COLOR } else { POINT_COLOR },
        });
        cmds.push(DrawCmd::Text {
            x: x + cfg.label_dx * z,
            y: y + cfg.label_dy * z,
            text: p.name.clone(),
            font: font(font_px, is_sel),
            color: if is_sel { SELECTED_COLOR } else { TEXT_COLOR },
        });
    }
    cmds
}

/// Measures text with the canvas' own font metrics.
pub struct CanvasMetrics {
    pub ctx: CanvasRenderingContext2d,
}

impl LabelMetrics for CanvasMetrics {
    fn text_width(&self, text: &str, font_px: f64) -> f64 {
        self.ctx.set_font(&font(font_px, false));
        match self.ctx.measure_text(text) {
            Ok(m) => m.width(),
            Err(_) => FixedAdvance::default().text_width(text, font_px),
        }
    }
}

pub fn paint(ctx: &CanvasRenderingContext2d, cmds: &[DrawCmd]) {
    for cmd in cmds {
        match cmd {
            DrawCmd::Clear { width, height } => {
                ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
                ctx.clear_rect(0.0, 0.0, *width, *height);
            }
            DrawCmd::Line { x1, y1, x2, y2, color, width } => {
                ctx.begin_path();
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width);
                ctx.move_to(*x1, *y1);
                ctx.line_to(*x2, *y2);
                ctx.stroke();
            }
            DrawCmd::Circle { x, y, r, color } => {
                ctx.begin_path();
                ctx.set_fill_style_str(color);
                ctx.arc(*x, *y, *r, 0.0, PI * 2.0).ok();
                ctx.fill();
            }
            DrawCmd::Text { x, y, text, font, color } => {
                ctx.set_font(font);
                ctx.set_text_align("left");
                ctx.set_text_baseline("alphabetic");
                ctx.set_fill_style_str(color);
                ctx.fill_text(text, *x, *y).ok();
            }
            DrawCmd::Label { x, y, angle, text, font, bg, fg, half_w, half_h } => {
                ctx.save();
                ctx.translate(*x, *y).ok();
                ctx.rotate(*angle).ok();
                ctx.set_fill_style_str(bg);
                ctx.fill_rect(-half_w, -half_h, half_w * 2.0, half_h * 2.0);
                ctx.set_font(font);
                ctx.set_text_align("center");
                ctx.set_text_baseline("middle");
                ctx.set_fill_style_str(fg);
                ctx.fill_text(text, 0.0, 0.0).ok();
                ctx.restore();
            }
        }
    }
}
