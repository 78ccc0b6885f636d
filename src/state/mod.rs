//! Application state and the reducer that applies every user input to it.

pub mod camera;
pub mod pointer;
pub mod touch;

pub use camera::Camera;
pub use pointer::PointerState;
pub use touch::TouchState;

use std::rc::Rc;
use yew::Reducible;

use crate::config::{PlotConfig, Settings};
use crate::geometry::{Fit, Surface};
use crate::hit::{find_hit, LabelMetrics};
use crate::measure::{ClickOutcome, MeasurementEngine};
use crate::model::{PointRegistry, PointRow};

pub const READY_MSG: &str = "Click a point to select it or start measuring.";
pub const PAN_MSG: &str = "Pan mode: drag to move, wheel or pinch to zoom.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowField {
    Name,
    X,
    Y,
}

#[derive(Clone)]
pub enum PlotAction {
    AddRow,
    RemoveRow,
    EditRow { index: usize, field: RowField, value: String },
    /// Replaces the registry with the current rows.
    Plot { surface: Surface, metrics: Rc<dyn LabelMetrics> },
    /// Click at a display position without a pointer sequence. The canvas
    /// produces clicks through `PointerDown`/`PointerUp` instead.
    Click { x: f64, y: f64 },
    /// Canvas size picked by the view. Adopted while nothing is plotted so
    /// the empty axes and zoom buttons use the real center.
    Resize { surface: Surface },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    PointerCancel,
    Wheel { x: f64, y: f64, delta_y: f64 },
    /// One zoom step around a fixed display point.
    ZoomStep { x: f64, y: f64, zoom_in: bool },
    PinchStart { a: (f64, f64), b: (f64, f64) },
    PinchMove { a: (f64, f64), b: (f64, f64) },
    PinchEnd,
    TogglePanMode,
    ResetView,
    ClearMeasurements,
    DoubleClick,
    UpdateSettings(Settings),
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub config: PlotConfig,
    pub settings: Settings,
    pub rows: Vec<PointRow>,
    pub registry: PointRegistry,
    pub camera: Camera,
    pub engine: MeasurementEngine,
    pub pointer: PointerState,
    pub touch: TouchState,
    pub pan_mode: bool,
    pub status: String,
    /// Bumped on every change so views can key effects on it.
    pub version: u64,
}

impl AppState {
    pub fn new(config: PlotConfig, settings: Settings) -> Self {
        Self {
            config,
            settings,
            rows: vec![PointRow::blank(1)],
            registry: PointRegistry::default(),
            camera: Camera::default(),
            engine: MeasurementEngine::default(),
            pointer: PointerState::default(),
            touch: TouchState::default(),
            pan_mode: false,
            status: READY_MSG.to_string(),
            version: 0,
        }
    }

    /// Lines for the info panel: measurement history, angles, then the
    /// current status.
    pub fn info_lines(&self) -> Vec<String> {
        let pts = &self.registry.points;
        let mut lines = Vec::new();
        let history = self.engine.history_lines(pts, &self.settings.unit);
        if !history.is_empty() {
            lines.push("Distance history:".to_string());
            lines.extend(history);
        }
        let angles = self.engine.angle_lines(pts);
        if !angles.is_empty() {
            lines.push("Angles:".to_string());
            lines.extend(angles);
        }
        lines.push(self.status.clone());
        lines
    }

    fn point_name(&self, id: usize) -> &str {
        self.registry.get(id).map(|p| p.name.as_str()).unwrap_or("?")
    }

    fn click(&mut self, x: f64, y: f64) {
        match find_hit(&self.registry.points, &self.camera, x, y, &self.config) {
            Some(id) => {
                let outcome = self.engine.click(id, &self.registry.points, &self.config);
                log::debug!("click on {}: {:?}", self.point_name(id), outcome);
                self.status = match outcome {
                    ClickOutcome::Selected(p) => format!(
                        "{} selected. Click another point to measure the distance.",
                        self.point_name(p)
                    ),
                    ClickOutcome::Measured { to, .. } => {
                        format!("{} selected.", self.point_name(to))
                    }
                    ClickOutcome::Undone { anchor } => format!(
                        "Last measurement undone. {} selected.",
                        self.point_name(anchor)
                    ),
                    ClickOutcome::Deselected => "Selection cleared.".to_string(),
                };
            }
            None => {
                if !self.engine.is_idle() || self.engine.depth() > 0 {
                    self.engine.reset();
                    self.status = "Selection and measurements cleared.".to_string();
                }
            }
        }
    }

    fn zoom_step(&mut self, x: f64, y: f64, zoom_in: bool) {
        let cfg = &self.config;
        let factor = if zoom_in { cfg.zoom_in_factor } else { cfg.zoom_out_factor };
        self.camera.zoom_at(x, y, factor, cfg.zoom_min, cfg.zoom_max);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlotConfig::default(), Settings::default())
    }
}

impl Reducible for AppState {
    type Action = PlotAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use PlotAction::*;
        let mut new = (*self).clone();
        match action {
            AddRow => {
                let n = new.rows.len() + 1;
                new.rows.push(PointRow::blank(n));
            }
            RemoveRow => {
                if new.rows.len() <= 1 {
                    return self;
                }
                new.rows.pop();
            }
            EditRow { index, field, value } => {
                let Some(row) = new.rows.get_mut(index) else { return self; };
                match field {
                    RowField::Name => row.name = value,
                    RowField::X => row.x = value,
                    RowField::Y => row.y = value,
                }
            }
            Plot { surface, metrics } => {
                let cfg = &new.config;
                new.registry = PointRegistry::plot(
                    &new.rows,
                    surface,
                    cfg.padding,
                    cfg.font_px,
                    metrics.as_ref(),
                );
                new.engine.reset();
                if new.settings.reset_view_on_plot {
                    new.camera.reset();
                }
                new.status = READY_MSG.to_string();
                log::info!(
                    "plotted {} of {} rows (scale {:.3})",
                    new.registry.len(),
                    new.rows.len(),
                    new.registry.fit.scale
                );
            }
            Click { x, y } => new.click(x, y),
            Resize { surface } => {
                if !new.registry.is_empty() || new.registry.fit.surface == surface {
                    return self;
                }
                new.registry.fit = Fit::identity(surface);
            }
            PointerDown { x, y } => {
                if new.touch.pinch {
                    return self;
                }
                new.pointer.press(x, y);
            }
            PointerMove { x, y } => {
                let Some((dx, dy)) = new.pointer.drag_to(x, y) else { return self; };
                if new.pan_mode {
                    new.camera.pan_by(dx, dy);
                }
            }
            PointerUp { x, y } => {
                let threshold = new.config.pan_threshold;
                let Some(still) = new.pointer.release(x, y, threshold) else { return self; };
                if !new.pan_mode || still {
                    new.click(x, y);
                }
            }
            PointerCancel => {
                if !new.pointer.down {
                    return self;
                }
                new.pointer.cancel();
            }
            Wheel { x, y, delta_y } => new.zoom_step(x, y, delta_y <= 0.0),
            ZoomStep { x, y, zoom_in } => new.zoom_step(x, y, zoom_in),
            PinchStart { a, b } => {
                new.pointer.cancel();
                new.touch.start(a, b);
            }
            PinchMove { a, b } => {
                let step = new.config.pan_threshold;
                let Some((zoom_in, mx, my)) = new.touch.update(a, b, step) else { return self; };
                new.zoom_step(mx, my, zoom_in);
            }
            PinchEnd => {
                if !new.touch.pinch {
                    return self;
                }
                new.touch.end();
            }
            TogglePanMode => {
                new.pan_mode = !new.pan_mode;
                new.status = if new.pan_mode { PAN_MSG } else { READY_MSG }.to_string();
            }
            ResetView => new.camera.reset(),
            ClearMeasurements => {
                new.engine.reset();
                new.status = READY_MSG.to_string();
            }
            DoubleClick => {
                new.engine.reset();
                new.status = "All selections and measurements reset.".to_string();
            }
            UpdateSettings(settings) => {
                if settings == new.settings {
                    return self;
                }
                new.settings = settings;
            }
        }
        new.version = new.version.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hit::FixedAdvance;

    fn reduce(state: Rc<AppState>, actions: Vec<PlotAction>) -> Rc<AppState> {
        actions.into_iter().fold(state, |s, a| s.reduce(a))
    }

    fn edit(index: usize, field: RowField, value: &str) -> PlotAction {
        PlotAction::EditRow { index, field, value: value.to_string() }
    }

    fn plot() -> PlotAction {
        PlotAction::Plot {
            surface: Surface::default(),
            metrics: Rc::new(FixedAdvance::default()),
        }
    }

    /// A(0,0), B(3,0), C(0,4) plotted on a 600x600 canvas.
    fn abc_state() -> Rc<AppState> {
        reduce(
            Rc::new(AppState::default()),
            vec![
                PlotAction::AddRow,
                PlotAction::AddRow,
                edit(0, RowField::Name, "A"),
                edit(0, RowField::X, "0"),
                edit(0, RowField::Y, "0"),
                edit(1, RowField::Name, "B"),
                edit(1, RowField::X, "3"),
                edit(1, RowField::Y, "0"),
                edit(2, RowField::Name, "C"),
                edit(2, RowField::X, "0"),
                edit(2, RowField::Y, "4"),
                plot(),
            ],
        )
    }

    /// Taps a point the way the canvas does: press and release in place.
    fn click_point(state: Rc<AppState>, id: usize) -> Rc<AppState> {
        let p = &state.registry.points[id];
        let (x, y) = state.camera.to_display(p.base_x, p.base_y);
        reduce(state, vec![PlotAction::PointerDown { x, y }, PlotAction::PointerUp { x, y }])
    }

    #[test]
    fn rows_add_and_remove_keep_one() {
        let s = Rc::new(AppState::default());
        let s = reduce(s, vec![PlotAction::AddRow, PlotAction::AddRow]);
        let names: Vec<&str> = s.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["P1", "P2", "P3"]);
        let s = reduce(s, vec![PlotAction::RemoveRow, PlotAction::RemoveRow, PlotAction::RemoveRow]);
        assert_eq!(s.rows.len(), 1);
    }

    #[test]
    fn example_distances_and_angle() {
        let s = abc_state();
        assert_eq!(s.registry.len(), 3);
        let s = [1, 0, 2].into_iter().fold(s, click_point);
        let lines = s.info_lines();
        assert_eq!(
            lines,
            [
                "Distance history:",
                "B→A: 3.000m",
                "A→C: 4.000m",
                "Angles:",
                "∠BAC: 90.0°",
                "C selected.",
            ]
        );
    }

    #[test]
    fn empty_plot_has_no_points() {
        let s = reduce(Rc::new(AppState::default()), vec![plot()]);
        assert!(s.registry.is_empty());
        assert_eq!(s.info_lines(), [READY_MSG]);
        let s = s.reduce(PlotAction::Click { x: 300.0, y: 300.0 });
        assert!(s.engine.is_idle());
    }

    #[test]
    fn reclick_undoes_last_measurement() {
        let s = abc_state();
        let s = click_point(s, 0);
        let s = click_point(s, 1);
        assert_eq!(s.engine.depth(), 1);
        let s = click_point(s, 1);
        assert_eq!(s.engine.depth(), 0);
        assert_eq!(s.engine.anchor(), Some(0));
        assert_eq!(s.status, "Last measurement undone. A selected.");
    }

    #[test]
    fn empty_space_click_resets_everything() {
        let s = [0, 1, 2].into_iter().fold(abc_state(), click_point);
        assert_eq!(s.engine.depth(), 2);
        let s = s.reduce(PlotAction::Click { x: 5.0, y: 5.0 });
        assert!(s.engine.is_idle());
        assert_eq!(s.engine.depth(), 0);
        assert_eq!(s.engine.angles().count(), 0);
    }

    #[test]
    fn replot_clears_measurements() {
        let s = [0, 1].into_iter().fold(abc_state(), click_point);
        let s = reduce(s, vec![edit(2, RowField::X, "bad"), plot()]);
        assert_eq!(s.registry.len(), 2);
        assert!(s.engine.is_idle());
        assert_eq!(s.engine.depth(), 0);
    }

    #[test]
    fn view_survives_replot_unless_configured() {
        let s = abc_state().reduce(PlotAction::Wheel { x: 100.0, y: 100.0, delta_y: -1.0 });
        let zoom = s.camera.zoom;
        assert!((zoom - 1.1).abs() < 1e-12);
        let s = s.reduce(plot());
        assert_eq!(s.camera.zoom, zoom);
        let settings = Settings { reset_view_on_plot: true, ..Settings::default() };
        let s = reduce(s, vec![PlotAction::UpdateSettings(settings), plot()]);
        assert_eq!(s.camera, Camera::default());
    }

    #[test]
    fn pointer_up_without_pan_mode_clicks() {
        let s = abc_state();
        let a = &s.registry.points[0];
        let (x, y) = (a.base_x, a.base_y);
        let s = reduce(
            s.clone(),
            vec![
                PlotAction::PointerDown { x, y },
                PlotAction::PointerMove { x: x + 3.0, y },
                PlotAction::PointerUp { x: x + 3.0, y },
            ],
        );
        assert_eq!(s.engine.anchor(), Some(0));
        assert_eq!(s.camera, Camera::default());
    }

    #[test]
    fn drag_in_pan_mode_pans_without_clicking() {
        let s = abc_state().reduce(PlotAction::TogglePanMode);
        assert_eq!(s.status, PAN_MSG);
        let a = &s.registry.points[0];
        let (x, y) = (a.base_x, a.base_y);
        let s = reduce(
            s.clone(),
            vec![
                PlotAction::PointerDown { x, y },
                PlotAction::PointerMove { x: x + 20.0, y: y - 10.0 },
                PlotAction::PointerMove { x: x + 30.0, y: y - 10.0 },
                PlotAction::PointerUp { x: x + 30.0, y: y - 10.0 },
            ],
        );
        assert_eq!((s.camera.offset_x, s.camera.offset_y), (30.0, -10.0));
        assert!(s.engine.is_idle());
        assert!(!s.pointer.down);
    }

    #[test]
    fn small_move_in_pan_mode_still_clicks() {
        let s = abc_state().reduce(PlotAction::TogglePanMode);
        let a = &s.registry.points[0];
        let (x, y) = (a.base_x, a.base_y);
        let s = reduce(
            s.clone(),
            vec![PlotAction::PointerDown { x, y }, PlotAction::PointerUp { x: x + 2.0, y: y + 2.0 }],
        );
        assert_eq!(s.engine.anchor(), Some(0));
    }

    #[test]
    fn cancel_stops_drag_and_swallows_click() {
        let s = abc_state().reduce(PlotAction::TogglePanMode);
        let s = reduce(
            s,
            vec![
                PlotAction::PointerDown { x: 10.0, y: 10.0 },
                PlotAction::PointerCancel,
                PlotAction::PointerMove { x: 50.0, y: 50.0 },
                PlotAction::PointerUp { x: 10.0, y: 10.0 },
            ],
        );
        assert_eq!(s.camera, Camera::default());
        assert!(!s.pointer.down);
    }

    #[test]
    fn wheel_in_then_out_restores_view() {
        let s = abc_state().reduce(PlotAction::Wheel { x: 10.0, y: 10.0, delta_y: 3.0 });
        assert!((s.camera.zoom - 0.9).abs() < 1e-12);
        let s = abc_state();
        let s = s.reduce(PlotAction::ZoomStep { x: 120.0, y: 80.0, zoom_in: true });
        let cfg = s.config.clone();
        let mut cam = s.camera;
        cam.zoom_at(120.0, 80.0, 1.0 / cfg.zoom_in_factor, cfg.zoom_min, cfg.zoom_max);
        assert!((cam.zoom - 1.0).abs() < 1e-12);
        assert!(cam.offset_x.abs() < 1e-9 && cam.offset_y.abs() < 1e-9);
    }

    #[test]
    fn clicks_track_zoomed_view() {
        let s = abc_state();
        let s = reduce(
            s,
            vec![
                PlotAction::ZoomStep { x: 0.0, y: 0.0, zoom_in: true },
                PlotAction::ZoomStep { x: 0.0, y: 0.0, zoom_in: true },
            ],
        );
        let s = click_point(s, 2);
        assert_eq!(s.engine.anchor(), Some(2));
    }

    #[test]
    fn pinch_zooms_and_blocks_pointer() {
        let s = abc_state();
        let s = reduce(
            s,
            vec![
                PlotAction::PointerDown { x: 5.0, y: 5.0 },
                PlotAction::PinchStart { a: (100.0, 100.0), b: (200.0, 100.0) },
                PlotAction::PointerDown { x: 200.0, y: 100.0 },
                PlotAction::PinchMove { a: (80.0, 100.0), b: (220.0, 100.0) },
                PlotAction::PinchEnd,
            ],
        );
        assert!((s.camera.zoom - 1.1).abs() < 1e-12);
        assert!(!s.pointer.down);
        assert!(!s.touch.pinch);
    }

    #[test]
    fn double_click_and_clear_reset_measurements() {
        let s = [0, 1].into_iter().fold(abc_state(), click_point);
        let d = s.clone().reduce(PlotAction::DoubleClick);
        assert!(d.engine.is_idle());
        assert_eq!(d.status, "All selections and measurements reset.");
        let c = s.reduce(PlotAction::ClearMeasurements);
        assert!(c.engine.is_idle());
        assert_eq!(c.info_lines(), [READY_MSG]);
    }

    #[test]
    fn unchanged_actions_keep_version() {
        let s = Rc::new(AppState::default());
        let v = s.version;
        let s = reduce(
            s,
            vec![
                PlotAction::RemoveRow,
                PlotAction::PointerCancel,
                PlotAction::PinchEnd,
                PlotAction::PointerMove { x: 1.0, y: 1.0 },
                edit(7, RowField::X, "1"),
            ],
        );
        assert_eq!(s.version, v);
    }

    #[test]
    fn resize_recenters_empty_view_only() {
        let small = Surface { width: 500.0, height: 500.0 };
        let s = Rc::new(AppState::default()).reduce(PlotAction::Resize { surface: small });
        assert_eq!(s.registry.fit, Fit::identity(small));
        assert_eq!(s.registry.fit.world_to_base(0.0, 0.0), (250.0, 250.0));
        let v = s.version;
        let s = s.reduce(PlotAction::Resize { surface: small });
        assert_eq!(s.version, v);

        let plotted = abc_state();
        let fit = plotted.registry.fit;
        let s = plotted.reduce(PlotAction::Resize { surface: small });
        assert_eq!(s.registry.fit, fit);
    }

    #[test]
    fn programmatic_click_selects_without_pointer() {
        let s = abc_state();
        let p = &s.registry.points[1];
        let (x, y) = (p.base_x, p.base_y);
        let s = s.reduce(PlotAction::Click { x, y });
        assert_eq!(s.engine.anchor(), Some(1));
        assert!(!s.pointer.down);
    }

    #[test]
    fn unit_setting_changes_history() {
        let s = [0, 1].into_iter().fold(abc_state(), click_point);
        let settings = Settings { unit: " ft".to_string(), ..Settings::default() };
        let s = s.reduce(PlotAction::UpdateSettings(settings));
        assert_eq!(s.info_lines()[1], "A→B: 3.000 ft");
    }
}
