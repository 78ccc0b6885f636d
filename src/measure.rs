//! Distance/angle measurement state machine.
//!
//! The engine is either idle or anchored on a point. Clicking another
//! point measures from the anchor and moves the anchor; clicking the
//! anchor again undoes the last measurement (or deselects when there is
//! nothing to undo). Each measuring click is one undo step, so the number
//! of measurements always equals the step count.

use crate::config::PlotConfig;
use crate::model::{Point, PointId};
use crate::util::{format_angle, format_distance};

const ANGLE_WINDOW: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementRecord {
    pub from: PointId,
    pub to: PointId,
    pub distance: f64,
    /// Label center in base coordinates.
    pub label_x: f64,
    pub label_y: f64,
    /// Segment direction in radians; the label is drawn rotated by it.
    pub label_angle: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AngleRecord {
    pub p1: PointId,
    /// Vertex.
    pub p2: PointId,
    pub p3: PointId,
    pub degrees: f64,
    pub label_x: f64,
    pub label_y: f64,
}

impl AngleRecord {
    /// `∠ABC: 90.0°`, shared by the canvas label and the history panel.
    pub fn label(&self, points: &[Point]) -> String {
        format!(
            "∠{}{}{}: {}",
            points[self.p1].name,
            points[self.p2].name,
            points[self.p3].name,
            format_angle(self.degrees)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Step {
    measurement: MeasurementRecord,
    angle: Option<AngleRecord>,
    window_before: Vec<PointId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First point picked; nothing measured yet.
    Selected(PointId),
    Measured { from: PointId, to: PointId },
    /// Last measurement removed; the anchor moved back to its start.
    Undone { anchor: PointId },
    Deselected,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeasurementEngine {
    anchor: Option<PointId>,
    window: Vec<PointId>,
    steps: Vec<Step>,
}

pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.world_x - b.world_x).hypot(a.world_y - b.world_y)
}

/// Angle at `p2` between `p2->p1` and `p2->p3`, in degrees. `None` when
/// either vector has zero length.
pub fn angle_degrees(p1: &Point, p2: &Point, p3: &Point) -> Option<f64> {
    let (ax, ay) = (p1.world_x - p2.world_x, p1.world_y - p2.world_y);
    let (bx, by) = (p3.world_x - p2.world_x, p3.world_y - p2.world_y);
    let mag = ax.hypot(ay) * bx.hypot(by);
    if mag == 0.0 || !mag.is_finite() {
        return None;
    }
    // atan2 stays exact near 0 and 180 degrees where acos(dot / mag) drifts
    let cross = ax * by - ay * bx;
    let dot = ax * bx + ay * by;
    Some(cross.abs().atan2(dot).to_degrees())
}

impl MeasurementEngine {
    pub fn anchor(&self) -> Option<PointId> {
        self.anchor
    }

    pub fn is_idle(&self) -> bool {
        self.anchor.is_none()
    }

    /// Number of undoable measurements.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    pub fn measurements(&self) -> impl Iterator<Item = &MeasurementRecord> {
        self.steps.iter().map(|s| &s.measurement)
    }

    pub fn angles(&self) -> impl Iterator<Item = &AngleRecord> {
        self.steps.iter().filter_map(|s| s.angle.as_ref())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feeds a click on point `id`. Ids not present in `points` are ignored
    /// and reported as the current state.
    pub fn click(&mut self, id: PointId, points: &[Point], cfg: &PlotConfig) -> ClickOutcome {
        if id >= points.len() {
            log::warn!("click on unknown point {}", id);
            return match self.anchor {
                Some(a) => ClickOutcome::Selected(a),
                None => ClickOutcome::Deselected,
            };
        }
        match self.anchor {
            None => {
                self.anchor = Some(id);
                self.window = vec![id];
                ClickOutcome::Selected(id)
            }
            Some(a) if a == id => self.undo(),
            Some(a) => {
                self.measure(a, id, points, cfg);
                ClickOutcome::Measured { from: a, to: id }
            }
        }
    }

    fn undo(&mut self) -> ClickOutcome {
        match self.steps.pop() {
            Some(step) => {
                let start = step.measurement.from;
                self.window = step.window_before;
                self.anchor = Some(start);
                ClickOutcome::Undone { anchor: start }
            }
            None => {
                self.anchor = None;
                self.window.clear();
                ClickOutcome::Deselected
            }
        }
    }

    fn measure(&mut self, from: PointId, to: PointId, points: &[Point], cfg: &PlotConfig) {
        let (a, b) = (&points[from], &points[to]);
        let theta = (b.base_y - a.base_y).atan2(b.base_x - a.base_x);
        let off = cfg.distance_label_offset;
        let measurement = MeasurementRecord {
            from,
            to,
            distance: distance(a, b),
            label_x: (a.base_x + b.base_x) / 2.0 - theta.sin() * off,
            label_y: (a.base_y + b.base_y) / 2.0 + theta.cos() * off,
            label_angle: theta,
        };

        let window_before = self.window.clone();
        self.window.push(to);
        if self.window.len() > ANGLE_WINDOW {
            self.window.remove(0);
        }
        // consecutive entries always differ, so only the ends can repeat
        let distinct = self.window.len() == ANGLE_WINDOW && self.window[0] != self.window[2];
        let angle = if distinct {
            let (i1, i2, i3) = (self.window[0], self.window[1], self.window[2]);
            let (p1, p2, p3) = (&points[i1], &points[i2], &points[i3]);
            match angle_degrees(p1, p2, p3) {
                Some(degrees) => Some(AngleRecord {
                    p1: i1,
                    p2: i2,
                    p3: i3,
                    degrees,
                    label_x: p2.base_x,
                    label_y: p2.base_y - cfg.angle_label_rise,
                }),
                None => {
                    log::debug!(
                        "no angle at {}: coincides with {} or {}",
                        p2.name,
                        p1.name,
                        p3.name
                    );
                    None
                }
            }
        } else {
            None
        };

        self.steps.push(Step {
            measurement,
            angle,
            window_before,
        });
        self.anchor = Some(to);
    }

    /// `A→B: 3.000m` lines, oldest first.
    pub fn history_lines(&self, points: &[Point], unit: &str) -> Vec<String> {
        self.measurements()
            .map(|m| {
                format!(
                    "{}→{}: {}",
                    points[m.from].name,
                    points[m.to].name,
                    format_distance(m.distance, unit)
                )
            })
            .collect()
    }

    /// `∠ABC: 90.0°` lines, oldest first.
    pub fn angle_lines(&self, points: &[Point]) -> Vec<String> {
        self.angles()
            .map(|a| a.label(points))
            .collect()
    }
}
