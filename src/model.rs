//! Point rows as entered by the user and the registry of plotted points.

use thiserror::Error;

use crate::geometry::{Fit, Surface};
use crate::hit::LabelMetrics;

/// Index of a point inside the current [`PointRegistry`].
pub type PointId = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointRow {
    pub name: String,
    pub x: String,
    pub y: String,
}

impl PointRow {
    pub fn new(name: impl Into<String>, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x: x.into(),
            y: y.into(),
        }
    }

    /// Empty row with the default name for position `n` (1-based).
    pub fn blank(n: usize) -> Self {
        Self::new(format!("P{}", n), "", "")
    }

    pub fn parse(&self) -> Result<(String, f64, f64), RowError> {
        let x = parse_coord(&self.x).ok_or_else(|| RowError::BadX {
            name: self.name.clone(),
            raw: self.x.clone(),
        })?;
        let y = parse_coord(&self.y).ok_or_else(|| RowError::BadY {
            name: self.name.clone(),
            raw: self.y.clone(),
        })?;
        Ok((self.name.clone(), x, y))
    }
}

fn parse_coord(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("point {name}: x {raw:?} is not a number")]
    BadX { name: String, raw: String },
    #[error("point {name}: y {raw:?} is not a number")]
    BadY { name: String, raw: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub name: String,
    pub world_x: f64,
    pub world_y: f64,
    /// Fit projection before pan/zoom.
    pub base_x: f64,
    pub base_y: f64,
    /// Name width at zoom 1.
    pub label_width: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointRegistry {
    pub points: Vec<Point>,
    pub fit: Fit,
}

impl Default for PointRegistry {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            fit: Fit::identity(Surface::default()),
        }
    }
}

impl PointRegistry {
    /// Builds a fresh registry from form rows. Rows with a non-numeric
    /// coordinate are left out.
    pub fn plot(
        rows: &[PointRow],
        surface: Surface,
        padding: f64,
        font_px: f64,
        metrics: &dyn LabelMetrics,
    ) -> Self {
        let parsed: Vec<(String, f64, f64)> = rows
            .iter()
            .filter_map(|row| match row.parse() {
                Ok(p) => Some(p),
                Err(e) => {
                    log::debug!("skipping row: {}", e);
                    None
                }
            })
            .collect();
        let coords: Vec<(f64, f64)> = parsed.iter().map(|(_, x, y)| (*x, *y)).collect();
        let fit = Fit::compute(&coords, surface, padding);
        let points = parsed
            .into_iter()
            .map(|(name, x, y)| {
                let (base_x, base_y) = fit.world_to_base(x, y);
                let label_width = metrics.text_width(&name, font_px);
                Point {
                    name,
                    world_x: x,
                    world_y: y,
                    base_x,
                    base_y,
                    label_width,
                }
            })
            .collect();
        Self { points, fit }
    }

    pub fn get(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
