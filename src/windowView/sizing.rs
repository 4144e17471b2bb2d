// Window sizing and initial placement

use serde::{Deserialize, Serialize};

use super::drag::Position;

/// Fraction of the parent width a fixed-width window may occupy
pub const PARENT_WIDTH_CAP: f64 = 0.95;

/// Width or height of a window: a fixed size, or an opaque token ("auto",
/// "40%", ...) that is handed to the renderer unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Pixels(f64),
    Token(String),
}

impl Dimension {
    pub fn auto() -> Self {
        Dimension::Token("auto".to_string())
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::auto()
    }
}

/// Measured size of the windows region
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where a window starts out
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Placement {
    /// Percentages (0-100) of the parent region
    Percent { x: f64, y: f64 },
    /// Absolute offsets inside the parent region
    Pixel { x: f64, y: f64 },
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Percent { x: 0.0, y: 0.0 }
    }
}

impl Placement {
    /// Resolve against the parent region. An unmeasured parent puts percentage
    /// placements at the origin.
    pub fn resolve(&self, parent: Option<Size>) -> Position {
        match (*self, parent) {
            (Placement::Percent { x, y }, Some(parent)) => Position {
                x: parent.width * x / 100.0,
                y: parent.height * y / 100.0,
            },
            (Placement::Percent { .. }, None) => Position::default(),
            (Placement::Pixel { x, y }, _) => Position { x, y },
        }
    }
}

/// Effective width of a window.
///
/// Fixed widths are clamped to `[min_width, max_width]` (`min_width` wins if
/// the bounds cross) and then capped to 95% of the measured parent width.
/// Tokens pass through untouched.
pub fn resolve_width(
    width: &Dimension,
    min_width: f64,
    max_width: Option<f64>,
    parent: Option<Size>,
) -> Dimension {
    let Dimension::Pixels(px) = width else {
        return width.clone();
    };

    let upper = max_width.unwrap_or(*px);
    let clamped = px.min(upper).max(min_width);

    match parent {
        Some(parent) if parent.width > 0.0 => {
            Dimension::Pixels(clamped.min(parent.width * PARENT_WIDTH_CAP))
        }
        _ => Dimension::Pixels(clamped),
    }
}
