// Pointer-delta dragging for window title bars

use serde::{Deserialize, Serialize};

/// A point relative to the windows region (the nearest positioned ancestor)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// State of one in-progress drag gesture.
///
/// Created on pointer-down on a title bar and dropped on pointer-up or when
/// pointer capture is lost. Owned by the dragging view only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pointer_origin: Position,
    window_origin: Position,
}

impl DragSession {
    pub fn begin(pointer: Position, window: Position) -> Self {
        Self {
            pointer_origin: pointer,
            window_origin: window,
        }
    }

    /// Window position for the current pointer location.
    ///
    /// Pure delta tracking: no inertia and no bounds, so a window can be
    /// dragged entirely out of view.
    pub fn position_for(&self, pointer: Position) -> Position {
        Position {
            x: self.window_origin.x + (pointer.x - self.pointer_origin.x),
            y: self.window_origin.y + (pointer.y - self.pointer_origin.y),
        }
    }

    pub fn window_origin(&self) -> Position {
        self.window_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_is_applied_to_window_origin() {
        let session = DragSession::begin(Position::new(100.0, 100.0), Position::new(20.0, 20.0));
        assert_eq!(
            session.position_for(Position::new(130.0, 115.0)),
            Position::new(50.0, 35.0)
        );
    }

    #[test]
    fn test_no_movement_keeps_origin() {
        let session = DragSession::begin(Position::new(7.0, 9.0), Position::new(3.0, 4.0));
        assert_eq!(session.position_for(Position::new(7.0, 9.0)), session.window_origin());
    }

    #[test]
    fn test_positions_are_not_clamped() {
        let session = DragSession::begin(Position::new(10.0, 10.0), Position::new(0.0, 0.0));
        let far_left = session.position_for(Position::new(-500.0, -40.0));
        assert_eq!(far_left, Position::new(-510.0, -50.0));
    }
}
