use crate::core::data::point::Point;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Classifies a signed wheel delta using the browser convention, where a
    /// negative delta scrolls up. Returns `None` for a zero delta.
    #[must_use]
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta < 0.0 {
            Some(WheelDirection::Up)
        } else if delta > 0.0 {
            Some(WheelDirection::Down)
        } else {
            None
        }
    }
}

/// Pointer state tracked between input events.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct InteractionState {
    pub pointer: Point,
    pub drag_origin: Option<Point>,
}

impl InteractionState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_direction_from_delta() {
        assert_eq!(WheelDirection::from_delta(-120.0), Some(WheelDirection::Up));
        assert_eq!(WheelDirection::from_delta(3.5), Some(WheelDirection::Down));
        assert_eq!(WheelDirection::from_delta(0.0), None);
        assert_eq!(WheelDirection::from_delta(f64::NAN), None);
    }

    #[test]
    fn test_dragging_follows_origin() {
        let mut state = InteractionState::default();
        assert!(!state.is_dragging());

        state.drag_origin = Some(Point { x: 4, y: 2 });
        assert!(state.is_dragging());
    }
}
