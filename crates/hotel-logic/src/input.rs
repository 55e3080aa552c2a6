//! Per-frame input sampling and press-edge detection.
//!
//! The host reports button *levels* every frame; [`InputTracker`] turns them
//! into one-shot events so a held button fires once per press.

use std::time::Duration;

use crate::geometry::Point;

/// Raw input sampled by the host for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Game clock since start.
    pub now: Duration,
    /// Cursor in logical pixels, None when outside the window.
    pub cursor: Option<Point>,
    pub left_down: bool,
    pub escape_down: bool,
}

impl FrameInput {
    /// Nothing pressed.
    pub fn idle(now: Duration) -> Self {
        Self {
            now,
            ..Default::default()
        }
    }

    /// Left button down with the cursor at `(x, y)`.
    pub fn click_at(now: Duration, x: f32, y: f32) -> Self {
        Self {
            now,
            cursor: Some(Point::new(x, y)),
            left_down: true,
            escape_down: false,
        }
    }

    /// Escape held down.
    pub fn escape(now: Duration) -> Self {
        Self {
            now,
            escape_down: true,
            ..Default::default()
        }
    }
}

/// One-shot events derived from a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameEvents {
    pub click: Option<Point>,
    pub escape_pressed: bool,
}

/// Remembers last frame's button levels.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    left_was_down: bool,
    escape_was_down: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, input: &FrameInput) -> FrameEvents {
        let left_edge = input.left_down && !self.left_was_down;
        let escape_edge = input.escape_down && !self.escape_was_down;
        self.left_was_down = input.left_down;
        self.escape_was_down = input.escape_down;

        FrameEvents {
            click: if left_edge { input.cursor } else { None },
            escape_pressed: escape_edge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_button_fires_once() {
        let mut tracker = InputTracker::new();
        let held = FrameInput::click_at(Duration::ZERO, 10.0, 20.0);
        assert_eq!(tracker.update(&held).click, Some(Point::new(10.0, 20.0)));
        for _ in 0..30 {
            assert_eq!(tracker.update(&held).click, None);
        }
        tracker.update(&FrameInput::idle(Duration::ZERO));
        assert!(tracker.update(&held).click.is_some());
    }

    #[test]
    fn test_escape_edge() {
        let mut tracker = InputTracker::new();
        let esc = FrameInput::escape(Duration::ZERO);
        assert!(tracker.update(&esc).escape_pressed);
        assert!(!tracker.update(&esc).escape_pressed);
        assert!(!tracker.update(&FrameInput::idle(Duration::ZERO)).escape_pressed);
        assert!(tracker.update(&esc).escape_pressed);
    }

    #[test]
    fn test_press_outside_window_is_swallowed() {
        let mut tracker = InputTracker::new();
        let mut input = FrameInput::click_at(Duration::ZERO, 0.0, 0.0);
        input.cursor = None;
        assert_eq!(tracker.update(&input).click, None);
        // Dragging back in while still held does not fire.
        input.cursor = Some(Point::new(5.0, 5.0));
        assert_eq!(tracker.update(&input).click, None);
    }
}
