// Copyright 2026 the Plotscene Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-click detection for platforms that do not report a repeat count.
//!
//! A press counts as a repeat of the previous press when all of these hold:
//! - it uses the same button,
//! - it lands within the distance threshold of the previous press (if configured),
//! - it arrives within the interval threshold after the previous press (if configured).
//!
//! Anything else starts a new sequence with a count of 1.
//!
//! ```
//! use kurbo::Point;
//! use plotscene_event_state::{ClickCounter, MouseButton};
//!
//! let mut clicks = ClickCounter::new();
//! assert_eq!(clicks.on_press(MouseButton::Left, Point::new(10.0, 10.0), 1000), 1);
//! assert_eq!(clicks.on_press(MouseButton::Left, Point::new(11.0, 10.0), 1200), 2);
//! // Too late: a fresh sequence.
//! assert_eq!(clicks.on_press(MouseButton::Left, Point::new(11.0, 10.0), 2000), 1);
//! ```

use kurbo::Point;

use crate::event::MouseButton;

/// Default maximum distance between repeated presses, in scene units.
pub const DEFAULT_CLICK_DISTANCE: f64 = 4.0;

/// Default maximum interval between repeated presses, in milliseconds.
pub const DEFAULT_CLICK_INTERVAL: u64 = 500;

#[derive(Copy, Clone, Debug, PartialEq)]
struct LastPress {
    button: MouseButton,
    position: Point,
    time: u64,
    count: u32,
}

/// Counts repeated presses of the same button at roughly the same spot.
#[derive(Clone, Debug)]
pub struct ClickCounter {
    /// Distance beyond which a press no longer repeats the previous one, or `None` for unlimited.
    pub distance_threshold: Option<f64>,
    /// Milliseconds after which a press no longer repeats the previous one, or `None` for
    /// unlimited.
    pub interval_threshold: Option<u64>,
    last: Option<LastPress>,
}

impl Default for ClickCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickCounter {
    /// Create a counter with the default 4 px / 500 ms thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(Some(DEFAULT_CLICK_DISTANCE), Some(DEFAULT_CLICK_INTERVAL))
    }

    /// Create a counter with custom thresholds.
    ///
    /// # Arguments
    /// * `distance_threshold` - Maximum pointer distance between presses, or `None` for unlimited
    /// * `interval_threshold` - Maximum milliseconds between presses, or `None` for unlimited
    pub fn with_thresholds(
        distance_threshold: Option<f64>,
        interval_threshold: Option<u64>,
    ) -> Self {
        Self {
            distance_threshold,
            interval_threshold,
            last: None,
        }
    }

    /// Record a press and return its repeat count (1 for a single click, 2 for a double, ...).
    ///
    /// `timestamp` is in milliseconds. A timestamp earlier than the previous one
    /// is treated as zero elapsed time.
    pub fn on_press(&mut self, button: MouseButton, position: Point, timestamp: u64) -> u32 {
        let count = match self.last {
            Some(last) if self.repeats(&last, button, position, timestamp) => {
                last.count.saturating_add(1)
            }
            _ => 1,
        };
        self.last = Some(LastPress {
            button,
            position,
            time: timestamp,
            count,
        });
        count
    }

    /// Repeat count of the most recent press, or 0 if none is recorded.
    pub fn count(&self) -> u32 {
        self.last.map_or(0, |last| last.count)
    }

    /// Forget the previous press so the next one starts a new sequence.
    pub fn reset(&mut self) {
        self.last = None;
    }

    fn repeats(
        &self,
        last: &LastPress,
        button: MouseButton,
        position: Point,
        timestamp: u64,
    ) -> bool {
        if last.button != button {
            return false;
        }
        let distance_ok = self
            .distance_threshold
            .is_none_or(|threshold| last.position.distance(position) <= threshold);
        let time_ok = self
            .interval_threshold
            .is_none_or(|threshold| timestamp.saturating_sub(last.time) <= threshold);
        distance_ok && time_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_within_thresholds() {
        let mut clicks = ClickCounter::new();
        let p = Point::new(50.0, 50.0);
        assert_eq!(clicks.on_press(MouseButton::Left, p, 0), 1);
        assert_eq!(clicks.on_press(MouseButton::Left, p, 100), 2);
        assert_eq!(clicks.on_press(MouseButton::Left, p, 200), 3);
        assert_eq!(clicks.count(), 3);
    }

    #[test]
    fn button_change_resets() {
        let mut clicks = ClickCounter::new();
        let p = Point::new(0.0, 0.0);
        clicks.on_press(MouseButton::Left, p, 0);
        assert_eq!(clicks.on_press(MouseButton::Right, p, 10), 1);
        assert_eq!(clicks.on_press(MouseButton::Right, p, 20), 2);
    }

    #[test]
    fn distance_and_interval_reset() {
        let mut clicks = ClickCounter::new();
        clicks.on_press(MouseButton::Left, Point::new(0.0, 0.0), 0);
        // 5 px away exceeds the 4 px default.
        assert_eq!(clicks.on_press(MouseButton::Left, Point::new(3.0, 4.0), 10), 1);
        // Exactly on the interval boundary still counts.
        assert_eq!(clicks.on_press(MouseButton::Left, Point::new(3.0, 4.0), 510), 2);
        assert_eq!(clicks.on_press(MouseButton::Left, Point::new(3.0, 4.0), 1011), 1);
    }

    #[test]
    fn unlimited_thresholds() {
        let mut clicks = ClickCounter::with_thresholds(None, None);
        clicks.on_press(MouseButton::Middle, Point::new(0.0, 0.0), 0);
        assert_eq!(
            clicks.on_press(MouseButton::Middle, Point::new(1000.0, 0.0), 1_000_000),
            2
        );
    }

    #[test]
    fn reset_and_clock_skew() {
        let mut clicks = ClickCounter::new();
        let p = Point::new(1.0, 1.0);
        clicks.on_press(MouseButton::Left, p, 1000);
        assert_eq!(clicks.on_press(MouseButton::Left, p, 900), 2, "earlier timestamp saturates");
        clicks.reset();
        assert_eq!(clicks.count(), 0);
        assert_eq!(clicks.on_press(MouseButton::Left, p, 950), 1);
    }
}
