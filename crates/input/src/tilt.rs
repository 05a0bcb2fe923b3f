//! Tilt input: accelerometer samples to cursor moves.
//!
//! A sample is thresholded per axis, so a diagonal tilt moves the cursor
//! diagonally. [`MoveThrottle`] caps how often a held tilt repeats.

use crate::types::{Horizontal, MoveIntent, Vertical, MIN_TILT};

/// One accelerometer reading, in g
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltSample {
    pub acc_x: f32,
    pub acc_y: f32,
}

impl TiltSample {
    pub const fn new(acc_x: f32, acc_y: f32) -> Self {
        Self { acc_x, acc_y }
    }
}

/// Threshold a sample into a move intent.
///
/// Positive x tilts right, positive y tilts down. Readings within
/// `MIN_TILT` of level are ignored on that axis.
pub fn tilt_to_intent(sample: TiltSample) -> MoveIntent {
    let horizontal = if sample.acc_x > MIN_TILT {
        Horizontal::Right
    } else if sample.acc_x < -MIN_TILT {
        Horizontal::Left
    } else {
        Horizontal::None
    };

    let vertical = if sample.acc_y > MIN_TILT {
        Vertical::Down
    } else if sample.acc_y < -MIN_TILT {
        Vertical::Up
    } else {
        Vertical::None
    };

    MoveIntent::new(horizontal, vertical)
}

/// Lets a move through at most once per `interval_ms`.
#[derive(Debug, Clone)]
pub struct MoveThrottle {
    interval_ms: u64,
    last_move_ms: u64,
    has_moved: bool,
}

impl MoveThrottle {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_move_ms: 0,
            has_moved: false,
        }
    }

    /// Filter `intent` at time `now_ms`. Empty intents pass through and do not
    /// reset the timer, so releasing the tilt never delays the next move.
    pub fn filter(&mut self, now_ms: u64, intent: MoveIntent) -> MoveIntent {
        if intent.is_none() {
            return MoveIntent::NONE;
        }

        if self.has_moved && now_ms.saturating_sub(self.last_move_ms) < self.interval_ms {
            return MoveIntent::NONE;
        }

        self.has_moved = true;
        self.last_move_ms = now_ms;
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_sample_is_no_move() {
        assert!(tilt_to_intent(TiltSample::default()).is_none());
        assert!(tilt_to_intent(TiltSample::new(0.15, -0.15)).is_none());
    }

    #[test]
    fn axes_threshold_independently() {
        let intent = tilt_to_intent(TiltSample::new(0.4, -0.2));
        assert_eq!(intent, MoveIntent::new(Horizontal::Right, Vertical::Up));

        let intent = tilt_to_intent(TiltSample::new(-0.3, 0.05));
        assert_eq!(intent, MoveIntent::new(Horizontal::Left, Vertical::None));

        let intent = tilt_to_intent(TiltSample::new(0.0, 0.9));
        assert_eq!(intent, MoveIntent::new(Horizontal::None, Vertical::Down));
    }

    #[test]
    fn throttle_spaces_out_moves() {
        let right = MoveIntent::new(Horizontal::Right, Vertical::None);
        let mut throttle = MoveThrottle::new(250);

        assert_eq!(throttle.filter(0, right), right);
        assert!(throttle.filter(100, right).is_none());
        assert!(throttle.filter(249, right).is_none());
        assert_eq!(throttle.filter(250, right), right);
    }

    #[test]
    fn throttle_passes_empty_intents() {
        let mut throttle = MoveThrottle::new(250);
        assert!(throttle.filter(0, MoveIntent::NONE).is_none());
        let up = MoveIntent::new(Horizontal::None, Vertical::Up);
        assert_eq!(throttle.filter(1, up), up);
    }
}
