//! Frame timing for the animated stages.

use std::time::Duration;

/// Accumulates a rotation angle from frame timestamps.
///
/// Timestamps are measured from an arbitrary origin (usually the start of the
/// frame loop). The angle grows by `speed` radians per second.
#[derive(Debug, Clone)]
pub struct RotationClock {
    speed: f32,
    rotation: f32,
    then: Option<f32>,
}

impl RotationClock {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            rotation: 0.0,
            then: None,
        }
    }

    /// Advances the clock to `now` and returns the angle to draw this frame.
    ///
    /// The returned angle is the one accumulated up to the previous frame; the
    /// interval since that frame is added afterwards.
    pub fn tick(&mut self, now: Duration) -> f32 {
        let now = now.as_secs_f32();
        let interval = match self.then {
            Some(then) => (now - then).max(0.0),
            None => 0.0,
        };
        self.then = Some(now);

        let current = self.rotation;
        self.rotation += interval * self.speed;
        current
    }

    /// The accumulated rotation in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }
}

impl Default for RotationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_sets_baseline() {
        let mut clock = RotationClock::new(1.0);
        assert_eq!(clock.tick(Duration::from_secs(42)), 0.0);
        assert_eq!(clock.rotation(), 0.0);
    }

    #[test]
    fn test_draws_then_advances() {
        let mut clock = RotationClock::new(1.0);
        clock.tick(Duration::from_millis(1000));
        assert_eq!(clock.tick(Duration::from_millis(1500)), 0.0);
        assert!((clock.rotation() - 0.5).abs() < 1e-6);
        let drawn = clock.tick(Duration::from_millis(2000));
        assert!((drawn - 0.5).abs() < 1e-6);
        assert!((clock.rotation() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_scales_rotation() {
        let mut clock = RotationClock::new(2.5);
        clock.tick(Duration::ZERO);
        clock.tick(Duration::from_secs(2));
        assert!((clock.rotation() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_timestamps_do_not_unwind() {
        let mut clock = RotationClock::new(1.0);
        clock.tick(Duration::from_secs(3));
        clock.tick(Duration::from_secs(1));
        assert_eq!(clock.rotation(), 0.0);
        clock.tick(Duration::from_secs(2));
        assert!((clock.rotation() - 1.0).abs() < 1e-6);
    }
}
