use std::time::{Duration, Instant};

/// 60 updates per second, in nanoseconds.
pub const SIXTY_FPS: u64 = 16_666_666;
/// 1 update per second, in nanoseconds.
pub const ONE_FPS: u64 = 1_000_000_000;

/// The engine clock for a single simulation frame.
///
/// Each frame captures the delta since the previous frame and the total elapsed time. Deltas are
/// accumulated so the host can run a fixed number of fixed-step updates per frame: call
/// [`Time::tick`] (or [`Time::advance`] for a caller-chosen delta) once per loop iteration, then
/// drain fixed steps with [`Time::has_fixed`] / [`Time::consume_fixed`].
#[derive(Debug, Copy, Clone)]
pub struct Time {
    /// The instant the last tick was captured.
    instant: Instant,
    /// The fixed simulation step.
    fixed_time_step: Duration,
    /// The delta since the last frame.
    delta: Duration,
    /// Total elapsed time since the first frame.
    elapsed: Duration,
    /// Total elapsed time, advanced in fixed steps.
    fixed_elapsed: Duration,
    /// Time not yet consumed by fixed steps.
    accumulator: Duration,
}

impl Time {
    /// Construct a new clock with zero elapsed time. The fixed step is given in nanoseconds.
    pub fn new(fixed_time_step: u64) -> Self {
        Self {
            instant: Instant::now(),
            fixed_time_step: Duration::from_nanos(fixed_time_step),
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            fixed_elapsed: Duration::ZERO,
            accumulator: Duration::ZERO,
        }
    }

    /// Capture the wall-clock delta since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.instant);
        self.instant = now;
        self.accumulate(delta);
    }

    /// Advance the clock by an explicit delta, ignoring the wall clock.
    pub fn advance(&mut self, delta: Duration) {
        self.instant = Instant::now();
        self.accumulate(delta);
    }

    fn accumulate(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.accumulator += delta;
    }

    /// Whether enough time has accumulated for another fixed step.
    #[inline]
    pub fn has_fixed(&self) -> bool {
        !self.fixed_time_step.is_zero() && self.accumulator >= self.fixed_time_step
    }

    /// Consume one fixed step from the accumulator.
    pub fn consume_fixed(&mut self) {
        self.fixed_elapsed += self.fixed_time_step;
        self.accumulator = self.accumulator.saturating_sub(self.fixed_time_step);
    }

    /// Reset to now with an empty accumulator. Used when resuming after a pause so the paused
    /// interval does not turn into a burst of fixed steps.
    pub fn reset_now(&mut self) {
        self.instant = Instant::now();
        self.accumulator = Duration::ZERO;
    }

    #[inline]
    pub fn fixed_time_step(&self) -> Duration {
        self.fixed_time_step
    }

    /// The fixed step in seconds, as handed to systems.
    #[inline]
    pub fn fixed_delta_secs(&self) -> f32 {
        self.fixed_time_step.as_secs_f32()
    }

    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[inline]
    pub fn fixed_elapsed(&self) -> Duration {
        self.fixed_elapsed
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new(SIXTY_FPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_fixed_steps() {
        // Given
        let mut time = Time::new(10_000_000);

        // When
        time.advance(Duration::from_millis(25));

        // Then
        assert_eq!(time.delta(), Duration::from_millis(25));
        assert_eq!(time.elapsed(), Duration::from_millis(25));

        let mut steps = 0;
        while time.has_fixed() {
            time.consume_fixed();
            steps += 1;
        }
        assert_eq!(steps, 2);
        assert_eq!(time.fixed_elapsed(), Duration::from_millis(20));

        // When - the remainder carries into the next frame
        time.advance(Duration::from_millis(5));

        // Then
        assert!(time.has_fixed());
    }

    #[test]
    fn reset_drops_accumulated_time() {
        // Given
        let mut time = Time::new(ONE_FPS);
        time.advance(Duration::from_secs(3));
        assert!(time.has_fixed());

        // When
        time.reset_now();

        // Then
        assert!(!time.has_fixed());
        assert_eq!(time.elapsed(), Duration::from_secs(3));
    }

    #[test]
    fn zero_step_never_fires() {
        let mut time = Time::new(0);
        time.advance(Duration::from_secs(1));
        assert!(!time.has_fixed());
    }

    #[test]
    fn fixed_delta_in_seconds() {
        let time = Time::new(500_000_000);
        assert_eq!(time.fixed_delta_secs(), 0.5);
        assert_eq!(Time::default().fixed_time_step(), Duration::from_nanos(SIXTY_FPS));
    }
}
