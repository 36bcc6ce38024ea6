//! Frame pacing and timing statistics
//!
//! The UART has no flow control back to the host, so the loop rate-limits
//! itself: if a frame took less than the minimum interval to compute and
//! send, the driver sleeps for the remainder.

use std::time::{Duration, Instant};

/// Source of wall time and sleeping for the frame loop
pub trait Clock {
    fn now(&mut self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

/// The real clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock for tests.
///
/// Every call to `now` advances time by a fixed tick, which simulates the
/// cost of the work done between two readings. Sleeps advance time and are
/// recorded.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Instant,
    tick: Duration,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::with_tick(Duration::ZERO)
    }

    /// Advance by `tick` after each reading
    pub fn with_tick(tick: Duration) -> Self {
        Self {
            current: Instant::now(),
            tick,
            sleeps: Vec::new(),
        }
    }

    /// Move time forward without sleeping
    pub fn advance(&mut self, duration: Duration) {
        self.current += duration;
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> Instant {
        let now = self.current;
        self.current += self.tick;
        now
    }

    fn sleep(&mut self, duration: Duration) {
        self.current += duration;
        self.sleeps.push(duration);
    }
}

/// Decides how long to wait after each frame
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    min_interval: Duration,
}

impl FramePacer {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time left to wait after a frame that took `elapsed`, if any
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        let remaining = self.min_interval.saturating_sub(elapsed);
        (!remaining.is_zero()).then_some(remaining)
    }
}

/// Running frame timing statistics
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Frames completed
    pub frames: u64,
    /// Time spent computing and sending the last frame
    pub last_frame_time: Duration,
    /// Time spent computing and sending all frames
    pub total_frame_time: Duration,
    /// Time spent in pacing sleeps
    pub total_sleep: Duration,
}

impl FrameStats {
    pub fn record_frame(&mut self, frame_time: Duration) {
        self.frames += 1;
        self.last_frame_time = frame_time;
        self.total_frame_time += frame_time;
    }

    pub fn record_sleep(&mut self, sleep: Duration) {
        self.total_sleep += sleep;
    }

    /// Frames per second the last frame would allow without pacing
    pub fn last_fps(&self) -> f64 {
        let secs = self.last_frame_time.as_secs_f64();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }

    /// Effective frame rate including pacing sleeps
    pub fn average_fps(&self) -> f64 {
        let secs = (self.total_frame_time + self.total_sleep).as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(150);

    #[test]
    fn test_idle_frame_sleeps_full_interval() {
        let pacer = FramePacer::new(INTERVAL);
        assert_eq!(pacer.remaining(Duration::ZERO), Some(INTERVAL));
    }

    #[test]
    fn test_partial_frame_sleeps_remainder() {
        let pacer = FramePacer::new(INTERVAL);
        assert_eq!(
            pacer.remaining(Duration::from_millis(126)),
            Some(Duration::from_millis(24))
        );
    }

    #[test]
    fn test_slow_frame_does_not_sleep() {
        let pacer = FramePacer::new(INTERVAL);
        assert_eq!(pacer.remaining(INTERVAL), None);
        assert_eq!(pacer.remaining(Duration::from_millis(200)), None);
    }

    #[test]
    fn test_manual_clock_ticks() {
        let mut clock = ManualClock::with_tick(Duration::from_millis(5));
        let a = clock.now();
        let b = clock.now();
        assert_eq!(b - a, Duration::from_millis(5));

        clock.sleep(Duration::from_millis(20));
        clock.advance(Duration::from_millis(1));
        let c = clock.now();
        assert_eq!(c - b, Duration::from_millis(26));
        assert_eq!(clock.sleeps(), &[Duration::from_millis(20)]);
    }

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::default();
        assert_eq!(stats.last_fps(), 0.0);
        assert_eq!(stats.average_fps(), 0.0);

        stats.record_frame(Duration::from_millis(50));
        stats.record_sleep(Duration::from_millis(100));
        stats.record_frame(Duration::from_millis(100));
        stats.record_sleep(Duration::from_millis(50));

        assert_eq!(stats.frames, 2);
        assert!((stats.last_fps() - 10.0).abs() < 1e-9);
        assert!((stats.average_fps() - 2.0 / 0.3).abs() < 1e-9);
    }
}
