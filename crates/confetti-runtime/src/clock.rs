//! Frame clock with fixed-timestep accumulator

use std::time::{Duration, Instant};

/// Paces display ticks in real time at a fixed rate
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last clock tick in seconds
    pub delta_time: f64,
    /// Interval between display ticks (default: 1/60 second)
    pub frame_interval: f64,
    /// Accumulated time not yet consumed by display ticks
    accumulator: f64,
    last_instant: Instant,
    first_tick: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            frame_interval: 1.0 / 60.0,
            accumulator: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl FrameClock {
    /// Create a new frame clock at 60Hz
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a frame clock ticking at `hz` frames per second
    pub fn with_rate(hz: f64) -> Self {
        Self {
            frame_interval: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Sample wall time. Call once per host loop iteration.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Add `elapsed` seconds of time. Clamped to 250ms to avoid a burst of catch-up frames.
    pub fn advance(&mut self, elapsed: f64) {
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if a display tick is due
    pub fn frame_due(&self) -> bool {
        self.accumulator >= self.frame_interval
    }

    /// Consume one frame interval from the accumulator
    pub fn consume_frame(&mut self) {
        self.accumulator -= self.frame_interval;
    }

    /// Time left until the next tick is due
    pub fn until_next_frame(&self) -> Duration {
        Duration::from_secs_f64((self.frame_interval - self.accumulator).max(0.0))
    }
}
