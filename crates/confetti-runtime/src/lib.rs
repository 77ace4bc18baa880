//! Confetti Runtime - Frame scheduling infrastructure
//!
//! Provides the display-tick building blocks the simulation is driven by:
//! - `FrameScheduler` — trait for a host that runs a callback before the next repaint
//! - `FrameHandle` — cancellable handle for one scheduled callback
//! - `ManualScheduler` — a scheduler whose ticks are driven explicitly (tests, headless runs)
//! - `FrameClock` — fixed-timestep accumulator for pacing ticks in real time

mod clock;
mod manual;
mod scheduler;

pub use clock::FrameClock;
pub use manual::ManualScheduler;
pub use scheduler::{FrameCallback, FrameHandle, FrameScheduler};
