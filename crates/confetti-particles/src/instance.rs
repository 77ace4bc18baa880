//! Confetti instance: factory and per-frame driver
//!
//! A run goes `Idle → Running → Completed | Cancelled`. Each display tick
//! spawns at most one particle (while under the limit), integrates every
//! particle, and then checks whether all of them have left the viewport.
//! The first tick of a run executes synchronously inside `generate()`.

use crate::completion::{completion_pair, Completion, CompletionSignal, RunOutcome};
use crate::config::ConfettiConfig;
use crate::particle::{Particle, ParticleSet};
use crate::rand::ParticleRng;
use crate::render::RenderHost;
use crate::spawn::spawn_particle;
use confetti_core::Result;
use confetti_runtime::{FrameHandle, FrameScheduler};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Lifecycle of the most recent run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Counters for the most recent run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Ticks processed, including the synchronous first one
    pub frames: u64,
    pub spawned: usize,
    /// Largest particle count seen after a spawn
    pub peak_live: usize,
}

struct Engine {
    config: ConfettiConfig,
    particles: ParticleSet,
    frame: Option<FrameHandle>,
    signal: Option<CompletionSignal>,
    rng: ParticleRng,
    state: RunState,
    stats: RunStats,
}

/// One independent confetti burst.
///
/// Instances share nothing with each other; the scheduler and render host
/// are injected and only borrowed for the duration of a tick.
pub struct ConfettiInstance {
    engine: Rc<RefCell<Engine>>,
    scheduler: Rc<dyn FrameScheduler>,
    host: Rc<dyn RenderHost>,
}

/// Validate `config` and build a fresh instance.
///
/// Validation runs before either collaborator is touched, so an invalid
/// config leaves the render tree and the scheduler untouched.
pub fn create_confetti_instance(
    config: ConfettiConfig,
    scheduler: Rc<dyn FrameScheduler>,
    host: Rc<dyn RenderHost>,
) -> Result<ConfettiInstance> {
    config.validate()?;

    let rng = match config.seed {
        Some(seed) => ParticleRng::new(seed),
        None => ParticleRng::from_time(),
    };
    let particles = ParticleSet::with_capacity(config.limit.min(1024));

    Ok(ConfettiInstance {
        engine: Rc::new(RefCell::new(Engine {
            config,
            particles,
            frame: None,
            signal: None,
            rng,
            state: RunState::Idle,
            stats: RunStats::default(),
        })),
        scheduler,
        host,
    })
}

impl ConfettiInstance {
    /// Start a run, superseding any run in flight.
    ///
    /// The returned future resolves `Completed` once every particle has left
    /// the viewport, or `Cancelled` if the run is cancelled, restarted, or
    /// the instance is dropped first.
    pub fn generate(&self) -> Completion {
        self.cancel_animation();

        let (signal, completion) = completion_pair();
        let superseded = {
            let mut engine = self.engine.borrow_mut();
            engine.state = RunState::Running;
            engine.stats = RunStats::default();
            engine.signal.replace(signal)
        };
        if let Some(previous) = superseded {
            previous.settle(RunOutcome::Cancelled);
        }
        log::debug!("confetti run started on '{}'", self.engine.borrow().config.selector);

        run_frame(&self.engine, &self.scheduler, &self.host);
        completion
    }

    /// Suppress the next scheduled tick. No-op when nothing is scheduled.
    ///
    /// Particles already on screen stay where they are; the pending run's
    /// completion resolves `Cancelled`.
    pub fn cancel_animation(&self) {
        let (handle, signal) = {
            let mut engine = self.engine.borrow_mut();
            let Some(handle) = engine.frame.take() else {
                return;
            };
            engine.state = RunState::Cancelled;
            (handle, engine.signal.take())
        };

        self.scheduler.cancel_frame(handle);
        log::debug!("confetti run cancelled ({:?})", handle);
        if let Some(signal) = signal {
            signal.settle(RunOutcome::Cancelled);
        }
    }

    pub fn state(&self) -> RunState {
        self.engine.borrow().state
    }

    pub fn stats(&self) -> RunStats {
        self.engine.borrow().stats
    }

    pub fn particle_count(&self) -> usize {
        self.engine.borrow().particles.len()
    }

    /// Copy of the current particle states
    pub fn particles(&self) -> Vec<Particle> {
        self.engine.borrow().particles.snapshot()
    }

    /// Whether a tick is currently scheduled for this instance
    pub fn has_pending_frame(&self) -> bool {
        self.engine.borrow().frame.is_some()
    }
}

impl Drop for ConfettiInstance {
    fn drop(&mut self) {
        self.cancel_animation();
    }
}

/// Process one tick of the run owned by `engine`
fn run_frame(
    engine: &Rc<RefCell<Engine>>,
    scheduler: &Rc<dyn FrameScheduler>,
    host: &Rc<dyn RenderHost>,
) {
    let finished = {
        let mut guard = engine.borrow_mut();
        let e = &mut *guard;
        // The handle that brought us here has been consumed
        e.frame = None;
        if e.state != RunState::Running {
            return;
        }
        e.stats.frames += 1;

        if e.particles.len() < e.config.limit
            && spawn_particle(&e.config, host.as_ref(), &mut e.rng, &mut e.particles)
        {
            e.stats.spawned += 1;
            e.stats.peak_live = e.stats.peak_live.max(e.particles.len());
        }

        let viewport_height = scheduler.viewport_height();
        e.particles.integrate(viewport_height);

        if e.particles.all_offscreen(viewport_height) {
            e.particles.clear();
            e.state = RunState::Completed;
            log::debug!(
                "confetti run completed after {} frame(s), {} particle(s)",
                e.stats.frames,
                e.stats.spawned
            );
            e.signal.take()
        } else {
            e.frame = Some(schedule_next(engine, scheduler, host));
            log::trace!(
                "frame {}: {} particle(s) live",
                e.stats.frames,
                e.particles.len()
            );
            None
        }
    };

    if let Some(signal) = finished {
        signal.settle(RunOutcome::Completed);
    }
}

fn schedule_next(
    engine: &Rc<RefCell<Engine>>,
    scheduler: &Rc<dyn FrameScheduler>,
    host: &Rc<dyn RenderHost>,
) -> FrameHandle {
    let engine: Weak<RefCell<Engine>> = Rc::downgrade(engine);
    let weak_scheduler: Weak<dyn FrameScheduler> = Rc::downgrade(scheduler);
    let host = host.clone();

    scheduler.request_frame(Box::new(move || {
        let (Some(engine), Some(scheduler)) = (engine.upgrade(), weak_scheduler.upgrade()) else {
            return;
        };
        run_frame(&engine, &scheduler, &host);
    }))
}
