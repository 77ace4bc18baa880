//! Headless burst runner

use anyhow::Result;
use confetti_particles::{
    create_confetti_instance, ConfettiConfig, ConfettiInstance, HeadlessDocument, Particle,
    RunOutcome,
};
use confetti_runtime::{FrameClock, ManualScheduler};
use serde::Serialize;
use std::rc::Rc;

pub struct RunArgs {
    pub config: String,
    pub viewport_height: f64,
    pub seed: Option<u32>,
    pub max_frames: u64,
    pub realtime: bool,
    pub fps: f64,
    pub trace: bool,
    pub no_mount: bool,
}

/// One line of `--trace` output
#[derive(Serialize)]
struct FrameTrace {
    frame: u64,
    live: usize,
    attached: usize,
    particles: Vec<Particle>,
}

/// What a finished run looked like
#[derive(Debug, PartialEq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub frames: u64,
    pub spawned: usize,
    pub peak_live: usize,
    pub sprites_created: usize,
}

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = ConfettiConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let summary = simulate(config, &args)?;

    println!("Outcome: {:?}", summary.outcome);
    println!("  Frames:          {}", summary.frames);
    println!("  Particles:       {}", summary.spawned);
    println!("  Peak live:       {}", summary.peak_live);
    println!("  Sprites created: {}", summary.sprites_created);
    Ok(())
}

/// Drive one burst on a headless document until it settles
pub fn simulate(config: ConfettiConfig, args: &RunArgs) -> Result<RunSummary> {
    let scheduler = Rc::new(ManualScheduler::new(args.viewport_height));
    let doc = HeadlessDocument::new();
    if !args.no_mount {
        doc.add_mount(&config.selector);
    }

    let instance = create_confetti_instance(config, scheduler.clone(), Rc::new(doc.clone()))?;
    let completion = instance.generate();
    if args.trace {
        print_trace(1, &instance, &doc)?;
    }

    let mut clock = FrameClock::with_rate(args.fps);
    while !completion.is_settled() {
        if scheduler.frame_count() >= args.max_frames {
            log::warn!("stopping run after {} frame(s)", args.max_frames);
            instance.cancel_animation();
            break;
        }
        if args.realtime {
            clock.tick();
            if !clock.frame_due() {
                std::thread::sleep(clock.until_next_frame());
                continue;
            }
            clock.consume_frame();
        }

        scheduler.tick();
        if args.trace {
            print_trace(instance.stats().frames, &instance, &doc)?;
        }
    }

    let outcome = pollster::block_on(completion);
    let stats = instance.stats();
    Ok(RunSummary {
        outcome,
        frames: stats.frames,
        spawned: stats.spawned,
        peak_live: stats.peak_live,
        sprites_created: doc.node_count(),
    })
}

fn print_trace(frame: u64, instance: &ConfettiInstance, doc: &HeadlessDocument) -> Result<()> {
    let trace = FrameTrace {
        frame,
        live: instance.particle_count(),
        attached: doc.attached_count(),
        particles: instance.particles(),
    };
    println!("{}", serde_json::to_string(&trace)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use confetti_core::Position;

    fn args() -> RunArgs {
        RunArgs {
            config: String::new(),
            viewport_height: 600.0,
            seed: None,
            max_frames: 100_000,
            realtime: false,
            fps: 60.0,
            trace: false,
            no_mount: false,
        }
    }

    fn config() -> ConfettiConfig {
        ConfettiConfig::new("#stage", Position::new(200.0, 500.0), vec!["x.png".into()])
            .with_limit(8)
            .with_seed(21)
    }

    #[test]
    fn burst_runs_to_completion() {
        let summary = simulate(config(), &args()).unwrap();
        assert_eq!(summary.outcome, RunOutcome::Completed);
        assert_eq!(summary.spawned, 8);
        assert_eq!(summary.peak_live, 8);
        assert_eq!(summary.sprites_created, 8);
        assert!(summary.frames > 8);
    }

    #[test]
    fn missing_mount_finishes_without_sprites() {
        let summary = simulate(
            config(),
            &RunArgs {
                no_mount: true,
                ..args()
            },
        )
        .unwrap();
        assert_eq!(summary.outcome, RunOutcome::Completed);
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.sprites_created, 0);
    }

    #[test]
    fn frame_cap_cancels_run() {
        let summary = simulate(
            config(),
            &RunArgs {
                max_frames: 3,
                ..args()
            },
        )
        .unwrap();
        assert_eq!(summary.outcome, RunOutcome::Cancelled);
        assert_eq!(summary.frames, 4);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ConfettiConfig::new("#stage", Position::ORIGIN, Vec::new());
        let err = simulate(config, &args()).unwrap_err();
        assert!(err.to_string().contains("images"));
    }
}
