//! Confetti CLI - Run and inspect confetti bursts without a display

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{defaults, run, validate};

#[derive(Parser)]
#[command(name = "confetti")]
#[command(about = "Headless runner for one-shot confetti bursts", long_about = None)]
#[command(version)]
struct Cli {
    /// Log run lifecycle at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a burst until every particle has left the viewport
    Run {
        /// Path to burst config (TOML)
        config: String,

        /// Viewport height in pixels
        #[arg(long, default_value = "800")]
        viewport_height: f64,

        /// Override the config's PRNG seed
        #[arg(long)]
        seed: Option<u32>,

        /// Cancel the run after this many display ticks
        #[arg(long, default_value = "100000")]
        max_frames: u64,

        /// Pace ticks in real time instead of running flat out
        #[arg(long)]
        realtime: bool,

        /// Tick rate for --realtime
        #[arg(long, default_value = "60", value_parser = parse_fps)]
        fps: f64,

        /// Print one JSON object per frame
        #[arg(long)]
        trace: bool,

        /// Do not register the selector as a mount (nothing will spawn)
        #[arg(long)]
        no_mount: bool,
    },

    /// Validate a burst config and print it normalized
    Validate {
        /// Path to burst config (TOML)
        config: String,
    },

    /// Print the default values of optional config fields
    Defaults,
}

fn parse_fps(s: &str) -> Result<f64, String> {
    let fps: f64 = s.trim().parse().map_err(|e| format!("invalid fps: {}", e))?;
    if fps > 0.0 && fps.is_finite() {
        Ok(fps)
    } else {
        Err(format!("fps must be a positive number, got {}", fps))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Run {
            config,
            viewport_height,
            seed,
            max_frames,
            realtime,
            fps,
            trace,
            no_mount,
        } => run::run(run::RunArgs {
            config,
            viewport_height,
            seed,
            max_frames,
            realtime,
            fps,
            trace,
            no_mount,
        }),
        Commands::Validate { config } => validate::run(&config),
        Commands::Defaults => defaults::run(),
    }
}
