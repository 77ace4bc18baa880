//! Print default optional config values

use anyhow::Result;
use confetti_particles::config::{
    DEFAULT_LIMIT, DEFAULT_SIZES, DEFAULT_SPIN_VELOCITY_MAX, DEFAULT_X_VELOCITY_MAX,
    DEFAULT_Y_VELOCITY_MAX,
};
use serde::Serialize;

#[derive(Serialize)]
struct Defaults {
    sizes: Vec<f64>,
    limit: usize,
    y_velocity_max: f64,
    x_velocity_max: f64,
    spin_velocity_max: f64,
}

fn defaults() -> Defaults {
    Defaults {
        sizes: DEFAULT_SIZES.to_vec(),
        limit: DEFAULT_LIMIT,
        y_velocity_max: DEFAULT_Y_VELOCITY_MAX,
        x_velocity_max: DEFAULT_X_VELOCITY_MAX,
        spin_velocity_max: DEFAULT_SPIN_VELOCITY_MAX,
    }
}

pub fn run() -> Result<()> {
    print!("{}", toml::to_string(&defaults())?);
    Ok(())
}
