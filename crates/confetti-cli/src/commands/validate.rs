//! Config validation command

use anyhow::{Context, Result};
use confetti_particles::ConfettiConfig;

pub fn run(path: &str) -> Result<()> {
    println!("{}", normalized_json(path)?);
    Ok(())
}

/// Load `path` and render the validated config as pretty JSON
fn normalized_json(path: &str) -> Result<String> {
    let config =
        ConfettiConfig::load(path).with_context(|| format!("{} is not a valid burst config", path))?;
    Ok(serde_json::to_string_pretty(&config)?)
}
