//! Confetti Particles - one-shot confetti burst simulation
//!
//! Provides the burst engine driven by an injected display-tick provider:
//! - Validated instance configuration with TOML loading
//! - Spawner and integrator over a bounded particle set
//! - Frame driver with a one-shot completion future
//! - Render adapter traits plus an in-memory render tree

pub mod completion;
pub mod config;
pub mod headless;
pub mod instance;
pub mod particle;
pub mod rand;
pub mod render;
pub mod spawn;

pub use completion::{Completion, RunOutcome};
pub use config::ConfettiConfig;
pub use headless::{HeadlessDocument, NodeId, NodeRecord};
pub use instance::{create_confetti_instance, ConfettiInstance, RunState, RunStats};
pub use particle::{offscreen_threshold, Drift, Particle, ParticleSet, OFFSCREEN_MARGIN};
pub use render::{Mount, RenderHost, SpriteStyle, VisualElement};
