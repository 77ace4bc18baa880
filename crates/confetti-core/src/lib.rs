//! Confetti Core - Foundational types for the confetti engine
//!
//! This crate provides the types that all other confetti crates depend on:
//! - `Position` - Pixel-space launch point and particle coordinates
//! - Error types and Result alias

mod error;
mod types;

pub use error::{ConfettiError, Result};
pub use types::Position;
