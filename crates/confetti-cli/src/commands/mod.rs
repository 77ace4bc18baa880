//! CLI command implementations

pub mod defaults;
pub mod run;
pub mod validate;
