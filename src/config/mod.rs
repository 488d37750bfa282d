//! Configuration management for mcq-coach.
//!
//! Settings are layered in this order:
//! - built-in defaults
//! - the JSON file at `~/.mcq-coach/config`
//! - environment variable overrides
//! - command-line flags (applied by the CLI on top of the loaded config)

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use types::{AssessmentSettings, Config, LlmProvider, LlmSettings, ProfileKind};
