//! The "Generate Multiple Choice Questions" action, end to end.

mod input;
mod orchestrator;
mod outcome;
mod pipeline;
mod profile;
mod reporter;
mod runlog;
mod types;

pub use orchestrator::{McqWorkflow, WorkflowServices};
pub use outcome::{ItemOutcome, RunOutcome};
pub use profile::PipelineProfile;

#[cfg(test)]
mod tests;
