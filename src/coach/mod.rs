//! The conversational surface the question generator runs inside.
//!
//! Everything here is a seam: the workflow only talks to [`Conversation`] and
//! [`TextGenerator`], so it runs the same against the terminal adapter, an
//! HTTP chat model, or the recording fakes used in tests.

mod ask;
mod registry;
mod terminal;
mod types;

pub use ask::ChatTextGenerator;
pub use registry::{ActionRegistry, CoachAction};
pub use terminal::TerminalCoach;
pub use types::{AskOptions, AskRequest, CoachContext, Conversation, TextGenerator};
#[cfg(test)]
pub use types::AskResponse;
