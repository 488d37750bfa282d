//! Turning learning objectives into tagged question ideas.

mod generator;
mod parsing;
mod prompt;
mod template;
mod types;

pub use generator::IdeaGenerator;
pub use parsing::{extract_scratchpad, parse_ideas};
pub use prompt::IdeaPrompts;
pub use types::{IdeaBlock, IdeaSet, UserRequest};
