use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use super::types::{IdeaBlock, IdeaSet};

const SCRATCHPAD_OPEN: &str = "<scratchpad>";
const SCRATCHPAD_CLOSE: &str = "</scratchpad>";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdeaParseError {
    #[error("model response contained no <idea> blocks")]
    NoIdeas,
    #[error("model produced {found} question ideas but {requested} were requested")]
    CountMismatch { requested: usize, found: usize },
}

fn idea_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<idea id=\d+>.*?</idea>").expect("idea pattern is valid"))
}

/// Extracts every idea block in order of appearance.
pub fn parse_ideas(text: &str) -> Result<IdeaSet, IdeaParseError> {
    let blocks: Vec<IdeaBlock> = idea_pattern()
        .find_iter(text)
        .map(|m| IdeaBlock::new(m.as_str()))
        .collect();

    if blocks.is_empty() {
        return Err(IdeaParseError::NoIdeas);
    }

    Ok(IdeaSet {
        raw: text.to_string(),
        blocks,
    })
}

impl IdeaSet {
    /// Keeps the first `requested` blocks. Fewer blocks than requested is an
    /// error; extra blocks are dropped.
    pub fn take_requested(mut self, requested: usize) -> Result<IdeaSet, IdeaParseError> {
        let found = self.blocks.len();
        if found < requested {
            return Err(IdeaParseError::CountMismatch { requested, found });
        }
        if found > requested {
            log::warn!("Model produced {found} ideas for {requested} questions; ignoring the extra ones");
            self.blocks.truncate(requested);
        }
        Ok(self)
    }
}

/// Reasoning text between `<scratchpad>` and the next `</scratchpad>`, or to
/// the end of the text when the block is never closed.
pub fn extract_scratchpad(text: &str) -> Option<&str> {
    let start = text.find(SCRATCHPAD_OPEN)? + SCRATCHPAD_OPEN.len();
    let rest = &text[start..];
    let end = rest.find(SCRATCHPAD_CLOSE).unwrap_or(rest.len());
    Some(rest[..end].trim())
}
