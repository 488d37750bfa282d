use std::fmt;

use serde::Serialize;

/// What the instructor asked for. Built once per run by the input collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRequest {
    pub learning_objectives: String,
    pub number_of_questions: u32,
    pub additional_context: Option<String>,
}

/// One `<idea id=N>…</idea>` block, tags included, forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaBlock(String);

impl IdeaBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdeaBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The raw model answer together with the blocks extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaSet {
    pub raw: String,
    pub blocks: Vec<IdeaBlock>,
}

impl IdeaSet {
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
}
