use crate::guides::PageSpec;

use super::types::WorkflowEvent;

/// What happened to one requested question.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Created {
        index: usize,
        task_id: String,
        page: PageSpec,
    },
    /// Assessment authoring failed and a plain-text page was added instead.
    Degraded {
        index: usize,
        page: PageSpec,
        cause: String,
    },
}

impl ItemOutcome {
    pub fn index(&self) -> usize {
        match self {
            ItemOutcome::Created { index, .. } | ItemOutcome::Degraded { index, .. } => *index,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ItemOutcome::Degraded { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub items: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn created(&self) -> usize {
        self.items.iter().filter(|item| !item.is_degraded()).count()
    }

    pub fn degraded(&self) -> usize {
        self.items.iter().filter(|item| item.is_degraded()).count()
    }
}

/// Terminal result of one press of the action button.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Cancelled,
    IdeaGenerationFailed,
    Completed(BatchReport),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRun {
    pub outcome: RunOutcome,
    pub events: Vec<WorkflowEvent>,
}
