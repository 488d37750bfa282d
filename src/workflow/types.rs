use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Input,
    Ideas,
    Assessments,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Input => write!(f, "input"),
            StageKind::Ideas => write!(f, "ideas"),
            StageKind::Assessments => write!(f, "assessments"),
        }
    }
}

/// Audit trail entries recorded while the workflow runs.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    StageStarted(StageKind),
    StageCompleted(StageKind),
    StageFailed { stage: StageKind, error: String },
    IdeasParsed { count: usize },
    ItemDegraded { index: usize },
}
