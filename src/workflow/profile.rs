use crate::config::ProfileKind;
use crate::ideas::IdeaPrompts;

/// Everything that differs between the basic and contextual flavours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineProfile {
    pub kind: ProfileKind,
    pub prompts: IdeaPrompts,
    /// Ask the instructor for optional extra context.
    pub collect_context: bool,
    /// Persist request, raw ideas and scratchpad through file storage.
    pub keep_run_log: bool,
}

impl PipelineProfile {
    pub fn basic() -> Self {
        Self {
            kind: ProfileKind::Basic,
            prompts: IdeaPrompts::basic(),
            collect_context: false,
            keep_run_log: false,
        }
    }

    pub fn contextual() -> Self {
        Self {
            kind: ProfileKind::Contextual,
            prompts: IdeaPrompts::contextual(),
            collect_context: true,
            keep_run_log: true,
        }
    }

    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::Basic => Self::basic(),
            ProfileKind::Contextual => Self::contextual(),
        }
    }
}
