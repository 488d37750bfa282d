use std::path::PathBuf;

use super::constants::*;
use super::types::{
    AssessmentSettings, CourseSettings, LlmProvider, LlmSettings, ModelSettings, ProfileKind,
};

pub fn default_user_agent() -> String {
    format!("mcq-coach/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for LlmSettings {
    fn default() -> Self {
        let provider = LlmProvider::OpenRouter;
        Self {
            provider,
            api_key: String::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: provider.default_base_url().to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            ideas: DEFAULT_IDEA_MODEL.to_string(),
            assessments: DEFAULT_ASSESSMENT_MODEL.to_string(),
            idea_max_tokens: DEFAULT_IDEA_MAX_TOKENS,
            assessment_max_tokens: DEFAULT_ASSESSMENT_MAX_TOKENS,
        }
    }
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            show_name: false,
            shuffle_answers: true,
            guidance_after_attempts: DEFAULT_GUIDANCE_AFTER_ATTEMPTS,
            max_attempts_count: 0,
        }
    }
}

impl Default for CourseSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            profile: ProfileKind::Basic,
        }
    }
}
