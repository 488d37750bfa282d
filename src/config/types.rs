use anyhow::anyhow;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::constants::{
    DEFAULT_CEREBRAS_BASE_URL, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENROUTER_BASE_URL,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmSettings,
    pub models: ModelSettings,
    pub assessment: AssessmentSettings,
    pub course: CourseSettings,
}

#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub timeout_secs: u64,
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LlmProvider {
    OpenRouter,
    Cerebras,
    OpenAi,
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenRouter => write!(f, "openrouter"),
            LlmProvider::Cerebras => write!(f, "cerebras"),
            LlmProvider::OpenAi => write!(f, "openai"),
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openrouter" => Ok(LlmProvider::OpenRouter),
            "cerebras" => Ok(LlmProvider::Cerebras),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(anyhow!("Unknown LLM provider '{other}'")),
        }
    }
}

impl LlmProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => DEFAULT_OPENROUTER_BASE_URL,
            LlmProvider::Cerebras => DEFAULT_CEREBRAS_BASE_URL,
            LlmProvider::OpenAi => DEFAULT_OPENAI_BASE_URL,
        }
    }

    pub fn api_key_env_var(self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => "OPENROUTER_API_KEY",
            LlmProvider::Cerebras => "CEREBRAS_API_KEY",
            LlmProvider::OpenAi => "OPENAI_API_KEY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            LlmProvider::OpenRouter => "OpenRouter",
            LlmProvider::Cerebras => "Cerebras",
            LlmProvider::OpenAi => "OpenAI",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub ideas: String,
    pub assessments: String,
    pub idea_max_tokens: u32,
    pub assessment_max_tokens: u32,
}

/// Settings stamped onto every generated assessment before it is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentSettings {
    pub show_name: bool,
    pub shuffle_answers: bool,
    pub guidance_after_attempts: u32,
    /// Zero means unlimited attempts.
    pub max_attempts_count: u32,
}

#[derive(Debug, Clone)]
pub struct CourseSettings {
    pub root: PathBuf,
    pub profile: ProfileKind,
}

/// Which flavour of the question pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    Basic,
    Contextual,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Basic => write!(f, "basic"),
            ProfileKind::Contextual => write!(f, "contextual"),
        }
    }
}

impl std::str::FromStr for ProfileKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(ProfileKind::Basic),
            "contextual" => Ok(ProfileKind::Contextual),
            other => Err(anyhow!("Unknown pipeline profile '{other}'")),
        }
    }
}

// File configuration types
#[derive(Debug, Default, Deserialize)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub llm: FileLlmSettings,
    #[serde(default)]
    pub models: FileModelSettings,
    #[serde(default)]
    pub assessment: FileAssessmentSettings,
    #[serde(default)]
    pub course: FileCourseSettings,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileLlmSettings {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileModelSettings {
    pub ideas: Option<String>,
    pub assessments: Option<String>,
    pub idea_max_tokens: Option<u32>,
    pub assessment_max_tokens: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileAssessmentSettings {
    pub show_name: Option<bool>,
    pub shuffle_answers: Option<bool>,
    pub guidance_after_attempts: Option<u32>,
    pub max_attempts_count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct FileCourseSettings {
    pub root: Option<PathBuf>,
    pub profile: Option<ProfileKind>,
}

// Serialization helpers
#[derive(Serialize)]
pub(super) struct PersistedConfig<'a> {
    pub llm: PersistedLlm<'a>,
    pub models: PersistedModels<'a>,
    pub assessment: PersistedAssessment,
    pub course: PersistedCourse<'a>,
}

#[derive(Serialize)]
pub(super) struct PersistedLlm<'a> {
    pub provider: LlmProvider,
    pub api_key: &'a str,
    pub timeout_secs: u64,
    pub base_url: &'a str,
    pub user_agent: &'a str,
}

#[derive(Serialize)]
pub(super) struct PersistedModels<'a> {
    pub ideas: &'a str,
    pub assessments: &'a str,
    pub idea_max_tokens: u32,
    pub assessment_max_tokens: u32,
}

#[derive(Serialize)]
pub(super) struct PersistedAssessment {
    pub show_name: bool,
    pub shuffle_answers: bool,
    pub guidance_after_attempts: u32,
    pub max_attempts_count: u32,
}

#[derive(Serialize)]
pub(super) struct PersistedCourse<'a> {
    pub root: &'a PathBuf,
    pub profile: ProfileKind,
}

impl<'a> From<&'a Config> for PersistedConfig<'a> {
    fn from(config: &'a Config) -> Self {
        PersistedConfig {
            llm: PersistedLlm {
                provider: config.llm.provider,
                api_key: &config.llm.api_key,
                timeout_secs: config.llm.timeout_secs,
                base_url: &config.llm.base_url,
                user_agent: &config.llm.user_agent,
            },
            models: PersistedModels {
                ideas: &config.models.ideas,
                assessments: &config.models.assessments,
                idea_max_tokens: config.models.idea_max_tokens,
                assessment_max_tokens: config.models.assessment_max_tokens,
            },
            assessment: PersistedAssessment {
                show_name: config.assessment.show_name,
                shuffle_answers: config.assessment.shuffle_answers,
                guidance_after_attempts: config.assessment.guidance_after_attempts,
                max_attempts_count: config.assessment.max_attempts_count,
            },
            course: PersistedCourse {
                root: &config.course.root,
                profile: config.course.profile,
            },
        }
    }
}
