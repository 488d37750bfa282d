use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::PathBuf;

use super::builder::ConfigBuilder;
use super::types::{LlmProvider, ProfileKind};

pub fn apply_env_overrides(mut builder: ConfigBuilder) -> Result<ConfigBuilder> {
    if let Some(provider_raw) = env_string("MCQ_PROVIDER")? {
        let provider = provider_raw
            .parse::<LlmProvider>()
            .with_context(|| format!("Failed to parse MCQ_PROVIDER value '{provider_raw}'"))?;
        builder = builder.with_llm(|llm| {
            if llm.provider != provider {
                llm.provider = provider;
                llm.base_url = provider.default_base_url().to_string();
            }
        });
    }

    if let Some(base_url) = env_string("MCQ_LLM_BASE_URL")? {
        builder = builder.with_llm(|llm| llm.base_url = base_url);
    }

    for provider in [
        LlmProvider::OpenRouter,
        LlmProvider::Cerebras,
        LlmProvider::OpenAi,
    ] {
        if let Some(api_key) = env_string(provider.api_key_env_var())? {
            builder = builder.with_llm(|llm| {
                if llm.provider == provider {
                    llm.api_key = api_key;
                }
            });
        }
    }

    if let Some(timeout) = env_u64("MCQ_TIMEOUT_SECS")? {
        builder = builder.with_llm(|llm| llm.timeout_secs = timeout);
    }

    if let Some(model) = env_string("MCQ_IDEA_MODEL")? {
        builder = builder.with_models(|models| models.ideas = model);
    }

    if let Some(model) = env_string("MCQ_ASSESSMENT_MODEL")? {
        builder = builder.with_models(|models| models.assessments = model);
    }

    if let Some(max_tokens) = env_u32("MCQ_IDEA_MAX_TOKENS")? {
        builder = builder.with_models(|models| models.idea_max_tokens = max_tokens);
    }

    if let Some(dir) = env_string("MCQ_COURSE_DIR")? {
        builder = builder.with_course(|course| course.root = PathBuf::from(dir));
    }

    if let Some(profile_raw) = env_string("MCQ_PROFILE")? {
        let profile = profile_raw
            .parse::<ProfileKind>()
            .with_context(|| format!("Failed to parse MCQ_PROFILE value '{profile_raw}'"))?;
        builder = builder.with_course(|course| course.profile = profile);
    }

    Ok(builder)
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

pub fn env_u64(key: &str) -> Result<Option<u64>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {key} as u64"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}

pub fn env_u32(key: &str) -> Result<Option<u32>> {
    if let Some(value) = env_string(key)? {
        let parsed = value
            .parse::<u32>()
            .with_context(|| format!("Failed to parse {key} as u32"))?;
        Ok(Some(parsed))
    } else {
        Ok(None)
    }
}
