use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::Path};

use super::Config;
use super::builder::ConfigBuilder;
use super::environment::apply_env_overrides;
use super::types::{FileConfig, LlmProvider, PersistedConfig};
use super::validation::validate;

impl Config {
    pub fn config_path() -> Result<std::path::PathBuf> {
        let mut path = home_dir().context("Could not determine home directory")?;
        path.push(".mcq-coach/config");
        Ok(path)
    }

    #[cfg(test)]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Defaults, then the config file, then the environment. Not validated,
    /// so a config missing its API key can still be inspected and repaired;
    /// callers apply CLI flags and then call [`Config::validate`].
    pub fn resolve() -> Result<Self> {
        let path = Self::config_path()?;
        let mut builder = ConfigBuilder::new();

        if path.exists() {
            builder = Self::apply_file(builder, &path)?;
        }

        builder = apply_env_overrides(builder)?;
        builder.build()
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Unable to create config directory {}", parent.display())
            })?;
        }

        let payload = PersistedConfig::from(self);
        let json = serde_json::to_string_pretty(&payload)
            .context("Failed to serialize configuration to JSON")?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        validate(self)
    }

    fn apply_file(builder: ConfigBuilder, path: &Path) -> Result<ConfigBuilder> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading config at {}", path.display()))?;

        if contents.trim().is_empty() {
            return Ok(builder);
        }

        let file: FileConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed parsing JSON config at {}", path.display()))?;

        file.apply(builder)
    }
}

impl FileConfig {
    pub fn apply(self, builder: ConfigBuilder) -> Result<ConfigBuilder> {
        let provider = self
            .llm
            .provider
            .as_deref()
            .map(str::parse::<LlmProvider>)
            .transpose()
            .context("Invalid provider in config file")?;

        let FileConfig {
            llm,
            models,
            assessment,
            course,
        } = self;

        let builder = builder
            .with_llm(|settings| {
                if let Some(parsed) = provider {
                    if settings.provider != parsed {
                        settings.provider = parsed;
                        settings.base_url = parsed.default_base_url().to_string();
                    }
                }
                if let Some(api_key) = llm.api_key {
                    settings.api_key = api_key;
                }
                if let Some(timeout) = llm.timeout_secs {
                    settings.timeout_secs = timeout;
                }
                if let Some(base_url) = llm.base_url {
                    settings.base_url = base_url;
                }
                if let Some(user_agent) = llm.user_agent {
                    settings.user_agent = user_agent;
                }
            })
            .with_models(|settings| {
                if let Some(ideas) = models.ideas {
                    settings.ideas = ideas;
                }
                if let Some(assessments) = models.assessments {
                    settings.assessments = assessments;
                }
                if let Some(max_tokens) = models.idea_max_tokens {
                    settings.idea_max_tokens = max_tokens;
                }
                if let Some(max_tokens) = models.assessment_max_tokens {
                    settings.assessment_max_tokens = max_tokens;
                }
            })
            .with_assessment(|settings| {
                if let Some(show_name) = assessment.show_name {
                    settings.show_name = show_name;
                }
                if let Some(shuffle) = assessment.shuffle_answers {
                    settings.shuffle_answers = shuffle;
                }
                if let Some(threshold) = assessment.guidance_after_attempts {
                    settings.guidance_after_attempts = threshold;
                }
                if let Some(max_attempts) = assessment.max_attempts_count {
                    settings.max_attempts_count = max_attempts;
                }
            })
            .with_course(|settings| {
                if let Some(root) = course.root {
                    settings.root = root;
                }
                if let Some(profile) = course.profile {
                    settings.profile = profile;
                }
            });

        Ok(builder)
    }
}
