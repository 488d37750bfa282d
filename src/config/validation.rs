use anyhow::{Result, bail};

use super::types::Config;

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.api_key.trim().is_empty() {
        let provider = config.llm.provider;
        bail!(
            "{} API key not found. Set {} or add it to {}",
            provider.display_name(),
            provider.api_key_env_var(),
            Config::config_path()?.display()
        );
    }

    if config.models.idea_max_tokens == 0 {
        bail!("Idea generation token budget must be greater than zero");
    }

    if config.assessment.guidance_after_attempts == 0 {
        bail!("Guidance threshold must be at least one failed attempt");
    }

    Ok(())
}
