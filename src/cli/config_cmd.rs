use anyhow::Result;

use crate::config::Config;

use super::args::ConfigArgs;
use super::util::mask_api_key;

pub(crate) fn handle_config(args: ConfigArgs, config: &mut Config) -> Result<()> {
    let changed = apply_updates(&args, config);

    if args.save || changed {
        config.validate()?;
        config.save()?;
        println!(
            "✅ Configuration saved to {}",
            Config::config_path()?.display()
        );
    }

    print_config(config);

    if let Err(error) = config.validate() {
        println!("⚠️  {error}");
    }

    Ok(())
}

fn apply_updates(args: &ConfigArgs, config: &mut Config) -> bool {
    let mut changed = false;

    if let Some(api_key) = &args.api_key {
        config.llm.api_key = api_key.clone();
        changed = true;
    }
    if let Some(timeout) = args.timeout {
        config.llm.timeout_secs = timeout;
        changed = true;
    }
    if let Some(max_tokens) = args.max_tokens {
        config.models.idea_max_tokens = max_tokens;
        changed = true;
    }
    if let Some(profile) = args.profile {
        config.course.profile = profile;
        changed = true;
    }

    changed
}

fn print_config(config: &Config) {
    println!("📋 Current configuration:");
    println!(
        "   Provider: {} ({})",
        config.llm.provider,
        config.llm.provider.display_name()
    );
    println!("   Base URL: {}", config.llm.base_url);
    println!("   API Key: {}", mask_api_key(&config.llm.api_key));
    println!("   Timeout: {}s", config.llm.timeout_secs);
    println!("   Idea Model: {}", config.models.ideas);
    println!("   Assessment Model: {}", config.models.assessments);
    println!("   Idea Max Tokens: {}", config.models.idea_max_tokens);
    println!("   Profile: {}", config.course.profile);
    println!("   Course Directory: {}", config.course.root.display());
    println!(
        "   Guidance After: {} failed attempts",
        config.assessment.guidance_after_attempts
    );
}
