pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_IDEA_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_ASSESSMENT_MAX_TOKENS: u32 = 1200;
pub const DEFAULT_IDEA_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_ASSESSMENT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_GUIDANCE_AFTER_ATTEMPTS: u32 = 2;
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_CEREBRAS_BASE_URL: &str = "https://api.cerebras.ai/v1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
