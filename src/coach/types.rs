use anyhow::Result;
use async_trait::async_trait;

use crate::client::ChatMessage;

/// Ambient information the host knows about the current workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoachContext {
    pub workspace: Option<String>,
    pub open_files: Vec<String>,
}

/// Output and prompting surface of the Coach Bot.
#[async_trait]
pub trait Conversation: Send + Sync {
    fn write(&self, message: &str);

    fn show_thinking(&self);

    fn hide_thinking(&self);

    /// Prompts for free text. `None` means the user declined to answer.
    async fn input(&self, prompt: &str, placeholder: Option<&str>) -> Result<Option<String>>;

    async fn context(&self) -> Result<CoachContext>;

    fn show_menu(&self);

    fn hide_menu(&self);
}

/// Request body for a one-shot model call.
#[derive(Debug, Clone, PartialEq)]
pub struct AskRequest {
    pub system_prompt: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AskOptions {
    pub stream: bool,
    /// Keep the host from re-opening its action menu once the answer arrives.
    pub prevent_menu: bool,
    pub max_tokens: u32,
}

impl AskOptions {
    pub fn blocking(max_tokens: u32) -> Self {
        Self {
            stream: false,
            prevent_menu: true,
            max_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskResponse {
    pub result: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn ask(&self, request: AskRequest, options: AskOptions) -> Result<AskResponse>;
}
