use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result, bail};

use crate::client::{ChatMessage, ChatMessageRole};
use crate::coach::{AskOptions, AskRequest, TextGenerator};

use super::prompt::IdeaPrompts;
use super::template::TemplateError;
use super::types::UserRequest;

/// Asks the model for ranked question ideas.
pub struct IdeaGenerator {
    generator: Arc<dyn TextGenerator>,
    prompts: IdeaPrompts,
    max_tokens: u32,
}

impl IdeaGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: IdeaPrompts, max_tokens: u32) -> Self {
        Self {
            generator,
            prompts,
            max_tokens,
        }
    }

    pub fn build_prompt(&self, request: &UserRequest) -> Result<String, TemplateError> {
        let mut values = HashMap::new();
        values.insert("learning_objectives", request.learning_objectives.clone());
        values.insert(
            "number_of_questions",
            request.number_of_questions.to_string(),
        );
        values.insert(
            "additional_context",
            request.additional_context.clone().unwrap_or_default(),
        );
        self.prompts.user_template.render(&values)
    }

    /// Trimmed model answer, or `None` when the call fails for any reason.
    pub async fn generate(&self, request: &UserRequest) -> Option<String> {
        match self.try_generate(request).await {
            Ok(text) => Some(text),
            Err(error) => {
                log::error!("Error generating question ideas: {:#}", error);
                None
            }
        }
    }

    async fn try_generate(&self, request: &UserRequest) -> Result<String> {
        log::info!(
            "Generating {} question ideas from learning objectives",
            request.number_of_questions
        );

        let prompt = self
            .build_prompt(request)
            .context("Failed to render idea prompt")?;

        let response = self
            .generator
            .ask(
                AskRequest {
                    system_prompt: self.prompts.system_prompt.clone(),
                    messages: vec![ChatMessage {
                        role: ChatMessageRole::User,
                        content: prompt,
                    }],
                },
                AskOptions::blocking(self.max_tokens),
            )
            .await?;

        let text = response.result.trim();
        if text.is_empty() {
            bail!("Idea generation response was empty");
        }

        log::debug!("LLM response for ideas:\n{}", text);
        Ok(text.to_string())
    }
}
