use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;

use crate::client::{ChatCompletionRequest, ChatMessage, ChatMessageRole, DynLlmClient};

use super::types::{AskOptions, AskRequest, AskResponse, TextGenerator};

/// [`TextGenerator`] backed by a chat-completions model.
pub struct ChatTextGenerator {
    client: Arc<DynLlmClient>,
    model: String,
}

impl ChatTextGenerator {
    pub fn new(client: Arc<DynLlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for ChatTextGenerator {
    async fn ask(&self, request: AskRequest, options: AskOptions) -> Result<AskResponse> {
        if options.stream {
            bail!("Streaming responses are not supported by the chat adapter");
        }

        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system_prompt.trim().is_empty() {
            messages.push(ChatMessage {
                role: ChatMessageRole::System,
                content: request.system_prompt,
            });
        }
        messages.extend(request.messages);
        log::debug!(
            "Asking {} ({} messages, max {} tokens, prevent menu: {})",
            self.model,
            messages.len(),
            options.max_tokens,
            options.prevent_menu
        );

        let response = self
            .client
            .chat_completion(ChatCompletionRequest {
                model: self.model.clone(),
                messages,
                max_tokens: Some(options.max_tokens),
                temperature: None,
            })
            .await
            .with_context(|| format!("Model {} call failed", self.model))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Model {} returned no choices", self.model))?;

        log::debug!(
            "Model {} answered ({} chars, finish reason {:?})",
            self.model,
            choice.message.content.len(),
            choice.finish_reason
        );

        Ok(AskResponse {
            result: choice.message.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::client::{ChatChoice, ChatCompletionResponse, LlmClient};

    struct CannedClient {
        answer: Option<String>,
        seen: Mutex<Vec<ChatCompletionRequest>>,
    }

    #[async_trait]
    impl LlmClient for CannedClient {
        async fn chat_completion(
            &self,
            request: ChatCompletionRequest,
        ) -> Result<ChatCompletionResponse> {
            self.seen.lock().unwrap().push(request);
            let choices = self
                .answer
                .iter()
                .map(|content| ChatChoice {
                    message: ChatMessage {
                        role: ChatMessageRole::Assistant,
                        content: content.clone(),
                    },
                    finish_reason: Some("stop".to_string()),
                })
                .collect();
            Ok(ChatCompletionResponse { choices })
        }
    }

    fn request() -> AskRequest {
        AskRequest {
            system_prompt: "be brief".to_string(),
            messages: vec![ChatMessage {
                role: ChatMessageRole::User,
                content: "hello".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn ask_prepends_system_prompt_and_budget() {
        let client = Arc::new(CannedClient {
            answer: Some("hi".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let generator = ChatTextGenerator::new(client.clone(), "test/model");

        let response = generator
            .ask(request(), AskOptions::blocking(2000))
            .await
            .unwrap();

        assert_eq!(response.result, "hi");
        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model, "test/model");
        assert_eq!(seen[0].max_tokens, Some(2000));
        assert_eq!(seen[0].messages[0].role, ChatMessageRole::System);
        assert_eq!(seen[0].messages[0].content, "be brief");
        assert_eq!(seen[0].messages[1].content, "hello");
    }

    #[tokio::test]
    async fn ask_rejects_streaming() {
        let client = Arc::new(CannedClient {
            answer: Some("hi".to_string()),
            seen: Mutex::new(Vec::new()),
        });
        let generator = ChatTextGenerator::new(client.clone(), "test/model");
        let options = AskOptions {
            stream: true,
            ..AskOptions::blocking(10)
        };

        let err = generator.ask(request(), options).await.unwrap_err();

        assert!(err.to_string().contains("Streaming"));
        assert!(client.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ask_errors_without_choices() {
        let client = Arc::new(CannedClient {
            answer: None,
            seen: Mutex::new(Vec::new()),
        });
        let generator = ChatTextGenerator::new(client, "test/model");

        let err = generator
            .ask(request(), AskOptions::blocking(10))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("returned no choices"));
    }
}
