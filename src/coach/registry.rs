use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;

use super::types::Conversation;

/// A handler bound to a Coach Bot menu button.
#[async_trait]
pub trait CoachAction: Send + Sync {
    async fn run(&self, conversation: &dyn Conversation) -> Result<()>;
}

struct RegisteredAction {
    id: String,
    label: String,
    handler: Arc<dyn CoachAction>,
}

/// Named actions shown in the Coach Bot menu.
#[derive(Default)]
pub struct ActionRegistry {
    actions: Vec<RegisteredAction>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        handler: Arc<dyn CoachAction>,
    ) -> Result<()> {
        let id = id.into();
        if self.actions.iter().any(|action| action.id == id) {
            bail!("Action '{id}' is already registered");
        }
        self.actions.push(RegisteredAction {
            id,
            label: label.into(),
            handler,
        });
        Ok(())
    }

    pub fn labels(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.label.as_str()).collect()
    }

    pub async fn invoke(&self, id: &str, conversation: &dyn Conversation) -> Result<()> {
        let Some(action) = self.actions.iter().find(|a| a.id == id) else {
            bail!("Unknown action '{id}'");
        };
        conversation.hide_menu();
        action.handler.run(conversation).await
    }

    /// Shows the menu until the user quits or input ends.
    pub async fn run_menu(&self, conversation: &dyn Conversation) -> Result<()> {
        if self.actions.is_empty() {
            bail!("No Coach Bot actions registered");
        }

        conversation.show_menu();
        loop {
            let listing = self
                .labels()
                .into_iter()
                .enumerate()
                .map(|(idx, label)| format!("  [{}] {}", idx + 1, label))
                .collect::<Vec<_>>()
                .join("\n");
            conversation.write(&listing);

            let Some(choice) = conversation
                .input("Choose an action (q to quit)", Some("1"))
                .await?
            else {
                break;
            };

            let choice = choice.trim();
            if choice.eq_ignore_ascii_case("q") || choice.eq_ignore_ascii_case("quit") {
                break;
            }

            let selected = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| self.actions.get(idx));

            match selected {
                Some(action) => {
                    let id = action.id.clone();
                    if let Err(error) = self.invoke(&id, conversation).await {
                        log::error!("Action {} failed: {:#}", id, error);
                        conversation.write(&format!("Action failed: {error}"));
                        conversation.show_menu();
                    }
                }
                None => conversation.write(&format!(
                    "Please enter a number between 1 and {}.",
                    self.actions.len()
                )),
            }
        }

        Ok(())
    }
}
