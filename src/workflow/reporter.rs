use crate::coach::Conversation;

/// Writes progress to the conversation and owns the busy indicator.
#[derive(Clone, Copy)]
pub struct StatusReporter<'a> {
    conversation: &'a dyn Conversation,
}

impl<'a> StatusReporter<'a> {
    pub fn new(conversation: &'a dyn Conversation) -> Self {
        Self { conversation }
    }

    pub fn conversation(&self) -> &'a dyn Conversation {
        self.conversation
    }

    pub fn status(&self, message: &str) {
        self.conversation.write(message);
    }

    pub fn success(&self, message: &str) {
        self.conversation.write(&format!("✅ {message}"));
    }

    pub fn failure(&self, message: &str) {
        self.conversation.write(&format!("❌ {message}"));
    }

    /// Shows the thinking indicator until the returned guard is dropped.
    #[must_use = "the indicator is hidden as soon as the guard is dropped"]
    pub fn busy(&self) -> BusyGuard<'a> {
        self.conversation.show_thinking();
        BusyGuard {
            conversation: self.conversation,
        }
    }
}

pub struct BusyGuard<'a> {
    conversation: &'a dyn Conversation,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.conversation.hide_thinking();
    }
}
