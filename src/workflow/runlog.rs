use std::sync::Arc;

use chrono::Local;

use crate::guides::FileStorage;
use crate::ideas::{UserRequest, extract_scratchpad};

const LOG_ROOT: &str = ".guides/secure/mcq-logs";

/// Best-effort record of one generation run, kept out of the student view.
pub struct RunLog {
    storage: Arc<dyn FileStorage>,
    folder: String,
}

impl RunLog {
    pub fn new(storage: Arc<dyn FileStorage>, folder: impl Into<String>) -> Self {
        Self {
            storage,
            folder: folder.into(),
        }
    }

    /// A log folder named after the current local time.
    pub fn timestamped(storage: Arc<dyn FileStorage>) -> Self {
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        Self::new(storage, format!("{LOG_ROOT}/{stamp}"))
    }

    pub async fn record_request(&self, request: &UserRequest) {
        match serde_json::to_string_pretty(request) {
            Ok(json) => self.write("request.json", &json).await,
            Err(error) => log::warn!("Could not serialize request for run log: {}", error),
        }
    }

    /// Stores the raw idea text and, if the model reasoned first, its scratchpad.
    pub async fn record_ideas(&self, raw: &str) {
        self.write("ideas.txt", raw).await;
        if let Some(scratchpad) = extract_scratchpad(raw) {
            self.write("scratchpad.txt", scratchpad).await;
        }
    }

    async fn write(&self, name: &str, content: &str) {
        let path = format!("{}/{}", self.folder, name);
        if let Err(error) = self.storage.add(&path, content).await {
            log::warn!("Failed to write run log {}: {:#}", path, error);
        }
    }
}
