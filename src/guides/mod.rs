//! Course-side services: assessment authoring, page structure and file storage.

mod author;
mod local;
mod parsing;
mod types;

use anyhow::Result;
use async_trait::async_trait;

pub use author::LlmAssessmentAuthor;
pub use local::LocalGuides;
pub use types::{Assessment, AssessmentFile, AssessmentRequest, GeneratedAssessment, PageSpec};
#[cfg(test)]
pub use types::{AssessmentSource, GuidanceOption, GuidanceTrigger};

#[async_trait]
pub trait AssessmentService: Send + Sync {
    async fn generate(&self, request: AssessmentRequest) -> Result<GeneratedAssessment>;

    async fn save(&self, assessment: &Assessment, files: &[AssessmentFile]) -> Result<()>;
}

#[async_trait]
pub trait CourseStructure: Send + Sync {
    /// Inserts `page` at `position`, or appends it when `position` is `None`.
    async fn add(&self, page: PageSpec, position: Option<usize>) -> Result<()>;
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn add(&self, path: &str, content: &str) -> Result<()>;
}
