use anyhow::Result;

use super::types::{AssessmentSettings, Config, CourseSettings, LlmSettings, ModelSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) models: ModelSettings,
    pub(super) assessment: AssessmentSettings,
    pub(super) course: CourseSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            models: ModelSettings::default(),
            assessment: AssessmentSettings::default(),
            course: CourseSettings::default(),
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_models<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut ModelSettings),
    {
        update(&mut self.models);
        self
    }

    pub fn with_assessment<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut AssessmentSettings),
    {
        update(&mut self.assessment);
        self
    }

    pub fn with_course<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut CourseSettings),
    {
        update(&mut self.course);
        self
    }

    pub fn build(self) -> Result<Config> {
        Ok(Config {
            llm: self.llm,
            models: self.models,
            assessment: self.assessment,
            course: self.course,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
