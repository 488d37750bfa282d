use serde::{Deserialize, Serialize};

use crate::config::AssessmentSettings;

pub const MULTIPLE_CHOICE: &str = "multiple-choice";

/// Input to the assessment-authoring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRequest {
    pub assessment_type: String,
    pub guides_content: String,
    pub files_list: Vec<String>,
    pub user_intro: String,
}

impl AssessmentRequest {
    pub fn multiple_choice(guides_content: impl Into<String>, user_intro: impl Into<String>) -> Self {
        Self {
            assessment_type: MULTIPLE_CHOICE.to_string(),
            guides_content: guides_content.into(),
            files_list: Vec::new(),
            user_intro: user_intro.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAssessment {
    pub assessment: Assessment,
    pub files: Vec<AssessmentFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(rename = "type")]
    pub kind: String,
    pub task_id: String,
    pub source: AssessmentSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSource {
    pub name: String,
    pub show_name: bool,
    pub instructions: String,
    pub multiple_response: bool,
    pub is_randomized: bool,
    pub answers: Vec<AnswerOption>,
    pub guidance: String,
    pub show_guidance_after_response_option: GuidanceOption,
    /// Zero means unlimited.
    pub max_attempts_count: u32,
    pub points: u32,
}

impl AssessmentSource {
    pub fn apply_settings(&mut self, settings: &AssessmentSettings) {
        self.show_name = settings.show_name;
        self.is_randomized = settings.shuffle_answers;
        self.show_guidance_after_response_option =
            GuidanceOption::after_attempts(settings.guidance_after_attempts);
        self.max_attempts_count = settings.max_attempts_count;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    #[serde(rename = "_id")]
    pub id: String,
    pub correct: bool,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuidanceTrigger {
    Always,
    Never,
    Attempts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceOption {
    #[serde(rename = "type")]
    pub trigger: GuidanceTrigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed_from: Option<u32>,
}

impl GuidanceOption {
    pub fn always() -> Self {
        Self {
            trigger: GuidanceTrigger::Always,
            passed_from: None,
        }
    }

    pub fn after_attempts(attempts: u32) -> Self {
        Self {
            trigger: GuidanceTrigger::Attempts,
            passed_from: Some(attempts),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentFile {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Page,
    Section,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLayout {
    #[serde(rename = "1-panel")]
    OnePanel,
    #[serde(rename = "2-panels")]
    TwoPanels,
}

/// A course page to be inserted into the guides structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpec {
    pub title: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub content: String,
    pub layout: PageLayout,
    pub close_all_tabs: bool,
    pub show_file_tree: bool,
}

impl PageSpec {
    /// Single-panel page that leaves open tabs alone and hides the file tree.
    pub fn page(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            item_type: ItemType::Page,
            content: content.into(),
            layout: PageLayout::OnePanel,
            close_all_tabs: false,
            show_file_tree: false,
        }
    }
}
