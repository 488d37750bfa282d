use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use serde::Deserialize;

use crate::client::{ChatMessage, ChatMessageRole};
use crate::coach::{AskOptions, AskRequest, TextGenerator};

use super::AssessmentService;
use super::local::LocalGuides;
use super::parsing::extract_json_object;
use super::types::{
    AnswerOption, Assessment, AssessmentFile, AssessmentRequest, AssessmentSource,
    GeneratedAssessment, GuidanceOption, MULTIPLE_CHOICE,
};

const AUTHOR_SYSTEM_PROMPT: &str = r#"You write single multiple-choice questions for programming courses.

You receive a short question idea. Turn it into exactly one question with 3 to 5 answer options.

OUTPUT FORMAT (STRICT JSON ONLY)
Return one JSON object and nothing else:
{
  "name": "<short title for the question>",
  "question": "<question text, markdown allowed>",
  "options": [
    {"text": "<option>", "correct": true},
    {"text": "<option>", "correct": false}
  ],
  "explanation": "<why the correct option is right and the others are not>"
}

RULES
- At least one option must be correct. Prefer exactly one.
- Incorrect options must be plausible mistakes a learner would make.
- Follow any guidance in the idea about which option should be correct.
- No code fences, no commentary outside the JSON object."#;

const DEFAULT_POINTS: u32 = 20;

#[derive(Debug, Deserialize)]
struct AuthoredQuestion {
    name: String,
    question: String,
    options: Vec<AuthoredOption>,
    #[serde(default)]
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct AuthoredOption {
    text: String,
    correct: bool,
}

/// Authors multiple-choice assessments with a language model and stores them
/// in the local guides workspace.
pub struct LlmAssessmentAuthor {
    generator: Arc<dyn TextGenerator>,
    guides: LocalGuides,
    max_tokens: u32,
}

impl LlmAssessmentAuthor {
    pub fn new(generator: Arc<dyn TextGenerator>, guides: LocalGuides, max_tokens: u32) -> Self {
        Self {
            generator,
            guides,
            max_tokens,
        }
    }
}

#[async_trait]
impl AssessmentService for LlmAssessmentAuthor {
    async fn generate(&self, request: AssessmentRequest) -> Result<GeneratedAssessment> {
        if request.assessment_type != MULTIPLE_CHOICE {
            bail!(
                "Unsupported assessment type '{}'",
                request.assessment_type
            );
        }

        let prompt = format!(
            "Context: {}\n\nQuestion idea:\n{}",
            request.guides_content, request.user_intro
        );
        let response = self
            .generator
            .ask(
                AskRequest {
                    system_prompt: AUTHOR_SYSTEM_PROMPT.to_string(),
                    messages: vec![ChatMessage {
                        role: ChatMessageRole::User,
                        content: prompt,
                    }],
                },
                AskOptions::blocking(self.max_tokens),
            )
            .await
            .context("Assessment authoring call failed")?;

        let fragment = extract_json_object(&response.result)
            .ok_or_else(|| anyhow!("Assessment response did not contain a JSON object"))?;
        let authored: AuthoredQuestion = serde_json::from_str(&fragment)
            .with_context(|| format!("Failed to parse assessment JSON: {fragment}"))?;

        Ok(GeneratedAssessment {
            assessment: build_assessment(authored)?,
            files: Vec::new(),
        })
    }

    async fn save(&self, assessment: &Assessment, files: &[AssessmentFile]) -> Result<()> {
        self.guides.save_assessment(assessment, files).await
    }
}

fn build_assessment(authored: AuthoredQuestion) -> Result<Assessment> {
    let options: Vec<AuthoredOption> = authored
        .options
        .into_iter()
        .filter(|option| !option.text.trim().is_empty())
        .collect();

    if options.len() < 2 {
        bail!("Assessment needs at least two answer options");
    }

    let correct = options.iter().filter(|option| option.correct).count();
    if correct == 0 {
        bail!("Assessment has no correct answer");
    }

    let answers = options
        .into_iter()
        .map(|option| AnswerOption {
            id: uuid::Uuid::new_v4().to_string(),
            correct: option.correct,
            answer: option.text.trim().to_string(),
        })
        .collect();

    let short_id = uuid::Uuid::new_v4().simple().to_string()[..10].to_string();

    Ok(Assessment {
        kind: MULTIPLE_CHOICE.to_string(),
        task_id: format!("{MULTIPLE_CHOICE}-{short_id}"),
        source: AssessmentSource {
            name: authored.name.trim().to_string(),
            show_name: true,
            instructions: authored.question.trim().to_string(),
            multiple_response: correct > 1,
            is_randomized: false,
            answers,
            guidance: authored.explanation.trim().to_string(),
            show_guidance_after_response_option: GuidanceOption::always(),
            max_attempts_count: 1,
            points: DEFAULT_POINTS,
        },
    })
}
