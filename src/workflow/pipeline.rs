use std::sync::Arc;

use anyhow::Result;

use crate::config::AssessmentSettings;
use crate::guides::{
    AssessmentRequest, AssessmentService, CourseStructure, GeneratedAssessment, PageSpec,
};
use crate::ideas::{IdeaBlock, IdeaSet};

use super::outcome::{BatchReport, ItemOutcome};
use super::reporter::StatusReporter;

/// Creates one assessment page per idea, falling back to a plain page when
/// authoring an assessment fails.
pub struct AssessmentPipeline {
    assessments: Arc<dyn AssessmentService>,
    structure: Arc<dyn CourseStructure>,
    settings: AssessmentSettings,
}

impl AssessmentPipeline {
    pub fn new(
        assessments: Arc<dyn AssessmentService>,
        structure: Arc<dyn CourseStructure>,
        settings: AssessmentSettings,
    ) -> Self {
        Self {
            assessments,
            structure,
            settings,
        }
    }

    /// Errors from saving or adding pages abort the batch; authoring errors
    /// only degrade the item they belong to.
    pub async fn run(&self, ideas: &IdeaSet, reporter: StatusReporter<'_>) -> Result<BatchReport> {
        let total = ideas.len();
        let mut report = BatchReport::default();

        for (offset, idea) in ideas.blocks.iter().enumerate() {
            let index = offset + 1;
            log::info!("Creating assessment {index} of {total}");
            reporter.status(&format!("Creating assessment {index} of {total}"));

            let outcome = {
                let _busy = reporter.busy();
                let request = AssessmentRequest::multiple_choice(format!("Question {index}"), idea.as_str());

                match self.assessments.generate(request).await {
                    Ok(generated) => self.publish(index, idea, generated).await?,
                    Err(cause) => {
                        log::error!("Error creating assessment {index}: {:#}", cause);
                        self.publish_fallback(index, ideas, format!("{cause:#}"))
                            .await?
                    }
                }
            };

            match &outcome {
                ItemOutcome::Created { page, .. } => reporter.status(&format!(
                    "Page {index} with an MCQ created successfully: {}",
                    page.title
                )),
                ItemOutcome::Degraded { page, .. } => reporter.status(&format!(
                    "⚠️  Assessment {index} could not be generated; added \"{}\" instead",
                    page.title
                )),
            }
            report.items.push(outcome);
        }

        Ok(report)
    }

    async fn publish(
        &self,
        index: usize,
        idea: &IdeaBlock,
        generated: GeneratedAssessment,
    ) -> Result<ItemOutcome> {
        let GeneratedAssessment {
            mut assessment,
            files,
        } = generated;

        assessment.source.apply_settings(&self.settings);
        self.assessments.save(&assessment, &files).await?;
        log::debug!("Assessment {} saved", assessment.task_id);

        let page = PageSpec::page(
            format!("Exercise {index} - MCQ"),
            assessment_page_content(&assessment.task_id, idea),
        );
        self.structure.add(page.clone(), None).await?;
        log::info!("Page {index} created: {}", page.title);

        Ok(ItemOutcome::Created {
            index,
            task_id: assessment.task_id,
            page,
        })
    }

    async fn publish_fallback(
        &self,
        index: usize,
        ideas: &IdeaSet,
        cause: String,
    ) -> Result<ItemOutcome> {
        let page = PageSpec::page(
            format!("Exercise {index} - MCQ (Fallback)"),
            fallback_page_content(index, &ideas.raw),
        );
        self.structure.add(page.clone(), None).await?;
        log::info!("Fallback page {index} created");

        Ok(ItemOutcome::Degraded { index, page, cause })
    }
}

/// Page markup embedding the assessment and, as guidance, the idea it came from.
pub fn assessment_page_content(task_id: &str, idea: &IdeaBlock) -> String {
    format!(
        "{{Check it! | assessment}}({task_id})\n\n|||guidance\n## Question Idea\n{idea}\n|||\n"
    )
}

pub fn fallback_page_content(index: usize, all_ideas: &str) -> String {
    format!(
        "## Exercise {index} - Multiple Choice Question\n\n### Question Ideas:\n{all_ideas}\n\n*Note: Assessment generation failed. Please try again or contact support.*\n"
    )
}
