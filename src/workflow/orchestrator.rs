use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::coach::{CoachAction, Conversation, TextGenerator};
use crate::config::AssessmentSettings;
use crate::guides::{AssessmentService, CourseStructure, FileStorage};
use crate::ideas::{IdeaGenerator, UserRequest, parse_ideas};

use super::input::collect_user_request;
use super::outcome::{BatchReport, RunOutcome, WorkflowRun};
use super::pipeline::AssessmentPipeline;
use super::profile::PipelineProfile;
use super::reporter::StatusReporter;
use super::runlog::RunLog;
use super::types::{StageKind, WorkflowEvent};

const CANCELLED: &str = "Question generation cancelled.";
const GENERATING_IDEAS: &str = "🔄 Generating question ideas from learning objectives...";
const IDEAS_FAILED: &str = "Failed to generate question ideas. Please try again.";
const IDEAS_READY: &str = "Question ideas generated! Now creating multiple choice assessments...";
const GENERIC_FAILURE: &str = "An error occurred while generating questions. Please try again.";

/// Host services the workflow calls out to.
#[derive(Clone)]
pub struct WorkflowServices {
    pub text: Arc<dyn TextGenerator>,
    pub assessments: Arc<dyn AssessmentService>,
    pub structure: Arc<dyn CourseStructure>,
    pub storage: Arc<dyn FileStorage>,
}

/// Objectives in, assessment pages out.
pub struct McqWorkflow {
    profile: PipelineProfile,
    ideas: IdeaGenerator,
    pipeline: AssessmentPipeline,
    storage: Arc<dyn FileStorage>,
}

impl McqWorkflow {
    pub fn new(
        profile: PipelineProfile,
        services: WorkflowServices,
        idea_max_tokens: u32,
        settings: AssessmentSettings,
    ) -> Self {
        let ideas = IdeaGenerator::new(services.text, profile.prompts.clone(), idea_max_tokens);
        let pipeline = AssessmentPipeline::new(services.assessments, services.structure, settings);
        Self {
            profile,
            ideas,
            pipeline,
            storage: services.storage,
        }
    }

    /// Runs one generation from prompt to pages. The menu is shown again on
    /// every exit path.
    pub async fn execute(&self, conversation: &dyn Conversation) -> WorkflowRun {
        let reporter = StatusReporter::new(conversation);
        let mut events = Vec::new();

        let outcome = self.drive(reporter, &mut events).await;
        conversation.show_menu();

        log::info!("Question generation finished: {}", outcome_label(&outcome));
        WorkflowRun { outcome, events }
    }

    async fn drive(
        &self,
        reporter: StatusReporter<'_>,
        events: &mut Vec<WorkflowEvent>,
    ) -> RunOutcome {
        events.push(WorkflowEvent::StageStarted(StageKind::Input));
        let Some(request) =
            collect_user_request(reporter.conversation(), self.profile.collect_context).await
        else {
            events.push(WorkflowEvent::StageFailed {
                stage: StageKind::Input,
                error: "cancelled".to_string(),
            });
            reporter.status(CANCELLED);
            return RunOutcome::Cancelled;
        };
        events.push(WorkflowEvent::StageCompleted(StageKind::Input));

        let run_log = self
            .profile
            .keep_run_log
            .then(|| RunLog::timestamped(self.storage.clone()));
        if let Some(run_log) = &run_log {
            let _busy = reporter.busy();
            run_log.record_request(&request).await;
        }

        events.push(WorkflowEvent::StageStarted(StageKind::Ideas));
        reporter.status(GENERATING_IDEAS);
        let raw = {
            let _busy = reporter.busy();
            self.ideas.generate(&request).await
        };
        let Some(raw) = raw else {
            events.push(WorkflowEvent::StageFailed {
                stage: StageKind::Ideas,
                error: "no response from model".to_string(),
            });
            reporter.failure(IDEAS_FAILED);
            return RunOutcome::IdeaGenerationFailed;
        };
        if let Some(run_log) = &run_log {
            let _busy = reporter.busy();
            run_log.record_ideas(&raw).await;
        }

        match self.build(&request, &raw, reporter, events).await {
            Ok(report) => {
                reporter.success(&format!(
                    "Successfully generated {} multiple choice questions!",
                    report.items.len()
                ));
                RunOutcome::Completed(report)
            }
            Err((stage, error)) => {
                log::error!("Error in question generation: {:#}", error);
                events.push(WorkflowEvent::StageFailed {
                    stage,
                    error: format!("{error:#}"),
                });
                reporter.failure(GENERIC_FAILURE);
                RunOutcome::Failed(format!("{error:#}"))
            }
        }
    }

    async fn build(
        &self,
        request: &UserRequest,
        raw: &str,
        reporter: StatusReporter<'_>,
        events: &mut Vec<WorkflowEvent>,
    ) -> Result<BatchReport, (StageKind, anyhow::Error)> {
        let requested = request.number_of_questions as usize;
        let ideas = parse_ideas(raw)
            .and_then(|set| set.take_requested(requested))
            .context("Could not read question ideas from the model response")
            .map_err(|error| (StageKind::Ideas, error))?;
        events.push(WorkflowEvent::IdeasParsed { count: ideas.len() });
        events.push(WorkflowEvent::StageCompleted(StageKind::Ideas));

        reporter.status(IDEAS_READY);
        events.push(WorkflowEvent::StageStarted(StageKind::Assessments));
        let report = self
            .pipeline
            .run(&ideas, reporter)
            .await
            .map_err(|error| (StageKind::Assessments, error))?;

        for item in report.items.iter().filter(|item| item.is_degraded()) {
            events.push(WorkflowEvent::ItemDegraded {
                index: item.index(),
            });
        }
        events.push(WorkflowEvent::StageCompleted(StageKind::Assessments));
        Ok(report)
    }
}

fn outcome_label(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Cancelled => "cancelled",
        RunOutcome::IdeaGenerationFailed => "idea generation failed",
        RunOutcome::Completed(_) => "completed",
        RunOutcome::Failed(_) => "failed",
    }
}

#[async_trait]
impl CoachAction for McqWorkflow {
    async fn run(&self, conversation: &dyn Conversation) -> Result<()> {
        self.execute(conversation).await;
        Ok(())
    }
}
