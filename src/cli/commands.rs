use std::sync::Arc;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::client::AIClient;
use crate::coach::{ActionRegistry, ChatTextGenerator, TerminalCoach, TextGenerator};
use crate::config::{Config, ProfileKind};
use crate::guides::LlmAssessmentAuthor;
use crate::guides::LocalGuides;
use crate::workflow::{ItemOutcome, McqWorkflow, PipelineProfile, RunOutcome, WorkflowServices};

use super::args::{Cli, Command};
use super::config_cmd;

pub(crate) const GENERATE_ACTION_ID: &str = "generateMCQButton";
pub(crate) const GENERATE_ACTION_LABEL: &str = "Generate Multiple Choice Questions";

pub(crate) async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::resolve()?;
    apply_cli_overrides(&cli, &mut config);

    match cli.command {
        Some(Command::Config(args)) => config_cmd::handle_config(args, &mut config),
        Some(Command::Generate(args)) => {
            let profile = args.profile.unwrap_or(config.course.profile);
            run_once(&config, profile).await
        }
        None => run_menu(&config).await,
    }
}

fn apply_cli_overrides(cli: &Cli, config: &mut Config) {
    if let Some(dir) = &cli.course_dir {
        config.course.root = dir.clone();
    }
    if let Some(model) = &cli.model {
        config.models.ideas = model.clone();
        config.models.assessments = model.clone();
    }
}

fn build_workflow(config: &Config, profile: ProfileKind) -> Result<McqWorkflow> {
    config.validate()?;

    let client = AIClient::shared(&config.llm)?;
    let idea_model: Arc<dyn TextGenerator> =
        Arc::new(ChatTextGenerator::new(client.clone(), &config.models.ideas));
    let assessment_model: Arc<dyn TextGenerator> =
        Arc::new(ChatTextGenerator::new(client, &config.models.assessments));

    let guides = LocalGuides::new(&config.course.root);
    let author = LlmAssessmentAuthor::new(
        assessment_model,
        guides.clone(),
        config.models.assessment_max_tokens,
    );
    let guides = Arc::new(guides);

    log::info!(
        "Using {} (ideas: {}, assessments: {}) on course {}",
        config.llm.provider.display_name(),
        config.models.ideas,
        config.models.assessments,
        config.course.root.display()
    );

    Ok(McqWorkflow::new(
        PipelineProfile::for_kind(profile),
        WorkflowServices {
            text: idea_model,
            assessments: Arc::new(author),
            structure: guides.clone(),
            storage: guides,
        },
        config.models.idea_max_tokens,
        config.assessment.clone(),
    ))
}

async fn run_once(config: &Config, profile: ProfileKind) -> Result<()> {
    let workflow = build_workflow(config, profile)?;
    let coach = TerminalCoach::new(&config.course.root);

    let run = workflow.execute(&coach).await;
    log::debug!("Workflow events: {:?}", run.events);
    match run.outcome {
        RunOutcome::Completed(report) => {
            println!(
                "{} assessments created, {} fallback pages",
                report.created().to_string().green(),
                report.degraded().to_string().yellow()
            );
            for item in &report.items {
                if let ItemOutcome::Degraded { page, cause, .. } = item {
                    println!(
                        "{} {}",
                        "⚠️".yellow(),
                        format!("{} needs a manual assessment ({})", page.title, cause).yellow()
                    );
                }
            }
            Ok(())
        }
        RunOutcome::Cancelled | RunOutcome::IdeaGenerationFailed => Ok(()),
        RunOutcome::Failed(error) => Err(anyhow::anyhow!(error)),
    }
}

async fn run_menu(config: &Config) -> Result<()> {
    let workflow = build_workflow(config, config.course.profile)?;
    let coach = TerminalCoach::new(&config.course.root);

    let mut registry = ActionRegistry::new();
    registry
        .register(GENERATE_ACTION_ID, GENERATE_ACTION_LABEL, Arc::new(workflow))
        .context("Failed to register the question generator")?;

    registry.run_menu(&coach).await
}
