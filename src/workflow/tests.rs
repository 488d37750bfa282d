use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use super::*;
use super::reporter::StatusReporter;
use super::types::{StageKind, WorkflowEvent};
use crate::coach::{AskOptions, AskRequest, AskResponse, CoachContext, Conversation, TextGenerator};
use crate::config::AssessmentSettings;
use crate::guides::{
    Assessment, AssessmentFile, AssessmentRequest, AssessmentService, AssessmentSource,
    CourseStructure, FileStorage, GeneratedAssessment, GuidanceOption, GuidanceTrigger, PageSpec,
};

#[derive(Default)]
struct ScriptedConversation {
    answers: Mutex<VecDeque<Option<String>>>,
    written: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
    shown: AtomicUsize,
    hidden: AtomicUsize,
    menus: AtomicUsize,
    thinking: Arc<AtomicBool>,
}

impl ScriptedConversation {
    fn answering(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| Some(a.to_string())).collect()),
            ..Self::default()
        }
    }

    fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }

    fn assert_busy_balanced(&self) {
        assert_eq!(
            self.shown.load(Ordering::SeqCst),
            self.hidden.load(Ordering::SeqCst),
            "thinking indicator left on"
        );
    }
}

#[async_trait]
impl Conversation for ScriptedConversation {
    fn write(&self, message: &str) {
        self.written.lock().unwrap().push(message.to_string());
    }

    fn show_thinking(&self) {
        self.shown.fetch_add(1, Ordering::SeqCst);
        self.thinking.store(true, Ordering::SeqCst);
    }

    fn hide_thinking(&self) {
        self.hidden.fetch_add(1, Ordering::SeqCst);
        self.thinking.store(false, Ordering::SeqCst);
    }

    async fn input(&self, prompt: &str, _placeholder: Option<&str>) -> Result<Option<String>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answers.lock().unwrap().pop_front().flatten())
    }

    async fn context(&self) -> Result<CoachContext> {
        Ok(CoachContext::default())
    }

    fn show_menu(&self) {
        self.menus.fetch_add(1, Ordering::SeqCst);
    }

    fn hide_menu(&self) {}
}

struct FakeModel {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn offline() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for FakeModel {
    async fn ask(&self, request: AskRequest, _options: AskOptions) -> Result<AskResponse> {
        let prompt = request
            .messages
            .first()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.prompts.lock().unwrap().push(prompt);
        match &self.reply {
            Some(text) => Ok(AskResponse {
                result: text.clone(),
            }),
            None => Err(anyhow!("network unreachable")),
        }
    }
}

#[derive(Default)]
struct FakeAssessments {
    fail_on: Vec<usize>,
    fail_save: bool,
    requests: Mutex<Vec<AssessmentRequest>>,
    saved: Mutex<Vec<Assessment>>,
}

impl FakeAssessments {
    fn failing_on(calls: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            fail_on: calls.to_vec(),
            ..Self::default()
        })
    }

    fn generate_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn sample_assessment(task_id: String) -> Assessment {
    Assessment {
        kind: "multiple-choice".to_string(),
        task_id,
        source: AssessmentSource {
            name: "Sample".to_string(),
            show_name: true,
            instructions: "Pick one".to_string(),
            multiple_response: false,
            is_randomized: false,
            answers: Vec::new(),
            guidance: String::new(),
            show_guidance_after_response_option: GuidanceOption::always(),
            max_attempts_count: 3,
            points: 20,
        },
    }
}

#[async_trait]
impl AssessmentService for FakeAssessments {
    async fn generate(&self, request: AssessmentRequest) -> Result<GeneratedAssessment> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request);
            requests.len()
        };
        if self.fail_on.contains(&call) {
            return Err(anyhow!("assessment service unavailable"));
        }
        Ok(GeneratedAssessment {
            assessment: sample_assessment(format!("multiple-choice-{call}")),
            files: Vec::new(),
        })
    }

    async fn save(&self, assessment: &Assessment, _files: &[AssessmentFile]) -> Result<()> {
        if self.fail_save {
            return Err(anyhow!("assessment store is full"));
        }
        self.saved.lock().unwrap().push(assessment.clone());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingStructure {
    pages: Mutex<Vec<(PageSpec, Option<usize>)>>,
    reject: bool,
}

impl RecordingStructure {
    fn pages(&self) -> Vec<PageSpec> {
        self.pages
            .lock()
            .unwrap()
            .iter()
            .map(|(page, _)| page.clone())
            .collect()
    }
}

#[async_trait]
impl CourseStructure for RecordingStructure {
    async fn add(&self, page: PageSpec, position: Option<usize>) -> Result<()> {
        if self.reject {
            return Err(anyhow!("structure is read-only"));
        }
        self.pages.lock().unwrap().push((page, position));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingStorage {
    files: Mutex<Vec<(String, String)>>,
    thinking: Option<Arc<AtomicBool>>,
    written_while_busy: Mutex<Vec<bool>>,
}

impl RecordingStorage {
    fn watching(conversation: &ScriptedConversation) -> Arc<Self> {
        Arc::new(Self {
            thinking: Some(conversation.thinking.clone()),
            ..Self::default()
        })
    }
}

#[async_trait]
impl FileStorage for RecordingStorage {
    async fn add(&self, path: &str, content: &str) -> Result<()> {
        self.files
            .lock()
            .unwrap()
            .push((path.to_string(), content.to_string()));
        if let Some(thinking) = &self.thinking {
            self.written_while_busy
                .lock()
                .unwrap()
                .push(thinking.load(Ordering::SeqCst));
        }
        Ok(())
    }
}

struct Harness {
    model: Arc<FakeModel>,
    assessments: Arc<FakeAssessments>,
    structure: Arc<RecordingStructure>,
    storage: Arc<RecordingStorage>,
}

impl Harness {
    fn new(model: Arc<FakeModel>, assessments: Arc<FakeAssessments>) -> Self {
        Self {
            model,
            assessments,
            structure: Arc::new(RecordingStructure::default()),
            storage: Arc::new(RecordingStorage::default()),
        }
    }

    fn workflow(&self, profile: PipelineProfile) -> McqWorkflow {
        McqWorkflow::new(
            profile,
            WorkflowServices {
                text: self.model.clone(),
                assessments: self.assessments.clone(),
                structure: self.structure.clone(),
                storage: self.storage.clone(),
            },
            2000,
            AssessmentSettings::default(),
        )
    }
}

const THREE_IDEAS: &str = "<idea id=1>\nIdea 1: naming (Easy)\n</idea>\n<idea id=2>\nIdea 2: types (Intermediate)\n</idea>\n<idea id=3>\nIdea 3: casting (Hard)\n</idea>";

#[tokio::test]
async fn creates_one_page_per_requested_question() {
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let conversation = ScriptedConversation::answering(&["Variables and data types", "3"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert_eq!(harness.model.calls(), 1);
    let prompt = harness.model.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("Variables and data types"));
    assert!(prompt.contains('3'));

    let RunOutcome::Completed(report) = run.outcome else {
        panic!("expected completion, got {:?}", run.outcome);
    };
    assert_eq!(report.created(), 3);
    assert_eq!(report.degraded(), 0);
    assert_eq!(harness.assessments.generate_calls(), 3);

    let pages = harness.structure.pages();
    let titles: Vec<&str> = pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Exercise 1 - MCQ", "Exercise 2 - MCQ", "Exercise 3 - MCQ"]
    );
    assert!(pages[0].content.starts_with("{Check it! | assessment}(multiple-choice-1)"));
    assert!(pages[1].content.contains("Idea 2: types"));
    assert!(
        harness
            .structure
            .pages
            .lock()
            .unwrap()
            .iter()
            .all(|(_, position)| position.is_none())
    );

    assert!(
        conversation
            .written()
            .contains(&"✅ Successfully generated 3 multiple choice questions!".to_string())
    );
    conversation.assert_busy_balanced();
    assert_eq!(conversation.menus.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn assessment_requests_carry_label_and_idea() {
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let conversation = ScriptedConversation::answering(&["Variables", "2"]);

    harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    let requests = harness.assessments.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].assessment_type, "multiple-choice");
    assert_eq!(requests[1].guides_content, "Question 2");
    assert!(requests[1].files_list.is_empty());
    assert_eq!(
        requests[1].user_intro,
        "<idea id=2>\nIdea 2: types (Intermediate)\n</idea>"
    );
}

#[tokio::test]
async fn saved_assessments_get_fixed_settings() {
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let conversation = ScriptedConversation::answering(&["Variables", "1"]);

    harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    let saved = harness.assessments.saved.lock().unwrap();
    assert_eq!(saved.len(), 1);
    let source = &saved[0].source;
    assert!(!source.show_name);
    assert!(source.is_randomized);
    assert_eq!(
        source.show_guidance_after_response_option.trigger,
        GuidanceTrigger::Attempts
    );
    assert_eq!(source.show_guidance_after_response_option.passed_from, Some(2));
    assert_eq!(source.max_attempts_count, 0);
}

#[tokio::test]
async fn invalid_count_cancels_without_network_calls() {
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let conversation = ScriptedConversation::answering(&["Variables", "abc"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert_eq!(run.outcome, RunOutcome::Cancelled);
    assert_eq!(harness.model.calls(), 0);
    assert_eq!(harness.assessments.generate_calls(), 0);
    assert!(
        conversation
            .written()
            .contains(&"Question generation cancelled.".to_string())
    );
    assert_eq!(conversation.menus.load(Ordering::SeqCst), 1);
    conversation.assert_busy_balanced();
}

#[tokio::test]
async fn empty_objectives_cancel() {
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let conversation = ScriptedConversation::answering(&["   "]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert_eq!(run.outcome, RunOutcome::Cancelled);
    assert_eq!(conversation.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn idea_generation_failure_skips_assessments() {
    let harness = Harness::new(FakeModel::offline(), Arc::default());
    let conversation = ScriptedConversation::answering(&["Variables", "3"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert_eq!(run.outcome, RunOutcome::IdeaGenerationFailed);
    assert_eq!(harness.model.calls(), 1);
    assert_eq!(harness.assessments.generate_calls(), 0);
    assert!(harness.structure.pages().is_empty());
    assert!(
        conversation
            .written()
            .iter()
            .any(|line| line.contains("Failed to generate question ideas. Please try again."))
    );
    conversation.assert_busy_balanced();
    assert_eq!(conversation.menus.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_assessment_gets_fallback_page_and_loop_continues() {
    let harness = Harness::new(
        FakeModel::replying(THREE_IDEAS),
        FakeAssessments::failing_on(&[2]),
    );
    let conversation = ScriptedConversation::answering(&["Variables", "3"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert_eq!(harness.assessments.generate_calls(), 3);
    let pages = harness.structure.pages();
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].title, "Exercise 1 - MCQ");
    assert_eq!(pages[1].title, "Exercise 2 - MCQ (Fallback)");
    assert_eq!(pages[2].title, "Exercise 3 - MCQ");
    assert!(pages[1].content.contains(THREE_IDEAS));
    assert!(pages[1].content.contains("Assessment generation failed"));
    assert_eq!(harness.assessments.saved.lock().unwrap().len(), 2);

    let RunOutcome::Completed(report) = run.outcome else {
        panic!("expected completion");
    };
    assert_eq!(report.created(), 2);
    assert_eq!(report.degraded(), 1);
    assert!(report.items[1].is_degraded());
    assert!(run.events.contains(&WorkflowEvent::ItemDegraded { index: 2 }));
    conversation.assert_busy_balanced();
    assert_eq!(conversation.shown.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn too_few_ideas_fail_before_any_assessment() {
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let conversation = ScriptedConversation::answering(&["Variables", "5"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert!(matches!(run.outcome, RunOutcome::Failed(_)));
    assert_eq!(harness.assessments.generate_calls(), 0);
    assert!(harness.structure.pages().is_empty());
    assert!(conversation.written().iter().any(|line| {
        line.contains("An error occurred while generating questions. Please try again.")
    }));
    assert!(run.events.iter().any(|event| matches!(
        event,
        WorkflowEvent::StageFailed {
            stage: StageKind::Ideas,
            ..
        }
    )));
    assert_eq!(conversation.menus.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn response_without_idea_tags_fails_the_run() {
    let harness = Harness::new(FakeModel::replying("1. naming\n2. types"), Arc::default());
    let conversation = ScriptedConversation::answering(&["Variables", "2"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert!(matches!(run.outcome, RunOutcome::Failed(_)));
    assert_eq!(harness.assessments.generate_calls(), 0);
}

#[tokio::test]
async fn structure_errors_abort_the_batch() {
    let mut harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    harness.structure = Arc::new(RecordingStructure {
        reject: true,
        ..RecordingStructure::default()
    });
    let conversation = ScriptedConversation::answering(&["Variables", "3"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert!(matches!(run.outcome, RunOutcome::Failed(_)));
    assert_eq!(harness.assessments.generate_calls(), 1);
    conversation.assert_busy_balanced();
    assert_eq!(conversation.menus.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn save_errors_abort_the_batch_without_fallback() {
    let assessments = Arc::new(FakeAssessments {
        fail_save: true,
        ..FakeAssessments::default()
    });
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), assessments);
    let conversation = ScriptedConversation::answering(&["Variables", "3"]);

    let run = harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    let RunOutcome::Failed(error) = &run.outcome else {
        panic!("expected failure, got {:?}", run.outcome);
    };
    assert!(error.contains("assessment store is full"));
    assert_eq!(harness.assessments.generate_calls(), 1);
    assert!(harness.structure.pages().is_empty());
    assert!(run.events.iter().any(|event| matches!(
        event,
        WorkflowEvent::StageFailed {
            stage: StageKind::Assessments,
            ..
        }
    )));
    assert!(conversation.written().iter().any(|line| {
        line.contains("An error occurred while generating questions. Please try again.")
    }));
    conversation.assert_busy_balanced();
    assert_eq!(conversation.menus.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn contextual_profile_asks_for_context_and_keeps_run_log() {
    let reply = format!("<scratchpad>analysis</scratchpad>\n{THREE_IDEAS}");
    let mut harness = Harness::new(FakeModel::replying(&reply), Arc::default());
    let conversation =
        ScriptedConversation::answering(&["Loops", "2", "Python 3, first-year students"]);
    harness.storage = RecordingStorage::watching(&conversation);

    let run = harness
        .workflow(PipelineProfile::contextual())
        .execute(&conversation)
        .await;

    assert!(matches!(run.outcome, RunOutcome::Completed(_)));
    assert_eq!(conversation.prompts.lock().unwrap().len(), 3);
    assert!(harness.model.prompts.lock().unwrap()[0].contains("Python 3, first-year students"));

    let files = harness.storage.files.lock().unwrap();
    let names: Vec<&str> = files
        .iter()
        .map(|(path, _)| path.rsplit('/').next().unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["request.json", "ideas.txt", "scratchpad.txt"]);
    assert!(
        files
            .iter()
            .all(|(path, _)| path.starts_with(".guides/secure/mcq-logs/"))
    );
    assert!(files[0].1.contains("\"number_of_questions\": 2"));
    assert_eq!(files[1].1, reply);
    assert_eq!(files[2].1, "analysis");

    assert_eq!(
        *harness.storage.written_while_busy.lock().unwrap(),
        vec![true, true, true]
    );
    conversation.assert_busy_balanced();
    assert_eq!(conversation.shown.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn basic_profile_writes_no_run_log() {
    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let conversation = ScriptedConversation::answering(&["Loops", "1"]);

    harness.workflow(PipelineProfile::basic()).execute(&conversation).await;

    assert!(harness.storage.files.lock().unwrap().is_empty());
    assert_eq!(conversation.prompts.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn registered_action_runs_the_workflow() {
    use crate::coach::{ActionRegistry, CoachAction};

    let harness = Harness::new(FakeModel::replying(THREE_IDEAS), Arc::default());
    let workflow: Arc<dyn CoachAction> = Arc::new(harness.workflow(PipelineProfile::basic()));
    let mut registry = ActionRegistry::new();
    registry
        .register("generateMCQButton", "Generate Multiple Choice Questions", workflow)
        .unwrap();
    let conversation = ScriptedConversation::answering(&["Variables", "1"]);

    registry
        .invoke("generateMCQButton", &conversation)
        .await
        .unwrap();

    assert_eq!(harness.structure.pages().len(), 1);
}

#[test]
fn busy_guard_hides_indicator_on_drop() {
    let conversation = ScriptedConversation::default();
    let reporter = StatusReporter::new(&conversation);
    {
        let _busy = reporter.busy();
        assert_eq!(conversation.shown.load(Ordering::SeqCst), 1);
        assert_eq!(conversation.hidden.load(Ordering::SeqCst), 0);
    }
    conversation.assert_busy_balanced();
}
