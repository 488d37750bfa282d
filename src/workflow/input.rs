use anyhow::Result;

use crate::coach::{CoachContext, Conversation};
use crate::ideas::UserRequest;

const OBJECTIVES_PROMPT: &str = "Please paste the relevant learning objectives:";
const COUNT_PROMPT: &str = "How many questions would you like to generate?";
const CONTEXT_PROMPT: &str = "Any additional context for the questions? (optional, press Enter to skip)";

/// Reads the leading integer of `raw` the way a lenient form field would:
/// "5.7" is 5, "12 please" is 12, "abc" is nothing. Zero, negative and
/// out-of-range counts are rejected.
pub fn parse_question_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return None;
    }

    digits[..end].parse::<u32>().ok().filter(|&count| count > 0)
}

/// Prompts for the objectives, the question count and, when asked to, extra
/// context. `None` means the run was cancelled.
pub async fn collect_user_request(
    conversation: &dyn Conversation,
    collect_context: bool,
) -> Option<UserRequest> {
    match prompt_user(conversation, collect_context).await {
        Ok(request) => request,
        Err(error) => {
            log::error!("Error getting user input: {:#}", error);
            None
        }
    }
}

async fn prompt_user(
    conversation: &dyn Conversation,
    collect_context: bool,
) -> Result<Option<UserRequest>> {
    let CoachContext {
        workspace,
        open_files,
    } = conversation.context().await?;
    log::debug!(
        "Coach context: workspace {:?}, {} open files",
        workspace,
        open_files.len()
    );

    let objectives = conversation.input(OBJECTIVES_PROMPT, None).await?;
    let Some(objectives) = objectives.map(|o| o.trim().to_string()).filter(|o| !o.is_empty())
    else {
        return Ok(None);
    };

    let Some(count) = conversation
        .input(COUNT_PROMPT, Some("e.g. 5"))
        .await?
        .as_deref()
        .and_then(parse_question_count)
    else {
        return Ok(None);
    };

    let additional_context = if collect_context {
        conversation
            .input(CONTEXT_PROMPT, None)
            .await?
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
    } else {
        None
    };

    Ok(Some(UserRequest {
        learning_objectives: objectives,
        number_of_questions: count,
        additional_context,
    }))
}
