//! Question Set Builder — turns a candidate profile into an ordered list of
//! N screening questions, N derived from tech-stack breadth.
//!
//! One generation call, numbered-line parsing, generic fallbacks when the
//! model under-delivers, truncation when it over-delivers. The question set
//! is created once at interview start and never mutated.

use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::interview::prompts::{QUESTION_GENERATION_PROMPT_TEMPLATE, QUESTION_GENERATION_SYSTEM};
use crate::llm_client::{CompletionGateway, LlmError};
use crate::models::candidate::CandidateProfile;

pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 5;

/// Number of questions for a tech stack with `tech_token_count` skills:
/// more skills, more questions, clamped to 3–5.
pub fn question_count(tech_token_count: usize) -> usize {
    tech_token_count.clamp(MIN_QUESTIONS, MAX_QUESTIONS)
}

/// Builds the question set for a profile via one gateway call.
///
/// A gateway failure here is fatal to starting the interview — the caller
/// surfaces it as a transcript message and leaves the session un-started.
pub async fn build_question_set(
    profile: &CandidateProfile,
    gateway: &dyn CompletionGateway,
) -> Result<Vec<String>, LlmError> {
    let tokens = profile.tech_tokens();
    let target = question_count(tokens.len());

    let prompt = QUESTION_GENERATION_PROMPT_TEMPLATE
        .replace("{experience}", &profile.years_experience.to_string())
        .replace("{tech_stack}", &profile.tech_stack)
        .replace("{desired_positions}", &profile.desired_positions)
        .replace("{num_questions}", &target.to_string());

    let response = gateway.complete(&prompt, QUESTION_GENERATION_SYSTEM).await?;

    let mut questions = parse_numbered_questions(&response);

    if questions.len() < target {
        warn!(
            "Question generation returned {}/{} questions — filling with fallbacks",
            questions.len(),
            target
        );
        fill_with_fallback_questions(&mut questions, &tokens, target);
    } else if questions.len() > target {
        // Preserve the model's ordering — truncate, never re-rank.
        questions.truncate(target);
    }

    info!("Built question set of {} questions", questions.len());
    Ok(questions)
}

/// Parses lines of the form "3. How would you ..." into question text,
/// stripping the integer-dot prefix and preserving response order.
pub(crate) fn parse_numbered_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (prefix, rest) = line.split_once('.')?;
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let question = rest.trim();
            if question.is_empty() {
                return None;
            }
            Some(question.to_string())
        })
        .collect()
}

/// Appends generic experience questions built from distinct tech tokens,
/// drawn at random without replacement, until `target` is reached or the
/// tokens are exhausted.
pub(crate) fn fill_with_fallback_questions(
    questions: &mut Vec<String>,
    tech_tokens: &[String],
    target: usize,
) {
    let mut pool: Vec<&String> = tech_tokens.iter().collect();
    pool.shuffle(&mut rand::thread_rng());

    for tech in pool {
        if questions.len() >= target {
            break;
        }
        questions.push(format!(
            "Can you describe your experience with {tech} and how you've applied it in real projects?"
        ));
    }
}
