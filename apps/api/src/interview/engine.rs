//! Interview State Machine — owns the per-session state and drives the
//! per-turn transition logic.
//!
//! Lifecycle: NotStarted → InProgress → Concluded. Within InProgress the
//! state is the tuple (question_index, awaiting_follow_up, follow_up_count).
//!
//! Turn processing is snapshot-commit: every gateway call a turn needs
//! completes against an immutable view of the session, producing a
//! `TurnOutcome` that is applied in one step. A gateway failure anywhere in
//! the turn therefore leaves question_index, follow_up_count and
//! awaiting_follow_up untouched — the candidate's next message retries the
//! turn. The UI only ever observes pre-turn and post-turn snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::interview::decision::{
    parse_answer_evaluation, parse_followup_evaluation, AnswerDecision, FollowUpDecision,
};
use crate::interview::prompts::{
    ANSWER_EVALUATION_PROMPT_TEMPLATE, CONCLUSION_PROMPT_TEMPLATE, EXIT_CLASSIFIER_PROMPT_TEMPLATE,
    EXIT_CLOSING_MESSAGE, FIRST_QUESTION_TEMPLATE, FOLLOWUP_EVALUATION_PROMPT_TEMPLATE,
    GENERATION_FAILURE_MESSAGE, GREETING_TEMPLATE, TRANSITION_PROMPT_TEMPLATE,
    TURN_FAILURE_TEMPLATE,
};
use crate::interview::question_set::build_question_set;
use crate::llm_client::prompts::{INTERVIEWER_SYSTEM, MARKER_INSTRUCTION, SINGLE_WORD_SYSTEM};
use crate::llm_client::{CompletionGateway, LlmError};
use crate::models::candidate::CandidateProfile;
use crate::models::transcript::TranscriptEntry;

/// Hard ceiling on follow-ups per question. The evaluation prompt tells the
/// model to self-limit at this count, and the engine enforces it mechanically
/// as well, so per-question termination never depends on model compliance.
pub const MAX_FOLLOW_UPS: u8 = 2;

/// Coarse lifecycle phase, derived from the session flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    NotStarted,
    InProgress,
    Concluded,
}

/// One interview session. Exclusively mutated by this module; handlers only
/// read it for response payloads and turn gating.
#[derive(Debug, Clone)]
pub struct InterviewSession {
    pub id: Uuid,
    pub profile: CandidateProfile,
    /// Ordered question set, fixed at start. Empty until the session starts.
    pub questions: Vec<String>,
    /// 0-based pointer into `questions`; equals `questions.len()` only once
    /// the interview has concluded.
    pub question_index: usize,
    /// True iff the next candidate message answers a follow-up rather than
    /// the current question.
    pub awaiting_follow_up: bool,
    /// Follow-ups issued for the current question, 0..=MAX_FOLLOW_UPS.
    /// Reset to 0 whenever `question_index` advances.
    pub follow_up_count: u8,
    pub started: bool,
    pub exited: bool,
    pub transcript: Vec<TranscriptEntry>,
    pub created_at: DateTime<Utc>,
}

impl InterviewSession {
    pub fn new(profile: CandidateProfile) -> Self {
        Self {
            id: Uuid::new_v4(),
            profile,
            questions: Vec::new(),
            question_index: 0,
            awaiting_follow_up: false,
            follow_up_count: 0,
            started: false,
            exited: false,
            transcript: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn phase(&self) -> InterviewPhase {
        if !self.started {
            InterviewPhase::NotStarted
        } else if self.exited {
            InterviewPhase::Concluded
        } else {
            InterviewPhase::InProgress
        }
    }

    pub fn push_interviewer(&mut self, message: impl Into<String>) {
        self.transcript.push(TranscriptEntry::interviewer(message));
    }

    pub fn push_candidate(&mut self, message: impl Into<String>) {
        self.transcript.push(TranscriptEntry::candidate(message));
    }
}

/// The committed result of one turn: messages to append plus the next state.
struct TurnOutcome {
    messages: Vec<String>,
    question_index: usize,
    awaiting_follow_up: bool,
    follow_up_count: u8,
    exited: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Interview start
// ────────────────────────────────────────────────────────────────────────────

/// Starts the interview: greeting, question set generation, first question.
///
/// On generation failure the greeting and an in-character failure message are
/// the only transcript output and the session stays `NotStarted` — no
/// question set is installed and no turns will be accepted.
pub async fn start_interview(session: &mut InterviewSession, gateway: &dyn CompletionGateway) {
    let greeting = GREETING_TEMPLATE
        .replace("{name}", &session.profile.name)
        .replace("{tech_stack}", &session.profile.tech_stack);
    session.push_interviewer(greeting);

    match build_question_set(&session.profile, gateway).await {
        Ok(questions) if !questions.is_empty() => {
            info!(
                "Session {} started with {} questions",
                session.id,
                questions.len()
            );
            let first = FIRST_QUESTION_TEMPLATE.replace("{question}", &questions[0]);
            session.questions = questions;
            session.started = true;
            session.push_interviewer(first);
        }
        Ok(_) => {
            warn!("Session {}: question set came back empty", session.id);
            session.push_interviewer(GENERATION_FAILURE_MESSAGE);
        }
        Err(e) => {
            error!("Session {}: question generation failed: {e}", session.id);
            session.push_interviewer(GENERATION_FAILURE_MESSAGE);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Turn processing
// ────────────────────────────────────────────────────────────────────────────

/// Processes one candidate turn: exit check, evaluation, possible advance.
///
/// The candidate message is always appended. Any gateway failure aborts the
/// rest of the turn with an in-character apology and no state change.
pub async fn process_turn(
    session: &mut InterviewSession,
    gateway: &dyn CompletionGateway,
    message: &str,
) {
    // Turns are only meaningful while the interview is in progress.
    if session.phase() != InterviewPhase::InProgress {
        return;
    }

    session.push_candidate(message);

    match evaluate_turn(session, gateway, message).await {
        Ok(outcome) => apply_outcome(session, outcome),
        Err(e) => {
            warn!("Session {}: turn aborted: {e}", session.id);
            let apology =
                TURN_FAILURE_TEMPLATE.replace("{tech_stack}", &session.profile.tech_stack);
            session.push_interviewer(apology);
        }
    }
}

/// Computes the turn outcome against an immutable session snapshot.
async fn evaluate_turn(
    session: &InterviewSession,
    gateway: &dyn CompletionGateway,
    message: &str,
) -> Result<TurnOutcome, LlmError> {
    // Exit check always comes first; an exit wish short-circuits evaluation.
    let exit_prompt = EXIT_CLASSIFIER_PROMPT_TEMPLATE.replace("{message}", message);
    let verdict = gateway.complete(&exit_prompt, SINGLE_WORD_SYSTEM).await?;
    if verdict.trim().eq_ignore_ascii_case("exit") {
        info!("Session {}: candidate asked to exit", session.id);
        return Ok(TurnOutcome {
            messages: vec![EXIT_CLOSING_MESSAGE.to_string()],
            question_index: session.question_index,
            awaiting_follow_up: session.awaiting_follow_up,
            follow_up_count: session.follow_up_count,
            exited: true,
        });
    }

    // InProgress invariant: question_index < questions.len().
    let question = &session.questions[session.question_index];

    if session.awaiting_follow_up {
        let prompt =
            followup_evaluation_prompt(&session.profile, question, message, session.follow_up_count);
        let raw = gateway.complete(&prompt, INTERVIEWER_SYSTEM).await?;
        let (display, decision) = parse_followup_evaluation(&raw);

        match decision {
            FollowUpDecision::NeedsMoreDepth if session.follow_up_count < MAX_FOLLOW_UPS => {
                Ok(TurnOutcome {
                    messages: vec![display],
                    question_index: session.question_index,
                    awaiting_follow_up: true,
                    follow_up_count: session.follow_up_count + 1,
                    exited: false,
                })
            }
            FollowUpDecision::NeedsMoreDepth => {
                // Follow-up cap reached: advance regardless of the model's
                // decision so the per-question loop always terminates.
                info!(
                    "Session {}: follow-up cap reached on question {} — forcing advance",
                    session.id, session.question_index
                );
                advance(session, gateway, display).await
            }
            FollowUpDecision::MoveOn | FollowUpDecision::Unrecognized => {
                advance(session, gateway, display).await
            }
        }
    } else {
        let prompt = answer_evaluation_prompt(&session.profile, question, message);
        let raw = gateway.complete(&prompt, INTERVIEWER_SYSTEM).await?;
        let (display, decision) = parse_answer_evaluation(&raw);

        match decision {
            AnswerDecision::NeedsFollowUp => Ok(TurnOutcome {
                messages: vec![display],
                question_index: session.question_index,
                awaiting_follow_up: true,
                follow_up_count: 1,
                exited: false,
            }),
            AnswerDecision::Complete | AnswerDecision::Unrecognized => {
                advance(session, gateway, display).await
            }
        }
    }
}

/// Builds the advance outcome: next-question transition or conclusion.
/// `ack` is the marker-stripped evaluation text shown before the transition.
async fn advance(
    session: &InterviewSession,
    gateway: &dyn CompletionGateway,
    ack: String,
) -> Result<TurnOutcome, LlmError> {
    let next = session.question_index + 1;
    let mut messages: Vec<String> = Vec::new();
    if !ack.is_empty() {
        messages.push(ack);
    }

    if next < session.questions.len() {
        let prompt = TRANSITION_PROMPT_TEMPLATE.replace("{question}", &session.questions[next]);
        let transition = gateway.complete(&prompt, INTERVIEWER_SYSTEM).await?;
        messages.push(transition);
        Ok(TurnOutcome {
            messages,
            question_index: next,
            awaiting_follow_up: false,
            follow_up_count: 0,
            exited: false,
        })
    } else {
        let prompt = CONCLUSION_PROMPT_TEMPLATE
            .replace("{name}", &session.profile.name)
            .replace("{tech_stack}", &session.profile.tech_stack);
        let conclusion = gateway.complete(&prompt, INTERVIEWER_SYSTEM).await?;
        messages.push(conclusion);
        info!("Session {}: all questions completed", session.id);
        Ok(TurnOutcome {
            messages,
            question_index: next,
            awaiting_follow_up: false,
            follow_up_count: 0,
            exited: true,
        })
    }
}

fn apply_outcome(session: &mut InterviewSession, outcome: TurnOutcome) {
    for message in outcome.messages {
        session.push_interviewer(message);
    }
    session.question_index = outcome.question_index;
    session.awaiting_follow_up = outcome.awaiting_follow_up;
    session.follow_up_count = outcome.follow_up_count;
    session.exited = outcome.exited;
}

fn answer_evaluation_prompt(profile: &CandidateProfile, question: &str, answer: &str) -> String {
    ANSWER_EVALUATION_PROMPT_TEMPLATE
        .replace("{marker_instruction}", MARKER_INSTRUCTION)
        .replace("{name}", &profile.name)
        .replace("{experience}", &profile.years_experience.to_string())
        .replace("{tech_stack}", &profile.tech_stack)
        .replace("{question}", question)
        .replace("{answer}", answer)
}

fn followup_evaluation_prompt(
    profile: &CandidateProfile,
    question: &str,
    answer: &str,
    follow_up_count: u8,
) -> String {
    FOLLOWUP_EVALUATION_PROMPT_TEMPLATE
        .replace("{marker_instruction}", MARKER_INSTRUCTION)
        .replace("{name}", &profile.name)
        .replace("{experience}", &profile.years_experience.to_string())
        .replace("{tech_stack}", &profile.tech_stack)
        .replace("{question}", question)
        .replace("{answer}", answer)
        .replace("{follow_up_count}", &follow_up_count.to_string())
        .replace("{max_follow_ups}", &MAX_FOLLOW_UPS.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGateway;
    use crate::models::transcript::Speaker;

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            years_experience: 7,
            desired_positions: "Backend Engineer".to_string(),
            location: "London".to_string(),
            tech_stack: "Python, SQL".to_string(),
        }
    }

    fn started_session(questions: &[&str]) -> InterviewSession {
        let mut session = InterviewSession::new(profile());
        session.questions = questions.iter().map(|q| q.to_string()).collect();
        session.started = true;
        session
    }

    fn last_message(session: &InterviewSession) -> &str {
        &session.transcript.last().unwrap().message
    }

    #[test]
    fn test_new_session_is_not_started() {
        let session = InterviewSession::new(profile());
        assert_eq!(session.phase(), InterviewPhase::NotStarted);
        assert_eq!(session.question_index, 0);
        assert_eq!(session.follow_up_count, 0);
        assert!(!session.awaiting_follow_up);
    }

    #[tokio::test]
    async fn test_start_interview_installs_questions_and_greets() {
        let gateway =
            ScriptedGateway::replying(&["1. Easy one?\n2. Medium one?\n3. Hard one?"]);
        let mut session = InterviewSession::new(profile());

        start_interview(&mut session, &gateway).await;

        assert_eq!(session.phase(), InterviewPhase::InProgress);
        assert_eq!(session.questions.len(), 3);
        assert_eq!(session.transcript.len(), 2);
        assert!(session.transcript[0].message.contains("Ada Lovelace"));
        assert!(last_message(&session).contains("Easy one?"));
    }

    #[tokio::test]
    async fn test_start_interview_generation_failure_leaves_unstarted() {
        let gateway = ScriptedGateway::new(vec![Err(ScriptedGateway::failure())]);
        let mut session = InterviewSession::new(profile());

        start_interview(&mut session, &gateway).await;

        assert_eq!(session.phase(), InterviewPhase::NotStarted);
        assert!(session.questions.is_empty());
        // Greeting plus the visible failure entry.
        assert_eq!(session.transcript.len(), 2);
        assert_eq!(last_message(&session), GENERATION_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_fresh_answer_needs_followup_stays_on_question() {
        let gateway = ScriptedGateway::replying(&[
            "continue",
            "Interesting — how would you index that table? NEEDS_FOLLOWUP",
        ]);
        let mut session = started_session(&["Q1?", "Q2?", "Q3?"]);

        process_turn(&mut session, &gateway, "We used a big table.").await;

        assert!(session.awaiting_follow_up);
        assert_eq!(session.follow_up_count, 1);
        assert_eq!(session.question_index, 0);
        assert!(!session.exited);
        assert!(last_message(&session).contains("index that table?"));
        assert!(!last_message(&session).contains("NEEDS_FOLLOWUP"));
    }

    #[tokio::test]
    async fn test_complete_answer_advances_with_transition() {
        let gateway = ScriptedGateway::replying(&[
            "continue",
            "Great answer on comprehensions. COMPLETE_ANSWER",
            "Nice — let's shift to databases. How do JOINs work?",
        ]);
        let mut session = started_session(&["Q1?", "Q2?", "Q3?"]);

        process_turn(&mut session, &gateway, "A solid answer.").await;

        assert_eq!(session.question_index, 1);
        assert!(!session.awaiting_follow_up);
        assert_eq!(session.follow_up_count, 0);
        // Candidate message + ack + transition.
        assert_eq!(session.transcript.len(), 3);
        assert_eq!(session.transcript[1].message, "Great answer on comprehensions.");
        assert!(last_message(&session).contains("JOINs"));
    }

    #[tokio::test]
    async fn test_unrecognized_evaluation_fails_open_to_advance() {
        let gateway = ScriptedGateway::replying(&[
            "continue",
            "Thanks for walking me through that.",
            "Moving on: tell me about transactions.",
        ]);
        let mut session = started_session(&["Q1?", "Q2?"]);

        process_turn(&mut session, &gateway, "An answer.").await;

        assert_eq!(session.question_index, 1);
        assert!(!session.awaiting_follow_up);
    }

    #[tokio::test]
    async fn test_followup_reply_needing_more_depth_increments_count() {
        let gateway = ScriptedGateway::replying(&[
            "continue",
            "Closer — what about composite indexes? NEEDS_MORE_DEPTH",
        ]);
        let mut session = started_session(&["Q1?", "Q2?"]);
        session.awaiting_follow_up = true;
        session.follow_up_count = 1;

        process_turn(&mut session, &gateway, "Indexes make reads faster.").await;

        assert!(session.awaiting_follow_up);
        assert_eq!(session.follow_up_count, 2);
        assert_eq!(session.question_index, 0);
    }

    #[tokio::test]
    async fn test_followup_cap_forces_advance_despite_model() {
        // follow_up_count already at the cap; model still says NEEDS_MORE_DEPTH.
        let gateway = ScriptedGateway::replying(&[
            "continue",
            "Still fairly thin. NEEDS_MORE_DEPTH",
            "Let's move to the next topic: describe a JOIN.",
        ]);
        let mut session = started_session(&["Q1?", "Q2?"]);
        session.awaiting_follow_up = true;
        session.follow_up_count = MAX_FOLLOW_UPS;

        process_turn(&mut session, &gateway, "Same answer again.").await;

        assert_eq!(session.question_index, 1);
        assert!(!session.awaiting_follow_up);
        assert_eq!(session.follow_up_count, 0);
        assert!(!session.exited);
    }

    #[tokio::test]
    async fn test_move_on_after_last_question_concludes() {
        let gateway = ScriptedGateway::replying(&[
            "continue",
            "Good depth now. MOVE_TO_NEXT_QUESTION",
            "Thank you Ada — the team will review your responses and be in touch.",
        ]);
        let mut session = started_session(&["Q1?", "Q2?"]);
        session.question_index = 1;
        session.awaiting_follow_up = true;
        session.follow_up_count = 1;

        process_turn(&mut session, &gateway, "Detailed final answer.").await;

        assert!(session.exited);
        assert_eq!(session.phase(), InterviewPhase::Concluded);
        assert_eq!(session.question_index, session.questions.len());
        assert_eq!(session.follow_up_count, 0);
        assert!(last_message(&session).contains("review your responses"));
    }

    #[tokio::test]
    async fn test_exit_classification_short_circuits_evaluation() {
        // Only the classifier response is scripted: an evaluation call would
        // panic the scripted gateway, proving the message is never evaluated.
        let gateway = ScriptedGateway::replying(&["exit"]);
        let mut session = started_session(&["Q1?", "Q2?"]);

        process_turn(&mut session, &gateway, "I'd like to stop here.").await;

        assert!(session.exited);
        assert_eq!(session.question_index, 0);
        assert_eq!(last_message(&session), EXIT_CLOSING_MESSAGE);
        assert_eq!(gateway.remaining(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_mid_turn_leaves_state_unchanged() {
        let gateway = ScriptedGateway::new(vec![
            Ok("continue".to_string()),
            Err(ScriptedGateway::failure()),
        ]);
        let mut session = started_session(&["Q1?", "Q2?"]);
        session.awaiting_follow_up = true;
        session.follow_up_count = 1;

        process_turn(&mut session, &gateway, "An answer.").await;

        // State untouched; candidate message and apology appended.
        assert_eq!(session.question_index, 0);
        assert!(session.awaiting_follow_up);
        assert_eq!(session.follow_up_count, 1);
        assert!(!session.exited);
        assert_eq!(session.transcript.len(), 2);
        assert_eq!(session.transcript[0].speaker, Speaker::Candidate);
        assert!(last_message(&session).contains("Python, SQL"));
    }

    #[tokio::test]
    async fn test_transition_failure_aborts_advance() {
        // Evaluation succeeds but the transition call fails: the whole turn
        // rolls back, so the ack is not published either.
        let gateway = ScriptedGateway::new(vec![
            Ok("continue".to_string()),
            Ok("Nice. COMPLETE_ANSWER".to_string()),
            Err(ScriptedGateway::failure()),
        ]);
        let mut session = started_session(&["Q1?", "Q2?"]);

        process_turn(&mut session, &gateway, "An answer.").await;

        assert_eq!(session.question_index, 0);
        assert_eq!(session.transcript.len(), 2);
        assert!(last_message(&session).contains("I apologize"));
    }

    #[tokio::test]
    async fn test_turn_on_concluded_session_is_ignored() {
        let gateway = ScriptedGateway::replying(&[]);
        let mut session = started_session(&["Q1?"]);
        session.exited = true;
        session.question_index = 1;

        process_turn(&mut session, &gateway, "Hello again?").await;

        assert!(session.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_question_index_monotone_over_full_interview() {
        // Two questions, all answers judged complete; index never decreases
        // and hits questions.len() exactly when exited flips.
        let gateway = ScriptedGateway::replying(&[
            "continue",
            "Solid. COMPLETE_ANSWER",
            "On to the next topic: JOINs?",
            "continue",
            "Also solid. COMPLETE_ANSWER",
            "Thanks for your time — we'll be in touch.",
        ]);
        let mut session = started_session(&["Q1?", "Q2?"]);

        process_turn(&mut session, &gateway, "First answer.").await;
        assert_eq!(session.question_index, 1);
        assert!(!session.exited);

        process_turn(&mut session, &gateway, "Second answer.").await;
        assert_eq!(session.question_index, 2);
        assert!(session.exited);
    }
}
