//! Axum route handlers for the Interview API.
//!
//! Thin plumbing over the engine: validate intake, route turns, expose
//! read-only snapshots. All interview-state failures stay in-character inside
//! the transcript; only request errors (unknown session, empty message, turn
//! on a session that isn't in progress) surface as HTTP errors.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::engine::{self, InterviewPhase, InterviewSession};
use crate::models::candidate::CandidateProfile;
use crate::models::transcript::TranscriptEntry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Read-only view of a session, returned by every interview endpoint.
#[derive(Debug, Serialize)]
pub struct InterviewSnapshot {
    pub session_id: Uuid,
    pub phase: InterviewPhase,
    pub started: bool,
    pub exited: bool,
    pub question_index: usize,
    pub question_count: usize,
    pub awaiting_follow_up: bool,
    pub follow_up_count: u8,
    pub transcript: Vec<TranscriptEntry>,
}

impl InterviewSnapshot {
    fn of(session: &InterviewSession) -> Self {
        Self {
            session_id: session.id,
            phase: session.phase(),
            started: session.started,
            exited: session.exited,
            question_index: session.question_index,
            question_count: session.questions.len(),
            awaiting_follow_up: session.awaiting_follow_up,
            follow_up_count: session.follow_up_count,
            transcript: session.transcript.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub entries: Vec<TranscriptEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
///
/// Intake: validates the full candidate profile, creates the session, builds
/// the question set and appends greeting + first question. If generation
/// fails the session is stored un-started with the failure visible in its
/// transcript, and the candidate starts a new session to retry.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Json(profile): Json<CandidateProfile>,
) -> Result<Json<InterviewSnapshot>, AppError> {
    profile.validate().map_err(AppError::Validation)?;

    let mut session = InterviewSession::new(profile);
    engine::start_interview(&mut session, state.gateway.as_ref()).await;

    let snapshot = InterviewSnapshot::of(&session);
    state.sessions.insert(session).await;

    Ok(Json(snapshot))
}

/// POST /api/v1/interviews/:id/messages
///
/// One candidate turn. Accepted only while the interview is in progress; the
/// session lock is held for the whole turn so turns never overlap.
pub async fn handle_candidate_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<InterviewSnapshot>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }

    let handle = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {session_id} not found")))?;

    let mut session = handle.lock().await;

    match session.phase() {
        InterviewPhase::NotStarted => {
            return Err(AppError::UnprocessableEntity(
                "interview has not started".to_string(),
            ))
        }
        InterviewPhase::Concluded => {
            return Err(AppError::UnprocessableEntity(
                "interview has already concluded".to_string(),
            ))
        }
        InterviewPhase::InProgress => {}
    }

    engine::process_turn(&mut session, state.gateway.as_ref(), &request.message).await;

    Ok(Json(InterviewSnapshot::of(&session)))
}

/// GET /api/v1/interviews/:id
///
/// Full session snapshot: phase, progression state, transcript.
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<InterviewSnapshot>, AppError> {
    let handle = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {session_id} not found")))?;

    let session = handle.lock().await;
    Ok(Json(InterviewSnapshot::of(&session)))
}

/// GET /api/v1/interviews/:id/transcript
///
/// Ordered, read-only transcript view.
pub async fn handle_get_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let handle = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Interview {session_id} not found")))?;

    let session = handle.lock().await;
    Ok(Json(TranscriptResponse {
        session_id: session.id,
        entries: session.transcript.clone(),
    }))
}
