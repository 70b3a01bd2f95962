//! Transcript — append-only record of everything said in an interview session.
//!
//! Entries are never reordered or deleted; insertion order is chronological
//! order. The HTTP layer serves this as a read-only view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Interviewer,
    Candidate,
}

/// One line of the interview transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn interviewer(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Interviewer,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn candidate(message: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Candidate,
            message: message.into(),
            at: Utc::now(),
        }
    }
}
