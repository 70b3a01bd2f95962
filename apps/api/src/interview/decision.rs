//! Decision Parser — extracts a typed control decision from free-text model
//! output carrying an embedded marker token.
//!
//! The marker contract is a side channel piggybacked on natural-language
//! generation, so it stays isolated here: the engine only ever sees the enums
//! below, never raw string scanning. Marker search is a plain case-sensitive
//! substring match — the marker may appear anywhere in the text. Every
//! recognized marker occurrence is stripped from the display text.
//!
//! `Unrecognized` (no marker, or an ambiguous pair of both markers) always
//! fails open toward forward progress; the engine treats it as an advance.

/// Marker for a fresh answer judged sufficient.
pub const COMPLETE_ANSWER_MARKER: &str = "COMPLETE_ANSWER";
/// Marker for a fresh answer that needs a probing follow-up.
pub const NEEDS_FOLLOWUP_MARKER: &str = "NEEDS_FOLLOWUP";
/// Marker for a follow-up reply judged sufficient.
pub const MOVE_TO_NEXT_MARKER: &str = "MOVE_TO_NEXT_QUESTION";
/// Marker for a follow-up reply that still lacks depth.
pub const NEEDS_MORE_DEPTH_MARKER: &str = "NEEDS_MORE_DEPTH";

/// Decision extracted from the evaluation of a fresh answer (context A).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerDecision {
    Complete,
    NeedsFollowUp,
    Unrecognized,
}

/// Decision extracted from the evaluation of a follow-up reply (context B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpDecision {
    MoveOn,
    NeedsMoreDepth,
    Unrecognized,
}

/// Parses an evaluation of a fresh answer. Returns the display text (markers
/// stripped, whitespace trimmed) and the decision.
pub fn parse_answer_evaluation(raw: &str) -> (String, AnswerDecision) {
    let (display, hit) = extract(raw, COMPLETE_ANSWER_MARKER, NEEDS_FOLLOWUP_MARKER);
    let decision = match hit {
        MarkerHit::First => AnswerDecision::Complete,
        MarkerHit::Second => AnswerDecision::NeedsFollowUp,
        MarkerHit::NoneOrBoth => AnswerDecision::Unrecognized,
    };
    (display, decision)
}

/// Parses an evaluation of a follow-up reply. Returns the display text
/// (markers stripped, whitespace trimmed) and the decision.
pub fn parse_followup_evaluation(raw: &str) -> (String, FollowUpDecision) {
    let (display, hit) = extract(raw, MOVE_TO_NEXT_MARKER, NEEDS_MORE_DEPTH_MARKER);
    let decision = match hit {
        MarkerHit::First => FollowUpDecision::MoveOn,
        MarkerHit::Second => FollowUpDecision::NeedsMoreDepth,
        MarkerHit::NoneOrBoth => FollowUpDecision::Unrecognized,
    };
    (display, decision)
}

enum MarkerHit {
    First,
    Second,
    /// Neither marker present, or both — ambiguous either way.
    NoneOrBoth,
}

fn extract(raw: &str, first: &str, second: &str) -> (String, MarkerHit) {
    let has_first = raw.contains(first);
    let has_second = raw.contains(second);

    // Strip ALL recognized occurrences so no marker ever reaches the candidate,
    // even in the ambiguous case.
    let display = raw.replace(first, "").replace(second, "").trim().to_string();

    let hit = match (has_first, has_second) {
        (true, false) => MarkerHit::First,
        (false, true) => MarkerHit::Second,
        _ => MarkerHit::NoneOrBoth,
    };

    (display, hit)
}
