//! Candidate profile — the intake payload collected before an interview starts.
//!
//! The engine only ever sees a fully validated profile: every field non-empty,
//! experience within range. Immutable once the session is created.

use serde::{Deserialize, Serialize};

/// Upper bound on years of experience accepted at intake.
pub const MAX_YEARS_EXPERIENCE: u8 = 50;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub years_experience: u8,
    pub desired_positions: String,
    pub location: String,
    /// Free text, comma-delimited skill tokens (e.g. "Python, Django, SQL").
    pub tech_stack: String,
}

impl CandidateProfile {
    /// Validates the profile for intake. Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("name", &self.name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("desired_positions", &self.desired_positions),
            ("location", &self.location),
            ("tech_stack", &self.tech_stack),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(format!("{field} cannot be empty"));
            }
        }

        if self.years_experience > MAX_YEARS_EXPERIENCE {
            return Err(format!(
                "years_experience must be at most {MAX_YEARS_EXPERIENCE}"
            ));
        }

        Ok(())
    }

    /// Non-empty comma-separated skill tokens, in declaration order.
    pub fn tech_tokens(&self) -> Vec<String> {
        self.tech_stack
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
