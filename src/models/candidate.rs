//! Next-candidate lookup result.

use serde::Serialize;

/// Reserved candidate id meaning the reviewer's candidate pool is exhausted.
///
/// Must match the potential-matches endpoint exactly (case-sensitive, no whitespace).
pub const NO_POTENTIAL_MATCHES: &str = "NO_POTENTIAL_MATCHES";

/// Result of asking the match service for the next unreviewed candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum NextCandidate {
    /// A real candidate id.
    Candidate(String),
    /// The pool is exhausted for this reviewer.
    Exhausted,
}

impl NextCandidate {
    /// Classify a raw candidate id received from the match service.
    ///
    /// Returns `None` for an empty id, which no endpoint contract allows.
    pub fn from_id(id: &str) -> Option<Self> {
        if id.is_empty() {
            None
        } else if id == NO_POTENTIAL_MATCHES {
            Some(Self::Exhausted)
        } else {
            Some(Self::Candidate(id.to_string()))
        }
    }

    /// The candidate id, if this is a real candidate.
    pub fn candidate_id(&self) -> Option<&str> {
        match self {
            Self::Candidate(id) => Some(id),
            Self::Exhausted => None,
        }
    }
}
