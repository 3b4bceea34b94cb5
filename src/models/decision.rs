//! Match decision model.

use serde::{Deserialize, Serialize};

/// The reviewer's verdict on a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Friended,
    Passed,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Friended => "FRIENDED",
            Self::Passed => "PASSED",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single decision of a reviewer on a candidate.
///
/// Serializes to the match-decisions form body
/// (`userid`, `potentialMatchID`, `decision`). Sent once and never retried
/// automatically; a new click builds a new decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    #[serde(rename = "userid")]
    reviewer_id: String,

    #[serde(rename = "potentialMatchID")]
    candidate_id: String,

    #[serde(rename = "decision")]
    verdict: Verdict,
}

impl Decision {
    pub fn new(reviewer_id: impl Into<String>, candidate_id: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            reviewer_id: reviewer_id.into(),
            candidate_id: candidate_id.into(),
            verdict,
        }
    }

    pub fn reviewer_id(&self) -> &str {
        &self.reviewer_id
    }

    pub fn candidate_id(&self) -> &str {
        &self.candidate_id
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }
}
