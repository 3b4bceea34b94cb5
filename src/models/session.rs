//! Review session state.

use crate::models::user::CandidateProfile;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

/// The candidate currently offered for a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentCandidate {
    pub id: String,
    /// `None` when the profile was not found or could not be loaded.
    pub profile: Option<CandidateProfile>,
    pub mutual_connections: Option<u32>,
}

impl CurrentCandidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            profile: None,
            mutual_connections: None,
        }
    }
}

/// Where a review session is in the review loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ReviewState {
    /// No candidate; a fetch is due.
    Idle,
    /// Exactly one candidate awaits a decision.
    Displaying(CurrentCandidate),
    /// The candidate pool is exhausted. Terminal for the session.
    Exhausted,
}

/// Review session for one reviewer, alive for the duration of the match page.
///
/// Decision controls are enabled iff a candidate is displayed and no request
/// is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSession {
    reviewer_id: String,
    state: ReviewState,
    pending: bool,
}

impl ReviewSession {
    pub fn new(reviewer_id: impl Into<String>) -> Self {
        Self {
            reviewer_id: reviewer_id.into(),
            state: ReviewState::Idle,
            pending: false,
        }
    }

    pub fn reviewer_id(&self) -> &str {
        &self.reviewer_id
    }

    pub fn state(&self) -> &ReviewState {
        &self.state
    }

    pub fn current_candidate(&self) -> Option<&CurrentCandidate> {
        match &self.state {
            ReviewState::Displaying(candidate) => Some(candidate),
            _ => None,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, ReviewState::Exhausted)
    }

    /// Whether a request started by this session has not resolved yet.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether the accept and reject controls are usable.
    pub fn controls_enabled(&self) -> bool {
        !self.pending && self.current_candidate().is_some()
    }

    pub(crate) fn set_state(&mut self, state: ReviewState) {
        self.state = state;
    }

    pub(crate) fn current_candidate_mut(&mut self) -> Option<&mut CurrentCandidate> {
        match &mut self.state {
            ReviewState::Displaying(candidate) => Some(candidate),
            _ => None,
        }
    }

    /// Disable the decision controls until the returned guard is dropped.
    pub(crate) fn begin_pending(&mut self) -> PendingGuard<'_> {
        self.pending = true;
        PendingGuard { session: self }
    }
}

/// Scoped control disable around an asynchronous request.
///
/// Dropping the guard re-enables the controls on every exit path.
pub(crate) struct PendingGuard<'a> {
    session: &'a mut ReviewSession,
}

impl Deref for PendingGuard<'_> {
    type Target = ReviewSession;

    fn deref(&self) -> &ReviewSession {
        self.session
    }
}

impl DerefMut for PendingGuard<'_> {
    fn deref_mut(&mut self) -> &mut ReviewSession {
        self.session
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.session.pending = false;
    }
}
