//! Potential-match review flow.
//!
//! Drives one reviewer through their candidates: fetch the next candidate,
//! render it, record the reviewer's decision, move on.
//!
//! ```text
//! Idle --real id--> Displaying --decision ok--> Idle
//!  |                    ^  |
//!  |                    +--+ decision failed
//!  +--sentinel--> Exhausted (terminal)
//! ```
//!
//! The session is moved into every transition and handed back in the
//! resulting [`ReviewStep`], so a second transition cannot start on a
//! session while another one is still awaiting the match service.

use crate::error::AppError;
use crate::models::candidate::NextCandidate;
use crate::models::carousel::CarouselDisplay;
use crate::models::decision::{Decision, Verdict};
use crate::models::session::{CurrentCandidate, ReviewSession, ReviewState};
use crate::services::backend::MatchBackend;
use crate::services::fetchers;
use crate::services::media;
use crate::services::renderer::CarouselRenderer;

/// Session after a transition, with the transition's outcome.
///
/// On error the session is in the state it had before the failed request,
/// with its controls re-enabled so the reviewer can retry.
#[derive(Debug)]
pub struct ReviewStep {
    pub session: ReviewSession,
    pub outcome: Result<(), AppError>,
}

impl ReviewStep {
    fn ok(session: ReviewSession) -> Self {
        Self {
            session,
            outcome: Ok(()),
        }
    }

    fn failed(session: ReviewSession, error: AppError) -> Self {
        Self {
            session,
            outcome: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Review loop over a match service.
pub struct ReviewFlow<B> {
    backend: B,
    renderer: CarouselRenderer,
}

impl<B: MatchBackend> ReviewFlow<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            renderer: CarouselRenderer::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// What the carousel currently shows.
    pub fn display(&self) -> &CarouselDisplay {
        self.renderer.display()
    }

    /// Open a session for `reviewer_id` and load its first candidate.
    pub async fn start(&mut self, reviewer_id: impl Into<String>) -> ReviewStep {
        let session = ReviewSession::new(reviewer_id);
        log::info!("[review] Starting review session for {}", session.reviewer_id());
        self.advance(session).await
    }

    /// Fetch and display the next candidate of an idle session.
    ///
    /// Exhausted sessions are left alone. A session still displaying a
    /// candidate must record a decision first.
    pub async fn advance(&mut self, mut session: ReviewSession) -> ReviewStep {
        if session.is_exhausted() {
            return ReviewStep::ok(session);
        }
        if let Some(candidate_id) = session.current_candidate().map(|c| c.id.clone()) {
            return ReviewStep::failed(
                session,
                AppError::invalid_state(format!(
                    "candidate {} is awaiting a decision",
                    candidate_id
                )),
            );
        }

        self.renderer.clear();
        let outcome = {
            let mut guard = session.begin_pending();
            self.load_next(&mut guard).await
        };

        if let Err(e) = &outcome {
            log::warn!(
                "[review] Failed to load next candidate for {}: {}",
                session.reviewer_id(),
                e
            );
        }

        ReviewStep { session, outcome }
    }

    /// Record the reviewer's verdict on the displayed candidate, then advance.
    ///
    /// The next candidate is only requested once the submission has
    /// resolved successfully. A failed submission leaves the candidate
    /// displayed; submitting again is a new attempt.
    pub async fn submit(&mut self, mut session: ReviewSession, verdict: Verdict) -> ReviewStep {
        let candidate_id = match session.current_candidate().map(|c| c.id.clone()) {
            Some(id) => id,
            None => {
                return ReviewStep::failed(
                    session,
                    AppError::invalid_state("no candidate is displayed"),
                )
            }
        };
        let decision = Decision::new(session.reviewer_id(), candidate_id, verdict);

        let submitted = {
            let _guard = session.begin_pending();
            self.backend.submit_decision(&decision).await
        };

        if let Err(e) = submitted {
            log::warn!(
                "[review] Decision {} on {} was not recorded: {}",
                verdict,
                decision.candidate_id(),
                e
            );
            return ReviewStep::failed(session, e);
        }

        log::info!(
            "[review] {} marked {} as {}",
            decision.reviewer_id(),
            decision.candidate_id(),
            verdict
        );

        session.set_state(ReviewState::Idle);
        self.advance(session).await
    }

    /// Retry loading the displayed candidate's profile, connections and images.
    pub async fn reload_current(&mut self, mut session: ReviewSession) -> ReviewStep {
        if session.current_candidate().is_none() {
            return ReviewStep::failed(session, AppError::invalid_state("no candidate is displayed"));
        }

        self.renderer.clear();
        let outcome = {
            let mut guard = session.begin_pending();
            self.load_candidate(&mut guard).await
        };

        ReviewStep { session, outcome }
    }

    async fn load_next(&mut self, session: &mut ReviewSession) -> Result<(), AppError> {
        let reviewer_id = session.reviewer_id().to_string();

        match fetchers::fetch_next_candidate(&self.backend, &reviewer_id).await? {
            NextCandidate::Exhausted => {
                session.set_state(ReviewState::Exhausted);
                self.renderer.render_exhausted();
                Ok(())
            }
            NextCandidate::Candidate(candidate_id) => {
                log::info!("[review] Showing {} to {}", candidate_id, reviewer_id);
                session.set_state(ReviewState::Displaying(CurrentCandidate::new(candidate_id)));
                self.load_candidate(session).await
            }
        }
    }

    async fn load_candidate(&mut self, session: &mut ReviewSession) -> Result<(), AppError> {
        let reviewer_id = session.reviewer_id().to_string();
        let candidate_id = match session.current_candidate() {
            Some(candidate) => candidate.id.clone(),
            None => return Ok(()),
        };

        let details =
            fetchers::fetch_candidate_details(&self.backend, &reviewer_id, &candidate_id).await?;

        let profile = match details.profile {
            Some(profile) => profile,
            None => {
                // Nothing to show, but the reviewer can still decide on the candidate
                log::warn!("[review] Candidate {} was not found, skipping render", candidate_id);
                return Ok(());
            }
        };

        let images = media::resolve_images(&self.backend, &profile.image_refs).await;
        self.renderer
            .render(&profile, images, details.mutual_connections);

        if let Some(current) = session.current_candidate_mut() {
            current.profile = Some(profile);
            current.mutual_connections = details.mutual_connections;
        }

        Ok(())
    }
}
