//! Candidate, profile and mutual-connection fetches.

use crate::error::AppError;
use crate::models::candidate::NextCandidate;
use crate::models::user::CandidateProfile;
use crate::services::backend::MatchBackend;

/// Everything the renderer needs about one candidate besides images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDetails {
    /// `None` when the user was not found.
    pub profile: Option<CandidateProfile>,
    /// `None` when the mutual-connections fetch failed.
    pub mutual_connections: Option<u32>,
}

/// Ask the match service for the reviewer's next unreviewed candidate.
///
/// Callers serialize these calls through the review flow; nothing here
/// guards against overlapping requests.
pub async fn fetch_next_candidate<B: MatchBackend + ?Sized>(
    backend: &B,
    reviewer_id: &str,
) -> Result<NextCandidate, AppError> {
    let next = backend.next_potential_match(reviewer_id).await?;

    match &next {
        NextCandidate::Candidate(id) => {
            log::debug!("[fetch] Next candidate for {} is {}", reviewer_id, id)
        }
        NextCandidate::Exhausted => {
            log::info!("[fetch] No potential matches left for {}", reviewer_id)
        }
    }

    Ok(next)
}

/// Fetch a user's display attributes. `Ok(None)` means the user does not exist.
pub async fn fetch_profile<B: MatchBackend + ?Sized>(
    backend: &B,
    user_id: &str,
) -> Result<Option<CandidateProfile>, AppError> {
    let data = backend.user_data(user_id).await?;
    Ok(data.map(|data| data.into_profile(user_id)))
}

/// Count the connections two users share.
pub async fn fetch_mutual_connections<B: MatchBackend + ?Sized>(
    backend: &B,
    user_id_a: &str,
    user_id_b: &str,
) -> Result<u32, AppError> {
    backend.mutual_friends(user_id_a, user_id_b).await
}

/// Fetch profile and mutual connections for a candidate concurrently.
///
/// Completes only once both requests have resolved. A profile transport
/// failure is returned as an error; a mutual-connections failure only drops
/// the count.
pub async fn fetch_candidate_details<B: MatchBackend + ?Sized>(
    backend: &B,
    reviewer_id: &str,
    candidate_id: &str,
) -> Result<CandidateDetails, AppError> {
    let (profile, mutual) = futures::join!(
        fetch_profile(backend, candidate_id),
        fetch_mutual_connections(backend, reviewer_id, candidate_id),
    );

    let mutual_connections = match mutual {
        Ok(count) => Some(count),
        Err(e) => {
            log::warn!(
                "[fetch] Mutual connections unavailable for {} and {}: {}",
                reviewer_id,
                candidate_id,
                e
            );
            None
        }
    };

    Ok(CandidateDetails {
        profile: profile?,
        mutual_connections,
    })
}
