//! Profile and matches page loading.

use crate::error::AppError;
use crate::models::carousel::ImageHandle;
use crate::models::page::{MatchCard, ProfilePhoto, ProfileView, PROFILE_PHOTO_SLOTS};
use crate::models::user::CandidateProfile;
use crate::services::backend::MatchBackend;
use crate::services::fetchers;
use crate::services::media;
use futures::future::join_all;

/// Load the acting user's own profile with its photo slots resolved.
///
/// Returns `Ok(None)` when the user does not exist yet.
pub async fn load_profile_view<B: MatchBackend + ?Sized>(
    backend: &B,
    user_id: &str,
) -> Result<Option<ProfileView>, AppError> {
    let profile = match fetchers::fetch_profile(backend, user_id).await? {
        Some(profile) => profile,
        None => {
            log::info!("[pages] No profile stored for {}", user_id);
            return Ok(None);
        }
    };

    let photos = join_all(PROFILE_PHOTO_SLOTS.iter().enumerate().map(|(slot, element_id)| {
        let key = profile.image_refs.get(slot).map(String::as_str).unwrap_or("");
        async move {
            let image = if key.is_empty() {
                None
            } else {
                Some(media::resolve_image(backend, Some(key)).await)
            };
            ProfilePhoto {
                element_id: *element_id,
                image,
            }
        }
    }))
    .await;

    Ok(Some(ProfileView {
        user_id: profile.id.clone(),
        name: profile.name.clone(),
        bio: profile.bio_text().to_string(),
        photos,
    }))
}

/// Load one card per matched user, in match order.
///
/// Users that no longer exist, or whose profile cannot be fetched, are left out.
pub async fn load_match_cards<B: MatchBackend + ?Sized>(
    backend: &B,
    user_id: &str,
) -> Result<Vec<MatchCard>, AppError> {
    let matches = backend.matches_list(user_id).await?;
    log::debug!("[pages] {} has {} matches", user_id, matches.len());

    let cards = join_all(matches.iter().map(|match_id| load_match_card(backend, match_id))).await;

    Ok(cards.into_iter().flatten().collect())
}

async fn load_match_card<B: MatchBackend + ?Sized>(backend: &B, user_id: &str) -> Option<MatchCard> {
    let profile = match fetchers::fetch_profile(backend, user_id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            log::warn!("[pages] Matched user {} was not found", user_id);
            return None;
        }
        Err(e) => {
            log::warn!("[pages] Failed to load matched user {}: {}", user_id, e);
            return None;
        }
    };

    let image = media::resolve_image(backend, profile.image_keys().next()).await;
    Some(match_card(profile, image))
}

fn match_card(profile: CandidateProfile, image: ImageHandle) -> MatchCard {
    MatchCard {
        user_id: profile.id,
        name: profile.name,
        bio: profile.bio.filter(|bio| !bio.is_empty()),
        profile_link: profile.profile_link.filter(|link| !link.is_empty()),
        image,
    }
}
