//! User profile models.

use serde::{Deserialize, Serialize};

/// Number of image slots a user profile carries.
pub const IMAGE_SLOTS: usize = 5;

/// User data as returned by the user-data endpoint.
///
/// The endpoint answers `null` for an unknown user; older deployments answer
/// `{"user-found": false}` instead, which is treated the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub bio: Option<String>,

    /// Image references, one per slot. Empty strings mark unset slots.
    #[serde(default)]
    pub blobkeys: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_link: Option<String>,

    #[serde(default, rename = "user-found", skip_serializing_if = "Option::is_none")]
    pub user_found: Option<bool>,
}

impl UserData {
    /// Whether this payload describes an existing user.
    pub fn is_found(&self) -> bool {
        self.user_found != Some(false)
    }

    /// Convert the payload into a profile for `user_id`.
    pub fn into_profile(self, user_id: impl Into<String>) -> CandidateProfile {
        let mut image_refs = self.blobkeys;
        image_refs.truncate(IMAGE_SLOTS);

        CandidateProfile {
            id: user_id.into(),
            name: self.name.unwrap_or_default(),
            bio: self.bio,
            image_refs,
            profile_link: self.profile_link,
        }
    }
}

/// Display attributes of a user, either a candidate under review or the reviewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub id: String,
    pub name: String,
    pub bio: Option<String>,
    /// Raw image slots in order, at most [`IMAGE_SLOTS`]; may contain empty entries.
    pub image_refs: Vec<String>,
    pub profile_link: Option<String>,
}

impl CandidateProfile {
    /// Image references that are set, in slot order.
    pub fn image_keys(&self) -> impl Iterator<Item = &str> {
        self.image_refs
            .iter()
            .map(String::as_str)
            .filter(|key| !key.is_empty())
    }

    /// Bio text, empty when unset.
    pub fn bio_text(&self) -> &str {
        self.bio.as_deref().unwrap_or("")
    }
}
