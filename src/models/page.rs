//! Profile and matches page models.

use crate::models::carousel::ImageHandle;
use serde::Serialize;

/// Image elements of the profile page, one per image slot.
pub const PROFILE_PHOTO_SLOTS: [&str; 5] = [
    "profile-photo-image",
    "photo-2-image",
    "photo-3-image",
    "photo-4-image",
    "photo-5-image",
];

/// One photo slot on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePhoto {
    pub element_id: &'static str,
    /// `None` keeps the page's default image for an unset slot.
    pub image: Option<ImageHandle>,
}

/// The reviewer's own profile as shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub user_id: String,
    pub name: String,
    pub bio: String,
    pub photos: Vec<ProfilePhoto>,
}

/// A card on the matches page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchCard {
    pub user_id: String,
    pub name: String,
    /// Omitted from the card when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Target of the "See Profile" link, when the user shared one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_link: Option<String>,
    pub image: ImageHandle,
}
