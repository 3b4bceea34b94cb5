//! Review carousel renderer.
//!
//! Composes a fetched candidate into slides and indicators. Produces a
//! declarative [`CarouselDisplay`]; turning it into page elements is left to
//! the templating layer.

use crate::models::carousel::{CarouselDisplay, Caption, ImageHandle};
use crate::models::user::CandidateProfile;

#[derive(Debug, Default)]
pub struct CarouselRenderer {
    display: CarouselDisplay,
}

impl CarouselRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &CarouselDisplay {
        &self.display
    }

    /// Remove all slides and indicators.
    pub fn clear(&mut self) {
        self.display.clear();
    }

    /// Render a candidate.
    ///
    /// `images` holds one resolved handle per non-empty image reference, in
    /// slot order. Without any image a single placeholder slide with an empty
    /// caption is shown.
    pub fn render(
        &mut self,
        profile: &CandidateProfile,
        images: Vec<ImageHandle>,
        mutual_connections: Option<u32>,
    ) {
        self.clear();

        if images.is_empty() {
            self.display
                .push_slide(ImageHandle::Placeholder, Caption::default());
            return;
        }

        let caption = Caption {
            name: profile.name.clone(),
            bio: profile.bio_text().to_string(),
            mutual_connections,
        };
        for image in images {
            self.display.push_slide(image, caption.clone());
        }
    }

    /// Render the "no more candidates" slide.
    pub fn render_exhausted(&mut self) {
        self.clear();
        self.display
            .push_slide(ImageHandle::NoMatches, Caption::default());
    }
}
