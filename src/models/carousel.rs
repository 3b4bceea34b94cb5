//! Declarative carousel display.
//!
//! The review renderer produces this structure; the templating layer turns
//! it into slide and indicator elements.

use serde::Serialize;

/// Image shown when a slot has no image or the image could not be fetched.
pub const PLACEHOLDER_IMAGE: &str = "images/noBlobStoreImage.jpg";

/// Image shown when the reviewer has no candidates left.
pub const NO_MATCHES_IMAGE: &str = "images/nomatches.png";

/// Element the indicators control.
pub const INDICATOR_TARGET: &str = "#feed";

/// A displayable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageHandle {
    Placeholder,
    NoMatches,
    /// Fetched image content, embedded as a data URI.
    Blob { content_type: String, data_uri: String },
}

impl ImageHandle {
    /// Value for the image element's `src` attribute.
    pub fn src(&self) -> &str {
        match self {
            Self::Placeholder => PLACEHOLDER_IMAGE,
            Self::NoMatches => NO_MATCHES_IMAGE,
            Self::Blob { data_uri, .. } => data_uri,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Caption rendered over a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Caption {
    pub name: String,
    /// Always present; empty when the user has no bio.
    pub bio: String,
    /// Only set when the mutual-connections fetch succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutual_connections: Option<u32>,
}

impl Caption {
    /// Text line for the mutual-connections count, if known.
    pub fn mutual_connections_text(&self) -> Option<String> {
        self.mutual_connections.map(|count| match count {
            1 => "1 mutual friend".to_string(),
            n => format!("{} mutual friends", n),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub image: ImageHandle,
    pub caption: Caption,
    pub active: bool,
}

/// Position marker for a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub target: &'static str,
    pub slide_to: usize,
    pub active: bool,
}

/// Slides and their indicators.
///
/// Both lists only grow together through [`CarouselDisplay::push_slide`], so
/// slide `i` always pairs with indicator `i` and exactly one pair is active
/// whenever the display is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CarouselDisplay {
    slides: Vec<Slide>,
    indicators: Vec<Indicator>,
}

impl CarouselDisplay {
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the active slide.
    pub fn active_index(&self) -> Option<usize> {
        self.slides.iter().position(|slide| slide.active)
    }

    /// Remove every slide and indicator. Safe on an empty display.
    pub(crate) fn clear(&mut self) {
        self.slides.clear();
        self.indicators.clear();
    }

    /// Append a slide and its indicator. The first pair becomes active.
    pub(crate) fn push_slide(&mut self, image: ImageHandle, caption: Caption) {
        let index = self.slides.len();
        let active = index == 0;

        self.slides.push(Slide {
            image,
            caption,
            active,
        });
        self.indicators.push(Indicator {
            target: INDICATOR_TARGET,
            slide_to: index,
            active,
        });
    }
}
