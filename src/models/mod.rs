//! Data models for the application.
//!
//! These models represent the match service payloads, the review session and
//! the declarative displays handed to the templating layer.
//!
//! Display models derive Serialize so they can be emitted as JSON.

pub mod candidate;
pub mod carousel;
pub mod decision;
pub mod page;
pub mod session;
pub mod user;

// Re-exports for convenient access
pub use candidate::{NextCandidate, NO_POTENTIAL_MATCHES};
pub use carousel::{CarouselDisplay, Caption, ImageHandle, Indicator, Slide};
pub use decision::{Decision, Verdict};
pub use page::{MatchCard, ProfilePhoto, ProfileView};
pub use session::{CurrentCandidate, ReviewSession, ReviewState};
pub use user::{CandidateProfile, UserData};
