//! Match Feed - potential-match review client.
//!
//! Resolves the acting user from the page location, walks them through
//! their potential matches one candidate at a time, and loads the profile
//! and matches pages from the match service.

pub mod error;
pub mod models;
pub mod services;

pub use error::AppError;
pub use services::{MatchApiClient, ReviewFlow};
