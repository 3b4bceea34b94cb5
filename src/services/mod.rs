//! Business logic services.
//!
//! This module contains the review state machine, the fetches it is built
//! from, and the HTTP client for the match service.
//!
//! Services only reach the network through [`backend::MatchBackend`], so they
//! can be exercised without a running match service.

pub mod backend;
pub mod fetchers;
pub mod identity;
pub mod match_api;
pub mod media;
pub mod pages;
pub mod renderer;
pub mod review;

#[cfg(test)]
pub(crate) mod test_support;

pub use backend::MatchBackend;
pub use match_api::{ClientConfig, MatchApiClient};
pub use review::{ReviewFlow, ReviewStep};
