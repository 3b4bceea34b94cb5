//! Match service contract.
//!
//! The review flow talks to the match service only through this trait, so the
//! state machine can run against the HTTP client or an in-memory stand-in.

use crate::error::AppError;
use crate::models::candidate::NextCandidate;
use crate::models::decision::Decision;
use crate::models::user::UserData;
use async_trait::async_trait;

/// Binary image content fetched by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Endpoints of the match service.
#[async_trait]
pub trait MatchBackend: Send + Sync {
    /// `GET /potential-matches?userid=`
    async fn next_potential_match(&self, user_id: &str) -> Result<NextCandidate, AppError>;

    /// `GET /user-data?id=`; `None` when the user does not exist.
    async fn user_data(&self, user_id: &str) -> Result<Option<UserData>, AppError>;

    /// `GET /mutual-friends?userid1=&userid2=`
    async fn mutual_friends(&self, user_id_a: &str, user_id_b: &str) -> Result<u32, AppError>;

    /// `GET /blob-key?imageKey=`
    async fn image_blob(&self, image_key: &str) -> Result<ImageBlob, AppError>;

    /// `POST /match-decisions`
    async fn submit_decision(&self, decision: &Decision) -> Result<(), AppError>;

    /// `GET /matches-list?id=`
    async fn matches_list(&self, user_id: &str) -> Result<Vec<String>, AppError>;
}
