//! Recording in-memory match service for unit tests.

use crate::error::AppError;
use crate::models::candidate::NextCandidate;
use crate::models::decision::Decision;
use crate::models::user::UserData;
use crate::services::backend::{ImageBlob, MatchBackend};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct FakeBackend {
    queue: Mutex<VecDeque<String>>,
    users: HashMap<String, UserData>,
    mutual: HashMap<String, u32>,
    blobs: HashMap<String, ImageBlob>,
    matches: HashMap<String, Vec<String>>,
    failing_profiles: Vec<String>,
    fail_next_fetches: Mutex<usize>,
    fail_next_decisions: Mutex<usize>,
    fail_mutual: bool,
    calls: Mutex<Vec<String>>,
    decisions: Mutex<Vec<Decision>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw ids handed out by the potential-matches endpoint, in order.
    /// Once drained the sentinel is returned.
    pub fn with_queue(self, ids: &[&str]) -> Self {
        *self.queue.lock().unwrap() = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_user(mut self, id: &str, name: &str, bio: Option<&str>, blobkeys: &[&str]) -> Self {
        self.users.insert(
            id.to_string(),
            UserData {
                name: Some(name.to_string()),
                bio: bio.map(str::to_string),
                blobkeys: blobkeys.iter().map(|k| k.to_string()).collect(),
                ..Default::default()
            },
        );
        self
    }

    pub fn with_user_data(mut self, id: &str, data: UserData) -> Self {
        self.users.insert(id.to_string(), data);
        self
    }

    /// Mutual-connection count between the reviewer and `candidate_id`.
    pub fn with_mutual(mut self, candidate_id: &str, count: u32) -> Self {
        self.mutual.insert(candidate_id.to_string(), count);
        self
    }

    pub fn with_blob(mut self, key: &str, content_type: &str, data: &[u8]) -> Self {
        self.blobs.insert(
            key.to_string(),
            ImageBlob {
                content_type: content_type.to_string(),
                data: data.to_vec(),
            },
        );
        self
    }

    pub fn with_matches(mut self, user_id: &str, ids: &[&str]) -> Self {
        self.matches
            .insert(user_id.to_string(), ids.iter().map(|id| id.to_string()).collect());
        self
    }

    pub fn with_failing_profile(mut self, user_id: &str) -> Self {
        self.failing_profiles.push(user_id.to_string());
        self
    }

    pub fn failing_mutual(mut self) -> Self {
        self.fail_mutual = true;
        self
    }

    pub fn fail_next_fetches(&self, count: usize) {
        *self.fail_next_fetches.lock().unwrap() = count;
    }

    pub fn fail_next_decisions(&self, count: usize) {
        *self.fail_next_decisions.lock().unwrap() = count;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.split(':').next() == Some(endpoint))
            .count()
    }

    pub fn decisions(&self) -> Vec<Decision> {
        self.decisions.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn take_failure(counter: &Mutex<usize>) -> bool {
        let mut remaining = counter.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl MatchBackend for FakeBackend {
    async fn next_potential_match(&self, user_id: &str) -> Result<NextCandidate, AppError> {
        self.record(format!("next_potential_match:{}", user_id));
        if Self::take_failure(&self.fail_next_fetches) {
            return Err(AppError::network("Failed to connect to server"));
        }

        let id = self
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "NO_POTENTIAL_MATCHES".to_string());
        NextCandidate::from_id(&id)
            .ok_or_else(|| AppError::malformed("empty candidate id", "/potential-matches"))
    }

    async fn user_data(&self, user_id: &str) -> Result<Option<UserData>, AppError> {
        self.record(format!("user_data:{}", user_id));
        if self.failing_profiles.iter().any(|id| id == user_id) {
            return Err(AppError::api_full("Failed to fetch user data", 500, "/user-data"));
        }
        Ok(self.users.get(user_id).cloned().filter(UserData::is_found))
    }

    async fn mutual_friends(&self, user_id_a: &str, user_id_b: &str) -> Result<u32, AppError> {
        self.record(format!("mutual_friends:{}:{}", user_id_a, user_id_b));
        if self.fail_mutual {
            return Err(AppError::network("Request timed out"));
        }
        Ok(self.mutual.get(user_id_b).copied().unwrap_or(0))
    }

    async fn image_blob(&self, image_key: &str) -> Result<ImageBlob, AppError> {
        self.record(format!("image_blob:{}", image_key));
        self.blobs
            .get(image_key)
            .cloned()
            .ok_or_else(|| AppError::api_full("Failed to fetch image", 404, "/blob-key"))
    }

    async fn submit_decision(&self, decision: &Decision) -> Result<(), AppError> {
        self.record(format!(
            "submit_decision:{}:{}:{}",
            decision.reviewer_id(),
            decision.candidate_id(),
            decision.verdict()
        ));
        if Self::take_failure(&self.fail_next_decisions) {
            return Err(AppError::api_full(
                "Failed to submit match decision",
                503,
                "/match-decisions",
            ));
        }
        self.decisions.lock().unwrap().push(decision.clone());
        Ok(())
    }

    async fn matches_list(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        self.record(format!("matches_list:{}", user_id));
        Ok(self.matches.get(user_id).cloned().unwrap_or_default())
    }
}
