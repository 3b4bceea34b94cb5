//! Match service API client.
//!
//! Provides the HTTP client for the match service endpoints consumed by the
//! review, profile and matches pages.

use crate::error::AppError;
use crate::models::candidate::NextCandidate;
use crate::models::decision::Decision;
use crate::models::user::UserData;
use crate::services::backend::{ImageBlob, MatchBackend};
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub const POTENTIAL_MATCHES_ENDPOINT: &str = "/potential-matches";
pub const USER_DATA_ENDPOINT: &str = "/user-data";
pub const MUTUAL_FRIENDS_ENDPOINT: &str = "/mutual-friends";
pub const BLOB_KEY_ENDPOINT: &str = "/blob-key";
pub const MATCH_DECISIONS_ENDPOINT: &str = "/match-decisions";
pub const MATCHES_LIST_ENDPOINT: &str = "/matches-list";

/// Content type assumed when the image endpoint does not send one.
const DEFAULT_IMAGE_CONTENT_TYPE: &str = "image/png";

/// Match service client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the match service (e.g., `http://localhost:8080`).
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Check that the configuration can address the match service.
    pub fn validate(&self) -> Result<(), AppError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(AppError::invalid_input_field(
                "Base URL must not be empty",
                "base_url",
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::invalid_input_field(
                format!("Base URL must start with http:// or https://, got '{}'", base_url),
                "base_url",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::invalid_input_field(
                "Timeout must be at least one second",
                "timeout_secs",
            ));
        }
        Ok(())
    }
}

/// Match service API client.
#[derive(Debug, Clone)]
pub struct MatchApiClient {
    client: Client,
    config: ClientConfig,
}

/// JSON body of the potential-matches endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextPotentialMatchResponse {
    #[serde(rename = "nextPotentialMatchID")]
    pub next_potential_match_id: String,
}

/// Body of the mutual-friends endpoint: a bare count or the shared connection ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MutualFriendsResponse {
    Count(u32),
    Friends(Vec<String>),
}

impl MutualFriendsResponse {
    pub fn count(&self) -> u32 {
        match self {
            Self::Count(count) => *count,
            Self::Friends(ids) => u32::try_from(ids.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Parse the potential-matches body.
///
/// Accepts `{"nextPotentialMatchID": ".."}`, a JSON string, or plain text with
/// at most one trailing line terminator.
pub fn parse_next_candidate(body: &str) -> Result<NextCandidate, String> {
    let trimmed = body.trim_start();

    let id = if trimmed.starts_with('{') {
        serde_json::from_str::<NextPotentialMatchResponse>(body)
            .map_err(|e| format!("unexpected JSON body: {}", e))?
            .next_potential_match_id
    } else if trimmed.starts_with('"') {
        serde_json::from_str::<String>(body).map_err(|e| format!("unexpected JSON string: {}", e))?
    } else {
        strip_line_terminator(body).to_string()
    };

    NextCandidate::from_id(&id).ok_or_else(|| "empty candidate id".to_string())
}

fn strip_line_terminator(body: &str) -> &str {
    body.strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body)
}

/// Extract a readable message from an error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .map(|m| match m.as_str() {
                    Some(s) => s.to_string(),
                    None => m.to_string(),
                })
        })
}

impl MatchApiClient {
    /// Create a new match service client.
    pub fn new(config: ClientConfig) -> Result<Self, AppError> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json, text/plain, */*"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the full URL for an endpoint path.
    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim().trim_end_matches('/'), path)
    }

    /// Turn a non-success status into an API error.
    async fn check_status(
        response: Response,
        endpoint: &str,
        action: &str,
    ) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body).unwrap_or_else(|| format!("Failed to {}", action));

        Err(AppError::api_full(message, status.as_u16(), endpoint))
    }

    /// Read a JSON body. Read failures are network errors, parse failures malformed responses.
    async fn read_json<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T, AppError> {
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::malformed(format!("Failed to parse response: {}", e), endpoint))
    }
}

#[async_trait]
impl MatchBackend for MatchApiClient {
    async fn next_potential_match(&self, user_id: &str) -> Result<NextCandidate, AppError> {
        log::debug!("[api] GET {} for {}", POTENTIAL_MATCHES_ENDPOINT, user_id);

        let response = self
            .client
            .get(self.endpoint_url(POTENTIAL_MATCHES_ENDPOINT))
            .query(&[("userid", user_id)])
            .send()
            .await?;
        let response =
            Self::check_status(response, POTENTIAL_MATCHES_ENDPOINT, "fetch next potential match")
                .await?;

        let body = response.text().await?;
        parse_next_candidate(&body)
            .map_err(|message| AppError::malformed(message, POTENTIAL_MATCHES_ENDPOINT))
    }

    async fn user_data(&self, user_id: &str) -> Result<Option<UserData>, AppError> {
        log::debug!("[api] GET {} for {}", USER_DATA_ENDPOINT, user_id);

        let response = self
            .client
            .get(self.endpoint_url(USER_DATA_ENDPOINT))
            .query(&[("id", user_id)])
            .send()
            .await?;
        let response = Self::check_status(response, USER_DATA_ENDPOINT, "fetch user data").await?;

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let data: Option<UserData> = serde_json::from_str(&body).map_err(|e| {
            AppError::malformed(format!("Failed to parse user data: {}", e), USER_DATA_ENDPOINT)
        })?;

        Ok(data.filter(UserData::is_found))
    }

    async fn mutual_friends(&self, user_id_a: &str, user_id_b: &str) -> Result<u32, AppError> {
        log::debug!(
            "[api] GET {} for {} and {}",
            MUTUAL_FRIENDS_ENDPOINT,
            user_id_a,
            user_id_b
        );

        let response = self
            .client
            .get(self.endpoint_url(MUTUAL_FRIENDS_ENDPOINT))
            .query(&[("userid1", user_id_a), ("userid2", user_id_b)])
            .send()
            .await?;
        let response =
            Self::check_status(response, MUTUAL_FRIENDS_ENDPOINT, "fetch mutual friends").await?;

        let mutual: MutualFriendsResponse =
            Self::read_json(response, MUTUAL_FRIENDS_ENDPOINT).await?;
        Ok(mutual.count())
    }

    async fn image_blob(&self, image_key: &str) -> Result<ImageBlob, AppError> {
        log::debug!("[api] GET {} for {}", BLOB_KEY_ENDPOINT, image_key);

        let response = self
            .client
            .get(self.endpoint_url(BLOB_KEY_ENDPOINT))
            .query(&[("imageKey", image_key)])
            .send()
            .await?;
        let response = Self::check_status(response, BLOB_KEY_ENDPOINT, "fetch image").await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_IMAGE_CONTENT_TYPE)
            .to_string();

        let data = response
            .bytes()
            .await
            .map_err(|e| AppError::network(format!("Failed to read image data: {}", e)))?;

        Ok(ImageBlob {
            content_type,
            data: data.to_vec(),
        })
    }

    async fn submit_decision(&self, decision: &Decision) -> Result<(), AppError> {
        log::debug!(
            "[api] POST {} {} -> {}",
            MATCH_DECISIONS_ENDPOINT,
            decision.candidate_id(),
            decision.verdict()
        );

        let response = self
            .client
            .post(self.endpoint_url(MATCH_DECISIONS_ENDPOINT))
            .form(decision)
            .send()
            .await?;
        Self::check_status(response, MATCH_DECISIONS_ENDPOINT, "submit match decision").await?;

        Ok(())
    }

    async fn matches_list(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        log::debug!("[api] GET {} for {}", MATCHES_LIST_ENDPOINT, user_id);

        let response = self
            .client
            .get(self.endpoint_url(MATCHES_LIST_ENDPOINT))
            .query(&[("id", user_id)])
            .send()
            .await?;
        let response =
            Self::check_status(response, MATCHES_LIST_ENDPOINT, "fetch matches list").await?;

        Self::read_json(response, MATCHES_LIST_ENDPOINT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_construction() {
        let client = MatchApiClient::new(ClientConfig {
            base_url: "https://match.example.com/".to_string(),
            timeout_secs: 30,
        })
        .unwrap();

        assert_eq!(
            client.endpoint_url(POTENTIAL_MATCHES_ENDPOINT),
            "https://match.example.com/potential-matches"
        );
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::default().validate().is_ok());

        let empty = ClientConfig {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(AppError::InvalidInput { field: Some(ref f), .. }) if f == "base_url"
        ));

        let no_scheme = ClientConfig {
            base_url: "match.example.com".to_string(),
            ..Default::default()
        };
        assert!(no_scheme.validate().is_err());

        let zero_timeout = ClientConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_timeout.validate(),
            Err(AppError::InvalidInput { field: Some(ref f), .. }) if f == "timeout_secs"
        ));
    }

    #[test]
    fn test_parse_next_candidate_json() {
        let next = parse_next_candidate(r#"{"nextPotentialMatchID":"u2"}"#).unwrap();
        assert_eq!(next, NextCandidate::Candidate("u2".to_string()));

        let exhausted =
            parse_next_candidate(r#"{"nextPotentialMatchID":"NO_POTENTIAL_MATCHES"}"#).unwrap();
        assert_eq!(exhausted, NextCandidate::Exhausted);
    }

    #[test]
    fn test_parse_next_candidate_plain_text() {
        assert_eq!(
            parse_next_candidate("NO_POTENTIAL_MATCHES\n").unwrap(),
            NextCandidate::Exhausted
        );
        assert_eq!(
            parse_next_candidate("\"u7\"").unwrap(),
            NextCandidate::Candidate("u7".to_string())
        );
        assert_eq!(
            parse_next_candidate("u3\r\n").unwrap(),
            NextCandidate::Candidate("u3".to_string())
        );
    }

    #[test]
    fn test_parse_next_candidate_rejects_bad_bodies() {
        assert!(parse_next_candidate("").is_err());
        assert!(parse_next_candidate(r#"{"nextPotentialMatchID":""}"#).is_err());
        assert!(parse_next_candidate(r#"{"somethingElse":"u2"}"#).is_err());
    }

    #[test]
    fn test_mutual_friends_response_shapes() {
        let list: MutualFriendsResponse = serde_json::from_str(r#"["a","b","c"]"#).unwrap();
        assert_eq!(list.count(), 3);

        let count: MutualFriendsResponse = serde_json::from_str("4").unwrap();
        assert_eq!(count.count(), 4);

        let empty: MutualFriendsResponse = serde_json::from_str("[]").unwrap();
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"message":"user missing"}"#).as_deref(),
            Some("user missing")
        );
        assert_eq!(error_message(r#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(error_message("<html>500</html>"), None);
    }
}
