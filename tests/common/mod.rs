//! In-process stand-in for the match service.
//!
//! Serves the endpoints the client consumes from shared in-memory state so
//! tests can script responses and inspect what was sent.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Form, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use match_feed_lib::services::{ClientConfig, MatchApiClient};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockState {
    /// Candidate ids handed out per reviewer, in order.
    pub queues: HashMap<String, VecDeque<String>>,
    /// User records by id. Missing ids answer `null`.
    pub users: HashMap<String, Value>,
    /// Mutual connection ids by candidate id.
    pub mutual: HashMap<String, Vec<String>>,
    /// Image content type and bytes by key. Missing keys answer 404.
    pub blobs: HashMap<String, (String, Vec<u8>)>,
    pub matches: HashMap<String, Vec<String>>,
    /// Number of upcoming decision posts to reject with a 500.
    pub failing_decisions: usize,
    /// Form bodies of accepted and rejected decision posts.
    pub decisions: Vec<HashMap<String, String>>,
    /// Request log as `path?query` strings.
    pub requests: Vec<String>,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
}

impl MockServer {
    pub async fn start(state: MockState) -> Self {
        let state = Arc::new(Mutex::new(state));

        let app = Router::new()
            .route("/potential-matches", get(potential_matches))
            .route("/user-data", get(user_data))
            .route("/mutual-friends", get(mutual_friends))
            .route("/blob-key", get(blob_key))
            .route("/match-decisions", post(match_decisions))
            .route("/matches-list", get(matches_list))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn client(&self) -> MatchApiClient {
        MatchApiClient::new(ClientConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .requests
            .iter()
            .filter(|r| r.split('?').next() == Some(path))
            .count()
    }

    pub fn decisions(&self) -> Vec<HashMap<String, String>> {
        self.state.lock().unwrap().decisions.clone()
    }
}

pub fn user(name: &str, bio: &str, blobkeys: &[&str]) -> Value {
    serde_json::json!({
        "name": name,
        "bio": bio,
        "blobkeys": blobkeys,
        "profileLink": format!("https://example.com/{}", name.to_lowercase()),
    })
}

fn log_request(state: &Shared, path: &str, params: &HashMap<String, String>) {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
    pairs.sort();
    state
        .lock()
        .unwrap()
        .requests
        .push(format!("{}?{}", path, pairs.join("&")));
}

fn param<'a>(params: &'a HashMap<String, String>, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or("")
}

async fn potential_matches(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    log_request(&state, "/potential-matches", &params);

    let next = state
        .lock()
        .unwrap()
        .queues
        .get_mut(param(&params, "userid"))
        .and_then(VecDeque::pop_front)
        .unwrap_or_else(|| "NO_POTENTIAL_MATCHES".to_string());

    Json(serde_json::json!({ "nextPotentialMatchID": next }))
}

async fn user_data(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    log_request(&state, "/user-data", &params);

    let user = state
        .lock()
        .unwrap()
        .users
        .get(param(&params, "id"))
        .cloned()
        .unwrap_or(Value::Null);

    Json(user)
}

async fn mutual_friends(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<String>> {
    log_request(&state, "/mutual-friends", &params);

    let friends = state
        .lock()
        .unwrap()
        .mutual
        .get(param(&params, "userid2"))
        .cloned()
        .unwrap_or_default();

    Json(friends)
}

async fn blob_key(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    log_request(&state, "/blob-key", &params);

    let blob = state
        .lock()
        .unwrap()
        .blobs
        .get(param(&params, "imageKey"))
        .cloned();

    match blob {
        Some((content_type, data)) => {
            ([(header::CONTENT_TYPE, content_type)], Bytes::from(data)).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn match_decisions(
    State(state): State<Shared>,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push("/match-decisions".to_string());
    state.decisions.push(form);

    if state.failing_decisions > 0 {
        state.failing_decisions -= 1;
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "datastore unavailable" })),
        )
            .into_response();
    }

    StatusCode::OK.into_response()
}

async fn matches_list(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<String>> {
    log_request(&state, "/matches-list", &params);

    let matches = state
        .lock()
        .unwrap()
        .matches
        .get(param(&params, "id"))
        .cloned()
        .unwrap_or_default();

    Json(matches)
}
