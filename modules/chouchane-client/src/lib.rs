//! HTTP client for the Chouchane travel-assistant API.
//!
//! Thin wrapper around the remote contract: session lifecycle, the two
//! phase-specific chat endpoints, session hydration, the places listing and
//! the health probe. Non-2xx responses surface the body's `detail` string,
//! falling back to the HTTP status text when absent.

pub mod error;
pub mod types;

pub use error::{ChouchaneError, Result};
pub use types::{
    AssistantTurn, Health, HistoryEntry, Place, PlacesResponse, SessionSnapshot, TurnResponse,
};

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

pub struct ChouchaneClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChouchaneClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST /session/start — create a session and return the greeting turn.
    pub async fn start_session(&self) -> Result<TurnResponse> {
        self.post("/session/start", &serde_json::json!({})).await
    }

    /// POST /session/reset — reset an existing session back to the
    /// recommendation phase.
    pub async fn reset_session(&self, session_id: &str) -> Result<TurnResponse> {
        let body = serde_json::json!({ "session_id": session_id, "message": "" });
        self.post("/session/reset", &body).await
    }

    /// POST /yasmine — one recommendation-phase turn.
    pub async fn yasmine_turn(&self, session_id: &str, message: &str) -> Result<TurnResponse> {
        let body = serde_json::json!({ "session_id": session_id, "message": message });
        self.post("/yasmine", &body).await
    }

    /// POST /qa — one Q&A-phase turn.
    pub async fn qa_turn(&self, session_id: &str, message: &str) -> Result<TurnResponse> {
        let body = serde_json::json!({ "session_id": session_id, "message": message });
        self.post("/qa", &body).await
    }

    /// GET /session/:id — full session state for history rehydration.
    pub async fn fetch_session(&self, session_id: &str) -> Result<SessionSnapshot> {
        self.get(&format!("/session/{session_id}")).await
    }

    /// GET /places — all Tunisia places known to the assistant.
    pub async fn list_places(&self) -> Result<Vec<Place>> {
        let response: PlacesResponse = self.get("/places").await?;
        Ok(response.places)
    }

    /// GET /health.
    pub async fn health(&self) -> Result<Health> {
        self.get("/health").await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: &serde_json::Value) -> Result<T> {
        debug!(path, "chouchane POST");
        let resp = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "chouchane GET");
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ChouchaneError::Api {
                status: status.as_u16(),
                detail: extract_detail(&body, status),
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ChouchaneError::Protocol(e.to_string()))
    }
}

/// Pull the `detail` string out of an error body, falling back to the HTTP
/// status text when the body is not JSON or carries no detail.
fn extract_detail(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_taken_from_json_body() {
        let detail = extract_detail(
            r#"{"detail": "Session not found"}"#,
            reqwest::StatusCode::NOT_FOUND,
        );
        assert_eq!(detail, "Session not found");
    }

    #[test]
    fn detail_falls_back_to_status_text() {
        let detail = extract_detail("<html>oops</html>", reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(detail, "Bad Gateway");
    }

    #[test]
    fn missing_detail_field_falls_back_to_status_text() {
        let detail = extract_detail(r#"{"error": "x"}"#, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(detail, "Internal Server Error");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ChouchaneClient::new("http://localhost:8000/");
        assert_eq!(client.base_url, "http://localhost:8000");
    }
}
