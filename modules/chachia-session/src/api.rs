//! Remote-service seam.
//!
//! The controller talks to the Chouchane backend only through this trait,
//! so tests run against an in-memory mock instead of a live server.

use async_trait::async_trait;
use chouchane_client::{ChouchaneClient, Result, SessionSnapshot, TurnResponse};

#[async_trait]
pub trait ChouchaneApi: Send + Sync {
    async fn start_session(&self) -> Result<TurnResponse>;
    async fn reset_session(&self, session_id: &str) -> Result<TurnResponse>;
    async fn yasmine_turn(&self, session_id: &str, message: &str) -> Result<TurnResponse>;
    async fn qa_turn(&self, session_id: &str, message: &str) -> Result<TurnResponse>;
    async fn fetch_session(&self, session_id: &str) -> Result<SessionSnapshot>;
}

#[async_trait]
impl ChouchaneApi for ChouchaneClient {
    async fn start_session(&self) -> Result<TurnResponse> {
        ChouchaneClient::start_session(self).await
    }

    async fn reset_session(&self, session_id: &str) -> Result<TurnResponse> {
        ChouchaneClient::reset_session(self, session_id).await
    }

    async fn yasmine_turn(&self, session_id: &str, message: &str) -> Result<TurnResponse> {
        ChouchaneClient::yasmine_turn(self, session_id, message).await
    }

    async fn qa_turn(&self, session_id: &str, message: &str) -> Result<TurnResponse> {
        ChouchaneClient::qa_turn(self, session_id, message).await
    }

    async fn fetch_session(&self, session_id: &str) -> Result<SessionSnapshot> {
        ChouchaneClient::fetch_session(self, session_id).await
    }
}
