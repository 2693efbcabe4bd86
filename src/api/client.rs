use anyhow::{bail, Context, Result};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::models::{ChatOutcome, ChatRequest, ChatResponse, Message, MessagesResponse, SessionsResponse};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Thin wrapper over the four backend endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
    /// Base URL as configured, for messages shown to the user
    display: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let display = base_url.trim().trim_end_matches('/').to_string();
        let base = Url::parse(&display)
            .with_context(|| format!("Invalid backend URL `{}`", base_url))?;
        if base.cannot_be_a_base() {
            bail!("Backend URL `{}` cannot carry a path", base_url);
        }
        let client = Client::builder()
            .pool_max_idle_per_host(8)
            .build()?;
        Ok(Self { client, base, display })
    }

    pub fn base_url(&self) -> &str { &self.display }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub async fn check_health(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["health"]);
        debug!(%url, "health check");
        let resp = self.client.get(url).send().await.map_err(ApiError::Network)?;
        ensure_success(resp.status())
    }

    pub async fn list_sessions(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["sessions"]);
        debug!(%url, "listing sessions");
        let resp = self.client.get(url).send().await.map_err(ApiError::Network)?;
        let body: SessionsResponse = decode(resp).await?;
        Ok(body.sessions)
    }

    /// History of one session in server order. Unknown sessions yield an empty list.
    pub async fn get_messages(&self, session_id: &str) -> Result<Vec<Message>, ApiError> {
        let url = self.endpoint(&["sessions", session_id, "messages"]);
        debug!(%url, "fetching history");
        let resp = self.client.get(url).send().await.map_err(ApiError::Network)?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!(session_id, "no history yet");
            return Ok(Vec::new());
        }
        let body: MessagesResponse = decode(resp).await?;
        Ok(body.messages)
    }

    pub async fn post_chat(&self, session_id: &str, message: &str) -> Result<ChatOutcome, ApiError> {
        let url = self.endpoint(&["chat"]);
        debug!(%url, session_id, "posting chat message");
        let req = ChatRequest { message, session_id };
        let resp = self
            .client
            .post(url)
            .json(&req)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let body: ChatResponse = decode(resp).await?;
        Ok(body.into())
    }
}

fn ensure_success(status: StatusCode) -> Result<(), ApiError> {
    if status.is_success() { Ok(()) } else { Err(ApiError::Status(status)) }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    ensure_success(resp.status())?;
    resp.json().await.map_err(ApiError::Decode)
}
