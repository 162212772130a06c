use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::models::{Routine, Tag, TrainingDay, UserStatus};
use crate::session::Session;

mod error;

pub use error::ApiError;

/// Routine payload returned by both routine endpoints
#[derive(Debug, Deserialize)]
pub struct RoutineResponse {
    #[serde(default)]
    pub routine_name: Option<String>,
}

/// Tag creation request payload
#[derive(Debug, Serialize)]
pub struct CreateTagRequest<'a> {
    pub user_id: &'a str,
    pub day: TrainingDay,
    pub routine: &'a str,
}

/// Tag creation response from API
#[derive(Debug, Default, Deserialize)]
pub struct CreateTagResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl CreateTagResponse {
    /// Backend confirmation text, if it sent a non-empty one
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Onboarding flag update payload
#[derive(Debug, Serialize)]
pub struct FirstLoginUpdate {
    pub first_login: bool,
}

/// API client for the FitTag backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(
            &config.api.base_url,
            Duration::from_secs(config.api.timeout_seconds),
        )
    }

    /// Create a client for an explicit base URL
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the session's bearer token and JSON content type
    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder
            .header("Authorization", session.bearer())
            .header("Content-Type", "application/json")
    }

    /// Send a request, mapping non-2xx responses to `ApiError`
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send {} request", what))?;

        let status = response.status();

        if status.is_success() {
            Ok(response)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            tracing::debug!("{} request failed with {}: {}", what, status, error_text);
            Err(ApiError::from_body(status, &error_text).into())
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = self.send(request, what).await?;

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }

    /// Fetch the onboarding status of the session's user
    pub async fn check_user_status(&self, session: &Session) -> Result<UserStatus> {
        tracing::debug!("Checking status for user {}", session.user_id());

        let request = self.authorized(self.client.get(self.url("/check-user-status")), session);
        self.send_json(request, "user status").await
    }

    /// Ask the backend to pick a routine for the session's user.
    ///
    /// Returns `None` when the response carries no routine name.
    pub async fn assign_routine(&self, session: &Session) -> Result<Option<Routine>> {
        tracing::debug!("Requesting automatic routine for user {}", session.user_id());

        let request = self.authorized(self.client.post(self.url("/assign-routine")), session);
        let response: RoutineResponse = self.send_json(request, "assign routine").await?;

        Ok(into_routine(response))
    }

    /// Fetch the routine already assigned to the session's user
    pub async fn fetch_user_routine(&self, session: &Session) -> Result<Option<Routine>> {
        let path = format!("/api/routines/user/{}", session.user_id());
        tracing::debug!("Fetching routine from {}", path);

        let request = self.authorized(self.client.get(self.url(&path)), session);
        let response: RoutineResponse = self.send_json(request, "routine").await?;

        Ok(into_routine(response))
    }

    /// Create a tag for `day` on `routine`.
    ///
    /// Any 2xx counts as created; an unreadable body just carries no message.
    pub async fn create_tag(
        &self,
        session: &Session,
        day: TrainingDay,
        routine: &Routine,
    ) -> Result<CreateTagResponse> {
        let body = CreateTagRequest {
            user_id: session.user_id(),
            day,
            routine: &routine.name,
        };

        tracing::debug!("Creating tag for {} ({})", day, routine.name);

        let request = self
            .authorized(self.client.post(self.url("/tag/create")), session)
            .json(&body);
        let response = self.send(request, "create tag").await?;

        let text = response.text().await.unwrap_or_default();
        Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::debug!("Ignoring unreadable create tag body: {}", e);
            CreateTagResponse::default()
        }))
    }

    /// List the tags the session's user already has
    pub async fn list_user_tags(&self, session: &Session) -> Result<Vec<Tag>> {
        let path = format!("/api/tags/user/{}", session.user_id());

        let request = self.authorized(self.client.get(self.url(&path)), session);
        let tags: Vec<Tag> = self.send_json(request, "tag list").await?;

        tracing::debug!("User {} has {} tags", session.user_id(), tags.len());
        Ok(tags)
    }

    /// Number of tags the session's user has.
    ///
    /// Only the array length matters, so entries are not decoded.
    pub async fn count_user_tags(&self, session: &Session) -> Result<usize> {
        let path = format!("/api/tags/user/{}", session.user_id());

        let request = self.authorized(self.client.get(self.url(&path)), session);
        let tags: Vec<serde_json::Value> = self.send_json(request, "tag count").await?;

        Ok(tags.len())
    }

    /// Mark onboarding as done for the session's user
    pub async fn clear_first_login(&self, session: &Session) -> Result<()> {
        let path = format!("/api/users/{}/first_login", session.user_id());

        let request = self
            .authorized(self.client.put(self.url(&path)), session)
            .json(&FirstLoginUpdate { first_login: false });
        self.send(request, "first login update").await?;

        tracing::info!("Cleared first login flag for user {}", session.user_id());
        Ok(())
    }
}

fn into_routine(response: RoutineResponse) -> Option<Routine> {
    response
        .routine_name
        .filter(|name| !name.trim().is_empty())
        .map(Routine::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let config = Config::default();
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::with_base_url("http://api.test/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/tag/create"), "http://api.test/tag/create");
    }

    #[test]
    fn test_create_tag_request_shape() {
        let body = CreateTagRequest {
            user_id: "42",
            day: TrainingDay::Wednesday,
            routine: "Cuerpo completo intermedio",
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_id": "42",
                "day": "Miercoles",
                "routine": "Cuerpo completo intermedio"
            })
        );
    }

    #[test]
    fn test_create_tag_response_message() {
        let parsed: CreateTagResponse = serde_json::from_str(r#"{"message": null}"#).unwrap();
        assert_eq!(parsed.message(), None);

        let parsed: CreateTagResponse = serde_json::from_str(r#"{"message": " "}"#).unwrap();
        assert_eq!(parsed.message(), None);

        let parsed: CreateTagResponse = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert_eq!(parsed.message(), Some("ok"));
    }

    #[test]
    fn test_empty_routine_name_is_missing() {
        assert!(into_routine(RoutineResponse { routine_name: Some("  ".into()) }).is_none());
        assert!(into_routine(RoutineResponse { routine_name: None }).is_none());
        assert_eq!(
            into_routine(RoutineResponse { routine_name: Some("Full body beginner".into()) }),
            Some(Routine::new("Full body beginner"))
        );
    }
}
