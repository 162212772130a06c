//! Screen logic as plain async state machines.
//!
//! Flows never return errors: every failure becomes a [`UiStatus::Error`]
//! and the user repeats the action to retry.

pub mod onboarding;
pub mod tag_form;

pub use onboarding::{OnboardingFlow, OnboardingPhase};
pub use tag_form::{FormPhase, TagForm};

use crate::api::ApiError;

pub const ROUTINE_NOT_FOUND: &str = "Routine not found.";
pub const SELECT_DAY_FIRST: &str = "Select a day to create the tag.";
pub const CREATE_TAG_FAILED: &str = "Could not create the tag.";
pub const TAG_CREATED: &str = "Tag created.";

/// Message shown to the user after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiStatus {
    Error(String),
    Success(String),
}

impl UiStatus {
    pub fn error(message: impl Into<String>) -> Self {
        UiStatus::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        UiStatus::Success(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            UiStatus::Error(msg) | UiStatus::Success(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UiStatus::Error(_))
    }
}

/// Screen a flow asks the front end to move to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login screen
    Login,
    /// Main dashboard
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Dashboard => "/dashboard",
        }
    }
}

/// User-facing text for a failed call: backend detail if present, else `fallback`
pub(crate) fn failure_message(err: &anyhow::Error, fallback: &str) -> String {
    err.downcast_ref::<ApiError>()
        .and_then(ApiError::detail)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use reqwest::StatusCode;

    #[test]
    fn test_failure_message_prefers_detail() {
        let err: anyhow::Error = Err::<(), _>(ApiError::from_body(
            StatusCode::CONFLICT,
            r#"{"detail": "Tag already exists"}"#,
        ))
        .context("Failed to send create tag request")
        .unwrap_err();
        assert_eq!(failure_message(&err, CREATE_TAG_FAILED), "Tag already exists");

        let err = anyhow::anyhow!("connection refused");
        assert_eq!(failure_message(&err, CREATE_TAG_FAILED), CREATE_TAG_FAILED);
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::Dashboard.path(), "/dashboard");
    }
}
