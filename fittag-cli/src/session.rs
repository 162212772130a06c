use std::fmt;

/// Authenticated user context passed into every flow.
///
/// Read-only here; tokens are issued by the backend's login flow and
/// stored with `fittag session set`.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user_id: String,
}

impl Session {
    /// Build a session; both parts must be non-empty
    pub fn new(token: impl Into<String>, user_id: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        let user_id = user_id.into().trim().to_string();

        if token.is_empty() || user_id.is_empty() {
            return None;
        }

        Some(Self { token, user_id })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Keep the token out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_requires_both_parts() {
        assert!(Session::new("", "1").is_none());
        assert!(Session::new("tok", "  ").is_none());
        assert!(Session::new("tok", "1").is_some());
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new("secret-token", "7").unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("\"7\""));
        assert_eq!(session.bearer(), "Bearer secret-token");
    }
}
