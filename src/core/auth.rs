//! Authorization system for student-records
//!
//! An [`AuthProvider`] turns request headers into an [`AuthContext`], issues
//! whatever a successful login hands back (a session cookie, a token) and
//! tears it down again on logout. Credentials themselves are checked by the
//! [`RecordStore`](super::store::RecordStore) before `login` is called.

use crate::core::error::RecordError;
use async_trait::async_trait;
use axum::http::HeaderMap;

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated user
    User { username: String },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    pub fn user(username: impl Into<String>) -> Self {
        AuthContext::User {
            username: username.into(),
        }
    }

    /// Get the username if available
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthContext::User { username } => Some(username),
            AuthContext::Anonymous => None,
        }
    }
}

/// Authorization policy for the student routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),
        }
    }
}

/// What a successful login hands back to the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginGrant {
    /// Token to include in the response body
    pub token: Option<String>,

    /// Value for a `Set-Cookie` response header
    pub set_cookie: Option<String>,
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Policy applied to every `/students` route
    fn student_policy(&self) -> AuthPolicy {
        AuthPolicy::Authenticated
    }

    /// Error returned when an anonymous request hits a protected route
    fn rejection(&self) -> RecordError {
        RecordError::unauthorized("Unauthorized access. Please log in to view this resource.")
    }

    /// Extract the auth context from request headers
    ///
    /// A request without credentials is `Anonymous`. Credentials that are
    /// present but unusable may be reported as an error instead.
    async fn authorize(&self, headers: &HeaderMap) -> Result<AuthContext, RecordError>;

    /// Start an authenticated session for a user whose password was verified
    async fn login(&self, username: &str) -> Result<LoginGrant, RecordError>;

    /// End the session carried by the request, if any
    ///
    /// Returns a `Set-Cookie` value when the client-side state must be cleared.
    async fn logout(&self, headers: &HeaderMap) -> Result<Option<String>, RecordError>;
}

/// Default no-auth provider (for development)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuthProvider;

#[async_trait]
impl AuthProvider for NoAuthProvider {
    fn name(&self) -> &'static str {
        "none"
    }

    fn student_policy(&self) -> AuthPolicy {
        AuthPolicy::Public
    }

    async fn authorize(&self, _headers: &HeaderMap) -> Result<AuthContext, RecordError> {
        Ok(AuthContext::Anonymous)
    }

    async fn login(&self, _username: &str) -> Result<LoginGrant, RecordError> {
        Ok(LoginGrant::default())
    }

    async fn logout(&self, _headers: &HeaderMap) -> Result<Option<String>, RecordError> {
        Ok(None)
    }
}
