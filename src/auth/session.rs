//! Cookie-backed server-side sessions
//!
//! A login creates a random session id, stores it in an in-memory table with
//! an expiry and hands it to the client as an `HttpOnly` cookie. Sessions are
//! not shared between processes.

use crate::core::auth::{AuthContext, AuthProvider, LoginGrant};
use crate::core::error::RecordError;
use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub const DEFAULT_COOKIE_NAME: &str = "student_app_session";

#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: DateTime<Utc>,
}

/// Session auth provider with an in-memory session table
#[derive(Clone)]
pub struct SessionAuthProvider {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    cookie_name: String,
    ttl: Duration,
}

impl Default for SessionAuthProvider {
    fn default() -> Self {
        Self::new(DEFAULT_COOKIE_NAME, Duration::minutes(30))
    }
}

impl SessionAuthProvider {
    pub fn new(cookie_name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            cookie_name: cookie_name.into(),
            ttl,
        }
    }

    /// Number of live (unexpired) sessions
    pub fn active_sessions(&self) -> usize {
        let now = Utc::now();
        self.sessions
            .read()
            .map(|sessions| sessions.values().filter(|s| s.expires_at > now).count())
            .unwrap_or(0)
    }

    /// Find this provider's cookie among the request's `Cookie` headers
    fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.to_string())
    }

    fn cookie(&self, value: &str, max_age: i64) -> String {
        format!(
            "{}={}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
            self.cookie_name, value, max_age
        )
    }
}

#[async_trait]
impl AuthProvider for SessionAuthProvider {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn authorize(&self, headers: &HeaderMap) -> Result<AuthContext, RecordError> {
        let Some(id) = self.session_id(headers) else {
            return Ok(AuthContext::Anonymous);
        };

        let now = Utc::now();
        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let expired = match sessions.get(&id) {
            Some(session) if session.expires_at > now => {
                return Ok(AuthContext::user(&session.username));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            sessions.remove(&id);
        }

        Ok(AuthContext::Anonymous)
    }

    async fn login(&self, username: &str) -> Result<LoginGrant, RecordError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut sessions = self
            .sessions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        sessions.retain(|_, session| session.expires_at > now);
        sessions.insert(
            id.clone(),
            Session {
                username: username.to_string(),
                expires_at: now + self.ttl,
            },
        );

        Ok(LoginGrant {
            token: None,
            set_cookie: Some(self.cookie(&id, self.ttl.num_seconds())),
        })
    }

    async fn logout(&self, headers: &HeaderMap) -> Result<Option<String>, RecordError> {
        if let Some(id) = self.session_id(headers) {
            self.sessions
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
                .remove(&id);
        }

        Ok(Some(self.cookie("", 0)))
    }
}
