//! Authentication providers selectable at startup

pub mod session;
pub mod token;

pub use session::SessionAuthProvider;
pub use token::TokenAuthProvider;

use crate::config::{AuthConfig, AuthMode};
use crate::core::auth::{AuthProvider, NoAuthProvider};
use chrono::Duration;
use std::sync::Arc;

/// Build the provider selected by `auth.mode`
pub fn provider_from_config(config: &AuthConfig) -> Arc<dyn AuthProvider> {
    let ttl = Duration::minutes(config.ttl_minutes);
    match config.mode {
        AuthMode::None => Arc::new(NoAuthProvider),
        AuthMode::Session => Arc::new(SessionAuthProvider::new(&config.cookie_name, ttl)),
        AuthMode::Token => Arc::new(TokenAuthProvider::new(&config.secret, ttl)),
    }
}
