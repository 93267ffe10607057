//! Session store: the console's single piece of shared mutable state.
//!
//! A session is a bearer token. It is adopted from durable storage at
//! startup without asking the server, replaced on a successful login and
//! cleared on logout. An expired token is only discovered when an
//! authenticated request fails.

mod store;

use std::fmt;

pub use store::{FileTokenStore, MemoryTokenStore};

use crate::api::ApiClient;
use crate::error::{ApiError, ApiResult};

/// Durable storage for the session token.
///
/// Exactly one token is stored, as plain text. Implementations must be cheap
/// to clone; clones share the same underlying key.
pub trait TokenStore: Clone + Send + Sync + 'static {
    fn load_token(&self) -> ApiResult<Option<String>>;
    fn save_token(&self, token: &str) -> ApiResult<()>;
    fn clear_token(&self) -> ApiResult<()>;
}

/// Owns the in-memory session and the API client that shares its token store.
pub struct SessionStore<S: TokenStore> {
    api: ApiClient<S>,
    token: Option<String>,
}

impl<S: TokenStore> SessionStore<S> {
    /// Starts a session from whatever token was persisted previously.
    ///
    /// A storage read failure is logged and leaves the session empty.
    pub fn restore(api: ApiClient<S>) -> Self {
        let token = match api.token_store().load_token() {
            Ok(token) => token.filter(|token| !token.trim().is_empty()),
            Err(error) => {
                tracing::warn!("Failed to read persisted session token: {}", error);
                None
            }
        };
        if token.is_some() {
            tracing::debug!("Adopted persisted session token");
        }
        Self { api, token }
    }

    /// True iff a token is currently held.
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub const fn api(&self) -> &ApiClient<S> {
        &self.api
    }

    /// Signs in and reports success.
    ///
    /// Any failure (transport, rejected credentials, missing token, storage)
    /// returns `false` and leaves the prior session untouched.
    pub async fn login(&mut self, username: &str, password: &str) -> bool {
        match self.try_login(username, password).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!("Login failed: {}", error);
                false
            }
        }
    }

    /// Signs in, returning the reason on failure.
    pub async fn try_login(&mut self, username: &str, password: &str) -> ApiResult<()> {
        let response = self.api.login(username, password).await?;
        let token = response
            .token
            .filter(|token| !token.trim().is_empty())
            .ok_or(ApiError::MissingToken)?;

        self.api.token_store().save_token(&token)?;
        self.token = Some(token);
        tracing::info!("Session established for {}", username);
        Ok(())
    }

    /// Clears the session locally. No server call is made.
    pub fn logout(&mut self) {
        self.token = None;
        if let Err(error) = self.api.token_store().clear_token() {
            tracing::warn!("Failed to clear persisted session token: {}", error);
        }
        tracing::info!("Session cleared");
    }

    /// Creates an account. Session state is unchanged.
    pub async fn register(&self, username: &str, password: &str) -> ApiResult<serde_json::Value> {
        self.api.register(username, password).await
    }
}

impl<S: TokenStore> fmt::Debug for SessionStore<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionStore")
            .field("base_url", &self.api.base_url())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(store: MemoryTokenStore) -> ApiClient<MemoryTokenStore> {
        ApiClient::new("http://localhost:3000/api", store).unwrap()
    }

    #[test]
    fn restore_adopts_persisted_token_without_validation() {
        let store = MemoryTokenStore::with_token("persisted-token");
        let session = SessionStore::restore(client(store));
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("persisted-token"));
    }

    #[test]
    fn restore_without_token_is_unauthenticated() {
        let session = SessionStore::restore(client(MemoryTokenStore::default()));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn restore_ignores_blank_token() {
        let session = SessionStore::restore(client(MemoryTokenStore::with_token("   ")));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_memory_and_storage() {
        let store = MemoryTokenStore::with_token("persisted-token");
        let mut session = SessionStore::restore(client(store.clone()));
        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(store.load_token().unwrap(), None);

        session.logout();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn debug_redacts_token() {
        let session = SessionStore::restore(client(MemoryTokenStore::with_token("secret-token")));
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
