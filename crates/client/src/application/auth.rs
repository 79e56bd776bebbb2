//! Sign-in session for the identity provider redirect flow.
//!
//! The session is an explicit value passed through context; it owns the
//! current [`AuthState`], persists it through the platform storage, and hands
//! the access token to the HTTP adapter.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::ports::outbound::{storage_keys, AccessTokenSource, StorageProvider};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Sign-in is not configured")]
    NotConfigured,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Sign-in was refused: {0}")]
    Denied(String),

    #[error("Sign-in response did not contain an access token")]
    MissingToken,

    #[error("Sign-in response does not belong to this session")]
    StateMismatch,
}

/// Identity provider endpoints for the implicit-grant redirect flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthConfig {
    pub authorize_url: Option<String>,
    pub client_id: Option<String>,
    pub redirect_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn { user: String, access_token: String },
}

impl AuthState {
    pub fn user(&self) -> Option<&str> {
        match self {
            AuthState::SignedIn { user, .. } => Some(user.as_str()),
            AuthState::SignedOut => None,
        }
    }
}

#[derive(Clone)]
pub struct AuthSession {
    config: AuthConfig,
    storage: Arc<dyn StorageProvider>,
    state: Arc<RwLock<AuthState>>,
}

impl AuthSession {
    /// Restore whatever session was persisted last.
    pub fn restore(config: AuthConfig, storage: Arc<dyn StorageProvider>) -> Self {
        let state = storage
            .load(storage_keys::AUTH_SESSION)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    tracing::warn!("Discarding unreadable auth session: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        Self {
            config,
            storage,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn state(&self) -> AuthState {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set_state(&self, state: AuthState) {
        match self.state.write() {
            Ok(mut guard) => *guard = state,
            Err(poisoned) => *poisoned.into_inner() = state,
        }
    }

    /// Build the provider redirect. `state` is echoed back and checked on return.
    pub fn sign_in_url(&self, state: &str) -> Result<Url, AuthError> {
        let (Some(authorize_url), Some(client_id), Some(redirect_uri)) = (
            self.config.authorize_url.as_deref(),
            self.config.client_id.as_deref(),
            self.config.redirect_uri.as_deref(),
        ) else {
            return Err(AuthError::NotConfigured);
        };

        let mut url =
            Url::parse(authorize_url).map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("response_type", "token")
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state);

        self.storage.save(storage_keys::AUTH_PENDING_STATE, state);
        Ok(url)
    }

    /// Read the token out of the provider's callback URL and sign in.
    pub fn complete_sign_in(&self, callback_url: &str) -> Result<AuthState, AuthError> {
        let url = Url::parse(callback_url).map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
        let mut params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        if let Some(fragment) = url.fragment() {
            params.extend(url::form_urlencoded::parse(fragment.as_bytes()).into_owned());
        }
        let param = |name: &str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };

        if let Some(error) = param("error") {
            return Err(AuthError::Denied(error));
        }

        let pending = self.storage.load(storage_keys::AUTH_PENDING_STATE);
        if pending.is_some() && pending != param("state") {
            return Err(AuthError::StateMismatch);
        }

        let access_token = param("access_token").ok_or(AuthError::MissingToken)?;
        let user = param("user").unwrap_or_else(|| "player".to_string());
        let state = AuthState::SignedIn {
            user,
            access_token,
        };

        self.storage.remove(storage_keys::AUTH_PENDING_STATE);
        self.persist(&state);
        self.set_state(state.clone());
        tracing::info!(user = ?state.user(), "Signed in");
        Ok(state)
    }

    pub fn sign_out(&self) {
        self.set_state(AuthState::SignedOut);
        self.storage.remove(storage_keys::AUTH_SESSION);
        tracing::info!("Signed out");
    }

    fn persist(&self, state: &AuthState) {
        match serde_json::to_string(state) {
            Ok(raw) => self.storage.save(storage_keys::AUTH_SESSION, &raw),
            Err(e) => tracing::error!("Failed to serialize auth session: {}", e),
        }
    }
}

impl AccessTokenSource for AuthSession {
    fn access_token(&self) -> Option<String> {
        match self.state() {
            AuthState::SignedIn { access_token, .. } => Some(access_token),
            AuthState::SignedOut => None,
        }
    }
}
