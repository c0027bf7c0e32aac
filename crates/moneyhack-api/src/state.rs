//! Application state shared across API handlers

use std::sync::Arc;
use std::time::Instant;

use moneyhack_client::MoneyHackClient;
use moneyhack_core::types::EvmAddress;
use moneyhack_core::{AppConfig, BackendConfig};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur in the API layer
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid wallet address format
    #[error("Invalid wallet address: {reason}")]
    InvalidAddress { reason: String },

    /// Empty auth token on connect
    #[error("Missing auth token")]
    MissingAuthToken,
}

/// State representing a connected wallet session.
///
/// The auth token is the wallet-signature credential the frontend obtained
/// at sign-in; it is forwarded to the backend on every authenticated call.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// The wallet's 0x-prefixed EVM address
    pub address: EvmAddress,
    /// Signature token sent as `Authorization: Signature <token>`
    pub auth_token: String,
    /// When the session was established
    pub connected_at: Instant,
}

impl SessionState {
    pub fn new(address: EvmAddress, auth_token: String) -> Self {
        Self {
            address,
            auth_token,
            connected_at: Instant::now(),
        }
    }
}

/// Validate the 0x + 40 hex digit address shape.
///
/// Format validation only; checksums are not verified (the backend
/// rejects addresses it does not recognize anyway).
fn validate_evm_address(address: &EvmAddress) -> Result<(), ApiError> {
    if !address.is_well_formed() {
        return Err(ApiError::InvalidAddress {
            reason: format!(
                "'{}' is not a 0x-prefixed 20-byte hex address",
                address.as_str()
            ),
        });
    }
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    client: RwLock<Option<Arc<MoneyHackClient>>>,
    session: RwLock<Option<SessionState>>,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                client: RwLock::new(None),
                session: RwLock::new(None),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Update backend configuration and drop the cached client
    pub async fn set_backend_config(&self, backend: BackendConfig) {
        let mut config = self.inner.config.write().await;
        config.backend = backend;

        let mut client = self.inner.client.write().await;
        *client = None;
    }

    /// Get or create the backend client
    pub async fn client(&self) -> Option<Arc<MoneyHackClient>> {
        {
            let client = self.inner.client.read().await;
            if client.is_some() {
                return client.clone();
            }
        }

        let config = self.inner.config.read().await;
        match MoneyHackClient::new(config.backend.url.clone()) {
            Ok(client) => {
                let client = Arc::new(client);
                let mut cached = self.inner.client.write().await;
                *cached = Some(client.clone());
                Some(client)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create backend client for {}: {}",
                    config.backend.url,
                    e
                );
                None
            }
        }
    }

    /// Get current wallet session
    pub async fn session(&self) -> Option<SessionState> {
        self.inner.session.read().await.clone()
    }

    /// Establish a wallet session with address validation.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidAddress` if the address format is invalid
    /// and `ApiError::MissingAuthToken` if the token is empty.
    pub async fn set_session(&self, address: EvmAddress, auth_token: String) -> Result<(), ApiError> {
        validate_evm_address(&address)?;
        if auth_token.trim().is_empty() {
            return Err(ApiError::MissingAuthToken);
        }
        let mut session = self.inner.session.write().await;
        *session = Some(SessionState::new(address, auth_token));
        Ok(())
    }

    /// Disconnect the wallet (clear session state)
    pub async fn clear_session(&self) {
        let mut session = self.inner.session.write().await;
        *session = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_requires_well_formed_address() {
        let state = AppState::new();
        let result = state
            .set_session(EvmAddress::new("not-an-address"), "token".to_string())
            .await;
        assert!(matches!(result, Err(ApiError::InvalidAddress { .. })));
        assert!(state.session().await.is_none());
    }

    #[tokio::test]
    async fn test_session_requires_auth_token() {
        let state = AppState::new();
        let address = EvmAddress::new("0x1111111111111111111111111111111111111111");
        let result = state.set_session(address, "  ".to_string()).await;
        assert!(matches!(result, Err(ApiError::MissingAuthToken)));
    }

    #[tokio::test]
    async fn test_set_backend_config_replaces_client() {
        let state = AppState::new();
        let first = state.client().await.unwrap();
        assert_eq!(first.base_url(), "https://moneyhack-api.kibalabs.com");

        state
            .set_backend_config(BackendConfig {
                url: "http://localhost:5000".to_string(),
            })
            .await;
        let second = state.client().await.unwrap();
        assert_eq!(second.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let state = AppState::new();
        let address = EvmAddress::new("0x1111111111111111111111111111111111111111");
        state
            .set_session(address.clone(), "token".to_string())
            .await
            .unwrap();

        let session = state.session().await.unwrap();
        assert_eq!(session.address, address);
        assert_eq!(session.auth_token, "token");

        state.clear_session().await;
        assert!(state.session().await.is_none());
    }
}
