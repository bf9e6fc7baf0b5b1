//! Credential provider over an opaque token store
//!
//! The token storage subsystem is an external collaborator; this adapter
//! only classifies what it hands back. Missing record, unparseable expiry,
//! and past expiry each map to their own CredentialError kind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::confirm::errors::CredentialError;
use crate::confirm::types::Credentials;
use super::traits::CredentialProvider;

/// Raw session record as the store keeps it (expiry still a string)
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub session_token: String,
    pub user_id: String,
    pub token_expiration: String,
}

/// Opaque token storage boundary
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// None when no session has ever been stored (or it was cleared).
    async fn load_session(&self) -> Option<StoredSession>;
}

/// Credential provider that validates whatever the store returns
pub struct StoredCredentialProvider<S> {
    store: S,
}

impl<S: TokenStore> StoredCredentialProvider<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: TokenStore> CredentialProvider for StoredCredentialProvider<S> {
    async fn get_credentials(&self) -> Result<Credentials, CredentialError> {
        let session = self
            .store
            .load_session()
            .await
            .ok_or(CredentialError::Missing)?;

        if session.session_token.trim().is_empty() {
            return Err(CredentialError::Malformed("empty session token".to_string()));
        }

        let token_expiration = session
            .token_expiration
            .parse::<DateTime<Utc>>()
            .map_err(|e| {
                CredentialError::Malformed(format!(
                    "bad expiry '{}': {}",
                    session.token_expiration, e
                ))
            })?;

        let credentials = Credentials {
            session_token: session.session_token,
            user_id: session.user_id,
            token_expiration,
        };

        if credentials.is_expired(Utc::now()) {
            log::info!("Stored session for user {} is expired", credentials.user_id);
            return Err(CredentialError::Expired);
        }

        Ok(credentials)
    }
}
