// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Register and login.
//!
//! Both operations sign a token before touching the credential store. Login
//! then checks the credential and either returns that candidate token or
//! drops it, which keeps signing failures (`encoding_error`) distinguishable
//! from credential mismatches (`invalid_credentials`).
//!
//! An unknown identity is still checked against a decoy hash so both
//! rejection paths cost one Argon2 verification.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::{
    credentials::{hash_secret, verify_secret, Credential, CredentialStore},
    token::TokenIssuer,
    AuthError,
};

/// Secret hashed once to produce the decoy hash.
const DECOY_SECRET: &str = "decoy-secret-never-registered";

#[derive(Clone)]
pub struct AuthService {
    tokens: Arc<TokenIssuer>,
    credentials: Arc<dyn CredentialStore>,
    decoy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(tokens: Arc<TokenIssuer>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            tokens,
            credentials,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Store a credential for `identity` and return a token for it.
    ///
    /// Re-registering an identity overwrites the stored secret.
    pub async fn register(&self, identity: &str, secret: &str) -> Result<String, AuthError> {
        let token = self.tokens.issue(identity)?;
        let secret_hash = hash_secret(secret).await?;

        self.credentials
            .put(Credential {
                identity: identity.to_owned(),
                secret_hash,
            })
            .await;

        info!(identity = %identity, "credential registered");
        Ok(token)
    }

    /// Exchange a matching identity and secret for a token.
    pub async fn login(&self, identity: &str, secret: &str) -> Result<String, AuthError> {
        let candidate = self.tokens.issue(identity)?;

        let Some(credential) = self.credentials.get(identity).await else {
            let decoy = self.decoy_hash().await?;
            // Outcome ignored: the identity is unknown either way.
            let _ = verify_secret(secret, decoy).await?;
            warn!(identity = %identity, "login rejected: unknown identity");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_secret(secret, &credential.secret_hash).await? {
            warn!(identity = %identity, "login rejected: secret mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        info!(identity = %identity, "login succeeded");
        Ok(candidate)
    }

    async fn decoy_hash(&self) -> Result<&str, AuthError> {
        self.decoy_hash
            .get_or_try_init(|| hash_secret(DECOY_SECRET))
            .await
            .map(String::as_str)
    }
}
