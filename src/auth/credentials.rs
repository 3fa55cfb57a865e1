// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential storage and secret hashing.
//!
//! ## Stores
//!
//! - [`SingleCredentialStore`] keeps exactly one credential. Registering
//!   replaces it, so only the most recently registered identity can log in.
//! - [`InMemoryCredentialStore`] keeps one credential per identity.
//!
//! Both serialize writers behind a `tokio::sync::RwLock`, so a reader sees
//! either the previous credential or the new one, never a mix.
//!
//! ## Hashing
//!
//! Secrets are hashed with Argon2id and a random salt into a PHC string.
//! Hashing runs on the blocking pool to keep request workers responsive.

use std::{collections::HashMap, str::FromStr, sync::Arc};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::AuthError;

/// A registered identity and its hashed secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub identity: String,
    /// Argon2 PHC string, never the plaintext secret
    pub secret_hash: String,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up the credential registered for `identity`.
    async fn get(&self, identity: &str) -> Option<Credential>;

    /// Store `credential`, replacing any previous one it supersedes.
    async fn put(&self, credential: Credential);
}

/// Single-slot store: at most one credential exists at a time.
#[derive(Default)]
pub struct SingleCredentialStore {
    slot: RwLock<Option<Credential>>,
}

impl SingleCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for SingleCredentialStore {
    async fn get(&self, identity: &str) -> Option<Credential> {
        self.slot
            .read()
            .await
            .as_ref()
            .filter(|credential| credential.identity == identity)
            .cloned()
    }

    async fn put(&self, credential: Credential) {
        *self.slot.write().await = Some(credential);
    }
}

/// Map-backed store keyed by identity.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    credentials: RwLock<HashMap<String, Credential>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn get(&self, identity: &str) -> Option<Credential> {
        self.credentials.read().await.get(identity).cloned()
    }

    async fn put(&self, credential: Credential) {
        self.credentials
            .write()
            .await
            .insert(credential.identity.clone(), credential);
    }
}

/// Which credential store the gateway runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CredentialStoreKind {
    #[default]
    Single,
    Multi,
}

impl CredentialStoreKind {
    pub fn build(self) -> Arc<dyn CredentialStore> {
        match self {
            CredentialStoreKind::Single => Arc::new(SingleCredentialStore::new()),
            CredentialStoreKind::Multi => Arc::new(InMemoryCredentialStore::new()),
        }
    }
}

impl FromStr for CredentialStoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(CredentialStoreKind::Single),
            "multi" => Ok(CredentialStoreKind::Multi),
            other => Err(format!("unknown credential store '{other}' (expected 'single' or 'multi')")),
        }
    }
}

/// Hash `secret` with a fresh salt.
pub async fn hash_secret(secret: &str) -> Result<String, AuthError> {
    let secret = secret.to_owned();
    tokio::task::spawn_blocking(move || hash_secret_blocking(&secret))
        .await
        .map_err(|e| AuthError::Encoding(format!("hashing task failed: {e}")))?
}

/// Check `secret` against a stored hash. Unparseable hashes never match.
pub async fn verify_secret(secret: &str, secret_hash: &str) -> Result<bool, AuthError> {
    let secret = secret.to_owned();
    let secret_hash = secret_hash.to_owned();
    tokio::task::spawn_blocking(move || verify_secret_blocking(&secret, &secret_hash))
        .await
        .map_err(|e| AuthError::Encoding(format!("verification task failed: {e}")))
}

fn hash_secret_blocking(secret: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Encoding(format!("failed to hash secret: {e}")))
}

fn verify_secret_blocking(secret: &str, secret_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(secret_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}
